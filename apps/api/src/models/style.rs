use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Creative style requested for brainstorming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Style {
    #[default]
    Default,
    Witty,
    Exciting,
    Responsible,
    Luxury,
    Fun,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Style::Default,
        Style::Witty,
        Style::Exciting,
        Style::Responsible,
        Style::Luxury,
        Style::Fun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Default => "Default",
            Style::Witty => "Witty",
            Style::Exciting => "Exciting",
            Style::Responsible => "Responsible",
            Style::Luxury => "Luxury",
            Style::Fun => "Fun",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Style::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown style '{s}'"))
    }
}
