//! Display shaping — turns parsed, ranked records into what the UI renders.

use serde::Serialize;

use crate::creative::ranking::{format_score, run_ab_simulation, ScoreSource};
use crate::models::caption::{CaptionVariation, IdeationResult};
use crate::models::localization::{Language, LocalizationResult};
use crate::models::style::Style;

/// One ranked suggestion card ("Option A", "Option B", ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedOption {
    pub label: String,
    pub caption: String,
    pub score: Option<f64>,
    pub score_display: String,
    pub why: String,
    pub recommended: bool,
}

/// Creative Assistant tab result.
///
/// With more than one scored variation the UI shows ranked `options`;
/// otherwise it shows `headline`, the first idea.
#[derive(Debug, Clone, Serialize)]
pub struct BrainstormView {
    pub ideas: Vec<String>,
    pub options: Vec<RankedOption>,
    pub headline: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// The user supplied a caption; it was scored against the image.
    Analysis,
    /// No caption; the model proposed one from the image alone.
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedView {
    pub language: Language,
    pub source_caption: String,
    pub localized_caption: String,
    pub notes: String,
}

impl LocalizedView {
    pub fn new(language: Language, source_caption: &str, result: LocalizationResult) -> Self {
        Self {
            language,
            source_caption: source_caption.to_string(),
            localized_caption: result.localized_caption,
            notes: result.notes,
        }
    }
}

/// Image/Poster Analysis tab result.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub mode: AnalysisMode,
    /// The submitted caption (analysis) or the suggested one (suggestion).
    pub caption: String,
    pub engagement_score: Option<f64>,
    pub engagement_display: String,
    pub rationale: String,
    pub brand_voice: String,
    pub compliance: String,
    pub options: Vec<RankedOption>,
    pub localization: Option<LocalizedView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionsView {
    pub styles: Vec<Style>,
    pub languages: Vec<Language>,
}

impl Default for OptionsView {
    fn default() -> Self {
        Self {
            styles: Style::ALL.to_vec(),
            languages: Language::ALL.to_vec(),
        }
    }
}

/// "Option A" .. "Option Z", then numbered.
pub fn option_label(idx: usize) -> String {
    match u8::try_from(idx) {
        Ok(n) if n < 26 => format!("Option {}", char::from(b'A' + n)),
        _ => format!("Option {}", idx + 1),
    }
}

/// Runs the A/B simulation once and labels the results in order.
pub fn ranked_options(
    variations: Vec<CaptionVariation>,
    scores: &dyn ScoreSource,
) -> Vec<RankedOption> {
    run_ab_simulation(variations, scores)
        .into_iter()
        .enumerate()
        .map(|(idx, v)| RankedOption {
            label: option_label(idx),
            score_display: format_score(v.score),
            caption: v.caption,
            score: v.score,
            why: v.why,
            recommended: v.recommended,
        })
        .collect()
}

pub fn brainstorm_view(result: IdeationResult, scores: &dyn ScoreSource) -> BrainstormView {
    if result.variations.len() > 1 {
        BrainstormView {
            options: ranked_options(result.variations, scores),
            ideas: result.ideas,
            headline: None,
        }
    } else {
        BrainstormView {
            headline: result.ideas.first().cloned(),
            ideas: result.ideas,
            options: Vec::new(),
        }
    }
}
