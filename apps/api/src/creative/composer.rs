//! Prompt composer — fills named templates with request parameters.
//!
//! Substituted values are inserted verbatim and never re-scanned, so user text
//! containing braces cannot inject placeholders.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::warn;

use crate::creative::prompts::{
    CAPTION_ANALYSIS_TEMPLATE, IDEATION_TEMPLATE, IMAGE_SUGGESTION_TEMPLATE,
    LOCALIZATION_TEMPLATE,
};
use crate::models::localization::Language;
use crate::models::style::Style;

/// Idea count used when the brainstorm request names no number.
pub const DEFAULT_IDEA_COUNT: u32 = 3;

/// Counts above this are still requested verbatim but logged, since they usually
/// come from a number inside the topic ("summer2024") rather than a real count.
pub const LARGE_IDEA_COUNT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    Ideation,
    CaptionAnalysis,
    ImageSuggestion,
    Localization,
}

impl PromptTemplate {
    pub fn name(&self) -> &'static str {
        match self {
            PromptTemplate::Ideation => "ideation",
            PromptTemplate::CaptionAnalysis => "caption_analysis",
            PromptTemplate::ImageSuggestion => "image_suggestion",
            PromptTemplate::Localization => "localization",
        }
    }

    fn text(&self) -> &'static str {
        match self {
            PromptTemplate::Ideation => IDEATION_TEMPLATE,
            PromptTemplate::CaptionAnalysis => CAPTION_ANALYSIS_TEMPLATE,
            PromptTemplate::ImageSuggestion => IMAGE_SUGGESTION_TEMPLATE,
            PromptTemplate::Localization => LOCALIZATION_TEMPLATE,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Prompt template '{template}' has no value for placeholder '{parameter}'")]
pub struct MissingParameterError {
    pub template: &'static str,
    pub parameter: String,
}

/// Named values for one prompt. Scoped to a single request.
#[derive(Debug, Clone, Default)]
pub struct PromptParameters(BTreeMap<String, String>);

impl PromptParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Substitutes every `{name}` placeholder in `template`.
/// Braces that do not enclose an identifier are copied through untouched.
pub fn compose(
    template: PromptTemplate,
    params: &PromptParameters,
) -> Result<String, MissingParameterError> {
    let text = template.text();
    let mut out = String::with_capacity(text.len() + 128);
    let mut rest = text;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) if is_placeholder_name(&after[..end]) => {
                let name = &after[..end];
                let value = params.get(name).ok_or_else(|| MissingParameterError {
                    template: template.name(),
                    parameter: name.to_string(),
                })?;
                out.push_str(value);
                rest = &after[end + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Ok(out)
}

fn is_placeholder_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns the first integer literal in `user_prompt`, or `DEFAULT_IDEA_COUNT`.
///
/// "Give me 5 taglines" asks for 5 ideas. A number too large for `u32` falls back
/// to the default.
pub fn extract_num_ideas(user_prompt: &str) -> u32 {
    let Some(start) = user_prompt.find(|c: char| c.is_ascii_digit()) else {
        return DEFAULT_IDEA_COUNT;
    };
    let digits = &user_prompt[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().unwrap_or(DEFAULT_IDEA_COUNT)
}

pub fn compose_ideation(user_prompt: &str, style: Style) -> Result<String, MissingParameterError> {
    let num = extract_num_ideas(user_prompt);
    if num > LARGE_IDEA_COUNT {
        warn!("Requesting {num} ideas; the count was read from the prompt text");
    }
    let params = PromptParameters::new()
        .with("prompt", user_prompt)
        .with("style", style)
        .with("num", num);
    compose(PromptTemplate::Ideation, &params)
}

pub fn compose_caption_analysis(caption: &str) -> Result<String, MissingParameterError> {
    compose(
        PromptTemplate::CaptionAnalysis,
        &PromptParameters::new().with("caption", caption),
    )
}

pub fn compose_image_suggestion() -> Result<String, MissingParameterError> {
    compose(PromptTemplate::ImageSuggestion, &PromptParameters::new())
}

pub fn compose_localization(
    caption: &str,
    target_language: Language,
) -> Result<String, MissingParameterError> {
    let params = PromptParameters::new()
        .with("caption", caption)
        .with("target_language", target_language);
    compose(PromptTemplate::Localization, &params)
}
