use serde::{Deserialize, Serialize};

/// One candidate caption with its (possibly synthetic) engagement score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptionVariation {
    pub caption: String,
    /// 0.0 – 10.0. `None` until the model supplies one or the A/B simulation fills it.
    pub score: Option<f64>,
    pub why: String,
    pub recommended: bool,
}

impl CaptionVariation {
    /// A bare alternate caption as listed by the analysis prompts: no score, no rationale.
    pub fn unscored(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            ..Self::default()
        }
    }
}

/// Parsed brainstorm response.
///
/// Every variation's caption also appears in `ideas`; plain ideas without
/// metadata have no variation, so `ideas.len() >= variations.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeationResult {
    pub ideas: Vec<String>,
    pub variations: Vec<CaptionVariation>,
}

/// Parsed caption-analysis response (also the body of an image suggestion).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptionAnalysis {
    pub engagement_score: Option<f64>,
    /// The `Why:` line explaining the engagement score.
    pub rationale: String,
    pub brand_voice: String,
    pub compliance: String,
    pub caption_variations: Vec<CaptionVariation>,
}

/// Parsed image-only suggestion: the best caption plus its analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSuggestion {
    pub caption: String,
    #[serde(flatten)]
    pub analysis: CaptionAnalysis,
}
