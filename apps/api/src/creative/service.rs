//! Creative assistant pipeline — compose prompt → call model → parse → rank → shape.
//!
//! The four model-facing entry points return parsed records; `analyze_content`
//! is the poster/image tab flow built on top of them.

use tracing::{debug, info, warn};

use crate::creative::composer::{
    compose_caption_analysis, compose_ideation, compose_image_suggestion, compose_localization,
};
use crate::creative::parser::{
    parse_caption_analysis, parse_ideation, parse_image_suggestion, parse_localization,
};
use crate::creative::ranking::{format_score, ScoreSource};
use crate::creative::views::{ranked_options, AnalysisMode, AnalysisView, LocalizedView};
use crate::errors::AppError;
use crate::llm_client::{ImagePayload, ModelGateway};
use crate::models::caption::{CaptionAnalysis, IdeationResult, ImageSuggestion};
use crate::models::localization::{Language, LocalizationResult};
use crate::models::style::Style;

/// Brainstorms campaign ideas. The idea count comes from the first number in `prompt`.
pub async fn brainstorm(
    gateway: &dyn ModelGateway,
    prompt: &str,
    style: Style,
) -> Result<IdeationResult, AppError> {
    let composed = compose_ideation(prompt, style)?;
    info!("Brainstorming ideas (style={style}, model={})", gateway.model());

    let text = gateway.invoke(&composed, None).await?;
    let result = parse_ideation(&text);
    debug!(
        "Parsed {} ideas, {} scored variations",
        result.ideas.len(),
        result.variations.len()
    );
    if result.ideas.is_empty() {
        warn!("Ideation response contained no recognisable ideas");
    }
    Ok(result)
}

/// Scores a user caption against the uploaded image and collects alternates.
pub async fn analyze_caption(
    gateway: &dyn ModelGateway,
    image: &ImagePayload,
    caption: &str,
) -> Result<CaptionAnalysis, AppError> {
    let composed = compose_caption_analysis(caption)?;
    info!("Analyzing caption against {} image", image.mime().as_str());

    let text = gateway.invoke(&composed, Some(image)).await?;
    let analysis = parse_caption_analysis(&text);
    if analysis.engagement_score.is_none() {
        warn!("Caption analysis response had no usable engagement score");
    }
    Ok(analysis)
}

/// Asks the model for the best caption for an image, plus alternates.
pub async fn suggest_from_image(
    gateway: &dyn ModelGateway,
    image: &ImagePayload,
) -> Result<ImageSuggestion, AppError> {
    let composed = compose_image_suggestion()?;
    info!("Suggesting captions for {} image", image.mime().as_str());

    let text = gateway.invoke(&composed, Some(image)).await?;
    let suggestion = parse_image_suggestion(&text);
    if suggestion.caption.is_empty() {
        warn!("Image suggestion response had no Caption line");
    }
    Ok(suggestion)
}

/// Translates and culturally adapts a caption. English returns the caption unchanged.
pub async fn localize(
    gateway: &dyn ModelGateway,
    caption: &str,
    language: Language,
) -> Result<LocalizationResult, AppError> {
    if language.is_identity() {
        return Ok(LocalizationResult {
            localized_caption: caption.to_string(),
            notes: String::new(),
        });
    }

    let composed = compose_localization(caption, language)?;
    info!("Localizing caption into {language}");

    let text = gateway.invoke(&composed, None).await?;
    Ok(parse_localization(&text))
}

/// Poster/image tab input.
#[derive(Debug, Clone)]
pub struct ContentRequest {
    pub image: ImagePayload,
    /// Blank or missing switches to suggestion mode.
    pub caption: Option<String>,
    pub language: Language,
}

/// Analyzes (or, without a caption, suggests) captions for an image, ranks the
/// alternates and localizes the lead caption when a non-English language is chosen.
pub async fn analyze_content(
    gateway: &dyn ModelGateway,
    scores: &dyn ScoreSource,
    request: ContentRequest,
) -> Result<AnalysisView, AppError> {
    let submitted = request
        .caption
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let (mode, caption, analysis, localize_target) = match submitted {
        Some(caption) => {
            let analysis = analyze_caption(gateway, &request.image, caption).await?;
            // Localize the first alternate; fall back to the submitted caption.
            let target = analysis
                .caption_variations
                .first()
                .map(|v| v.caption.clone())
                .unwrap_or_else(|| caption.to_string());
            (AnalysisMode::Analysis, caption.to_string(), analysis, Some(target))
        }
        None => {
            let suggestion = suggest_from_image(gateway, &request.image).await?;
            let target = Some(suggestion.caption.clone())
                .filter(|c| !c.is_empty())
                .or_else(|| {
                    suggestion
                        .analysis
                        .caption_variations
                        .first()
                        .map(|v| v.caption.clone())
                });
            (
                AnalysisMode::Suggestion,
                suggestion.caption,
                suggestion.analysis,
                target,
            )
        }
    };

    let localization = match (request.language.is_identity(), localize_target) {
        (true, _) => None,
        (false, Some(target)) => {
            let result = localize(gateway, &target, request.language).await?;
            Some(LocalizedView::new(request.language, &target, result))
        }
        (false, None) => {
            warn!("Nothing to localize: the model suggested no caption");
            None
        }
    };

    Ok(AnalysisView {
        mode,
        caption,
        engagement_score: analysis.engagement_score,
        engagement_display: format_score(analysis.engagement_score),
        rationale: analysis.rationale,
        brand_voice: analysis.brand_voice,
        compliance: analysis.compliance,
        options: ranked_options(analysis.caption_variations, scores),
        localization,
    })
}
