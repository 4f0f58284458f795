//! Axum route handlers for the creative assistant API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use crate::creative::service::{analyze_content, brainstorm, localize, ContentRequest};
use crate::creative::views::{brainstorm_view, AnalysisView, BrainstormView, OptionsView};
use crate::errors::AppError;
use crate::llm_client::ImagePayload;
use crate::models::localization::{Language, LocalizationResult};
use crate::models::style::Style;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BrainstormRequest {
    pub prompt: String,
    #[serde(default)]
    pub style: Style,
}

#[derive(Debug, Deserialize)]
pub struct LocalizeRequest {
    pub caption: String,
    pub target_language: Language,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
///
/// Styles and localization languages the UI offers in its dropdowns.
pub async fn handle_options() -> Json<OptionsView> {
    Json(OptionsView::default())
}

/// POST /api/v1/ideas
///
/// Brainstorms slogans/taglines and ranks them when more than one comes back scored.
pub async fn handle_brainstorm(
    State(state): State<AppState>,
    Json(request): Json<BrainstormRequest>,
) -> Result<Json<BrainstormView>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter your idea prompt to get started.".to_string(),
        ));
    }

    let result = brainstorm(state.gateway.as_ref(), &request.prompt, request.style).await?;

    Ok(Json(brainstorm_view(result, state.scores.as_ref())))
}

/// POST /api/v1/captions/analyze
///
/// Multipart fields: `image` (JPG/PNG, required), `caption` (optional),
/// `language` (optional, defaults to English).
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisView>, AppError> {
    let mut image = None;
    let mut caption = None;
    let mut language = Language::English;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => image = Some(ImagePayload::from_upload(field.bytes().await?)?),
            "caption" => caption = Some(field.text().await?),
            "language" => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    language = value.parse::<Language>().map_err(AppError::Validation)?;
                }
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| {
        AppError::Validation("Please upload an image before analyzing.".to_string())
    })?;

    let view = analyze_content(
        state.gateway.as_ref(),
        state.scores.as_ref(),
        ContentRequest {
            image,
            caption,
            language,
        },
    )
    .await?;

    Ok(Json(view))
}

/// POST /api/v1/captions/localize
pub async fn handle_localize(
    State(state): State<AppState>,
    Json(request): Json<LocalizeRequest>,
) -> Result<Json<LocalizationResult>, AppError> {
    let caption = request.caption.trim();
    if caption.is_empty() {
        return Err(AppError::Validation("caption cannot be empty".to_string()));
    }

    let result = localize(state.gateway.as_ref(), caption, request.target_language).await?;

    Ok(Json(result))
}
