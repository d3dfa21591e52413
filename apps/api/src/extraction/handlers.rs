//! Axum route handlers for the Extraction API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::upload::{UploadForm, MISSING_RESUME_MESSAGE};
use crate::extraction::DocumentFormat;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub format: DocumentFormat,
    pub preview: String,
    pub word_count: usize,
    pub char_count: usize,
    pub truncated: bool,
}

/// POST /api/v1/resume/preview
///
/// Extracts the uploaded resume and returns the leading slice of its text so the
/// user can confirm the file was read correctly before scoring.
pub async fn handle_preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PreviewResponse>, AppError> {
    let mut form = UploadForm::from_multipart(multipart).await?;
    let resume = form.require_resume()?.extract().await?;

    if resume.is_blank() {
        return Err(AppError::Validation(format!(
            "No text could be extracted from the {} file. {MISSING_RESUME_MESSAGE}",
            resume.format
        )));
    }

    let char_count = resume.text.chars().count();
    let preview = resume.preview(state.config.preview_chars).to_string();

    Ok(Json(PreviewResponse {
        format: resume.format,
        truncated: char_count > state.config.preview_chars,
        word_count: resume.word_count(),
        char_count,
        preview,
    }))
}
