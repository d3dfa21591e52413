//! Axum route handlers for the Matching API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::upload::{UploadForm, MISSING_RESUME_MESSAGE};
use crate::matching::analysis::AnalysisReport;
use crate::matching::catalog::RoleEntry;
use crate::matching::scoring::KeywordSource;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub job_description: Option<String>,
    pub role: Option<String>,
}

/// GET /api/v1/roles
///
/// The role catalog in definition order, for the role selector.
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<Vec<RoleEntry>> {
    Json(state.analyzer.catalog().entries().to_vec())
}

/// POST /api/v1/analyze
///
/// Multipart upload: `resume` file plus optional `job_description` and `role` text fields.
/// Extracts the resume and runs the full analysis pass.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut form = UploadForm::from_multipart(multipart).await?;
    let resume = form.require_resume()?.extract().await?;

    if resume.is_blank() {
        return Err(AppError::Validation(format!(
            "No text could be extracted from the {} file. {MISSING_RESUME_MESSAGE}",
            resume.format
        )));
    }

    info!(
        "Analyzing {} resume ({} words)",
        resume.format,
        resume.word_count()
    );

    let source = KeywordSource::new(form.job_description, form.role);
    let report = state.analyzer.analyze(&resume.text, &source).await?;
    Ok(Json(report))
}

/// POST /api/v1/score
///
/// Same analysis for resume text that was already extracted.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let source = KeywordSource::new(request.job_description, request.role);
    let report = state.analyzer.analyze(&request.resume_text, &source).await?;
    Ok(Json(report))
}
