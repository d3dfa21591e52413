//! Analysis pipeline: one synchronous pass per request.
//!
//! resume text → scoring strategy → highlighter + feedback, and independently
//! resume text → role suggester.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::upload::MISSING_RESUME_MESSAGE;
use crate::matching::catalog::RoleCatalog;
use crate::matching::feedback::FeedbackGenerator;
use crate::matching::highlight::{highlight, Marker};
use crate::matching::scoring::{KeywordSource, ScoreOutcome, ScoringStrategy};
use crate::matching::suggest::{RoleSuggester, RoleSuggestion};
use crate::matching::tokens::KeywordSet;

/// Everything the presentation layer renders after one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub score: ScoreOutcome,
    /// Matched keywords, comma-joined. Empty for a completeness score.
    pub matched_display: String,
    /// Missing keywords, comma-joined. Empty for a completeness score.
    pub missing_display: String,
    /// Present only when a free-text job description was supplied.
    pub highlighted_resume: Option<String>,
    pub feedback: String,
    pub suggested_roles: Vec<RoleSuggestion>,
    pub warnings: Vec<String>,
    pub scorer_backend: String,
}

/// Owns the collaborators of a pass. Cheap to clone; everything shared is behind `Arc`.
#[derive(Clone)]
pub struct Analyzer {
    scorer: Arc<dyn ScoringStrategy>,
    catalog: Arc<RoleCatalog>,
    suggester: RoleSuggester,
    feedback: FeedbackGenerator,
    marker: Marker,
}

impl Analyzer {
    pub fn new(
        scorer: Arc<dyn ScoringStrategy>,
        catalog: Arc<RoleCatalog>,
        feedback: FeedbackGenerator,
        marker: Marker,
    ) -> Self {
        Self {
            suggester: RoleSuggester::new(Arc::clone(&catalog)),
            scorer,
            catalog,
            feedback,
            marker,
        }
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// Runs the full pass. Blank resume text is the "upload a resume first" condition.
    pub async fn analyze(
        &self,
        resume_text: &str,
        source: &KeywordSource,
    ) -> Result<AnalysisReport, AppError> {
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation(MISSING_RESUME_MESSAGE.to_string()));
        }

        let mut warnings = Vec::new();
        if let Some(role) = source.unknown_role(&self.catalog) {
            warn!("Ignoring unknown role selector '{role}'");
            warnings.push(format!(
                "Role '{role}' is not in the role catalog and was ignored."
            ));
        }

        let score = self.scorer.score(resume_text, source).await?;

        if let ScoreOutcome::Completeness { word_count, .. } = &score {
            warnings.push(format!(
                "No job description or role was given, so this is a resume length score \
({word_count} words) rather than a keyword match."
            ));
        }

        let empty = KeywordSet::new();
        let matched = score.matched().unwrap_or(&empty);
        let missing = score.missing().unwrap_or(&empty);

        let highlighted_resume = source
            .job_description()
            .map(|jd| highlight(resume_text, jd, &self.marker));

        let feedback = self.feedback.feedback(score.score(), missing);
        let suggested_roles = self.suggester.suggest(resume_text);

        info!(
            "Analysis complete: score={} backend={} matched={} missing={} suggested_roles={}",
            score.score(),
            self.scorer.backend(),
            matched.len(),
            missing.len(),
            suggested_roles.len()
        );

        Ok(AnalysisReport {
            matched_display: join_keywords(matched),
            missing_display: join_keywords(missing),
            highlighted_resume,
            feedback,
            suggested_roles,
            warnings,
            scorer_backend: self.scorer.backend().to_string(),
            score,
        })
    }
}

fn join_keywords(keywords: &KeywordSet) -> String {
    keywords
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
