use std::sync::Arc;

use crate::config::Config;
use crate::matching::analysis::Analyzer;
use crate::matching::catalog::RoleCatalog;
use crate::matching::feedback::FeedbackGenerator;
use crate::matching::highlight::Marker;
use crate::matching::scoring::{KeywordScorer, ScoringStrategy};

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub analyzer: Analyzer,
}

impl AppState {
    /// Wires the default `KeywordScorer` over `catalog`.
    pub fn new(config: Config, catalog: RoleCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let scorer: Arc<dyn ScoringStrategy> = Arc::new(KeywordScorer::new(
            Arc::clone(&catalog),
            config.completeness_word_target,
        ));
        Self::with_scorer(config, catalog, scorer)
    }

    pub fn with_scorer(
        config: Config,
        catalog: Arc<RoleCatalog>,
        scorer: Arc<dyn ScoringStrategy>,
    ) -> Self {
        let analyzer = Analyzer::new(
            scorer,
            catalog,
            FeedbackGenerator::new(config.feedback_threshold),
            Marker::default(),
        );
        Self { config, analyzer }
    }
}
