use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::matching::catalog::RoleCatalog;
use crate::matching::tokens::{tokenize, KeywordSet};

/// A catalog role sharing at least one skill token with the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSuggestion {
    pub role: String,
    pub matched_skills: Vec<String>,
}

/// Cross-references resume vocabulary with the role catalog.
#[derive(Debug, Clone)]
pub struct RoleSuggester {
    catalog: Arc<RoleCatalog>,
}

impl RoleSuggester {
    pub fn new(catalog: Arc<RoleCatalog>) -> Self {
        Self { catalog }
    }

    pub fn suggest(&self, resume_text: &str) -> Vec<RoleSuggestion> {
        self.suggest_for_tokens(&tokenize(resume_text))
    }

    /// Every role with a nonempty overlap, in catalog order. Not ranked.
    pub fn suggest_for_tokens(&self, resume_tokens: &KeywordSet) -> Vec<RoleSuggestion> {
        self.catalog
            .entries()
            .iter()
            .filter_map(|entry| {
                let matched_skills: Vec<String> = entry
                    .skill_tokens()
                    .intersection(resume_tokens)
                    .cloned()
                    .collect();
                (!matched_skills.is_empty()).then(|| RoleSuggestion {
                    role: entry.role.clone(),
                    matched_skills,
                })
            })
            .collect()
    }
}
