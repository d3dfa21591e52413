//! Scoring Engine: pluggable, trait-based scorer that measures a resume against job keywords.
//!
//! Default: `KeywordScorer` (pure-Rust, deterministic, no network).
//! `AppState` holds an `Arc<dyn ScoringStrategy>` so another backend can be swapped in
//! at startup without touching handlers.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::matching::catalog::RoleCatalog;
use crate::matching::tokens::{tokenize, word_count, KeywordSet};

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Where the job keywords come from: a free-text job description, a catalog role,
/// or both. Blank values count as not supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordSource {
    pub job_description: Option<String>,
    pub role: Option<String>,
}

impl KeywordSource {
    pub fn new(job_description: Option<String>, role: Option<String>) -> Self {
        Self {
            job_description: job_description.filter(|d| !d.trim().is_empty()),
            role: role
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        }
    }

    pub fn job_description(&self) -> Option<&str> {
        self.job_description.as_deref()
    }

    /// The role selector if it is set but absent from `catalog`.
    pub fn unknown_role<'a>(&'a self, catalog: &RoleCatalog) -> Option<&'a str> {
        self.role
            .as_deref()
            .filter(|role| catalog.get(role).is_none())
    }

    /// Union of description tokens and the selected role's skill tokens.
    /// `None` when neither yields a keyword; an unknown role contributes nothing.
    pub fn job_tokens(&self, catalog: &RoleCatalog) -> Option<KeywordSet> {
        let mut tokens = self
            .job_description
            .as_deref()
            .map(tokenize)
            .unwrap_or_default();

        if let Some(entry) = self.role.as_deref().and_then(|r| catalog.get(r)) {
            tokens.extend(entry.skill_tokens());
        }

        (!tokens.is_empty()).then_some(tokens)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models (shared across all scorer backends)
// ────────────────────────────────────────────────────────────────────────────

/// Keyword overlap between a resume and a job keyword set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 0 – 100, two decimals.
    pub score: f64,
    pub matched: KeywordSet,
    pub missing: KeywordSet,
    pub job_keyword_count: usize,
}

/// Result of one scoring pass. The two kinds are not comparable: a keyword match
/// measures overlap, completeness only measures resume length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreOutcome {
    KeywordMatch(MatchResult),
    /// Fallback when no job keywords were supplied: word count against a target,
    /// not capped at 100.
    Completeness { score: f64, word_count: usize },
}

impl ScoreOutcome {
    pub fn score(&self) -> f64 {
        match self {
            ScoreOutcome::KeywordMatch(m) => m.score,
            ScoreOutcome::Completeness { score, .. } => *score,
        }
    }

    pub fn matched(&self) -> Option<&KeywordSet> {
        match self {
            ScoreOutcome::KeywordMatch(m) => Some(&m.matched),
            ScoreOutcome::Completeness { .. } => None,
        }
    }

    pub fn missing(&self) -> Option<&KeywordSet> {
        match self {
            ScoreOutcome::KeywordMatch(m) => Some(&m.missing),
            ScoreOutcome::Completeness { .. } => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The scoring trait. Implement this to swap backends without touching the
/// endpoint, handler, or caller code.
#[async_trait]
pub trait ScoringStrategy: Send + Sync {
    async fn score(
        &self,
        resume_text: &str,
        source: &KeywordSource,
    ) -> Result<ScoreOutcome, AppError>;

    /// Short label reported alongside results.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordScorer: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Local whitespace-token matcher.
///
/// 1. Job tokens = description tokens ∪ role skill tokens.
/// 2. No job tokens → completeness fallback.
/// 3. Otherwise score = |resume ∩ job| / |job| × 100.
pub struct KeywordScorer {
    catalog: Arc<RoleCatalog>,
    completeness_word_target: usize,
}

impl KeywordScorer {
    pub fn new(catalog: Arc<RoleCatalog>, completeness_word_target: usize) -> Self {
        Self {
            catalog,
            completeness_word_target,
        }
    }
}

#[async_trait]
impl ScoringStrategy for KeywordScorer {
    async fn score(
        &self,
        resume_text: &str,
        source: &KeywordSource,
    ) -> Result<ScoreOutcome, AppError> {
        let outcome = match source.job_tokens(&self.catalog) {
            Some(job_tokens) => {
                ScoreOutcome::KeywordMatch(keyword_match(&tokenize(resume_text), &job_tokens))
            }
            None => completeness(resume_text, self.completeness_word_target),
        };
        debug!("Keyword scorer produced {:?}", outcome.score());
        Ok(outcome)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithms
// ────────────────────────────────────────────────────────────────────────────

/// Set overlap score. An empty `job_tokens` scores 0 with nothing matched or missing.
pub fn keyword_match(resume_tokens: &KeywordSet, job_tokens: &KeywordSet) -> MatchResult {
    let matched: KeywordSet = job_tokens.intersection(resume_tokens).cloned().collect();
    let missing: KeywordSet = job_tokens.difference(resume_tokens).cloned().collect();

    let score = if job_tokens.is_empty() {
        0.0
    } else {
        round2(matched.len() as f64 / job_tokens.len() as f64 * 100.0)
    };

    MatchResult {
        score,
        matched,
        missing,
        job_keyword_count: job_tokens.len(),
    }
}

/// Word count relative to `target_words`, as a percentage. A zero target is treated as 1.
pub fn completeness(resume_text: &str, target_words: usize) -> ScoreOutcome {
    let words = word_count(resume_text);
    let target = target_words.max(1) as f64;
    ScoreOutcome::Completeness {
        score: round2(words as f64 / target * 100.0),
        word_count: words,
    }
}

/// Two decimal places, ties to even (`3.125` → `3.12`).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::catalog::RoleEntry;

    fn set(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn scorer() -> KeywordScorer {
        KeywordScorer::new(Arc::new(RoleCatalog::builtin()), 1000)
    }

    fn source(description: Option<&str>, role: Option<&str>) -> KeywordSource {
        KeywordSource::new(description.map(String::from), role.map(String::from))
    }

    #[test]
    fn test_half_of_job_keywords_matched() {
        let result = keyword_match(
            &tokenize("I know python and docker"),
            &tokenize("python java docker kubernetes"),
        );
        assert_eq!(result.score, 50.0);
        assert_eq!(result.matched, set(&["docker", "python"]));
        assert_eq!(result.missing, set(&["java", "kubernetes"]));
        assert_eq!(result.job_keyword_count, 4);
    }

    #[test]
    fn test_empty_job_tokens_scores_zero() {
        let result = keyword_match(&tokenize("python"), &tokenize(""));
        assert_eq!(result.score, 0.0);
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_score_rounds_to_two_decimals() {
        let result = keyword_match(&tokenize("a"), &tokenize("a b c"));
        assert_eq!(result.score, 33.33);
        let result = keyword_match(&tokenize("a b"), &tokenize("a b c"));
        assert_eq!(result.score, 66.67);
    }

    #[test]
    fn test_score_ties_round_to_even() {
        let job: String = (0..32).map(|i| format!("k{i} ")).collect();
        let result = keyword_match(&tokenize("k0"), &tokenize(&job));
        assert_eq!(result.job_keyword_count, 32);
        assert_eq!(result.score, 3.12);
        let result = keyword_match(&tokenize("k0 k1 k2"), &tokenize(&job));
        assert_eq!(result.score, 9.38);
    }

    #[test]
    fn test_matched_and_missing_partition_job_tokens() {
        let resume = tokenize("Rust tokio axum serde postgres");
        let job = tokenize("rust go axum kafka serde grpc");
        let result = keyword_match(&resume, &job);

        assert!(result.matched.is_disjoint(&result.missing));
        let union: KeywordSet = result.matched.union(&result.missing).cloned().collect();
        assert_eq!(union, job);
        assert!((0.0..=100.0).contains(&result.score));
    }

    #[test]
    fn test_repeated_resume_words_do_not_inflate_score() {
        let once = keyword_match(&tokenize("python"), &tokenize("python java"));
        let many = keyword_match(&tokenize("python python python"), &tokenize("python java"));
        assert_eq!(once.score, many.score);
    }

    #[test]
    fn test_completeness_is_word_ratio() {
        let resume = vec!["word"; 500].join(" ");
        assert_eq!(
            completeness(&resume, 1000),
            ScoreOutcome::Completeness {
                score: 50.0,
                word_count: 500
            }
        );
    }

    #[test]
    fn test_completeness_is_not_capped() {
        let resume = vec!["word"; 1500].join(" ");
        assert_eq!(completeness(&resume, 1000).score(), 150.0);
    }

    #[test]
    fn test_completeness_zero_target_does_not_divide_by_zero() {
        assert_eq!(completeness("one two", 0).score(), 200.0);
    }

    #[test]
    fn test_source_blank_description_is_not_supplied() {
        let src = source(Some("   \n"), Some("  "));
        assert_eq!(src, KeywordSource::default());
        assert!(src.job_tokens(&RoleCatalog::builtin()).is_none());
    }

    #[test]
    fn test_source_unions_description_and_role() {
        let catalog = RoleCatalog::builtin();
        let tokens = source(Some("Rust Go"), Some("DevOps Engineer"))
            .job_tokens(&catalog)
            .unwrap();
        assert!(tokens.contains("rust"));
        assert!(tokens.contains("docker"));
        assert!(tokens.contains("ci/cd"));
    }

    #[test]
    fn test_source_unknown_role_is_ignored_and_reported() {
        let catalog = RoleCatalog::builtin();
        let src = source(Some("rust"), Some("Astronaut"));
        assert_eq!(src.unknown_role(&catalog), Some("Astronaut"));
        assert_eq!(src.job_tokens(&catalog).unwrap(), set(&["rust"]));

        let known = source(None, Some("Teacher"));
        assert_eq!(known.unknown_role(&catalog), None);
    }

    #[tokio::test]
    async fn test_scorer_uses_keyword_match_with_description() {
        let outcome = scorer()
            .score(
                "I know python and docker",
                &source(Some("python java docker kubernetes"), None),
            )
            .await
            .unwrap();
        match outcome {
            ScoreOutcome::KeywordMatch(m) => {
                assert_eq!(m.score, 50.0);
                assert_eq!(m.missing, set(&["java", "kubernetes"]));
            }
            other => panic!("expected keyword match, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scorer_falls_back_to_completeness_without_keywords() {
        let resume = vec!["experience"; 500].join(" ");
        let outcome = scorer()
            .score(&resume, &source(Some(""), None))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ScoreOutcome::Completeness {
                score: 50.0,
                word_count: 500
            }
        );
        assert!(outcome.matched().is_none());
    }

    #[tokio::test]
    async fn test_scorer_role_only_uses_skill_tokens() {
        let outcome = scorer()
            .score("python pandas numpy", &source(None, Some("Data Scientist")))
            .await
            .unwrap();
        let matched = outcome.matched().unwrap();
        assert_eq!(matched, &set(&["numpy", "pandas", "python"]));
        // "machine learning", "data analysis", "statistics", "data visualization" → 6 more tokens
        assert_eq!(outcome.score(), round2(3.0 / 9.0 * 100.0));
    }

    #[tokio::test]
    async fn test_scorer_uses_injected_catalog() {
        let catalog = RoleCatalog::new(vec![RoleEntry {
            role: "Chef".to_string(),
            skills: vec!["knives".to_string(), "sauces".to_string()],
        }])
        .unwrap();
        let scorer = KeywordScorer::new(Arc::new(catalog), 1000);
        let outcome = scorer
            .score("knives", &source(None, Some("chef")))
            .await
            .unwrap();
        assert_eq!(outcome.score(), 50.0);
    }

    #[tokio::test]
    async fn test_scoring_is_idempotent() {
        let scorer = scorer();
        let src = source(Some("alpha beta gamma delta epsilon zeta eta"), None);
        let first = scorer.score("beta delta zeta", &src).await.unwrap();
        let second = scorer.score("beta delta zeta", &src).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_backend_label_is_keyword() {
        assert_eq!(scorer().backend(), "keyword");
    }

    #[test]
    fn test_outcome_serializes_with_kind_tag() {
        let value = serde_json::to_value(completeness("a b", 1000)).unwrap();
        assert_eq!(value["kind"], "completeness");
        assert_eq!(value["word_count"], 2);

        let value =
            serde_json::to_value(ScoreOutcome::KeywordMatch(keyword_match(&set(&["a"]), &set(&["a"]))))
                .unwrap();
        assert_eq!(value["kind"], "keyword_match");
        assert_eq!(value["score"], 100.0);
        assert_eq!(value["matched"][0], "a");
    }
}
