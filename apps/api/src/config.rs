use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on request bodies, uploads included.
    pub max_upload_bytes: usize,
    /// Number of characters returned by the resume preview endpoint.
    pub preview_chars: usize,
    /// Word count that maps to a completeness score of 100 when no job keywords are given.
    pub completeness_word_target: usize,
    /// Scores strictly below this get the detailed improvement feedback.
    pub feedback_threshold: f64,
    /// Optional JSON file replacing the built-in role catalog.
    pub role_catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            preview_chars: 1000,
            completeness_word_target: 1000,
            feedback_threshold: 50.0,
            role_catalog_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            preview_chars: parse_env("PREVIEW_CHARS", defaults.preview_chars)?,
            completeness_word_target: parse_env(
                "COMPLETENESS_WORD_TARGET",
                defaults.completeness_word_target,
            )?,
            feedback_threshold: parse_env("FEEDBACK_THRESHOLD", defaults.feedback_threshold)?,
            role_catalog_path: std::env::var("ROLE_CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

/// Reads `key` and parses it, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
