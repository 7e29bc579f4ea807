use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::matching::engine::MatchOptions;
use crate::matching::overlap::DEFAULT_MAX_MISSING;
use crate::matching::vectorizer::DEFAULT_MAX_FEATURES;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a number does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub postings_path: PathBuf,
    /// Enables LLM-backed resume extraction when set.
    pub anthropic_api_key: Option<String>,
    pub max_features: usize,
    pub default_top_k: usize,
    pub max_missing_skills: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            postings_path: PathBuf::from(require_env("POSTINGS_PATH")?),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            max_features: parse_env("MAX_FEATURES", DEFAULT_MAX_FEATURES)?,
            default_top_k: parse_env("DEFAULT_TOP_K", 10)?,
            max_missing_skills: parse_env("MAX_MISSING_SKILLS", DEFAULT_MAX_MISSING)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            bail!("MAX_FEATURES must be at least 1");
        }
        if self.default_top_k == 0 {
            bail!("DEFAULT_TOP_K must be at least 1");
        }
        Ok(())
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            max_features: self.max_features,
            max_missing: self.max_missing_skills,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
