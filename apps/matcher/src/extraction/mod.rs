//! Profile extraction: resume text in, `CandidateProfile` or failure out.
//!
//! `AppState` holds an `Arc<dyn ProfileExtractor>`. Without an API key the service runs with
//! `UnconfiguredExtractor`, so `/api/v1/match/resume` fails cleanly while every other route
//! keeps working.

pub mod prompts;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::errors::MatchError;
use crate::extraction::prompts::{RESUME_PARSE_PROMPT_TEMPLATE, RESUME_PARSE_SYSTEM};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_INVENTION_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::models::CandidateProfile;

/// Every failure surfaces as `MatchError::UpstreamExtractionFailure`. Implementations never
/// return a partially filled or default profile in place of an error.
#[async_trait]
pub trait ProfileExtractor: Send + Sync {
    async fn extract(&self, resume_text: &str) -> Result<CandidateProfile, MatchError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmProfileExtractor
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmProfileExtractor {
    llm: LlmClient,
}

impl LlmProfileExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ProfileExtractor for LlmProfileExtractor {
    async fn extract(&self, resume_text: &str) -> Result<CandidateProfile, MatchError> {
        let prompt = build_prompt(resume_text);
        let system = format!("{RESUME_PARSE_SYSTEM} {JSON_ONLY_SYSTEM}");

        let mut profile: CandidateProfile = self
            .llm
            .call_json(&prompt, &system)
            .await
            .map_err(|e| {
                warn!(error = %e, "Resume extraction failed");
                MatchError::UpstreamExtractionFailure(e.to_string())
            })?;

        profile.resume_text = resume_text.to_string();
        profile.processed_at = Some(Utc::now());
        info!(
            technical_skills = profile.technical_skills.len(),
            keywords = profile.keywords.len(),
            "Resume extracted"
        );
        Ok(profile)
    }
}

fn build_prompt(resume_text: &str) -> String {
    RESUME_PARSE_PROMPT_TEMPLATE
        .replace("{rules}", NO_INVENTION_INSTRUCTION)
        .replace("{resume_text}", resume_text)
}

// ────────────────────────────────────────────────────────────────────────────
// UnconfiguredExtractor
// ────────────────────────────────────────────────────────────────────────────

/// Stand-in used when no LLM credentials are configured.
pub struct UnconfiguredExtractor;

#[async_trait]
impl ProfileExtractor for UnconfiguredExtractor {
    async fn extract(&self, _resume_text: &str) -> Result<CandidateProfile, MatchError> {
        Err(MatchError::UpstreamExtractionFailure(
            "no profile extractor configured (ANTHROPIC_API_KEY is unset)".to_string(),
        ))
    }
}

/// Returns a fixed profile, or fails when built with `None`.
#[cfg(test)]
pub struct FixedExtractor(pub Option<CandidateProfile>);

#[cfg(test)]
#[async_trait]
impl ProfileExtractor for FixedExtractor {
    async fn extract(&self, resume_text: &str) -> Result<CandidateProfile, MatchError> {
        let mut profile = self.0.clone().ok_or_else(|| {
            MatchError::UpstreamExtractionFailure("unparseable reply".to_string())
        })?;
        profile.resume_text = resume_text.to_string();
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_extractor_always_fails() {
        let err = UnconfiguredExtractor.extract("Rust engineer").await.unwrap_err();
        assert!(matches!(err, MatchError::UpstreamExtractionFailure(_)));
    }

    #[test]
    fn test_prompt_embeds_resume_after_rules() {
        let prompt = build_prompt("Ten years of {rules} in Go");
        assert!(prompt.contains("Ten years of {rules} in Go"));
        assert!(prompt.contains("explicitly mentioned"));
        assert!(!prompt.contains("{resume_text}"));
    }
}
