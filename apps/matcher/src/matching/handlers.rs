use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::filters::MatchFilter;
use crate::models::{CandidateProfile, MatchRecord};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MatchRequest {
    pub profile: CandidateProfile,
    pub top_k: Option<usize>,
    #[serde(default)]
    pub filter: MatchFilter,
}

#[derive(Deserialize)]
pub struct ResumeMatchRequest {
    pub resume_text: String,
    pub top_k: Option<usize>,
    #[serde(default)]
    pub filter: MatchFilter,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchRecord>,
}

#[derive(Serialize)]
pub struct ResumeMatchResponse {
    pub profile: CandidateProfile,
    pub matches: Vec<MatchRecord>,
}

fn resolve_top_k(requested: Option<usize>, default: usize) -> Result<usize, AppError> {
    match requested {
        Some(0) => Err(AppError::Validation("top_k must be at least 1".to_string())),
        Some(k) => Ok(k),
        None => Ok(default),
    }
}

async fn run_match(
    state: &AppState,
    profile: &CandidateProfile,
    top_k: usize,
    filter: &MatchFilter,
) -> Result<Vec<MatchRecord>, AppError> {
    let index = state.session.index().await?;
    let matches = index.find_matches(profile, top_k, filter)?;
    info!(top_k, returned = matches.len(), "Match request served");
    Ok(matches)
}

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let top_k = resolve_top_k(req.top_k, state.config.default_top_k)?;
    let matches = run_match(&state, &req.profile, top_k, &req.filter).await?;
    Ok(Json(MatchResponse { matches }))
}

/// POST /api/v1/match/resume
pub async fn handle_match_resume(
    State(state): State<AppState>,
    Json(req): Json<ResumeMatchRequest>,
) -> Result<Json<ResumeMatchResponse>, AppError> {
    if req.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text must not be empty".to_string()));
    }
    let top_k = resolve_top_k(req.top_k, state.config.default_top_k)?;

    let profile = state.extractor.extract(&req.resume_text).await?;
    let matches = run_match(&state, &profile, top_k, &req.filter).await?;
    Ok(Json(ResumeMatchResponse { profile, matches }))
}
