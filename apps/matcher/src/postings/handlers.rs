use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::postings::stats::CorpusStats;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub postings: usize,
    pub vocabulary_size: usize,
}

/// GET /api/v1/postings/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<CorpusStats>, AppError> {
    let index = state.session.index().await?;
    Ok(Json(CorpusStats::compute(index.postings())))
}

/// POST /api/v1/postings/reload
pub async fn handle_reload(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, AppError> {
    let index = state.session.reload().await?;
    Ok(Json(ReloadResponse {
        postings: index.postings().len(),
        vocabulary_size: index.space().dimension(),
    }))
}
