//! Retrieval and ranking: normalize, vectorize, rank, then explain.

pub mod engine;
pub mod explainer;
pub mod filters;
pub mod handlers;
pub mod normalizer;
pub mod overlap;
pub mod ranker;
pub mod vectorizer;
