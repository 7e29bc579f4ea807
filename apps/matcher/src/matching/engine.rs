//! Matching engine: a fitted index over one posting corpus, and the session that owns the
//! current index for the service.
//!
//! A `MatchIndex` is immutable once built. Re-fitting builds a fresh index and swaps it in;
//! queries already holding the old `Arc` finish against it.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::errors::MatchError;
use crate::matching::explainer::explain;
use crate::matching::filters::MatchFilter;
use crate::matching::normalizer::normalize_text;
use crate::matching::overlap::{overlap, DEFAULT_MAX_MISSING};
use crate::matching::ranker::rank;
use crate::matching::vectorizer::{DocumentVector, VectorSpace, DEFAULT_MAX_FEATURES};
use crate::models::{CandidateProfile, MatchRecord, Posting};
use crate::postings::source::PostingSource;

/// Tunables for building and querying an index.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    pub max_features: usize,
    pub max_missing: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            max_missing: DEFAULT_MAX_MISSING,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MatchIndex
// ────────────────────────────────────────────────────────────────────────────

/// Postings plus their vectors in one fitted space. `vectors[i]` belongs to `postings[i]`.
#[derive(Debug)]
pub struct MatchIndex {
    space: VectorSpace,
    postings: Vec<Posting>,
    vectors: Vec<DocumentVector>,
    options: MatchOptions,
}

impl MatchIndex {
    pub fn build(postings: Vec<Posting>, options: MatchOptions) -> Result<Self, MatchError> {
        if postings.is_empty() {
            return Err(MatchError::EmptyCorpus);
        }

        let documents: Vec<String> = postings.iter().map(normalize_text).collect();
        let space = VectorSpace::fit(&documents, options.max_features)?;
        let vectors = documents.iter().map(|doc| space.transform(doc)).collect();

        Ok(Self {
            space,
            postings,
            vectors,
            options,
        })
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    pub fn space(&self) -> &VectorSpace {
        &self.space
    }

    /// Ranks every posting against `profile` and annotates the best `top_k`.
    ///
    /// The filter runs after top-K selection, so it can only shrink the list.
    pub fn find_matches(
        &self,
        profile: &CandidateProfile,
        top_k: usize,
        filter: &MatchFilter,
    ) -> Result<Vec<MatchRecord>, MatchError> {
        let query = self.space.transform(&normalize_text(profile));
        if query.is_zero() {
            debug!("Candidate profile shares no terms with the posting vocabulary");
        }

        let hits = rank(&query, &self.vectors, top_k)?;

        let matches: Vec<MatchRecord> = hits
            .into_iter()
            .map(|hit| {
                let posting = &self.postings[hit.index];
                let skills = overlap(
                    &profile.technical_skills,
                    &posting.technical_skills,
                    self.options.max_missing,
                );
                let reasons = explain(
                    hit.score,
                    &skills.matching,
                    &profile.keywords,
                    &profile.location,
                    &posting.category,
                    &posting.location,
                );

                let mut record = MatchRecord::for_posting(posting, hit.score);
                record.matching_skills = skills.matching;
                record.missing_skills = skills.missing;
                record.match_reasons = reasons;
                record
            })
            .filter(|record| filter.accepts(record))
            .collect();

        debug!(
            requested = top_k,
            returned = matches.len(),
            filtered = !filter.is_empty(),
            "Matches computed"
        );
        Ok(matches)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MatchSession
// ────────────────────────────────────────────────────────────────────────────

/// Owns the current index for the lifetime of the service.
///
/// At most one fit runs at a time (`fit_lock`). Readers never wait on a fit except when no
/// index exists yet.
pub struct MatchSession {
    source: Arc<dyn PostingSource>,
    options: MatchOptions,
    index: RwLock<Option<Arc<MatchIndex>>>,
    fit_lock: Mutex<()>,
}

impl MatchSession {
    pub fn new(source: Arc<dyn PostingSource>, options: MatchOptions) -> Self {
        Self {
            source,
            options,
            index: RwLock::new(None),
            fit_lock: Mutex::new(()),
        }
    }

    /// The current index, without building one.
    pub async fn fitted(&self) -> Result<Arc<MatchIndex>, MatchError> {
        self.index.read().await.clone().ok_or(MatchError::NotFitted)
    }

    /// The current index, building it first if none exists.
    pub async fn index(&self) -> Result<Arc<MatchIndex>, MatchError> {
        if let Ok(index) = self.fitted().await {
            return Ok(index);
        }

        let _fit = self.fit_lock.lock().await;
        // Another caller may have finished a fit while we waited.
        if let Ok(index) = self.fitted().await {
            return Ok(index);
        }
        self.rebuild().await
    }

    /// Re-reads the posting source and fits a new index.
    ///
    /// An empty corpus clears the current index. A source failure keeps the previous one.
    pub async fn reload(&self) -> Result<Arc<MatchIndex>, MatchError> {
        let _fit = self.fit_lock.lock().await;
        self.rebuild().await
    }

    /// Caller must hold `fit_lock`.
    async fn rebuild(&self) -> Result<Arc<MatchIndex>, MatchError> {
        let postings = self.source.load().map_err(|e| {
            warn!(error = %e, "Posting source failed; keeping previous index");
            e
        })?;

        match MatchIndex::build(postings, self.options) {
            Ok(index) => {
                let index = Arc::new(index);
                info!(
                    postings = index.postings().len(),
                    vocabulary = index.space().dimension(),
                    "Match index ready"
                );
                *self.index.write().await = Some(Arc::clone(&index));
                Ok(index)
            }
            Err(MatchError::EmptyCorpus) => {
                warn!("Posting source returned no postings; index cleared");
                *self.index.write().await = None;
                Err(MatchError::EmptyCorpus)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postings::source::{make_posting, StaticPostingSource};
    use serde_json::json;

    fn make_postings() -> Vec<Posting> {
        vec![
            make_posting(json!({
                "job_id": "data-1",
                "title": "Data Scientist",
                "category": "Data Science",
                "location": "Remote",
                "technical_skills": ["Python", "SQL", "Pandas", "Spark"],
                "job_summary": "Build machine learning models with Python."
            })),
            make_posting(json!({
                "job_id": "rust-1",
                "title": "Rust Engineer",
                "category": "Software Engineering",
                "location": "Berlin, Germany",
                "technical_skills": ["Rust", "Tokio", "PostgreSQL"],
                "job_summary": "Build async network services in Rust."
            })),
            make_posting(json!({
                "job_id": "web-1",
                "title": "Frontend Developer",
                "category": "Web Development",
                "location": "Remote",
                "technical_skills": ["TypeScript", "React"],
                "job_summary": "Build user interfaces."
            })),
        ]
    }

    fn make_profile() -> CandidateProfile {
        CandidateProfile {
            location: "Berlin".to_string(),
            summary: "Backend engineer writing async Rust network services.".to_string(),
            technical_skills: vec!["rust".to_string(), "tokio".to_string(), "Docker".to_string()],
            keywords: vec!["engineering".to_string()],
            ..Default::default()
        }
    }

    fn make_session(postings: Vec<Posting>) -> (Arc<StaticPostingSource>, MatchSession) {
        let source = Arc::new(StaticPostingSource::new(postings));
        let session = MatchSession::new(source.clone(), MatchOptions::default());
        (source, session)
    }

    #[test]
    fn test_build_empty_corpus_fails() {
        let err = MatchIndex::build(Vec::new(), MatchOptions::default()).unwrap_err();
        assert!(matches!(err, MatchError::EmptyCorpus));
    }

    #[test]
    fn test_find_matches_ranks_and_annotates() {
        let index = MatchIndex::build(make_postings(), MatchOptions::default()).unwrap();
        let matches = index
            .find_matches(&make_profile(), 3, &MatchFilter::default())
            .unwrap();

        assert_eq!(matches.len(), 3);
        let top = &matches[0];
        assert_eq!(top.job_id, "rust-1");
        assert_eq!(top.matching_skills, vec!["rust", "tokio"]);
        assert_eq!(top.missing_skills, vec!["postgresql"]);
        assert!(top.match_reasons.contains(&"Matching skills: rust, tokio".to_string()));
        assert!(top
            .match_reasons
            .contains(&"Relevant experience in Software Engineering".to_string()));
        assert!(top.match_reasons.contains(&"Location preference match".to_string()));
        assert!(matches
            .windows(2)
            .all(|w| w[0].similarity_score >= w[1].similarity_score));
    }

    #[test]
    fn test_filter_applies_after_top_k() {
        let index = MatchIndex::build(make_postings(), MatchOptions::default()).unwrap();
        let filter = MatchFilter {
            location: Some("Remote".to_string()),
            ..Default::default()
        };
        // Top-1 is the Berlin posting, so filtering leaves nothing.
        assert!(index.find_matches(&make_profile(), 1, &filter).unwrap().is_empty());
        assert_eq!(index.find_matches(&make_profile(), 3, &filter).unwrap().len(), 2);
    }

    #[test]
    fn test_unrelated_profile_scores_zero() {
        let index = MatchIndex::build(make_postings(), MatchOptions::default()).unwrap();
        let profile = CandidateProfile {
            summary: "Pastry chef".to_string(),
            ..Default::default()
        };
        let matches = index.find_matches(&profile, 2, &MatchFilter::default()).unwrap();
        assert!(matches.iter().all(|m| m.similarity_score == 0.0));
        assert_eq!(matches[0].job_id, "data-1");
    }

    #[tokio::test]
    async fn test_session_not_fitted_until_loaded() {
        let (_, session) = make_session(make_postings());
        assert!(matches!(session.fitted().await, Err(MatchError::NotFitted)));

        let index = session.index().await.unwrap();
        assert_eq!(index.postings().len(), 3);
        assert!(session.fitted().await.is_ok());
    }

    #[tokio::test]
    async fn test_session_lazy_index_reuses_fit() {
        let (_, session) = make_session(make_postings());
        let first = session.index().await.unwrap();
        let second = session.index().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_reload_swaps_index() {
        let (source, session) = make_session(make_postings());
        let before = session.reload().await.unwrap();

        source.replace(make_postings().into_iter().take(1).collect());
        let after = session.reload().await.unwrap();

        assert_eq!(before.postings().len(), 3);
        assert_eq!(after.postings().len(), 1);
        assert_ne!(before.space().id(), after.space().id());
    }

    #[tokio::test]
    async fn test_empty_corpus_then_lazy_rebuild() {
        let (source, session) = make_session(Vec::new());
        assert!(matches!(session.reload().await, Err(MatchError::EmptyCorpus)));
        assert!(matches!(session.fitted().await, Err(MatchError::NotFitted)));
        assert!(matches!(session.index().await, Err(MatchError::EmptyCorpus)));

        source.replace(make_postings());
        assert_eq!(session.index().await.unwrap().postings().len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_lazy_fits_share_one_index() {
        let (_, session) = make_session(make_postings());
        let session = Arc::new(session);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = session.clone();
                tokio::spawn(async move { session.index().await.unwrap().space().id() })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
    }
}
