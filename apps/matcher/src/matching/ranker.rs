//! Similarity ranker: cosine top-K with a stable tie-break on corpus position.

use serde::Serialize;

use crate::errors::MatchError;
use crate::matching::vectorizer::DocumentVector;

/// One ranked corpus entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedHit {
    /// Position in the corpus the hit was ranked from.
    pub index: usize,
    /// Cosine similarity in [0, 1].
    pub score: f64,
}

/// Cosine similarity of two vectors from the same space.
///
/// Both vectors are L2-normalized (or zero), so this is their dot product. A zero vector
/// scores 0.0 against anything.
pub fn cosine_similarity(a: &DocumentVector, b: &DocumentVector) -> Result<f64, MatchError> {
    if a.space_id() != b.space_id() {
        return Err(MatchError::VocabularyMismatch {
            expected: b.space_id(),
            found: a.space_id(),
        });
    }
    debug_assert_eq!(a.dimension(), b.dimension());
    if a.is_zero() || b.is_zero() {
        return Ok(0.0);
    }
    Ok(a.dot(b).clamp(0.0, 1.0))
}

/// Scores `query` against every corpus vector and returns the best `k`.
///
/// Order: score descending, then corpus index ascending. An empty corpus yields an empty list.
pub fn rank(
    query: &DocumentVector,
    corpus: &[DocumentVector],
    k: usize,
) -> Result<Vec<RankedHit>, MatchError> {
    let mut hits = corpus
        .iter()
        .enumerate()
        .map(|(index, doc)| {
            cosine_similarity(query, doc).map(|score| RankedHit { index, score })
        })
        .collect::<Result<Vec<_>, _>>()?;

    hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
    hits.truncate(k);
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::vectorizer::{VectorSpace, DEFAULT_MAX_FEATURES};

    fn make_space(docs: &[&str]) -> (VectorSpace, Vec<DocumentVector>) {
        let space = VectorSpace::fit(docs, DEFAULT_MAX_FEATURES).unwrap();
        let vectors = docs.iter().map(|d| space.transform(d)).collect();
        (space, vectors)
    }

    #[test]
    fn test_rank_length_is_min_of_k_and_corpus() {
        let (space, corpus) = make_space(&["rust tokio", "python django", "go kubernetes"]);
        let query = space.transform("rust python");
        assert_eq!(rank(&query, &corpus, 2).unwrap().len(), 2);
        assert_eq!(rank(&query, &corpus, 10).unwrap().len(), 3);
        assert!(rank(&query, &corpus, 0).unwrap().is_empty());
    }

    #[test]
    fn test_scores_non_increasing() {
        let (space, corpus) = make_space(&[
            "python data pipelines",
            "rust systems programming",
            "rust async networking services",
            "java spring",
        ]);
        let hits = rank(&space.transform("rust async services"), &corpus, 4).unwrap();
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(hits[0].index, 2);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let (space, corpus) = make_space(&["java spring", "rust tokio", "rust tokio", "rust tokio"]);
        let hits = rank(&space.transform("rust tokio"), &corpus, 4).unwrap();
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let (space, corpus) = make_space(&["sql analytics", "sql reporting", "ml research"]);
        let query = space.transform("sql reporting analytics");
        assert_eq!(rank(&query, &corpus, 3).unwrap(), rank(&query, &corpus, 3).unwrap());
    }

    #[test]
    fn test_empty_corpus_returns_empty_list() {
        let (space, _) = make_space(&["anything"]);
        assert!(rank(&space.transform("anything"), &[], 5).unwrap().is_empty());
    }

    #[test]
    fn test_zero_query_scores_zero() {
        let (space, corpus) = make_space(&["rust", "python"]);
        let hits = rank(&space.transform("cooking"), &corpus, 2).unwrap();
        assert!(hits.iter().all(|h| h.score == 0.0));
        assert_eq!(hits[0].index, 0);
    }

    #[test]
    fn test_mismatched_spaces_rejected() {
        let (_, corpus) = make_space(&["rust tokio"]);
        let (other, _) = make_space(&["rust tokio"]);
        let err = rank(&other.transform("rust"), &corpus, 1).unwrap_err();
        assert!(matches!(err, MatchError::VocabularyMismatch { .. }));
    }
}
