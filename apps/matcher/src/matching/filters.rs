use serde::Deserialize;

use crate::models::MatchRecord;

/// Optional narrowing of a ranked match list. Applied after top-K selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchFilter {
    /// Exact posting category.
    pub category: Option<String>,
    /// Exact posting location.
    pub location: Option<String>,
    pub min_score: Option<f64>,
}

impl MatchFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.location.is_none() && self.min_score.is_none()
    }

    pub fn accepts(&self, record: &MatchRecord) -> bool {
        self.category.as_deref().map_or(true, |c| record.category == c)
            && self.location.as_deref().map_or(true, |l| record.location == l)
            && self.min_score.map_or(true, |s| record.similarity_score >= s)
    }
}
