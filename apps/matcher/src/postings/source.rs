//! Posting sources. The ranking core only ever sees `Vec<Posting>`.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::Posting;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read posting corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Posting corpus is not a JSON array of postings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Synchronous supplier of the posting corpus.
///
/// Carried in the matching session as `Arc<dyn PostingSource>`.
pub trait PostingSource: Send + Sync {
    fn load(&self) -> Result<Vec<Posting>, SourceError>;
}

/// Reads a JSON array of postings from disk on every `load`.
pub struct JsonFilePostingSource {
    path: PathBuf,
}

impl JsonFilePostingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PostingSource for JsonFilePostingSource {
    fn load(&self) -> Result<Vec<Posting>, SourceError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let records: Vec<Value> = serde_json::from_str(&raw)?;
        let total = records.len();

        let postings: Vec<Posting> = records
            .into_iter()
            .enumerate()
            .filter_map(|(position, record)| match Posting::try_from(record) {
                Ok(posting) => Some(posting),
                Err(reason) => {
                    warn!(position, %reason, "Skipping malformed posting");
                    None
                }
            })
            .collect();

        info!(
            path = %self.path.display(),
            loaded = postings.len(),
            skipped = total - postings.len(),
            "Posting corpus loaded"
        );
        Ok(postings)
    }
}

/// Fixed in-memory corpus for tests.
#[cfg(test)]
pub struct StaticPostingSource(pub std::sync::Mutex<Vec<Posting>>);

#[cfg(test)]
impl StaticPostingSource {
    pub fn new(postings: Vec<Posting>) -> Self {
        Self(std::sync::Mutex::new(postings))
    }

    pub fn replace(&self, postings: Vec<Posting>) {
        *self.0.lock().unwrap() = postings;
    }
}

#[cfg(test)]
impl PostingSource for StaticPostingSource {
    fn load(&self) -> Result<Vec<Posting>, SourceError> {
        Ok(self.0.lock().unwrap().clone())
    }
}

/// Builds a posting from a JSON fixture.
#[cfg(test)]
pub fn make_posting(value: Value) -> Posting {
    Posting::try_from(value).unwrap()
}
