//! Vocabulary and TF-IDF vectorizer.
//!
//! `VectorSpace::fit` builds an immutable term space over a corpus; `VectorSpace::transform`
//! projects any document into that space. Every vector remembers the id of the space that
//! produced it, so vectors from different fits are never scored against each other.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::MatchError;

/// Default cap on the number of retained n-grams.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Longest n-gram kept in the vocabulary.
const MAX_NGRAM: usize = 3;

/// Tokens shorter than this are dropped.
const MIN_TOKEN_CHARS: usize = 2;

const ENGLISH_STOP_WORDS_LIST: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
    "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
    "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg", "eight",
    "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even", "ever",
    "every", "everyone", "everything", "everywhere", "except", "few", "fifteen", "fifty",
    "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty", "found",
    "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "hasnt",
    "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon",
    "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if",
    "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
    "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
    "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must",
    "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine",
    "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off",
    "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
    "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please",
    "put", "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious",
    "several", "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so",
    "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
    "still", "such", "system", "take", "ten", "than", "that", "the", "their", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
    "therein", "thereupon", "these", "they", "thick", "thin", "third", "this", "those",
    "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
    "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
    "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
    "you", "your", "yours", "yourself", "yourselves",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOP_WORDS.get_or_init(|| ENGLISH_STOP_WORDS_LIST.iter().copied().collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Tokenization
// ────────────────────────────────────────────────────────────────────────────

/// Splits text into lowercase word tokens.
///
/// A token is a maximal run of alphanumeric characters or `_` with at least two characters.
/// Stop words are removed here, before n-grams are formed.
pub fn tokenize(text: &str) -> Vec<String> {
    let stop = stop_words();
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
        .filter(|t| !stop.contains(t.as_str()))
        .collect()
}

/// All 1..=3-grams of `text`, in document order, duplicates included.
fn ngrams(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut grams = Vec::with_capacity(tokens.len() * MAX_NGRAM);
    for n in 1..=MAX_NGRAM {
        grams.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    grams
}

fn term_counts(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for gram in ngrams(text) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

// ────────────────────────────────────────────────────────────────────────────
// Vector space
// ────────────────────────────────────────────────────────────────────────────

/// A fitted vocabulary plus the idf weights captured at fit time.
///
/// Immutable once built. Re-fitting produces a new space with a new id.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    id: Uuid,
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
    document_count: usize,
}

impl VectorSpace {
    /// Fits a vocabulary over `documents`.
    ///
    /// When more than `max_features` distinct n-grams occur, the ones with the highest
    /// document frequency are kept (ties by term, ascending). Retained terms get columns in
    /// lexicographic order.
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize) -> Result<Self, MatchError> {
        if documents.is_empty() {
            return Err(MatchError::EmptyCorpus);
        }

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            for term in term_counts(doc.as_ref()).into_keys() {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let distinct = document_frequency.len();
        let mut ranked: Vec<(String, usize)> = document_frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut terms = Vec::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (column, (term, df)) in ranked.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term.clone(), column);
            terms.push(term);
        }

        if terms.is_empty() {
            warn!(
                documents = documents.len(),
                "Fitted an empty vocabulary; every document will map to the zero vector"
            );
        }

        let space = Self {
            id: Uuid::new_v4(),
            vocabulary,
            terms,
            idf,
            document_count: documents.len(),
        };
        info!(
            space_id = %space.id,
            documents = space.document_count,
            distinct_terms = distinct,
            vocabulary = space.dimension(),
            "Vector space fitted"
        );
        Ok(space)
    }

    /// Projects `document` into this space. Unknown terms are ignored.
    pub fn transform(&self, document: &str) -> DocumentVector {
        let mut entries: Vec<(usize, f64)> = term_counts(document)
            .into_iter()
            .filter_map(|(term, tf)| {
                self.vocabulary
                    .get(&term)
                    .map(|&col| (col, f64::from(tf) * self.idf[col]))
            })
            .collect();
        entries.sort_by_key(|&(col, _)| col);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }

        debug!(space_id = %self.id, nonzero = entries.len(), "Document transformed");
        DocumentVector {
            space_id: self.id,
            dimension: self.dimension(),
            entries,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of columns (retained terms).
    pub fn dimension(&self) -> usize {
        self.terms.len()
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.column(term).map(|c| self.idf[c])
    }
}

/// Sparse, L2-normalized TF-IDF vector.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentVector {
    space_id: Uuid,
    dimension: usize,
    /// `(column, weight)` pairs sorted by column; weights are strictly positive.
    entries: Vec<(usize, f64)>,
}

impl DocumentVector {
    pub fn space_id(&self) -> Uuid {
        self.space_id
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product over the shared columns. Callers must check the space ids first.
    pub fn dot(&self, other: &DocumentVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_col, a_w) = self.entries[i];
            let (b_col, b_w) = other.entries[j];
            match a_col.cmp(&b_col) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}
