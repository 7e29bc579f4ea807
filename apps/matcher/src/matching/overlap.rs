//! Skill overlap between a candidate and a posting.

use std::collections::HashSet;

use serde::Serialize;

/// Default cap on `missing`.
pub const DEFAULT_MAX_MISSING: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillOverlap {
    /// Posting skills the candidate has, in posting order.
    pub matching: Vec<String>,
    /// Posting skills the candidate lacks, in posting order, at most `max_missing`.
    pub missing: Vec<String>,
}

/// Trims, collapses inner whitespace and lowercases. Empty results are dropped by callers.
fn normalize_skill(skill: &str) -> String {
    skill.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Normalized, deduplicated skills in first-seen order.
fn normalize_skills(skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}

/// Exact match on normalized skill strings. No partial or fuzzy matching.
pub fn overlap(candidate: &[String], posting: &[String], max_missing: usize) -> SkillOverlap {
    let have: HashSet<String> = normalize_skills(candidate).into_iter().collect();

    let (matching, mut missing): (Vec<String>, Vec<String>) = normalize_skills(posting)
        .into_iter()
        .partition(|skill| have.contains(skill));
    missing.truncate(max_missing);

    SkillOverlap { matching, missing }
}
