//! Corpus statistics: distributions by category, location and seniority plus the most
//! requested technical skills.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Posting;

/// Number of skills reported in `top_technical_skills`.
pub const TOP_SKILLS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStats {
    pub total_postings: usize,
    pub categories: BTreeMap<String, usize>,
    pub locations: BTreeMap<String, usize>,
    /// Keyed by numeric seniority level (1 to 4).
    pub seniority_levels: BTreeMap<u8, usize>,
    /// Count descending, then skill ascending.
    pub top_technical_skills: Vec<SkillCount>,
}

impl CorpusStats {
    pub fn compute(postings: &[Posting]) -> Self {
        let mut categories = BTreeMap::new();
        let mut locations = BTreeMap::new();
        let mut seniority_levels = BTreeMap::new();
        let mut skills: BTreeMap<&str, usize> = BTreeMap::new();

        for posting in postings {
            *categories.entry(posting.category.clone()).or_insert(0) += 1;
            *locations.entry(posting.location.clone()).or_insert(0) += 1;
            *seniority_levels
                .entry(u8::from(posting.seniority_level))
                .or_insert(0) += 1;
            for skill in &posting.technical_skills {
                *skills.entry(skill.as_str()).or_insert(0) += 1;
            }
        }

        let mut top: Vec<SkillCount> = skills
            .into_iter()
            .map(|(skill, count)| SkillCount {
                skill: skill.to_string(),
                count,
            })
            .collect();
        // BTreeMap order already gives skill ascending; the sort is stable.
        top.sort_by(|a, b| b.count.cmp(&a.count));
        top.truncate(TOP_SKILLS);

        Self {
            total_postings: postings.len(),
            categories,
            locations,
            seniority_levels,
            top_technical_skills: top,
        }
    }
}
