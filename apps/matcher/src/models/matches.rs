use serde::Serialize;

use crate::models::posting::Posting;

/// One annotated, ranked match. Built fresh per query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub job_id: String,
    pub title: String,
    pub category: String,
    pub company_type: String,
    pub location: String,
    pub salary_range: String,
    pub job_summary: String,
    /// Cosine similarity in [0, 1].
    pub similarity_score: f64,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub match_reasons: Vec<String>,
}

impl MatchRecord {
    pub fn for_posting(posting: &Posting, similarity_score: f64) -> Self {
        Self {
            job_id: posting.job_id.clone(),
            title: posting.title.clone(),
            category: posting.category.clone(),
            company_type: posting.company_type.clone(),
            location: posting.location.clone(),
            salary_range: posting.salary_range.clone(),
            job_summary: posting.job_summary.clone(),
            similarity_score,
            matching_skills: Vec::new(),
            missing_skills: Vec::new(),
            match_reasons: Vec::new(),
        }
    }
}
