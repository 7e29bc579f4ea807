use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::matching::normalizer::{list_field, text_field, text_field_or, TextFields, Vectorizable};

/// Placeholder used when a posting carries no salary information.
pub const SALARY_NOT_SPECIFIED: &str = "Not specified";

/// Coarse seniority derived from a posting's free-text experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum SeniorityLevel {
    Entry = 1,
    Mid = 2,
    Senior = 3,
    Lead = 4,
}

impl SeniorityLevel {
    /// Case-insensitive keyword lookup, checked in order entry/junior, mid, senior,
    /// lead/principal. Anything unrecognized is `Mid`.
    pub fn from_experience_level(level: &str) -> Self {
        let level = level.to_lowercase();
        if level.contains("entry") || level.contains("junior") {
            Self::Entry
        } else if level.contains("mid") {
            Self::Mid
        } else if level.contains("senior") {
            Self::Senior
        } else if level.contains("lead") || level.contains("principal") {
            Self::Lead
        } else {
            Self::Mid
        }
    }
}

impl From<SeniorityLevel> for u8 {
    fn from(level: SeniorityLevel) -> Self {
        level as u8
    }
}

/// A job posting as read from the posting source.
///
/// Deserialization never fails on field shape: malformed fields default to empty values.
/// Only a non-object record is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Posting {
    pub job_id: String,
    pub title: String,
    pub category: String,
    pub company_type: String,
    pub location: String,
    pub salary_range: String,
    pub employment_type: String,
    pub experience_level: String,
    pub seniority_level: SeniorityLevel,
    pub job_summary: String,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub responsibilities: Vec<String>,
    pub keywords: Vec<String>,
}

impl TryFrom<Value> for Posting {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(record) = value else {
            return Err("posting must be a JSON object".to_string());
        };

        let mut job_id = text_field(&record, "job_id");
        if job_id.is_empty() {
            job_id = text_field(&record, "id");
        }
        let experience_level = text_field(&record, "experience_level");

        Ok(Posting {
            job_id,
            title: text_field(&record, "title"),
            category: text_field(&record, "category"),
            company_type: text_field(&record, "company_type"),
            location: text_field(&record, "location"),
            salary_range: text_field_or(&record, "salary_range", SALARY_NOT_SPECIFIED),
            employment_type: text_field(&record, "employment_type"),
            seniority_level: SeniorityLevel::from_experience_level(&experience_level),
            experience_level,
            job_summary: text_field(&record, "job_summary"),
            technical_skills: list_field(&record, "technical_skills"),
            soft_skills: list_field(&record, "soft_skills"),
            responsibilities: list_field(&record, "responsibilities"),
            keywords: list_field(&record, "keywords"),
        })
    }
}

impl Vectorizable for Posting {
    fn text_fields(&self) -> TextFields<'_> {
        TextFields {
            identity: vec![self.title.as_str(), self.category.as_str()],
            technical_skills: &self.technical_skills,
            soft_skills: &self.soft_skills,
            experience: &self.responsibilities,
            keywords: &self.keywords,
            summary: &self.job_summary,
        }
    }
}
