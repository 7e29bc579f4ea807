use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::matching::normalizer::{list_field, text_field, TextFields, Vectorizable};

/// Structured view of a candidate's resume.
///
/// Either posted directly by a client or produced by a `ProfileExtractor`.
/// Only the skills, experience, keywords and summary are vectorized; the rest is carried
/// through to responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub experience_years: String,
    pub education: Vec<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub work_experience: Vec<String>,
    pub certifications: Vec<String>,
    pub keywords: Vec<String>,
    pub resume_text: String,
    pub processed_at: Option<DateTime<Utc>>,
}

impl TryFrom<Value> for CandidateProfile {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(record) = value else {
            return Err("candidate profile must be a JSON object".to_string());
        };

        let processed_at = match record.get("processed_at") {
            Some(Value::String(ts)) => Some(
                DateTime::parse_from_rfc3339(ts)
                    .map_err(|e| format!("processed_at is not an RFC 3339 timestamp: {e}"))?
                    .with_timezone(&Utc),
            ),
            _ => None,
        };

        Ok(CandidateProfile {
            name: text_field(&record, "name"),
            email: text_field(&record, "email"),
            phone: text_field(&record, "phone"),
            location: text_field(&record, "location"),
            summary: text_field(&record, "summary"),
            experience_years: text_field(&record, "experience_years"),
            education: list_field(&record, "education"),
            technical_skills: list_field(&record, "technical_skills"),
            soft_skills: list_field(&record, "soft_skills"),
            work_experience: list_field(&record, "work_experience"),
            certifications: list_field(&record, "certifications"),
            keywords: list_field(&record, "keywords"),
            resume_text: text_field(&record, "resume_text"),
            processed_at,
        })
    }
}

impl Vectorizable for CandidateProfile {
    fn text_fields(&self) -> TextFields<'_> {
        TextFields {
            identity: Vec::new(),
            technical_skills: &self.technical_skills,
            soft_skills: &self.soft_skills,
            experience: &self.work_experience,
            keywords: &self.keywords,
            summary: &self.summary,
        }
    }
}
