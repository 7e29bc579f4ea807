//! Prompts for turning free-text resumes into a `CandidateProfile`.

pub const RESUME_PARSE_SYSTEM: &str = "You are an expert resume parser. \
    Extract structured information and return only valid JSON.";

/// `{resume_text}` and `{rules}` are substituted before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and extract structured information.

Resume Text:
{resume_text}

Return JSON with exactly these keys:
{
  "name": "full name of the person",
  "email": "email address",
  "phone": "phone number",
  "location": "city, state or location",
  "summary": "professional summary or objective",
  "experience_years": "total years of experience or estimate",
  "education": ["degree", "university"],
  "technical_skills": ["programming languages", "tools", "technologies"],
  "soft_skills": ["communication", "leadership", "teamwork"],
  "work_experience": ["job titles", "companies", "key achievements"],
  "certifications": ["professional certifications", "licenses"],
  "keywords": ["relevant keywords for job matching"]
}

Guidelines:
- For technical_skills, focus on hard skills, tools, and technologies
- For keywords, include important terms that would help in job matching
- {rules}
"#;
