//! Match explainer: short human-readable reasons for a single match.

/// Scores strictly above this earn a compatibility reason.
pub const HIGH_COMPATIBILITY_THRESHOLD: f64 = 0.3;

pub const MAX_REASONS: usize = 4;

/// Skills named in the skills reason.
const MAX_NAMED_SKILLS: usize = 3;

/// Builds the reasons for one match, in priority order:
///
/// 1. compatibility score above [`HIGH_COMPATIBILITY_THRESHOLD`], as a percentage
/// 2. up to three matching skills
/// 3. a candidate keyword contained in the posting category
/// 4. the candidate location contained in the posting location
///
/// Substring checks are case-insensitive. Blank keywords and a blank candidate location
/// never match.
pub fn explain(
    score: f64,
    matching_skills: &[String],
    candidate_keywords: &[String],
    candidate_location: &str,
    posting_category: &str,
    posting_location: &str,
) -> Vec<String> {
    let mut reasons = Vec::with_capacity(MAX_REASONS);

    if score > HIGH_COMPATIBILITY_THRESHOLD {
        reasons.push(format!("High compatibility score ({:.2}%)", score * 100.0));
    }

    if !matching_skills.is_empty() {
        let named: Vec<&str> = matching_skills
            .iter()
            .take(MAX_NAMED_SKILLS)
            .map(String::as_str)
            .collect();
        reasons.push(format!("Matching skills: {}", named.join(", ")));
    }

    let category = posting_category.to_lowercase();
    let keyword_hit = candidate_keywords.iter().any(|kw| {
        let kw = kw.trim().to_lowercase();
        !kw.is_empty() && category.contains(&kw)
    });
    if keyword_hit {
        reasons.push(format!("Relevant experience in {posting_category}"));
    }

    let wanted = candidate_location.trim().to_lowercase();
    if !wanted.is_empty() && posting_location.to_lowercase().contains(&wanted) {
        reasons.push("Location preference match".to_string());
    }

    reasons.truncate(MAX_REASONS);
    reasons
}
