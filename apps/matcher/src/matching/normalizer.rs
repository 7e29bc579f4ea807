//! Text normalizer: flattens loosely-typed record fields and joins a record into the
//! single text blob that the vectorizer consumes.
//!
//! Field concatenation order is fixed so identical records always produce identical text:
//! identity fields, technical skills, soft skills, responsibilities / work experience,
//! keywords, summary.

use serde_json::{Map, Value};
use tracing::warn;

/// Borrowed view of the text-bearing fields of a record, in concatenation order.
#[derive(Debug, Default)]
pub struct TextFields<'a> {
    pub identity: Vec<&'a str>,
    pub technical_skills: &'a [String],
    pub soft_skills: &'a [String],
    pub experience: &'a [String],
    pub keywords: &'a [String],
    pub summary: &'a str,
}

/// Anything that can be projected into the vector space.
pub trait Vectorizable {
    fn text_fields(&self) -> TextFields<'_>;
}

/// Joins a record's fields into one whitespace-separated blob.
/// Empty fields are skipped so they never introduce stray separators.
pub fn normalize_text<T: Vectorizable + ?Sized>(record: &T) -> String {
    let fields = record.text_fields();

    let mut parts: Vec<&str> = Vec::new();
    parts.extend(fields.identity.iter().copied());
    for list in [
        fields.technical_skills,
        fields.soft_skills,
        fields.experience,
        fields.keywords,
    ] {
        parts.extend(list.iter().map(String::as_str));
    }
    parts.push(fields.summary);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Field flattening
// ────────────────────────────────────────────────────────────────────────────

/// Flattens one list element.
///
/// - string → itself
/// - number / bool → its textual form
/// - object → its `name` value if present, otherwise its first value, otherwise ""
/// - anything else → nothing
fn flatten_item(item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => Some(
            map.get("name")
                .or_else(|| map.values().next())
                .and_then(scalar_text)
                .unwrap_or_default(),
        ),
        Value::Null | Value::Array(_) => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Flattens a list-valued field into plain strings.
/// Returns `None` when the value is not a list at all.
pub fn flatten_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(flatten_item).collect()),
        _ => None,
    }
}

/// Reads a list field from a JSON object, defaulting to an empty list when the field is
/// absent, null, or of an unexpected shape. Unexpected shapes are logged and recovered.
pub fn list_field(record: &Map<String, Value>, field: &str) -> Vec<String> {
    match record.get(field) {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => flatten_list(value).unwrap_or_else(|| {
            warn!(field, "Malformed list field; defaulting to empty list");
            Vec::new()
        }),
    }
}

/// Reads a scalar text field from a JSON object, defaulting to "" when absent or malformed.
pub fn text_field(record: &Map<String, Value>, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(value) => scalar_text(value).unwrap_or_else(|| {
            warn!(field, "Malformed text field; defaulting to empty string");
            String::new()
        }),
    }
}

/// Like [`text_field`] but falls back to `fallback` when the field is absent or empty.
pub fn text_field_or(record: &Map<String, Value>, field: &str, fallback: &str) -> String {
    let value = text_field(record, field);
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
