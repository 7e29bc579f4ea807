// Prompt fragments shared by every LLM caller.
// Callers keep their task-specific prompts in their own prompts.rs.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps extraction to what the source text states.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    Extract only information that is explicitly mentioned. \
    Do NOT infer, interpolate, or invent details. \
    If a value is not available, use an empty array [] or an empty string.";
