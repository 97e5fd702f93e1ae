// LLM prompt constants for job-requirement extraction.

/// System prompt for requirement extraction — enforces JSON-only output.
pub const REQUIREMENTS_SYSTEM: &str = "You are an expert technical recruiter. \
    Extract structured hiring requirements from a job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Requirement extraction prompt template. Replace `{requirements}` before
/// sending.
pub const REQUIREMENTS_PROMPT_TEMPLATE: &str = r#"Extract key requirements from the job description. Return ONLY valid JSON with fields: skills[], minExperience, location, mustHaveSkills[]. No markdown, just JSON.

Job Description:
{requirements}"#;
