// LLM prompt constants for profile insight generation.

/// System prompt for profile summary generation.
pub const PROFILE_SUMMARY_SYSTEM: &str = "You are an expert HR analyst. \
    Analyze the candidate profile and provide structured insights. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Profile summary prompt template.
/// Replace: {name}, {skills}, {years}, {education}, {projects}, {experience_details}
pub const PROFILE_SUMMARY_PROMPT_TEMPLATE: &str = r#"Analyze this candidate profile and provide insights:

Name: {name}
Skills: {skills}
Experience: {years} years
Education: {education}
Projects: {projects} projects

Experience Details:
{experience_details}

Provide:
1. Top 5-7 extracted skills
2. Brief experience summary (2-3 sentences)
3. Top 3 strengths
4. 2-3 areas for improvement
5. Overall professional summary (2 sentences)

Format as JSON with fields: skillExtraction, experienceSummary, strengths, weakAreas, overallSummary"#;
