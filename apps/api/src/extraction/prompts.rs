// LLM prompt constants for CV extraction.

/// System prompt for CV extraction — enforces JSON-only output.
pub const CV_EXTRACT_SYSTEM: &str = "You are an expert resume parser. \
    Extract structured candidate information from raw CV text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// CV extraction prompt template. Replace `{cv_text}` before sending.
pub const CV_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract all information from this CV/resume and return ONLY a valid JSON object.

Required JSON structure:
{
  "name": "Full Name",
  "email": "email@example.com",
  "phone": "+1234567890",
  "location": "City, Country",
  "title": "Current Job Title",
  "bio": "Professional summary in 2-3 sentences",
  "totalYears": 5.5,
  "skills": ["JavaScript", "Python", "React"],
  "experience": [
    {
      "role": "Senior Developer",
      "company": "Tech Company Inc",
      "years": 2.5,
      "description": "Key responsibilities and achievements"
    }
  ],
  "education": [
    {
      "degree": "Bachelor of Science in Computer Science",
      "institution": "University Name",
      "field": "Computer Science",
      "graduationYear": 2020
    }
  ],
  "projects": [
    {
      "name": "Project Name",
      "description": "What the project does",
      "technologies": ["React", "Node.js"]
    }
  ],
  "certifications": [
    {
      "name": "Certification Name",
      "issuer": "Issuing Organization",
      "year": 2023
    }
  ]
}

Rules:
- Extract ALL work experience entries with complete details
- Extract ALL education entries with degrees and schools
- Extract ALL technical skills mentioned
- Use empty array [] if a section is not found
- Use empty string "" for missing text fields
- Return ONLY the JSON object, no markdown formatting, no explanations

CV TEXT:
{cv_text}"#;
