//! AI-backed CV extraction.
//!
//! Sends a bounded prefix of the resume text to the LLM with a fixed JSON
//! schema, then validates and coerces every field individually — the
//! response is never assumed to match the requested schema. Any failure
//! (transport, API, parse) degrades to the heuristic strategy.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::extraction::heuristic::HeuristicExtractor;
use crate::extraction::prompts::{CV_EXTRACT_PROMPT_TEMPLATE, CV_EXTRACT_SYSTEM};
use crate::extraction::types::{
    ExtractedCertification, ExtractedEducation, ExtractedExperience, ExtractedProfile,
    ExtractedProject,
};
use crate::extraction::CvExtractor;
use crate::llm_client::{LlmClient, LlmError};

/// Bounded prompt prefix: only the first 10k characters of the CV are sent.
const MAX_PROMPT_CHARS: usize = 10_000;

pub struct AiExtractor {
    llm: LlmClient,
    fallback: HeuristicExtractor,
}

impl AiExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            fallback: HeuristicExtractor::new(),
        }
    }

    async fn extract_with_llm(&self, cv_text: &str) -> Result<ExtractedProfile, LlmError> {
        let prefix: String = cv_text.chars().take(MAX_PROMPT_CHARS).collect();
        let prompt = CV_EXTRACT_PROMPT_TEMPLATE.replace("{cv_text}", &prefix);

        let raw: Value = self.llm.call_json(&prompt, CV_EXTRACT_SYSTEM).await?;
        Ok(coerce_extracted(&raw))
    }
}

#[async_trait]
impl CvExtractor for AiExtractor {
    async fn extract(&self, cv_text: &str) -> ExtractedProfile {
        match self.extract_with_llm(cv_text).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("AI CV extraction failed, falling back to heuristics: {e}");
                self.fallback.extract_profile(cv_text)
            }
        }
    }

    fn backend(&self) -> &'static str {
        "ai"
    }
}

/// Coerces a loosely-typed LLM response into the uniform extraction payload.
/// Every field defaults to its empty form when absent or mistyped.
fn coerce_extracted(raw: &Value) -> ExtractedProfile {
    ExtractedProfile {
        name: str_field(raw, "name"),
        email: str_field(raw, "email"),
        phone: str_field(raw, "phone"),
        location: str_field(raw, "location"),
        title: str_field(raw, "title"),
        // Some model outputs label the professional summary "summary".
        bio: {
            let bio = str_field(raw, "bio");
            if bio.is_empty() {
                str_field(raw, "summary")
            } else {
                bio
            }
        },
        total_experience_years: num_field(raw, "totalYears"),
        skills: string_list(raw.get("skills")),
        experience: list_items(raw.get("experience"), |item| {
            let role = str_field(item, "role");
            let company = str_field(item, "company");
            if role.is_empty() && company.is_empty() {
                return None;
            }
            Some(ExtractedExperience {
                role,
                company,
                years: num_field(item, "years"),
                description: str_field(item, "description"),
            })
        }),
        education: list_items(raw.get("education"), |item| {
            let degree = str_field(item, "degree");
            let institution = str_field(item, "institution");
            if degree.is_empty() && institution.is_empty() {
                return None;
            }
            Some(ExtractedEducation {
                degree,
                institution,
                field: str_field(item, "field"),
                graduation_year: item
                    .get("graduationYear")
                    .and_then(Value::as_i64)
                    .map(|y| y as i32),
            })
        }),
        projects: list_items(raw.get("projects"), |item| {
            let name = str_field(item, "name");
            if name.is_empty() {
                return None;
            }
            Some(ExtractedProject {
                name,
                description: str_field(item, "description"),
                technologies: string_list(item.get("technologies")),
            })
        }),
        certifications: list_items(raw.get("certifications"), |item| {
            // Models occasionally emit certifications as bare strings.
            if let Some(name) = item.as_str() {
                return Some(ExtractedCertification {
                    name: name.to_string(),
                    ..ExtractedCertification::default()
                });
            }
            let name = str_field(item, "name");
            if name.is_empty() {
                return None;
            }
            Some(ExtractedCertification {
                name,
                issuer: str_field(item, "issuer"),
                year: item.get("year").and_then(Value::as_i64).map(|y| y as i32),
            })
        }),
    }
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

fn num_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn list_items<T>(value: Option<&Value>, mut coerce: impl FnMut(&Value) -> Option<T>) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(|item| coerce(item)).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_full_response() {
        let raw = json!({
            "name": "Jane Smith",
            "email": "jane@example.com",
            "phone": "+1555",
            "location": "Berlin",
            "title": "Backend Engineer",
            "bio": "Seasoned engineer.",
            "totalYears": 6.5,
            "skills": ["Rust", "Python"],
            "experience": [
                {"role": "Engineer", "company": "Acme", "years": 3.0, "description": "APIs"}
            ],
            "education": [
                {"degree": "BSc", "institution": "TU Berlin", "field": "CS", "graduationYear": 2017}
            ],
            "projects": [
                {"name": "Indexer", "description": "Search index", "technologies": ["Rust"]}
            ],
            "certifications": [
                {"name": "CKA", "issuer": "CNCF", "year": 2022}
            ]
        });

        let profile = coerce_extracted(&raw);
        assert_eq!(profile.name, "Jane Smith");
        assert_eq!(profile.total_experience_years, 6.5);
        assert_eq!(profile.skills, vec!["Rust", "Python"]);
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].company, "Acme");
        assert_eq!(profile.education[0].graduation_year, Some(2017));
        assert_eq!(profile.projects[0].name, "Indexer");
        assert_eq!(profile.certifications[0].issuer, "CNCF");
    }

    #[test]
    fn test_coerce_empty_object_yields_defaults() {
        let profile = coerce_extracted(&json!({}));
        assert_eq!(profile, ExtractedProfile::default());
    }

    #[test]
    fn test_coerce_mistyped_fields_fall_back_to_defaults() {
        let raw = json!({
            "name": 42,
            "skills": "Rust",
            "totalYears": "six",
            "experience": {"role": "Engineer"}
        });
        let profile = coerce_extracted(&raw);
        assert!(profile.name.is_empty());
        assert!(profile.skills.is_empty());
        assert_eq!(profile.total_experience_years, 0.0);
        assert!(profile.experience.is_empty());
    }

    #[test]
    fn test_coerce_bio_falls_back_to_summary_key() {
        let raw = json!({"summary": "Ten years of infrastructure work."});
        let profile = coerce_extracted(&raw);
        assert_eq!(profile.bio, "Ten years of infrastructure work.");
    }

    #[test]
    fn test_coerce_skips_entries_missing_identity_fields() {
        let raw = json!({
            "experience": [
                {"years": 2.0, "description": "no role or company"},
                {"role": "Engineer", "company": "Acme"}
            ],
            "projects": [{"description": "nameless"}]
        });
        let profile = coerce_extracted(&raw);
        assert_eq!(profile.experience.len(), 1);
        assert!(profile.projects.is_empty());
    }

    #[test]
    fn test_coerce_certifications_as_bare_strings() {
        let raw = json!({"certifications": ["AWS Solutions Architect"]});
        let profile = coerce_extracted(&raw);
        assert_eq!(profile.certifications.len(), 1);
        assert_eq!(profile.certifications[0].name, "AWS Solutions Architect");
        assert!(profile.certifications[0].issuer.is_empty());
    }
}
