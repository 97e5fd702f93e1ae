//! AI-generated profile insights.
//!
//! The LLM analyzes the candidate's profile and returns a structured summary
//! block. A parse failure persists a placeholder; a transport/API failure
//! returns a deterministic mock derived from the profile, without persisting.

use chrono::Utc;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::job_seeker::{AiSummary, JobSeekerRow};
use crate::profiles::prompts::{PROFILE_SUMMARY_PROMPT_TEMPLATE, PROFILE_SUMMARY_SYSTEM};
use crate::profiles::scoring::compute_profile_score;
use crate::profiles::service::{parse_candidate_id, persist_profile};

pub async fn generate_profile_summary(
    pool: &PgPool,
    llm: Option<&LlmClient>,
    raw_candidate_id: &str,
) -> Result<AiSummary, AppError> {
    let candidate_id = parse_candidate_id(raw_candidate_id)?;

    let mut profile =
        sqlx::query_as::<_, JobSeekerRow>("SELECT * FROM job_seekers WHERE id = $1")
            .bind(candidate_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

    let Some(llm) = llm else {
        return Ok(mock_summary(&profile));
    };

    let prompt = build_profile_prompt(&profile);

    let summary = match llm.call_json::<Value>(&prompt, PROFILE_SUMMARY_SYSTEM).await {
        Ok(value) => coerce_summary(&value),
        Err(LlmError::Parse(e)) => {
            warn!("Profile summary response was not valid JSON: {e}");
            placeholder_summary()
        }
        Err(e) => {
            warn!("Profile summary generation failed, returning mock: {e}");
            return Ok(mock_summary(&profile));
        }
    };

    profile.ai_summary = Some(Json(summary.clone()));
    profile.profile_score = compute_profile_score(&profile);
    profile.last_updated = Utc::now();
    persist_profile(pool, &profile).await?;

    Ok(summary)
}

fn build_profile_prompt(profile: &JobSeekerRow) -> String {
    let education = if profile.education.is_empty() {
        "None".to_string()
    } else {
        profile
            .education
            .iter()
            .map(|e| format!("{} in {}", e.degree, e.field))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let experience_details = if profile.experience.is_empty() {
        "None".to_string()
    } else {
        profile
            .experience
            .iter()
            .map(|e| format!("- {} at {} ({} years)", e.role, e.company, e.years))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let skills = if profile.skills.is_empty() {
        "None".to_string()
    } else {
        profile.skills.join(", ")
    };

    PROFILE_SUMMARY_PROMPT_TEMPLATE
        .replace("{name}", "the candidate")
        .replace("{skills}", &skills)
        .replace("{years}", &profile.total_experience_years.to_string())
        .replace("{education}", &education)
        .replace("{projects}", &profile.projects.len().to_string())
        .replace("{experience_details}", &experience_details)
}

/// Coerces a loosely-typed LLM response, defaulting each expected field.
fn coerce_summary(value: &Value) -> AiSummary {
    AiSummary {
        skill_extraction: string_list(value.get("skillExtraction")),
        experience_summary: str_field(value, "experienceSummary"),
        strengths: string_list(value.get("strengths")),
        weak_areas: string_list(value.get("weakAreas")),
        overall_summary: str_field(value, "overallSummary"),
        generated_at: Utc::now(),
    }
}

fn placeholder_summary() -> AiSummary {
    AiSummary {
        skill_extraction: vec![],
        experience_summary: "Unable to generate summary".to_string(),
        strengths: vec!["Profile needs more details".to_string()],
        weak_areas: vec!["Add more information to profile".to_string()],
        overall_summary: "Profile under development".to_string(),
        generated_at: Utc::now(),
    }
}

/// Deterministic summary derived from the profile itself, used when no LLM
/// is configured or the call fails.
pub fn mock_summary(profile: &JobSeekerRow) -> AiSummary {
    let lead_skill = profile
        .skills
        .first()
        .map(String::as_str)
        .unwrap_or("technology");

    let top_skills: Vec<&str> = profile.skills.iter().take(3).map(String::as_str).collect();
    let expertise = if top_skills.is_empty() {
        "various technologies".to_string()
    } else {
        top_skills.join(", ")
    };

    AiSummary {
        skill_extraction: profile.skills.iter().take(7).cloned().collect(),
        experience_summary: format!(
            "Professional with {} years of experience in {}.",
            profile.total_experience_years, lead_skill
        ),
        strengths: vec![
            format!("{}+ years of experience", profile.total_experience_years),
            format!("{} technical skills", profile.skills.len()),
            format!("{} completed projects", profile.projects.len()),
        ],
        weak_areas: vec![
            "Profile could benefit from more detailed project descriptions".to_string(),
            "Consider adding certifications".to_string(),
        ],
        overall_summary: format!("Skilled professional with expertise in {expertise}."),
        generated_at: Utc::now(),
    }
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
