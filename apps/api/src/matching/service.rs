//! AI match service.
//!
//! With an LLM configured: extract structured requirements, pre-filter the
//! open-to-work pool, score the top 20 by profile score, and return the top
//! 10 by match score. Any failure at any stage degrades to the deterministic
//! ranking: top 10 by profile score with `match_score = profile_score`.

use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::engine::{build_match_reason, compute_match_score, JobRequirements};
use crate::matching::prompts::{REQUIREMENTS_PROMPT_TEMPLATE, REQUIREMENTS_SYSTEM};
use crate::models::job_seeker::JobSeekerRow;
use crate::search::service::get_top_candidates;

/// Candidates considered for scoring after the requirement pre-filter.
const SCORING_POOL_SIZE: usize = 20;
/// Ranked results returned to the recruiter.
const RESULT_LIMIT: usize = 10;

const FALLBACK_REASON: &str = "High profile score";

#[derive(Debug, Serialize)]
pub struct MatchResult {
    pub candidate: JobSeekerRow,
    pub match_score: i32,
    pub match_reason: String,
}

pub async fn match_candidates(
    pool: &PgPool,
    llm: Option<&LlmClient>,
    requirements_text: &str,
) -> Result<Vec<MatchResult>, AppError> {
    if requirements_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Job requirements cannot be empty".to_string(),
        ));
    }

    let Some(llm) = llm else {
        return fallback_by_profile_score(pool).await;
    };

    match ai_match(pool, llm, requirements_text).await {
        Ok(results) => Ok(results),
        Err(AppError::Database(e)) => Err(AppError::Database(e)),
        Err(e) => {
            warn!("AI matching failed, falling back to profile-score ranking: {e}");
            fallback_by_profile_score(pool).await
        }
    }
}

async fn ai_match(
    pool: &PgPool,
    llm: &LlmClient,
    requirements_text: &str,
) -> Result<Vec<MatchResult>, AppError> {
    let prompt = REQUIREMENTS_PROMPT_TEMPLATE.replace("{requirements}", requirements_text);
    let raw: Value = llm
        .call_json(&prompt, REQUIREMENTS_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Requirement extraction failed: {e}")))?;
    let requirements = coerce_requirements(&raw);

    // Best-profile-first pool, pre-filtered on the extracted requirements.
    let pool_rows = sqlx::query_as::<_, JobSeekerRow>(
        "SELECT * FROM job_seekers WHERE is_open_to_work = TRUE ORDER BY profile_score DESC",
    )
    .fetch_all(pool)
    .await?;

    let candidates: Vec<JobSeekerRow> = pool_rows
        .into_iter()
        .filter(|row| satisfies_requirements(row, &requirements))
        .take(SCORING_POOL_SIZE)
        .collect();

    let mut results: Vec<MatchResult> = candidates
        .into_iter()
        .map(|candidate| {
            let match_score = compute_match_score(&candidate, &requirements);
            let match_reason = build_match_reason(&candidate, &requirements);
            MatchResult {
                candidate,
                match_score,
                match_reason,
            }
        })
        .collect();

    results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    results.truncate(RESULT_LIMIT);
    Ok(results)
}

/// Pre-filter mirroring the extracted requirements: any-skill substring
/// match and a minimum-experience bound.
fn satisfies_requirements(row: &JobSeekerRow, requirements: &JobRequirements) -> bool {
    if !requirements.skills.is_empty() {
        let any_match = requirements.skills.iter().any(|wanted| {
            row.skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(&wanted.to_lowercase()))
        });
        if !any_match {
            return false;
        }
    }

    if let Some(min_experience) = requirements.min_experience {
        if row.total_experience_years < min_experience {
            return false;
        }
    }

    true
}

/// Deterministic fallback: top candidates by profile score, each assigned
/// `match_score = profile_score`.
async fn fallback_by_profile_score(pool: &PgPool) -> Result<Vec<MatchResult>, AppError> {
    let candidates = get_top_candidates(pool, RESULT_LIMIT as i64).await?;
    Ok(candidates
        .into_iter()
        .map(|candidate| {
            let match_score = candidate.profile_score;
            MatchResult {
                candidate,
                match_score,
                match_reason: FALLBACK_REASON.to_string(),
            }
        })
        .collect())
}

/// Coerces the loosely-typed extraction response, defaulting each field.
fn coerce_requirements(raw: &Value) -> JobRequirements {
    JobRequirements {
        skills: string_list(raw.get("skills")),
        min_experience: raw.get("minExperience").and_then(Value::as_f64),
        location: raw
            .get("location")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string),
        must_have_skills: string_list(raw.get("mustHaveSkills")),
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job_seeker::fixtures::empty_profile;
    use serde_json::json;

    #[test]
    fn test_coerce_requirements_full() {
        let raw = json!({
            "skills": ["Rust", "PostgreSQL"],
            "minExperience": 4,
            "location": "Berlin",
            "mustHaveSkills": ["Rust"]
        });
        let req = coerce_requirements(&raw);
        assert_eq!(req.skills, vec!["Rust", "PostgreSQL"]);
        assert_eq!(req.min_experience, Some(4.0));
        assert_eq!(req.location.as_deref(), Some("Berlin"));
        assert_eq!(req.must_have_skills, vec!["Rust"]);
    }

    #[test]
    fn test_coerce_requirements_defaults_on_missing_fields() {
        let req = coerce_requirements(&json!({}));
        assert_eq!(req, JobRequirements::default());
    }

    #[test]
    fn test_coerce_requirements_ignores_mistyped_fields() {
        let raw = json!({"skills": "Rust", "minExperience": "four"});
        let req = coerce_requirements(&raw);
        assert!(req.skills.is_empty());
        assert_eq!(req.min_experience, None);
    }

    #[test]
    fn test_satisfies_requirements_skill_or_match() {
        let mut row = empty_profile();
        row.skills = vec!["React.js".to_string()];

        let req = JobRequirements {
            skills: vec!["react".to_string(), "vue".to_string()],
            ..JobRequirements::default()
        };
        assert!(satisfies_requirements(&row, &req));

        let req = JobRequirements {
            skills: vec!["vue".to_string()],
            ..JobRequirements::default()
        };
        assert!(!satisfies_requirements(&row, &req));
    }

    #[test]
    fn test_satisfies_requirements_experience_bound() {
        let mut row = empty_profile();
        row.total_experience_years = 3.0;

        let req = JobRequirements {
            min_experience: Some(5.0),
            ..JobRequirements::default()
        };
        assert!(!satisfies_requirements(&row, &req));

        let req = JobRequirements {
            min_experience: Some(3.0),
            ..JobRequirements::default()
        };
        assert!(satisfies_requirements(&row, &req));
    }

    #[test]
    fn test_no_requirements_accepts_everyone() {
        assert!(satisfies_requirements(
            &empty_profile(),
            &JobRequirements::default()
        ));
    }
}
