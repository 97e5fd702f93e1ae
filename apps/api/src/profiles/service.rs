//! Job-seeker profile persistence and mutation paths.
//!
//! All writes funnel through `persist_profile`, which recomputes nothing by
//! itself — callers are responsible for keeping the derived fields
//! (`total_experience_years`, `profile_score`) consistent before persisting.
//! Racing writers follow last-write-wins; there is no optimistic locking.

use chrono::Utc;
use serde::Deserialize;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::job_seeker::{Education, Experience, JobSeekerRow, Project};
use crate::profiles::scoring::compute_profile_score;

/// Client-settable profile fields. Derived fields (`total_experience_years`,
/// `profile_score`, `profile_views`) are intentionally absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub skills: Option<Vec<String>>,
    pub experience: Option<Vec<Experience>>,
    pub education: Option<Vec<Education>>,
    pub projects: Option<Vec<Project>>,
    pub certifications: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub preferred_job_types: Option<Vec<String>>,
    pub expected_salary: Option<f64>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub is_open_to_work: Option<bool>,
}

pub async fn find_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<JobSeekerRow>, sqlx::Error> {
    sqlx::query_as::<_, JobSeekerRow>("SELECT * FROM job_seekers WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Returns the caller's profile, creating one with the base score and empty
/// collections if it does not exist yet (safety fallback for accounts
/// registered before profile provisioning).
pub async fn get_or_create(pool: &PgPool, user_id: Uuid) -> Result<JobSeekerRow, AppError> {
    if let Some(profile) = find_by_user(pool, user_id).await? {
        return Ok(profile);
    }

    let profile = sqlx::query_as::<_, JobSeekerRow>(
        "INSERT INTO job_seekers (user_id) VALUES ($1) RETURNING *",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

/// Applies a partial update and recomputes the derived fields.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: UpdateProfileRequest,
) -> Result<JobSeekerRow, AppError> {
    let mut profile = find_by_user(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job seeker profile not found".to_string()))?;

    let experience_changed = update.experience.is_some();

    if let Some(skills) = update.skills {
        profile.skills = skills;
    }
    if let Some(experience) = update.experience {
        profile.experience = Json(experience);
    }
    if let Some(education) = update.education {
        profile.education = Json(education);
    }
    if let Some(projects) = update.projects {
        profile.projects = Json(projects);
    }
    if let Some(certifications) = update.certifications {
        profile.certifications = certifications;
    }
    if let Some(languages) = update.languages {
        profile.languages = languages;
    }
    if let Some(job_types) = update.preferred_job_types {
        profile.preferred_job_types = job_types;
    }
    if let Some(salary) = update.expected_salary {
        profile.expected_salary = Some(salary);
    }
    if let Some(bio) = update.bio {
        profile.bio = Some(bio);
    }
    if let Some(location) = update.location {
        profile.location = Some(location);
    }
    if let Some(phone) = update.phone {
        profile.phone = Some(phone);
    }
    if let Some(linkedin_url) = update.linkedin_url {
        profile.linkedin_url = Some(linkedin_url);
    }
    if let Some(github_url) = update.github_url {
        profile.github_url = Some(github_url);
    }
    if let Some(portfolio_url) = update.portfolio_url {
        profile.portfolio_url = Some(portfolio_url);
    }
    if let Some(open) = update.is_open_to_work {
        profile.is_open_to_work = open;
    }

    if experience_changed {
        profile.total_experience_years = profile.computed_experience_years();
    }
    profile.profile_score = compute_profile_score(&profile);
    profile.last_updated = Utc::now();

    persist_profile(pool, &profile).await?;
    Ok(profile)
}

/// Fetches a profile by its id for a third-party viewer.
///
/// Rejects sentinel ids the frontend is known to send (`""`, `"undefined"`,
/// `"null"`) before touching the database. Increments `profile_views` once
/// per non-owner read.
pub async fn get_by_id(
    pool: &PgPool,
    raw_id: &str,
    caller: &Caller,
) -> Result<JobSeekerRow, AppError> {
    let id = parse_candidate_id(raw_id)?;

    let mut profile = sqlx::query_as::<_, JobSeekerRow>("SELECT * FROM job_seekers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Job seeker not found".to_string()))?;

    if profile.user_id != caller.user_id {
        sqlx::query("UPDATE job_seekers SET profile_views = profile_views + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        profile.profile_views += 1;
    }

    Ok(profile)
}

pub fn parse_candidate_id(raw_id: &str) -> Result<Uuid, AppError> {
    if raw_id.is_empty() || raw_id == "undefined" || raw_id == "null" {
        return Err(AppError::Validation("Invalid job seeker ID".to_string()));
    }
    Uuid::parse_str(raw_id)
        .map_err(|_| AppError::Validation("Invalid job seeker ID".to_string()))
}

/// Writes every mutable column of the profile row. Last write wins.
pub async fn persist_profile(pool: &PgPool, profile: &JobSeekerRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE job_seekers SET
            skills = $2,
            experience = $3,
            education = $4,
            projects = $5,
            certifications = $6,
            languages = $7,
            preferred_job_types = $8,
            expected_salary = $9,
            cv_url = $10,
            cv_file_name = $11,
            bio = $12,
            location = $13,
            phone = $14,
            linkedin_url = $15,
            github_url = $16,
            portfolio_url = $17,
            total_experience_years = $18,
            profile_score = $19,
            ai_summary = $20,
            is_open_to_work = $21,
            last_updated = $22
        WHERE id = $1
        "#,
    )
    .bind(profile.id)
    .bind(&profile.skills)
    .bind(&profile.experience)
    .bind(&profile.education)
    .bind(&profile.projects)
    .bind(&profile.certifications)
    .bind(&profile.languages)
    .bind(&profile.preferred_job_types)
    .bind(profile.expected_salary)
    .bind(&profile.cv_url)
    .bind(&profile.cv_file_name)
    .bind(&profile.bio)
    .bind(&profile.location)
    .bind(&profile.phone)
    .bind(&profile.linkedin_url)
    .bind(&profile.github_url)
    .bind(&profile.portfolio_url)
    .bind(profile.total_experience_years)
    .bind(profile.profile_score)
    .bind(&profile.ai_summary)
    .bind(profile.is_open_to_work)
    .bind(profile.last_updated)
    .execute(pool)
    .await?;

    Ok(())
}
