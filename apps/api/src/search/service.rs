//! Candidate search service: fetches the open-to-work pool, runs the pure
//! engine over it, and records every invocation in the recruiter's search
//! history. Statistics stay in SQL aggregates.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job_seeker::JobSeekerRow;
use crate::recruiters;
use crate::search::criteria::SearchCriteria;
use crate::search::engine::{matches_criteria, run_search, SearchOutcome};

/// Executes a recruiter search. The invocation is recorded with
/// `results_count` equal to the full filtered total, not the page size.
pub async fn search_candidates(
    pool: &PgPool,
    recruiter_user_id: Uuid,
    criteria: SearchCriteria,
) -> Result<SearchOutcome, AppError> {
    let rows = fetch_open_candidates(pool).await?;
    let outcome = run_search(rows, &criteria);

    let query = criteria.query.clone().unwrap_or_default();
    let filters = serde_json::to_value(&criteria).unwrap_or_default();
    recruiters::service::record_search(
        pool,
        recruiter_user_id,
        &query,
        filters,
        outcome.pagination.total as i64,
    )
    .await?;

    Ok(outcome)
}

/// Top open-to-work candidates by profile score.
pub async fn get_top_candidates(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<JobSeekerRow>, AppError> {
    let rows = sqlx::query_as::<_, JobSeekerRow>(
        "SELECT * FROM job_seekers WHERE is_open_to_work = TRUE ORDER BY profile_score DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Candidates matching any of the given skills, best profiles first.
pub async fn get_candidates_by_skills(
    pool: &PgPool,
    skills: Vec<String>,
    limit: usize,
) -> Result<Vec<JobSeekerRow>, AppError> {
    let criteria = SearchCriteria {
        skills: Some(skills),
        ..SearchCriteria::default()
    };

    let mut rows: Vec<JobSeekerRow> = fetch_open_candidates(pool)
        .await?
        .into_iter()
        .filter(|row| matches_criteria(row, &criteria))
        .collect();
    rows.sort_by(|a, b| b.profile_score.cmp(&a.profile_score));
    rows.truncate(limit);
    Ok(rows)
}

pub async fn fetch_open_candidates(pool: &PgPool) -> Result<Vec<JobSeekerRow>, sqlx::Error> {
    sqlx::query_as::<_, JobSeekerRow>("SELECT * FROM job_seekers WHERE is_open_to_work = TRUE")
        .fetch_all(pool)
        .await
}

#[derive(Debug, Serialize)]
pub struct SkillFrequency {
    pub skill: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct LocationFrequency {
    pub location: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchStatistics {
    pub total_candidates: i64,
    pub open_to_work: i64,
    pub average_profile_score: f64,
    pub average_experience: f64,
    pub top_skills: Vec<SkillFrequency>,
    pub top_locations: Vec<LocationFrequency>,
}

/// Pool-wide aggregates for the recruiter dashboard.
pub async fn get_statistics(pool: &PgPool) -> Result<SearchStatistics, AppError> {
    let total_candidates: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM job_seekers")
        .fetch_one(pool)
        .await?;

    let open_to_work: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM job_seekers WHERE is_open_to_work = TRUE")
            .fetch_one(pool)
            .await?;

    let average_profile_score: f64 =
        sqlx::query_scalar("SELECT COALESCE(AVG(profile_score), 0)::float8 FROM job_seekers")
            .fetch_one(pool)
            .await?;

    let average_experience: f64 = sqlx::query_scalar(
        "SELECT COALESCE(AVG(total_experience_years), 0)::float8 FROM job_seekers",
    )
    .fetch_one(pool)
    .await?;

    let top_skills: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT skill, COUNT(*) AS count
        FROM job_seekers, UNNEST(skills) AS skill
        GROUP BY skill
        ORDER BY count DESC
        LIMIT 20
        "#,
    )
    .fetch_all(pool)
    .await?;

    let top_locations: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT location, COUNT(*) AS count
        FROM job_seekers
        WHERE location IS NOT NULL
        GROUP BY location
        ORDER BY count DESC
        LIMIT 10
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(SearchStatistics {
        total_candidates,
        open_to_work,
        average_profile_score,
        average_experience,
        top_skills: top_skills
            .into_iter()
            .map(|(skill, count)| SkillFrequency { skill, count })
            .collect(),
        top_locations: top_locations
            .into_iter()
            .map(|(location, count)| LocationFrequency { location, count })
            .collect(),
    })
}
