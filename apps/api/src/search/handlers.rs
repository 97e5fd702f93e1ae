use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::job_seeker::JobSeekerRow;
use crate::search::criteria::SearchCriteria;
use crate::search::engine::SearchOutcome;
use crate::search::service::{self, SearchStatistics};
use crate::state::AppState;

/// POST /api/v1/search/candidates
pub async fn handle_search(
    State(state): State<AppState>,
    caller: Caller,
    Json(criteria): Json<SearchCriteria>,
) -> Result<Json<SearchOutcome>, AppError> {
    caller.require_recruiter()?;
    let outcome = service::search_candidates(&state.db, caller.user_id, criteria).await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
pub struct TopCandidatesQuery {
    #[serde(default = "default_top_limit")]
    pub limit: i64,
}

fn default_top_limit() -> i64 {
    10
}

/// GET /api/v1/search/top
pub async fn handle_top_candidates(
    State(state): State<AppState>,
    caller: Caller,
    Query(params): Query<TopCandidatesQuery>,
) -> Result<Json<Vec<JobSeekerRow>>, AppError> {
    caller.require_recruiter()?;
    let limit = params.limit.clamp(1, 100);
    let candidates = service::get_top_candidates(&state.db, limit).await?;
    Ok(Json(candidates))
}

#[derive(Debug, Deserialize)]
pub struct SkillsQuery {
    /// Comma-separated skill names.
    pub skills: String,
    #[serde(default = "default_skills_limit")]
    pub limit: usize,
}

fn default_skills_limit() -> usize {
    20
}

/// GET /api/v1/search/by-skills?skills=rust,postgres
pub async fn handle_candidates_by_skills(
    State(state): State<AppState>,
    caller: Caller,
    Query(params): Query<SkillsQuery>,
) -> Result<Json<Vec<JobSeekerRow>>, AppError> {
    caller.require_recruiter()?;
    let skills: Vec<String> = params
        .skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if skills.is_empty() {
        return Err(AppError::Validation(
            "At least one skill is required".to_string(),
        ));
    }
    let limit = params.limit.clamp(1, 100);
    let candidates = service::get_candidates_by_skills(&state.db, skills, limit).await?;
    Ok(Json(candidates))
}

/// GET /api/v1/search/statistics
pub async fn handle_statistics(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<SearchStatistics>, AppError> {
    caller.require_recruiter()?;
    let statistics = service::get_statistics(&state.db).await?;
    Ok(Json(statistics))
}
