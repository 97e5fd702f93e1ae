use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::job_seeker::{AiSummary, JobSeekerRow};
use crate::profiles::scoring::{suggest_improvements, ImprovementReport};
use crate::profiles::service::{self, UpdateProfileRequest};
use crate::profiles::summary::generate_profile_summary;
use crate::state::AppState;

/// GET /api/v1/job-seekers/me
pub async fn handle_get_own_profile(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<JobSeekerRow>, AppError> {
    caller.require_job_seeker()?;
    let profile = service::get_or_create(&state.db, caller.user_id).await?;
    Ok(Json(profile))
}

/// PATCH /api/v1/job-seekers/me
pub async fn handle_update_own_profile(
    State(state): State<AppState>,
    caller: Caller,
    Json(update): Json<UpdateProfileRequest>,
) -> Result<Json<JobSeekerRow>, AppError> {
    caller.require_job_seeker()?;
    let profile = service::update_profile(&state.db, caller.user_id, update).await?;
    Ok(Json(profile))
}

/// GET /api/v1/job-seekers/:id
///
/// Third-party reads increment the candidate's view counter.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<JobSeekerRow>, AppError> {
    let profile = service::get_by_id(&state.db, &id, &caller).await?;
    Ok(Json(profile))
}

/// GET /api/v1/job-seekers/:id/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<ImprovementReport>, AppError> {
    let profile = service::get_by_id(&state.db, &id, &caller).await?;
    Ok(Json(suggest_improvements(&profile)))
}

/// POST /api/v1/job-seekers/:id/summary
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    _caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<AiSummary>, AppError> {
    let summary = generate_profile_summary(&state.db, state.llm.as_ref(), &id).await?;
    Ok(Json(summary))
}
