use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::Caller;
use crate::errors::AppError;
use crate::models::recruiter::{RecruiterRow, SearchRecord};
use crate::recruiters::service::{
    self, CreateRecruiterRequest, SaveCandidateRequest, SavedCandidateDetail,
    UpdateRecruiterRequest,
};
use crate::state::AppState;

/// POST /api/v1/recruiters
pub async fn handle_create_profile(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<CreateRecruiterRequest>,
) -> Result<Json<RecruiterRow>, AppError> {
    caller.require_recruiter()?;
    let profile = service::create_profile(&state.db, caller.user_id, request).await?;
    Ok(Json(profile))
}

/// GET /api/v1/recruiters/me
pub async fn handle_get_profile(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<RecruiterRow>, AppError> {
    caller.require_recruiter()?;
    let profile = service::get_profile(&state.db, caller.user_id).await?;
    Ok(Json(profile))
}

/// PATCH /api/v1/recruiters/me
pub async fn handle_update_profile(
    State(state): State<AppState>,
    caller: Caller,
    Json(update): Json<UpdateRecruiterRequest>,
) -> Result<Json<RecruiterRow>, AppError> {
    caller.require_recruiter()?;
    let profile = service::update_profile(&state.db, caller.user_id, update).await?;
    Ok(Json(profile))
}

/// POST /api/v1/recruiters/me/saved-candidates
pub async fn handle_save_candidate(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<SaveCandidateRequest>,
) -> Result<Json<RecruiterRow>, AppError> {
    caller.require_recruiter()?;
    let profile = service::save_candidate(&state.db, caller.user_id, request).await?;
    Ok(Json(profile))
}

/// DELETE /api/v1/recruiters/me/saved-candidates/:candidate_id
pub async fn handle_remove_saved_candidate(
    State(state): State<AppState>,
    caller: Caller,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<RecruiterRow>, AppError> {
    caller.require_recruiter()?;
    let profile =
        service::remove_saved_candidate(&state.db, caller.user_id, candidate_id).await?;
    Ok(Json(profile))
}

/// GET /api/v1/recruiters/me/saved-candidates
pub async fn handle_get_saved_candidates(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<SavedCandidateDetail>>, AppError> {
    caller.require_recruiter()?;
    let saved = service::get_saved_candidates(&state.db, caller.user_id).await?;
    Ok(Json(saved))
}

/// GET /api/v1/recruiters/me/search-history
pub async fn handle_get_search_history(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<SearchRecord>>, AppError> {
    caller.require_recruiter()?;
    let history = service::get_search_history(&state.db, caller.user_id).await?;
    Ok(Json(history))
}
