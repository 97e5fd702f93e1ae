use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::Caller;
use crate::errors::AppError;
use crate::matching::service::{match_candidates, MatchResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub requirements: String,
}

/// POST /api/v1/match
///
/// Ranks open-to-work candidates against free-text job requirements.
pub async fn handle_match(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<MatchRequest>,
) -> Result<Json<Vec<MatchResult>>, AppError> {
    caller.require_recruiter()?;
    let results =
        match_candidates(&state.db, state.llm.as_ref(), &request.requirements).await?;
    Ok(Json(results))
}
