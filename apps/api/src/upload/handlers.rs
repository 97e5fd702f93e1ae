use axum::extract::{Multipart, State};
use axum::Json;

use crate::auth::Caller;
use crate::errors::AppError;
use crate::state::AppState;
use crate::upload::service::{self, CvDeleteResponse, CvUploadResponse};

/// POST /api/v1/job-seekers/me/cv
///
/// Multipart upload with a single `file` field.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    caller: Caller,
    mut multipart: Multipart,
) -> Result<Json<CvUploadResponse>, AppError> {
    caller.require_job_seeker()?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Upload is missing a file name".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let response = service::upload_cv(
            &state.db,
            &state.s3,
            &state.config.s3_bucket,
            state.extractor.as_ref(),
            caller.user_id,
            &file_name,
            data,
        )
        .await?;
        return Ok(Json(response));
    }

    Err(AppError::Validation(
        "Multipart body is missing the 'file' field".to_string(),
    ))
}

/// DELETE /api/v1/job-seekers/me/cv
pub async fn handle_delete_cv(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<CvDeleteResponse>, AppError> {
    caller.require_job_seeker()?;
    let response = service::delete_cv(
        &state.db,
        &state.s3,
        &state.config.s3_bucket,
        caller.user_id,
    )
    .await?;
    Ok(Json(response))
}
