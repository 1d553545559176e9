use super::{AppError, AppState};
use crate::types::TranscribeResponse;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use tracing::info;

/// The handler for `POST /transcribe`.
///
/// Validates the submission, then runs only the transcription stage.
pub async fn transcribe_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TranscribeResponse>, AppError> {
    let Json(body) = payload?;
    let submission = app_state.pipeline.validate_submission(&body)?;
    info!(
        media_type = %submission.media_type,
        "Received transcribe request"
    );

    let result = app_state
        .pipeline
        .transcribe(&submission)
        .await
        .map_err(AppError::Transcription)?;

    Ok(Json(result.into()))
}
