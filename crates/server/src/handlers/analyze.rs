use super::{AppError, AppState};
use crate::types::AnalyzeResponse;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use tracing::info;

/// The handler for `POST /analyze`.
///
/// Analyses text that was transcribed earlier. Unlike `/process`, a failed
/// analysis is an error here.
pub async fn analyze_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(body) = payload?;
    let transcription = app_state.pipeline.validate_analysis_request(&body)?;
    info!(chars = transcription.len(), "Received analyze request");

    let result = app_state
        .pipeline
        .analyze(&transcription)
        .await
        .map_err(AppError::Analysis)?;

    Ok(Json(result.into()))
}
