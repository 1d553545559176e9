use super::{AppError, AppState};
use crate::types::{Diagnostics, ProcessResponse};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use tracing::info;

/// The handler for `POST /process`.
///
/// Transcribes the page and, unless `analyze` is false, analyses the text.
/// An analysis failure leaves `analysis: null` and is described under
/// `diagnostics.analysis`; only a transcription failure is an error.
pub async fn process_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ProcessResponse>, AppError> {
    let Json(body) = payload?;
    let submission = app_state.pipeline.validate_submission(&body)?;
    info!(
        media_type = %submission.media_type,
        analyze = submission.run_analysis,
        "Received process request"
    );

    let result = app_state.pipeline.process(&submission).await;

    let transcription = match result.transcription {
        Some(t) if result.success => t,
        _ => {
            return Err(AppError::Failed {
                kind: result
                    .error_kind
                    .unwrap_or_else(|| "TranscriptionFailed".to_string()),
                details: result.error_detail.unwrap_or_default(),
            })
        }
    };

    Ok(Json(ProcessResponse {
        success: true,
        transcription,
        analysis: result.analysis,
        diagnostics: result
            .analysis_failure
            .map(|analysis| Diagnostics { analysis }),
    }))
}
