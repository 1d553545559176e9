use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inkwell::{PipelineError, ValidationError};
use serde_json::json;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// Every variant renders as `{success:false, error, kind, details?}`.
/// Upstream response bodies only ever reach the log.
#[derive(Debug)]
pub enum AppError {
    /// The request body failed validation; no provider was contacted.
    Validation(ValidationError),
    /// The body could not be read as JSON at all.
    Json(JsonRejection),
    /// The transcription stage failed.
    Transcription(PipelineError),
    /// The analysis stage failed on a direct `/analyze` call.
    Analysis(PipelineError),
    /// A failed `/process` run, already reduced to a kind and a detail.
    Failed { kind: String, details: String },
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::Json(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

const NOT_CONFIGURED: &str = "Server is not configured correctly.";

/// Maps a failed stage to `(status, error, kind, details)`.
fn stage_failure(
    err: PipelineError,
    failed_message: &str,
    failed_kind: &str,
) -> (StatusCode, String, String, Option<String>) {
    error!(error = %err, "{failed_message}");
    match &err {
        PipelineError::Config(_) | PipelineError::ReqwestClientBuild(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            NOT_CONFIGURED.to_string(),
            "ConfigError".to_string(),
            Some(err.public_detail()),
        ),
        PipelineError::Provider { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            failed_message.to_string(),
            failed_kind.to_string(),
            Some(err.public_detail()),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message, kind, details) = match self {
            AppError::Validation(err) => {
                warn!(kind = err.kind(), "Rejected request: {err}");
                (
                    StatusCode::BAD_REQUEST,
                    err.to_string(),
                    err.kind().to_string(),
                    None,
                )
            }
            AppError::Json(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                warn!("Rejected oversized request body: {}", rejection.body_text());
                (
                    StatusCode::BAD_REQUEST,
                    "Image too large: request body exceeds the configured image size limit"
                        .to_string(),
                    "ImageTooLarge".to_string(),
                    None,
                )
            }
            AppError::Json(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                (
                    rejection.status(),
                    "Request body must be valid JSON".to_string(),
                    "InvalidBody".to_string(),
                    Some(rejection.body_text()),
                )
            }
            AppError::Transcription(err) => {
                stage_failure(err, "Transcription failed", "TranscriptionFailed")
            }
            AppError::Analysis(err) => stage_failure(err, "Analysis failed", "AnalysisFailed"),
            AppError::Failed { kind, details } => {
                error!(%kind, %details, "Process request failed");
                let message = if kind == "ConfigError" {
                    NOT_CONFIGURED
                } else {
                    "Transcription failed"
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message.to_string(),
                    kind,
                    Some(details),
                )
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                    "InternalError".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "success": false,
            "error": error_message,
            "kind": kind,
        });
        if let Some(details) = details {
            body["details"] = json!(details);
        }

        (status_code, Json(body)).into_response()
    }
}
