//! # Application State
//!
//! The shared application state (`AppState`) and the logic for building it at
//! startup. The state holds the pipeline and its provider clients; the rest of
//! the configuration is only needed while building it.

use crate::config::AppConfig;
use inkwell::Pipeline;
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The transcription and analysis pipeline.
    pub pipeline: Arc<Pipeline>,
}

/// Builds the shared application state from the configuration.
///
/// Missing credentials are not a startup error: the affected endpoints answer
/// with a `ConfigError` instead, so the health check keeps working.
pub async fn build_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pipeline = Pipeline::from_config(&config.pipeline)?;

    info!(
        ocr = pipeline.transcription_stage().is_configured(),
        analysis_route = pipeline.analysis_stage().route().map(|r| r.as_str()),
        max_image_bytes = pipeline.max_image_bytes(),
        "Pipeline ready"
    );

    Ok(AppState {
        pipeline: Arc::new(pipeline),
    })
}
