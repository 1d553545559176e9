//! # AI Provider Factory
//!
//! Builds the OCR and analysis providers from a [`PipelineConfig`]. Which
//! analysis transport is used is decided here, once, from the credentials
//! that are present; the stages only ever see a boxed provider.

use crate::{
    errors::PipelineError,
    providers::ai::{
        anthropic::AnthropicProvider, openrouter::OpenRouterProvider, AiProvider, VisionProvider,
    },
    types::PipelineConfig,
};
use tracing::info;

/// The transport used to reach the analysis provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisRoute {
    /// Through the aggregation gateway (bearer auth, chat-completions envelope).
    Gateway,
    /// Straight to the vendor API (`x-api-key`, messages envelope).
    Direct,
}

impl AnalysisRoute {
    /// Prefers the gateway when its credential is present, then the direct key.
    pub fn select(config: &PipelineConfig) -> Option<Self> {
        if credential(&config.gateway_api_key).is_some() {
            Some(AnalysisRoute::Gateway)
        } else if credential(&config.analysis_api_key).is_some() {
            Some(AnalysisRoute::Direct)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisRoute::Gateway => "gateway",
            AnalysisRoute::Direct => "direct",
        }
    }
}

/// Treats blank values the same as unset ones.
fn credential(key: &Option<String>) -> Option<&str> {
    key.as_deref().map(str::trim).filter(|k| !k.is_empty())
}

/// Creates the OCR provider, or `None` when no OCR credential is configured.
pub fn create_ocr_provider(
    config: &PipelineConfig,
) -> Result<Option<Box<dyn VisionProvider>>, PipelineError> {
    let Some(api_key) = credential(&config.ocr_api_key) else {
        info!("No OCR credential configured; /transcribe and /process will report a config error.");
        return Ok(None);
    };
    info!(model = %config.ocr_model, url = %config.ocr_api_url, "Configuring OCR provider");
    let provider = AnthropicProvider::new(
        config.ocr_api_url.clone(),
        api_key.to_string(),
        config.ocr_model.clone(),
        config.provider_timeout,
    )?;
    Ok(Some(Box::new(provider)))
}

/// Creates the analysis provider for the selected route, or `None` when no
/// analysis credential is configured.
pub fn create_analysis_provider(
    config: &PipelineConfig,
) -> Result<Option<(AnalysisRoute, Box<dyn AiProvider>)>, PipelineError> {
    let Some(route) = AnalysisRoute::select(config) else {
        info!("No analysis credential configured; analysis will be unavailable.");
        return Ok(None);
    };

    let provider: Box<dyn AiProvider> = match route {
        AnalysisRoute::Gateway => {
            let api_key = credential(&config.gateway_api_key).unwrap_or_default();
            info!(model = %config.gateway_model, url = %config.gateway_api_url, "Configuring analysis provider via gateway");
            Box::new(OpenRouterProvider::new(
                config.gateway_api_url.clone(),
                api_key.to_string(),
                config.gateway_model.clone(),
                config.provider_timeout,
            )?)
        }
        AnalysisRoute::Direct => {
            let api_key = credential(&config.analysis_api_key).unwrap_or_default();
            info!(model = %config.analysis_model, url = %config.analysis_api_url, "Configuring analysis provider directly");
            Box::new(
                AnthropicProvider::new(
                    config.analysis_api_url.clone(),
                    api_key.to_string(),
                    config.analysis_model.clone(),
                    config.provider_timeout,
                )?
                .with_temperature(0.7),
            )
        }
    };

    Ok(Some((route, provider)))
}
