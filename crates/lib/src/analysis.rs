//! # Analysis Stage
//!
//! Forwards transcribed text to the analysis provider. The transport (gateway
//! or direct) is fixed when the stage is built.

use crate::{
    constants::ANALYSIS_ROLE,
    errors::PipelineError,
    prompts::{analysis_user_prompt, ANALYSIS_SYSTEM_PROMPT},
    providers::{
        ai::AiProvider,
        call_with_timeout,
        factory::{create_analysis_provider, AnalysisRoute},
    },
    types::{AnalysisResult, PipelineConfig},
};
use std::time::Duration;
use tracing::info;

#[derive(Clone, Debug)]
pub struct AnalysisStage {
    provider: Option<(AnalysisRoute, Box<dyn AiProvider>)>,
    timeout: Duration,
}

impl AnalysisStage {
    pub fn new(provider: Option<(AnalysisRoute, Box<dyn AiProvider>)>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        Ok(Self::new(
            create_analysis_provider(config)?,
            config.provider_timeout,
        ))
    }

    pub fn route(&self) -> Option<AnalysisRoute> {
        self.provider.as_ref().map(|(route, _)| *route)
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|(_, p)| p.name())
    }

    /// Produces insights for an already-transcribed entry.
    pub async fn analyze(&self, transcription: &str) -> Result<AnalysisResult, PipelineError> {
        let (route, provider) = self.provider.as_ref().ok_or_else(|| {
            PipelineError::Config("Analysis credential is not configured".to_string())
        })?;

        info!(
            provider = provider.name(),
            route = route.as_str(),
            chars = transcription.len(),
            "Requesting analysis"
        );
        let user_prompt = analysis_user_prompt(transcription);
        let reply = call_with_timeout(
            ANALYSIS_ROLE,
            self.timeout,
            provider.generate(ANALYSIS_SYSTEM_PROMPT, &user_prompt),
        )
        .await?;

        Ok(AnalysisResult {
            insights_text: reply.text.clone(),
            raw_markdown: reply.text,
            provider: provider.name().to_string(),
        })
    }
}
