//! # Transcription Stage
//!
//! Sends the page image to the OCR provider and parses the markdown answer
//! into a [`TranscriptionResult`].

use crate::{
    constants::OCR_ROLE,
    errors::PipelineError,
    frontmatter::parse_transcription,
    prompts::TRANSCRIPTION_PROMPT,
    providers::{ai::VisionProvider, call_with_timeout, factory::create_ocr_provider},
    types::{PipelineConfig, TranscriptionResult},
};
use std::time::Duration;
use tracing::info;

#[derive(Clone, Debug)]
pub struct TranscriptionStage {
    provider: Option<Box<dyn VisionProvider>>,
    timeout: Duration,
}

impl TranscriptionStage {
    /// Creates a stage around an already-built provider.
    ///
    /// `None` leaves the stage unconfigured: every call fails with a config
    /// error and nothing is sent over the network.
    pub fn new(provider: Option<Box<dyn VisionProvider>>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        Ok(Self::new(
            create_ocr_provider(config)?,
            config.provider_timeout,
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    /// Transcribes one base64-encoded page image.
    pub async fn transcribe(
        &self,
        image_base64: &str,
        media_type: &str,
    ) -> Result<TranscriptionResult, PipelineError> {
        let provider = self.provider.as_deref().ok_or_else(|| {
            PipelineError::Config("OCR credential is not configured".to_string())
        })?;

        info!(
            provider = provider.name(),
            %media_type,
            base64_len = image_base64.len(),
            "Sending page image for transcription"
        );
        let reply = call_with_timeout(
            OCR_ROLE,
            self.timeout,
            provider.describe_image(TRANSCRIPTION_PROMPT, image_base64, media_type),
        )
        .await?;

        let parsed = parse_transcription(&reply.text);
        info!(
            chars = parsed.plain_text.len(),
            metadata_keys = parsed.metadata.len(),
            "Transcription completed"
        );

        Ok(TranscriptionResult {
            plain_text: parsed.plain_text,
            metadata: parsed.metadata,
            raw_markdown: reply.text,
            provider: provider.name().to_string(),
            usage: reply.usage,
        })
    }
}
