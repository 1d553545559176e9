use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// A validated image submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSubmission {
    /// Base64 payload, without any `data:` URL prefix.
    pub image_base64: String,
    pub media_type: String,
    pub run_analysis: bool,
}

/// Token counts reported by a provider envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// The text a provider produced, normalized from its response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

/// The parsed output of the OCR provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptionResult {
    #[serde(rename = "text")]
    pub plain_text: String,
    pub metadata: BTreeMap<String, String>,
    #[serde(rename = "markdown")]
    pub raw_markdown: String,
    pub provider: String,
    #[serde(skip)]
    pub usage: Option<TokenUsage>,
}

/// The output of the analysis provider. `insights_text` is the raw markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    #[serde(rename = "insights")]
    pub insights_text: String,
    #[serde(skip)]
    pub raw_markdown: String,
    pub provider: String,
}

/// Why analysis was dropped from an otherwise successful result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisFailure {
    pub kind: String,
    pub detail: String,
}

/// The merged outcome of one `/process` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub success: bool,
    pub transcription: Option<TranscriptionResult>,
    pub analysis: Option<AnalysisResult>,
    pub error_kind: Option<String>,
    pub error_detail: Option<String>,
    pub analysis_failure: Option<AnalysisFailure>,
}

/// Provider credentials, models and limits shared by every request.
///
/// Built once at startup and handed to the stage constructors; stages never
/// read the environment themselves.
#[derive(Clone)]
pub struct PipelineConfig {
    pub ocr_api_key: Option<String>,
    pub ocr_api_url: String,
    pub ocr_model: String,
    pub analysis_api_key: Option<String>,
    pub analysis_api_url: String,
    pub analysis_model: String,
    pub gateway_api_key: Option<String>,
    pub gateway_api_url: String,
    pub gateway_model: String,
    pub max_image_bytes: usize,
    pub provider_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ocr_api_key: None,
            ocr_api_url: DEFAULT_MESSAGES_API_URL.to_string(),
            ocr_model: DEFAULT_OCR_MODEL.to_string(),
            analysis_api_key: None,
            analysis_api_url: DEFAULT_MESSAGES_API_URL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            gateway_api_key: None,
            gateway_api_url: DEFAULT_GATEWAY_API_URL.to_string(),
            gateway_model: DEFAULT_GATEWAY_MODEL.to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
        }
    }
}

fn redact(key: &Option<String>) -> &'static str {
    match key {
        Some(k) if !k.is_empty() => "[REDACTED]",
        _ => "<unset>",
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("ocr_api_key", &redact(&self.ocr_api_key))
            .field("ocr_api_url", &self.ocr_api_url)
            .field("ocr_model", &self.ocr_model)
            .field("analysis_api_key", &redact(&self.analysis_api_key))
            .field("analysis_api_url", &self.analysis_api_url)
            .field("analysis_model", &self.analysis_model)
            .field("gateway_api_key", &redact(&self.gateway_api_key))
            .field("gateway_api_url", &self.gateway_api_url)
            .field("gateway_model", &self.gateway_model)
            .field("max_image_bytes", &self.max_image_bytes)
            .field("provider_timeout", &self.provider_timeout)
            .finish()
    }
}
