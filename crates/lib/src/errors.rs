use std::fmt;
use thiserror::Error;

/// Errors raised while validating an incoming request body.
///
/// Validation always happens before any provider is contacted, so these
/// errors never carry upstream state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    InvalidBody,
    #[error("{message}")]
    MissingField {
        field: &'static str,
        message: &'static str,
    },
    #[error("Invalid 'mediaType' (expected type/subtype)")]
    InvalidMediaType,
    #[error("Invalid '{field}' (expected boolean)")]
    InvalidType { field: &'static str },
    #[error("Image too large: estimated {estimated} bytes exceeds limit of {limit} bytes")]
    ImageTooLarge { estimated: usize, limit: usize },
}

impl ValidationError {
    /// The machine-readable kind of this error.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::InvalidBody => "InvalidBody",
            ValidationError::MissingField { .. } => "MissingField",
            ValidationError::InvalidMediaType => "InvalidMediaType",
            ValidationError::InvalidType { .. } => "InvalidType",
            ValidationError::ImageTooLarge { .. } => "ImageTooLarge",
        }
    }
}

/// How an upstream provider call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStatus {
    /// The provider answered with a non-success HTTP status.
    Http(u16),
    /// The call did not complete within the configured timeout.
    Timeout,
    /// The request never produced a response (DNS, TLS, connection reset...).
    Transport,
    /// A success status whose body could not be decoded.
    InvalidResponse,
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderStatus::Http(code) => write!(f, "HTTP {code}"),
            ProviderStatus::Timeout => write!(f, "timeout"),
            ProviderStatus::Transport => write!(f, "transport error"),
            ProviderStatus::InvalidResponse => write!(f, "invalid response"),
        }
    }
}

/// Errors returned by a single provider client call.
///
/// These stay inside the library: stages translate them into
/// [`PipelineError::Provider`] together with the role of the failing provider.
#[derive(Error, Debug)]
pub enum ProviderCallError {
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned HTTP {status}: {body}")]
    AiApi { status: u16, body: String },
    #[error("AI provider response contained no text")]
    EmptyResponse,
}

impl ProviderCallError {
    pub fn status(&self) -> ProviderStatus {
        match self {
            ProviderCallError::AiRequest(e) if e.is_timeout() => ProviderStatus::Timeout,
            ProviderCallError::AiRequest(_) => ProviderStatus::Transport,
            ProviderCallError::AiDeserialization(_) | ProviderCallError::EmptyResponse => {
                ProviderStatus::InvalidResponse
            }
            ProviderCallError::AiApi { status, .. } => ProviderStatus::Http(*status),
        }
    }
}

/// Custom error types for the transcription and analysis pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0}")]
    Config(String),
    #[error("{provider} provider failed ({status}): {detail}")]
    Provider {
        provider: &'static str,
        status: ProviderStatus,
        detail: String,
    },
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
}

impl PipelineError {
    /// The machine-readable kind reported to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Config(_) | PipelineError::ReqwestClientBuild(_) => "ConfigError",
            PipelineError::Provider { .. } => "ProviderError",
        }
    }

    /// A short description that is safe to show to clients.
    ///
    /// Upstream response bodies and transport error chains are left out.
    pub fn public_detail(&self) -> String {
        match self {
            PipelineError::Config(msg) => msg.clone(),
            PipelineError::Provider {
                provider, status, ..
            } => format!("{provider} provider failed ({status})"),
            PipelineError::ReqwestClientBuild(_) => "HTTP client could not be built".to_string(),
        }
    }
}
