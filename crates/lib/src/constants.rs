//! # Shared Constants
//!
//! Defaults shared by the library and the `inkwell-server` configuration layer.

/// Media type assumed when a submission does not name one.
pub const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

/// Largest decoded image accepted by the validator (15 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 15 * 1024 * 1024;

/// Per provider call timeout.
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 45_000;

/// Messages API used for OCR and for the direct analysis route.
pub const DEFAULT_MESSAGES_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// OpenAI-compatible chat completions endpoint of the aggregation gateway.
pub const DEFAULT_GATEWAY_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

pub const DEFAULT_OCR_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_ANALYSIS_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_GATEWAY_MODEL: &str = "anthropic/claude-sonnet-4";

/// Role labels used in provider errors and logs.
pub const OCR_ROLE: &str = "ocr";
pub const ANALYSIS_ROLE: &str = "analysis";
