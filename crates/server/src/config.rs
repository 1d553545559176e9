//! # Application Configuration
//!
//! Loads the `inkwell-server` configuration once at startup. Three layers are
//! merged with the `config` crate: programmatic defaults, an optional
//! `config.yml` (with `${VAR}` substitution), and plain environment variables
//! such as `OCR_API_KEY` or `PORT`. The result is resolved into an immutable
//! [`AppConfig`] whose [`PipelineConfig`] is handed to the library.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use inkwell::constants::{
    DEFAULT_ANALYSIS_MODEL, DEFAULT_GATEWAY_API_URL, DEFAULT_GATEWAY_MODEL,
    DEFAULT_MAX_IMAGE_BYTES, DEFAULT_MESSAGES_API_URL, DEFAULT_OCR_MODEL,
    DEFAULT_PROVIDER_TIMEOUT_MS,
};
use inkwell::PipelineConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::time::Duration;
use tracing::info;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3847;

static RE_ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").unwrap());

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The resolved server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT`.
    pub port: u16,
    /// Everything the transcription and analysis stages need.
    pub pipeline: PipelineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            pipeline: PipelineConfig::default(),
        }
    }
}

/// The flat key space shared by `config.yml` and the environment.
///
/// Credential aliases are kept as separate fields and folded together in
/// [`RawConfig::resolve`].
#[derive(Deserialize)]
struct RawConfig {
    port: u16,
    #[serde(default)]
    ocr_api_key: Option<String>,
    #[serde(default)]
    anthropic_api_key: Option<String>,
    ocr_api_url: String,
    ocr_model: String,
    #[serde(default)]
    openrouter_api_key: Option<String>,
    #[serde(default)]
    analysis_gateway_api_key: Option<String>,
    gateway_api_url: String,
    gateway_model: String,
    #[serde(default)]
    analysis_api_key: Option<String>,
    analysis_api_url: String,
    analysis_model: String,
    max_image_bytes: usize,
    provider_timeout_ms: u64,
}

/// Treats empty and whitespace-only values as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RawConfig {
    fn resolve(self) -> Result<AppConfig, ConfigError> {
        if self.max_image_bytes == 0 {
            return Err(ConfigError::General(
                "max_image_bytes must be greater than zero".to_string(),
            ));
        }
        if self.provider_timeout_ms == 0 {
            return Err(ConfigError::General(
                "provider_timeout_ms must be greater than zero".to_string(),
            ));
        }

        Ok(AppConfig {
            port: self.port,
            pipeline: PipelineConfig {
                ocr_api_key: non_blank(self.ocr_api_key).or(non_blank(self.anthropic_api_key)),
                ocr_api_url: self.ocr_api_url,
                ocr_model: self.ocr_model,
                analysis_api_key: non_blank(self.analysis_api_key),
                analysis_api_url: self.analysis_api_url,
                analysis_model: self.analysis_model,
                gateway_api_key: non_blank(self.openrouter_api_key)
                    .or(non_blank(self.analysis_gateway_api_key)),
                gateway_api_url: self.gateway_api_url,
                gateway_model: self.gateway_model,
                max_image_bytes: self.max_image_bytes,
                provider_timeout: Duration::from_millis(self.provider_timeout_ms),
            },
        })
    }
}

// Reads a file and substitutes `${VAR}` references with environment values.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let expanded = RE_ENV_VAR.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded.to_string()))
}

/// Loads the application configuration.
///
/// - Layer 1: built-in defaults for every non-secret key.
/// - Layer 2: `config.yml` next to the crate manifest, or the file passed in
///   `config_path_override` (which must then exist).
/// - Layer 3: environment variables, matched case-insensitively against the
///   flat key names (`OCR_API_KEY` sets `ocr_api_key`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder()
        .set_default("port", DEFAULT_PORT as i64)?
        .set_default("ocr_api_url", DEFAULT_MESSAGES_API_URL)?
        .set_default("ocr_model", DEFAULT_OCR_MODEL)?
        .set_default("gateway_api_url", DEFAULT_GATEWAY_API_URL)?
        .set_default("gateway_model", DEFAULT_GATEWAY_MODEL)?
        .set_default("analysis_api_url", DEFAULT_MESSAGES_API_URL)?
        .set_default("analysis_model", DEFAULT_ANALYSIS_MODEL)?
        .set_default("max_image_bytes", DEFAULT_MAX_IMAGE_BYTES as i64)?
        .set_default("provider_timeout_ms", DEFAULT_PROVIDER_TIMEOUT_MS as i64)?;

    match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            let default_path = format!("{}/config.yml", env!("CARGO_MANIFEST_DIR"));
            if let Some(content) = read_and_substitute(&default_path)? {
                info!("Loading user-defined configuration from '{default_path}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            }
        }
    }

    let settings = builder
        .add_source(Environment::default().try_parsing(true))
        .build()?;

    let raw: RawConfig = settings.try_deserialize()?;
    raw.resolve()
}
