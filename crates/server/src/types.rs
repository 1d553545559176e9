//! # API Response Types
//!
//! Success bodies returned by the `inkwell-server` endpoints. Error bodies are
//! built by [`crate::errors::AppError`].

use inkwell::{AnalysisFailure, AnalysisResult, TokenUsage, TranscriptionResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// The body of a successful `POST /transcribe`.
#[derive(Serialize, Debug)]
pub struct TranscribeResponse {
    pub success: bool,
    pub transcription: String,
    pub metadata: BTreeMap<String, String>,
    pub markdown: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

impl From<TranscriptionResult> for TranscribeResponse {
    fn from(result: TranscriptionResult) -> Self {
        Self {
            success: true,
            transcription: result.plain_text,
            metadata: result.metadata,
            markdown: result.raw_markdown,
            provider: result.provider,
            usage: result.usage,
        }
    }
}

/// The body of a successful `POST /analyze`.
#[derive(Serialize, Debug)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: String,
    pub provider: String,
}

impl From<AnalysisResult> for AnalyzeResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            success: true,
            analysis: result.insights_text,
            provider: result.provider,
        }
    }
}

/// Why `analysis` is null in a `/process` answer that asked for it.
#[derive(Serialize, Debug)]
pub struct Diagnostics {
    pub analysis: AnalysisFailure,
}

/// The body of a successful `POST /process`.
///
/// `analysis` is always present and `null` when it was not requested or failed.
#[derive(Serialize, Debug)]
pub struct ProcessResponse {
    pub success: bool,
    pub transcription: TranscriptionResult,
    pub analysis: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

/// The body of `GET /`.
#[derive(Serialize, Debug)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}
