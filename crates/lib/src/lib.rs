//! # Inkwell
//!
//! A two-stage AI pipeline for handwritten journal pages: an OCR-capable vision
//! model transcribes the page into markdown with a frontmatter block, and an
//! optional second provider analyses the transcribed text. Either provider may
//! fail independently; only a failed transcription fails the request.

pub mod analysis;
pub mod constants;
pub mod errors;
pub mod frontmatter;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod transcription;
pub mod types;
pub mod validation;

pub use analysis::AnalysisStage;
pub use errors::{PipelineError, ProviderStatus, ValidationError};
pub use pipeline::Pipeline;
pub use transcription::TranscriptionStage;
pub use types::{
    AnalysisFailure, AnalysisResult, ImageSubmission, PipelineConfig, ProcessResult,
    TokenUsage, TranscriptionResult,
};
