//! # Transcription Pipeline
//!
//! Wires the validator and both stages together and assembles the merged
//! [`ProcessResult`]. A failed transcription fails the request; a failed
//! analysis only drops the `analysis` field.

use crate::{
    analysis::AnalysisStage,
    errors::{PipelineError, ValidationError},
    transcription::TranscriptionStage,
    types::{
        AnalysisFailure, AnalysisResult, ImageSubmission, PipelineConfig, ProcessResult,
        TranscriptionResult,
    },
    validation::{validate_analysis_request, validate_submission},
};
use serde_json::Value;
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct Pipeline {
    transcription: TranscriptionStage,
    analysis: AnalysisStage,
    max_image_bytes: usize,
}

impl Pipeline {
    pub fn new(
        transcription: TranscriptionStage,
        analysis: AnalysisStage,
        max_image_bytes: usize,
    ) -> Self {
        Self {
            transcription,
            analysis,
            max_image_bytes,
        }
    }

    /// Builds both stages from one immutable configuration value.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        Ok(Self::new(
            TranscriptionStage::from_config(config)?,
            AnalysisStage::from_config(config)?,
            config.max_image_bytes,
        ))
    }

    pub fn transcription_stage(&self) -> &TranscriptionStage {
        &self.transcription
    }

    pub fn analysis_stage(&self) -> &AnalysisStage {
        &self.analysis
    }

    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    pub fn validate_submission(&self, body: &Value) -> Result<ImageSubmission, ValidationError> {
        validate_submission(body, self.max_image_bytes)
    }

    pub fn validate_analysis_request(&self, body: &Value) -> Result<String, ValidationError> {
        validate_analysis_request(body)
    }

    pub async fn transcribe(
        &self,
        submission: &ImageSubmission,
    ) -> Result<TranscriptionResult, PipelineError> {
        self.transcription
            .transcribe(&submission.image_base64, &submission.media_type)
            .await
    }

    pub async fn analyze(&self, transcription: &str) -> Result<AnalysisResult, PipelineError> {
        self.analysis.analyze(transcription).await
    }

    /// Runs transcription, then analysis when requested, and merges the outcomes.
    ///
    /// The two provider calls are sequential: analysis needs the transcribed text.
    pub async fn process(&self, submission: &ImageSubmission) -> ProcessResult {
        let transcription = self.transcribe(submission).await;

        let analysis = match &transcription {
            Ok(t) if submission.run_analysis => {
                if t.plain_text.trim().is_empty() {
                    Some(Err(AnalysisSkipped::EmptyTranscription))
                } else {
                    Some(self.analyze(&t.plain_text).await.map_err(AnalysisSkipped::Failed))
                }
            }
            _ => None,
        };

        assemble(transcription, analysis)
    }
}

/// Why an analysis that was asked for did not produce a result.
#[derive(Debug)]
pub enum AnalysisSkipped {
    /// The transcription had no text worth analysing; no call was made.
    EmptyTranscription,
    Failed(PipelineError),
}

impl AnalysisSkipped {
    fn into_failure(self) -> AnalysisFailure {
        match self {
            AnalysisSkipped::EmptyTranscription => AnalysisFailure {
                kind: "EmptyTranscription".to_string(),
                detail: "Transcription contained no text to analyze".to_string(),
            },
            AnalysisSkipped::Failed(err) => AnalysisFailure {
                kind: err.kind().to_string(),
                detail: err.public_detail(),
            },
        }
    }
}

/// Merges a transcription outcome with an optional analysis outcome.
///
/// `analysis` is `None` when analysis was not requested or never attempted.
pub fn assemble(
    transcription: Result<TranscriptionResult, PipelineError>,
    analysis: Option<Result<AnalysisResult, AnalysisSkipped>>,
) -> ProcessResult {
    let transcription = match transcription {
        Ok(t) => t,
        Err(err) => {
            warn!(error = %err, "Transcription failed; request aborted");
            let kind = match &err {
                PipelineError::Config(_) | PipelineError::ReqwestClientBuild(_) => "ConfigError",
                _ => "TranscriptionFailed",
            };
            return ProcessResult {
                success: false,
                transcription: None,
                analysis: None,
                error_kind: Some(kind.to_string()),
                error_detail: Some(err.public_detail()),
                analysis_failure: None,
            };
        }
    };

    let (analysis, analysis_failure) = match analysis {
        None => (None, None),
        Some(Ok(result)) => (Some(result), None),
        Some(Err(skipped)) => {
            let failure = skipped.into_failure();
            warn!(
                kind = %failure.kind,
                detail = %failure.detail,
                "Analysis unavailable; returning transcription only"
            );
            (None, Some(failure))
        }
    };

    info!(
        analysis = analysis.is_some(),
        "Process request assembled successfully"
    );
    ProcessResult {
        success: true,
        transcription: Some(transcription),
        analysis,
        error_kind: None,
        error_detail: None,
        analysis_failure,
    }
}
