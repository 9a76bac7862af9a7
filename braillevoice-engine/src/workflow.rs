use crate::traits::{BrailleConverter, ConvertReply};
use braillevoice_core::types::ConversionOutcome;
use braillevoice_core::upload::{SelectedFile, UploadError, validate_upload};
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

pub const STAGE_UPLOADING: &str = "uploading";
pub const STAGE_RECOGNIZING: &str = "recognizing";
pub const STAGE_SYNTHESIZING: &str = "synthesizing";
pub const STAGE_COMPLETED: &str = "completed";

// Progress checkpoints are user feedback only; the backend call underneath
// is a single request/response.
pub const PROGRESS_UPLOADING: u8 = 20;
pub const PROGRESS_RECOGNIZING: u8 = 50;
pub const PROGRESS_SYNTHESIZING: u8 = 80;
pub const PROGRESS_COMPLETED: u8 = 100;

pub const GENERIC_CONVERT_FAILURE: &str =
    "An error occurred during image conversion. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStage {
    Idle,
    FileSelected,
    Uploading,
    Recognizing,
    Synthesizing,
    Completed,
    Failed,
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Please select an image file first")]
    NoFileSelected,
    #[error("A conversion is already in progress")]
    InFlight,
}

/// What one conversion attempt produced, recoverable from either terminal
/// stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub stage: WorkflowStage,
    pub outcome: Option<ConversionOutcome>,
    pub error: Option<String>,
}

impl ConversionReport {
    fn completed(outcome: ConversionOutcome) -> Self {
        Self {
            stage: WorkflowStage::Completed,
            outcome: Some(outcome),
            error: None,
        }
    }

    fn failed(detail: impl Into<String>) -> Self {
        Self {
            stage: WorkflowStage::Failed,
            outcome: None,
            error: Some(detail.into()),
        }
    }
}

/// The file-selection → upload → result lifecycle for a single conversion
/// at a time.
#[derive(Debug)]
pub struct ConversionWorkflow {
    stage: WorkflowStage,
    selected: Option<SelectedFile>,
}

impl Default for ConversionWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionWorkflow {
    pub fn new() -> Self {
        Self {
            stage: WorkflowStage::Idle,
            selected: None,
        }
    }

    pub fn stage(&self) -> WorkflowStage {
        self.stage
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Validates and takes a new file. A rejected candidate moves the
    /// workflow to `Failed` but never disturbs the previously selected file.
    pub fn select_file(&mut self, candidate: SelectedFile) -> Result<(), UploadError> {
        if let Err(e) = validate_upload(&candidate.mime_type, candidate.size_bytes()) {
            self.stage = WorkflowStage::Failed;
            return Err(e);
        }
        self.selected = Some(candidate);
        self.stage = WorkflowStage::FileSelected;
        Ok(())
    }

    /// Drops the selection and returns to `Idle`.
    pub fn reset(&mut self) {
        self.selected = None;
        self.stage = WorkflowStage::Idle;
    }

    pub async fn run(
        &mut self,
        converter: &dyn BrailleConverter,
    ) -> Result<ConversionReport, WorkflowError> {
        self.run_with_hook(converter, |_stage, _pct| async {}).await
    }

    /// Runs one conversion, emitting (stage label, percent) checkpoints as
    /// it progresses. The hook feeds UI progress and must be fast.
    ///
    /// Both terminal stages come back as `Ok`: failures are part of the
    /// report, and the selected file is retained so the user can retry.
    pub async fn run_with_hook<F, Fut>(
        &mut self,
        converter: &dyn BrailleConverter,
        on_progress: F,
    ) -> Result<ConversionReport, WorkflowError>
    where
        F: Fn(&'static str, u8) -> Fut,
        Fut: Future<Output = ()>,
    {
        let file = self.selected.clone().ok_or(WorkflowError::NoFileSelected)?;

        self.stage = WorkflowStage::Uploading;
        on_progress(STAGE_UPLOADING, PROGRESS_UPLOADING).await;

        let reply = converter.convert(&file).await;

        let report = match reply {
            Ok(reply) => {
                // A response came back; the server is recognizing/refusing.
                self.stage = WorkflowStage::Recognizing;
                on_progress(STAGE_RECOGNIZING, PROGRESS_RECOGNIZING).await;

                match reply {
                    ConvertReply::Recognized(outcome) => {
                        self.stage = WorkflowStage::Synthesizing;
                        on_progress(STAGE_SYNTHESIZING, PROGRESS_SYNTHESIZING).await;

                        self.stage = WorkflowStage::Completed;
                        on_progress(STAGE_COMPLETED, PROGRESS_COMPLETED).await;
                        ConversionReport::completed(outcome)
                    }
                    ConvertReply::Rejected { detail } => {
                        self.stage = WorkflowStage::Failed;
                        ConversionReport::failed(detail)
                    }
                }
            }
            Err(_) => {
                self.stage = WorkflowStage::Failed;
                ConversionReport::failed(GENERIC_CONVERT_FAILURE)
            }
        };

        Ok(report)
    }
}
