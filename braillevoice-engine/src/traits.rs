use async_trait::async_trait;
use braillevoice_core::types::ConversionOutcome;
use braillevoice_core::upload::SelectedFile;

/// Outcome of one conversion request as seen by the workflow.
///
/// A `Rejected` reply is an application-level refusal (non-2xx with a
/// structured detail); transport failures surface as `Err` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertReply {
    Recognized(ConversionOutcome),
    Rejected { detail: String },
}

#[async_trait]
pub trait BrailleConverter: Send + Sync {
    async fn convert(&self, file: &SelectedFile) -> anyhow::Result<ConvertReply>;
}
