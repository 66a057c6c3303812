//! One upload, end to end: gate → normalize → analyze → report.

use crate::analyzer::{AnalysisError, Analyzer};
use crate::upload::{validate_upload, UploadError};
use autoux_core::config::UploadConfig;
use autoux_core::report::{Clock, IdSource};
use autoux_core::{parse, ErrorCode, GeneratedReport, ParseError, ReportBuilder};
use thiserror::Error;

/// Any failure of [`analyze_upload`], with its original error kept intact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl PipelineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PipelineError::Upload(e) => e.code(),
            PipelineError::Parse(e) => e.code(),
            PipelineError::Analysis(e) => e.code(),
        }
    }
}

/// Run one uploaded file through the whole pipeline.
pub fn analyze_upload<C: Clock, I: IdSource>(
    filename: &str,
    bytes: &[u8],
    limits: &UploadConfig,
    analyzer: &dyn Analyzer,
    builder: &ReportBuilder<C, I>,
) -> Result<GeneratedReport, PipelineError> {
    let format = validate_upload(filename, bytes.len() as u64, limits).inspect_err(|e| {
        tracing::warn!(filename, error = %e, "upload rejected");
    })?;

    let entries = parse(bytes, filename).inspect_err(|e| {
        tracing::warn!(filename, error = %e, "upload could not be parsed");
    })?;
    tracing::info!(filename, %format, entries = entries.len(), "parsed upload");

    let response = analyzer.analyze(&entries)?;
    let generated = builder.generate_report(&response);
    tracing::info!(
        report_id = %generated.report.id,
        ux_score = generated.report.analysis.ux_score,
        issues = generated.report.analysis.issues.len(),
        "report generated"
    );
    Ok(generated)
}
