//! Analyzer seam: the LLM client as a black box.
//!
//! The core never talks to the LLM API itself. Anything that can turn log
//! entries into an [`AiResponse`] implements [`Analyzer`]; its failures are
//! passed through unchanged as [`AnalysisError`].

use autoux_core::{AiResponse, ErrorCode, LogEntry};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Failures of the LLM layer. Each maps to one [`ErrorCode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("LLM_API_ERROR: {0}")]
    Api(String),

    #[error("LLM_TIMEOUT: no response within {0:?}")]
    Timeout(Duration),

    #[error("RATE_LIMIT_EXCEEDED: {0}")]
    RateLimited(String),

    #[error("INVALID_RESPONSE: {0}")]
    InvalidResponse(String),
}

impl AnalysisError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::Api(_) => ErrorCode::LlmApiError,
            AnalysisError::Timeout(_) => ErrorCode::LlmTimeout,
            AnalysisError::RateLimited(_) => ErrorCode::RateLimitExceeded,
            AnalysisError::InvalidResponse(_) => ErrorCode::InvalidResponse,
        }
    }
}

/// Something that analyses normalised log entries.
pub trait Analyzer {
    fn analyze(&self, entries: &[LogEntry]) -> Result<AiResponse, AnalysisError>;
}

impl<F> Analyzer for F
where
    F: Fn(&[LogEntry]) -> Result<AiResponse, AnalysisError>,
{
    fn analyze(&self, entries: &[LogEntry]) -> Result<AiResponse, AnalysisError> {
        self(entries)
    }
}

/// Replays a stored LLM answer. Used by the CLI to build reports offline.
///
/// The recording is shape-checked on every call, exactly as a live answer
/// would be, so a bad recording surfaces as `INVALID_RESPONSE`.
#[derive(Debug, Clone)]
pub struct RecordedAnalyzer {
    recording: Value,
}

impl RecordedAnalyzer {
    pub fn new(recording: Value) -> Self {
        Self { recording }
    }

    /// Read a recording from JSON text.
    pub fn from_json(text: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(text)
            .map(Self::new)
            .map_err(|e| AnalysisError::InvalidResponse(format!("not JSON: {e}")))
    }
}

impl Analyzer for RecordedAnalyzer {
    fn analyze(&self, entries: &[LogEntry]) -> Result<AiResponse, AnalysisError> {
        tracing::debug!(entries = entries.len(), "replaying recorded analysis");
        validate_response(self.recording.clone())
    }
}

/// Check that `value` has the AIResponse shape.
pub fn validate_response(value: Value) -> Result<AiResponse, AnalysisError> {
    let response: AiResponse = serde_json::from_value(value)
        .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;
    if response.ux_score > 100 {
        return Err(AnalysisError::InvalidResponse(format!(
            "uxScore {} is outside 0-100",
            response.ux_score
        )));
    }
    Ok(response)
}
