//! Error kinds that cross the core boundary.
//!
//! Every failure surfaced to the route layer carries one [`ErrorCode`]. The
//! code is the stable, machine-checkable part; the message is for humans.

use crate::types::LogFormat;
use thiserror::Error;

/// Stable discriminators for everything the analysis pipeline can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The uploaded file could not be normalised.
    ParseError,
    /// Transport or connection failure talking to the LLM API.
    LlmApiError,
    /// The LLM call exceeded its deadline.
    LlmTimeout,
    /// The LLM API rejected the call for rate limiting.
    RateLimitExceeded,
    /// The LLM answered with something that is not an AIResponse.
    InvalidResponse,
    /// The upload failed the size or extension gate.
    UploadRejected,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ParseError => "PARSE_ERROR",
            ErrorCode::LlmApiError => "LLM_API_ERROR",
            ErrorCode::LlmTimeout => "LLM_TIMEOUT",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::InvalidResponse => "INVALID_RESPONSE",
            ErrorCode::UploadRejected => "UPLOAD_REJECTED",
        }
    }

    /// `true` when the caller sent bad input (4xx), `false` for upstream AI
    /// failures (5xx / 429).
    pub fn is_client_error(self) -> bool {
        matches!(self, ErrorCode::ParseError | ErrorCode::UploadRejected)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file could not be turned into log entries. Always attributable to the
/// whole file; the normalizer never returns partial results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("PARSE_ERROR: unsupported file type {filename:?} (supported: {supported})", supported = LogFormat::SUPPORTED_EXTENSIONS.join(", "))]
    UnsupportedExtension { filename: String },

    #[error("PARSE_ERROR: {filename:?} is empty")]
    Empty { filename: String },

    #[error("PARSE_ERROR: {filename:?} is not valid UTF-8 text")]
    Encoding { filename: String },

    #[error("PARSE_ERROR: invalid {format} in {filename:?}: {reason}")]
    Malformed {
        filename: String,
        format: LogFormat,
        reason: String,
    },
}

impl ParseError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::ParseError
    }

    pub fn filename(&self) -> &str {
        match self {
            ParseError::UnsupportedExtension { filename }
            | ParseError::Empty { filename }
            | ParseError::Encoding { filename }
            | ParseError::Malformed { filename, .. } => filename,
        }
    }
}
