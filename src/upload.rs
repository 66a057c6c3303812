//! Upload gate: size and extension checks applied before normalization.

use autoux_core::config::UploadConfig;
use autoux_core::types::extension_of;
use autoux_core::{ErrorCode, LogFormat};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("UPLOAD_REJECTED: {filename:?} is {size} bytes, the limit is {limit} bytes")]
    TooLarge { filename: String, size: u64, limit: u64 },

    #[error("UPLOAD_REJECTED: {filename:?} has no file extension")]
    MissingExtension { filename: String },

    #[error("UPLOAD_REJECTED: .{extension} files are not supported")]
    UnsupportedExtension { extension: String },
}

impl UploadError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::UploadRejected
    }
}

/// Accept or reject an upload by name and size, returning the format the
/// normalizer will read it as.
pub fn validate_upload(
    filename: &str,
    size: u64,
    config: &UploadConfig,
) -> Result<LogFormat, UploadError> {
    if size > config.max_file_size_bytes {
        return Err(UploadError::TooLarge {
            filename: filename.to_string(),
            size,
            limit: config.max_file_size_bytes,
        });
    }

    let extension = extension_of(filename).ok_or_else(|| UploadError::MissingExtension {
        filename: filename.to_string(),
    })?;
    LogFormat::from_extension(extension).ok_or_else(|| UploadError::UnsupportedExtension {
        extension: extension.to_ascii_lowercase(),
    })
}
