//! Core types for autoux-core.
//!
//! This module defines the normalised [`LogEntry`] shared by the normalizer
//! and everything downstream of it, and the closed [`LogFormat`] set that
//! drives format dispatch.

use serde::Serialize;
use serde_json::{Map, Value};

/// A normalised log record produced by [`crate::normalizer::parse`].
///
/// Only `id` and `format` are always meaningful. The normalizer promotes
/// `type`, `message` and `timestamp` out of the source record when it can
/// find them; the source record itself is kept untouched in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    /// 1-based position of the record within one parse call.
    pub id: usize,
    /// Free-form classification carried by the source (`"error"`, `"network"`, …).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Human-readable message, if one could be identified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Timestamp exactly as written in the source record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Format the record was read from.
    pub format: LogFormat,
    /// The source record's fields, in source order.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
}

impl LogEntry {
    /// An entry with no promoted values and no fields.
    pub fn new(id: usize, format: LogFormat) -> Self {
        Self {
            id,
            kind: None,
            message: None,
            timestamp: None,
            format,
            fields: Map::new(),
        }
    }

    /// A plain-text entry whose message is the raw line.
    pub fn from_line(id: usize, format: LogFormat, line: &str) -> Self {
        Self {
            message: Some(line.to_string()),
            ..Self::new(id, format)
        }
    }
}

/// Every upload format the normalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Ndjson,
    Csv,
    Xml,
    Html,
    Har,
    Text,
}

impl LogFormat {
    /// The fixed extension allow-list, lowercase and dot-prefixed.
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] = &[
        ".json", ".ndjson", ".jsonl", ".csv", ".xml", ".html", ".htm", ".har", ".txt", ".log",
    ];

    /// Map an extension (with or without the leading dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(LogFormat::Json),
            "ndjson" | "jsonl" => Some(LogFormat::Ndjson),
            "csv" => Some(LogFormat::Csv),
            "xml" => Some(LogFormat::Xml),
            "html" | "htm" => Some(LogFormat::Html),
            "har" => Some(LogFormat::Har),
            "txt" | "log" => Some(LogFormat::Text),
            _ => None,
        }
    }

    /// Detect the format from a filename's final extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        extension_of(filename).and_then(Self::from_extension)
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Json => write!(f, "JSON"),
            LogFormat::Ndjson => write!(f, "NDJSON"),
            LogFormat::Csv => write!(f, "CSV"),
            LogFormat::Xml => write!(f, "XML"),
            LogFormat::Html => write!(f, "HTML"),
            LogFormat::Har => write!(f, "HAR"),
            LogFormat::Text => write!(f, "text"),
        }
    }
}

/// The text after the last `.` of the final path component, if any.
pub fn extension_of(filename: &str) -> Option<&str> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}
