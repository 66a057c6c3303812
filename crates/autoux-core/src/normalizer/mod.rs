//! Normalizer: turns an uploaded file into an ordered list of [`LogEntry`] values.
//!
//! The format is picked once from the filename extension ([`LogFormat`]) and
//! each variant has its own reader:
//!
//! | Format | Record boundary |
//! |--------|-----------------|
//! | `.json` | array element (or the `logs` array of an envelope, or the whole object) |
//! | `.ndjson` / `.jsonl` | non-blank line |
//! | `.csv` | data row, keyed by the header row |
//! | `.xml` | child element of the root |
//! | `.html` / `.htm` | visible text node |
//! | `.har` | `log.entries[]` |
//! | `.txt` / `.log` | non-blank line |
//!
//! The normalizer never interprets severity or UX meaning. It either returns
//! every record of the file, in file order, or a single [`ParseError`].

mod delimited;
mod json;
mod markup;
mod text;

use crate::error::ParseError;
use crate::types::{LogEntry, LogFormat};
use serde_json::{Map, Value};

/// Keys promoted to [`LogEntry::kind`], first match wins.
const KIND_KEYS: &[&str] = &["type", "level"];
/// Keys promoted to [`LogEntry::message`].
const MESSAGE_KEYS: &[&str] = &["message", "msg"];
/// Keys promoted to [`LogEntry::timestamp`].
const TIMESTAMP_KEYS: &[&str] = &["timestamp", "time", "ts", "@timestamp"];

/// Parse `buffer` as the format implied by `filename`'s extension.
///
/// Deterministic: the same bytes and name always yield the same entries.
pub fn parse(buffer: &[u8], filename: &str) -> Result<Vec<LogEntry>, ParseError> {
    let format = LogFormat::from_filename(filename).ok_or_else(|| {
        tracing::debug!(filename, "rejecting unsupported extension");
        ParseError::UnsupportedExtension {
            filename: filename.to_string(),
        }
    })?;

    let text = std::str::from_utf8(buffer).map_err(|_| ParseError::Encoding {
        filename: filename.to_string(),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(ParseError::Empty {
            filename: filename.to_string(),
        });
    }

    let parsed = match format {
        LogFormat::Json => json::parse_json(text),
        LogFormat::Ndjson => json::parse_ndjson(text),
        LogFormat::Har => json::parse_har(text),
        LogFormat::Csv => delimited::parse_csv(text),
        LogFormat::Xml => markup::parse_xml(text),
        LogFormat::Html => markup::parse_html(text),
        LogFormat::Text => Ok(text::parse_lines(text)),
    };

    let entries = parsed.map_err(|reason| ParseError::Malformed {
        filename: filename.to_string(),
        format,
        reason,
    })?;

    tracing::debug!(filename, %format, entries = entries.len(), "normalized upload");
    Ok(entries)
}

/// Build an entry from a keyed record, promoting the well-known keys.
fn record_entry(id: usize, format: LogFormat, fields: Map<String, Value>) -> LogEntry {
    LogEntry {
        kind: first_scalar(&fields, KIND_KEYS),
        message: first_scalar(&fields, MESSAGE_KEYS),
        timestamp: first_scalar(&fields, TIMESTAMP_KEYS),
        fields,
        ..LogEntry::new(id, format)
    }
}

/// Build an entry from any JSON value. Non-object records keep their text
/// form as the message.
fn value_entry(id: usize, format: LogFormat, value: Value) -> LogEntry {
    match value {
        Value::Object(fields) => record_entry(id, format, fields),
        Value::String(line) => LogEntry::from_line(id, format, &line),
        other => LogEntry::from_line(id, format, &other.to_string()),
    }
}

fn first_scalar(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match fields.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
