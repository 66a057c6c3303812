//! JSON, NDJSON and HAR readers.

use super::value_entry;
use crate::types::{LogEntry, LogFormat};
use serde_json::Value;

/// A `.json` upload: an array of records, an envelope with a `logs` array,
/// or a single record object.
pub(super) fn parse_json(text: &str) -> Result<Vec<LogEntry>, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;

    let records = match value {
        Value::Array(items) => items,
        Value::Object(envelope) => match envelope.get("logs").and_then(Value::as_array) {
            Some(items) => items.clone(),
            None => vec![Value::Object(envelope)],
        },
        other => {
            return Err(format!(
                "expected an object or an array of records, found {}",
                kind_of(&other)
            ))
        }
    };

    Ok(records
        .into_iter()
        .enumerate()
        .map(|(i, record)| value_entry(i + 1, LogFormat::Json, record))
        .collect())
}

/// One JSON value per line; blank lines are skipped and do not consume an id.
pub(super) fn parse_ndjson(text: &str) -> Result<Vec<LogEntry>, String> {
    let mut entries = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value =
            serde_json::from_str(line).map_err(|e| format!("line {}: {e}", lineno + 1))?;
        entries.push(value_entry(entries.len() + 1, LogFormat::Ndjson, value));
    }
    Ok(entries)
}

/// An HTTP Archive: one entry per `log.entries[]` request.
pub(super) fn parse_har(text: &str) -> Result<Vec<LogEntry>, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    let requests = value
        .get("log")
        .and_then(|log| log.get("entries"))
        .and_then(Value::as_array)
        .ok_or_else(|| "missing log.entries array".to_string())?;

    requests
        .iter()
        .enumerate()
        .map(|(i, request)| {
            let fields = request
                .as_object()
                .ok_or_else(|| format!("log.entries[{i}] is not an object"))?;
            let mut entry = LogEntry::new(i + 1, LogFormat::Har);
            entry.message = request_line(request);
            entry.timestamp = request
                .get("startedDateTime")
                .and_then(Value::as_str)
                .map(str::to_string);
            entry.fields = fields.clone();
            Ok(entry)
        })
        .collect()
}

/// `"GET https://example.com/ 200"` built from whichever parts are present.
fn request_line(request: &Value) -> Option<String> {
    let method = request.pointer("/request/method").and_then(Value::as_str);
    let url = request.pointer("/request/url").and_then(Value::as_str);
    let status = request.pointer("/response/status").and_then(Value::as_i64);

    let parts: Vec<String> = [
        method.map(str::to_string),
        url.map(str::to_string),
        status.map(|s| s.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(" "))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
