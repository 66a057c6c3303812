//! CSV reader. The header row names the fields of every following row.

use super::record_entry;
use crate::types::{LogEntry, LogFormat};
use serde_json::{Map, Value};

pub(super) fn parse_csv(text: &str) -> Result<Vec<LogEntry>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|e| e.to_string())?.clone();
    check_headers(&headers)?;

    let mut entries = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| e.to_string())?;
        let fields: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
            .collect();
        entries.push(record_entry(entries.len() + 1, LogFormat::Csv, fields));
    }
    Ok(entries)
}

fn check_headers(headers: &csv::StringRecord) -> Result<(), String> {
    if headers.is_empty() {
        return Err("missing header row".to_string());
    }
    for (i, name) in headers.iter().enumerate() {
        if name.is_empty() {
            return Err(format!("header column {} has no name", i + 1));
        }
        if headers.iter().take(i).any(|earlier| earlier == name) {
            return Err(format!("duplicate header column {name:?}"));
        }
    }
    Ok(())
}
