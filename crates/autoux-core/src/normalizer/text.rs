//! Unstructured `.txt` / `.log` reader: one entry per non-blank line.

use crate::types::{LogEntry, LogFormat};

pub(super) fn parse_lines(text: &str) -> Vec<LogEntry> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| LogEntry::from_line(i + 1, LogFormat::Text, line))
        .collect()
}
