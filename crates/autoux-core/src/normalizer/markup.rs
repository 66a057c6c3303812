//! XML and HTML readers, both built on `quick-xml`.
//!
//! XML is read strictly: every child element of the root is one record,
//! attributes and descendant leaf text become fields. HTML is read leniently
//! (unclosed and void elements are fine) and yields one entry per visible
//! text node, skipping `<script>` and `<style>` content.

use super::record_entry;
use crate::types::{LogEntry, LogFormat};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

const HTML_VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];
const HTML_RAW_TEXT: &[&str] = &["script", "style"];

// ---------------------------------------------------------------------------
// XML
// ---------------------------------------------------------------------------

/// A record element being read (a direct child of the root).
#[derive(Default)]
struct XmlRecord {
    fields: Map<String, Value>,
    text: String,
}

pub(super) fn parse_xml(text: &str) -> Result<Vec<LogEntry>, String> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut roots = 0usize;
    let mut root = XmlRecord::default();
    let mut record: Option<XmlRecord> = None;
    // Elements open below the current record; the innermost names the field.
    let mut path: Vec<String> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("at byte {}: {e}", reader.buffer_position()))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                depth += 1;
                let name = local_name(e);
                match depth {
                    1 => {
                        roots += 1;
                        if roots > 1 {
                            return Err(format!("second root element <{name}>"));
                        }
                        read_attributes(e, None, &mut root.fields)?;
                    }
                    2 => {
                        let mut next = XmlRecord::default();
                        read_attributes(e, None, &mut next.fields)?;
                        record = Some(next);
                    }
                    _ => {
                        if let Some(current) = record.as_mut() {
                            read_attributes(e, Some(&name), &mut current.fields)?;
                        }
                        path.push(name);
                    }
                }
                if matches!(event, Event::Empty(_)) {
                    close_xml(&mut depth, &mut record, &mut path, &mut entries);
                }
            }
            Event::End(_) => close_xml(&mut depth, &mut record, &mut path, &mut entries),
            Event::Text(ref t) => {
                let content = t.unescape().map_err(|e| e.to_string())?;
                push_xml_text(depth, &content, &mut root, &mut record, path.last())?;
            }
            Event::CData(ref c) => {
                let content = String::from_utf8_lossy(c);
                push_xml_text(depth, &content, &mut root, &mut record, path.last())?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err(format!(
            "unexpected end of document with {depth} element(s) still open"
        ));
    }
    if roots == 0 {
        return Err("no root element".to_string());
    }

    // A root with no record children is itself the only record.
    if entries.is_empty() && (!root.text.is_empty() || !root.fields.is_empty()) {
        entries.push(finish_record(1, root));
    }
    Ok(entries)
}

fn close_xml(
    depth: &mut usize,
    record: &mut Option<XmlRecord>,
    path: &mut Vec<String>,
    entries: &mut Vec<LogEntry>,
) {
    match *depth {
        2 => {
            if let Some(done) = record.take() {
                entries.push(finish_record(entries.len() + 1, done));
            }
        }
        d if d > 2 => {
            path.pop();
        }
        _ => {}
    }
    *depth = depth.saturating_sub(1);
}

fn push_xml_text(
    depth: usize,
    content: &str,
    root: &mut XmlRecord,
    record: &mut Option<XmlRecord>,
    leaf: Option<&String>,
) -> Result<(), String> {
    match (depth, record.as_mut(), leaf) {
        (0, _, _) => Err("text outside the root element".to_string()),
        (1, _, _) => {
            append_text(&mut root.text, content);
            Ok(())
        }
        (2, Some(current), _) => {
            append_text(&mut current.text, content);
            Ok(())
        }
        (_, Some(current), Some(key)) => {
            insert_field(&mut current.fields, key.clone(), content.to_string());
            Ok(())
        }
        _ => Ok(()),
    }
}

fn finish_record(id: usize, record: XmlRecord) -> LogEntry {
    let mut entry = record_entry(id, LogFormat::Xml, record.fields);
    if entry.message.is_none() && !record.text.is_empty() {
        entry.message = Some(record.text);
    }
    entry
}

fn read_attributes(
    element: &BytesStart<'_>,
    prefix: Option<&str>,
    fields: &mut Map<String, Value>,
) -> Result<(), String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| e.to_string())?.into_owned();
        let key = match prefix {
            Some(element) => format!("{element}.{name}"),
            None => name,
        };
        insert_field(fields, key, value);
    }
    Ok(())
}

/// Repeated keys collect into an array instead of overwriting.
fn insert_field(fields: &mut Map<String, Value>, key: String, value: String) {
    match fields.get_mut(&key) {
        Some(Value::Array(items)) => items.push(Value::String(value)),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, Value::String(value)]);
        }
        None => {
            fields.insert(key, Value::String(value));
        }
    }
}

fn append_text(buf: &mut String, content: &str) {
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(content);
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

pub(super) fn parse_html(text: &str) -> Result<Vec<LogEntry>, String> {
    let text = drop_raw_text_bodies(text)?;
    let mut reader = Reader::from_str(&text);
    let config = reader.config_mut();
    config.trim_text(true);
    config.check_end_names = false;

    let mut entries = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut saw_element = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("at byte {}: {e}", reader.buffer_position()))?;

        match event {
            Event::Start(ref e) => {
                saw_element = true;
                let name = local_name(e).to_ascii_lowercase();
                if !HTML_VOID.contains(&name.as_str()) {
                    open.push(name);
                }
            }
            Event::Empty(_) => saw_element = true,
            Event::End(ref e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase();
                if let Some(pos) = open.iter().rposition(|n| *n == name) {
                    open.truncate(pos);
                }
            }
            Event::Text(ref t) => {
                if open.iter().any(|n| HTML_RAW_TEXT.contains(&n.as_str())) {
                    continue;
                }
                let visible = collapse_whitespace(&html_text(t));
                if visible.is_empty() {
                    continue;
                }
                let mut entry = LogEntry::from_line(entries.len() + 1, LogFormat::Html, &visible);
                if let Some(tag) = open.last() {
                    entry.fields.insert("tag".to_string(), Value::String(tag.clone()));
                }
                entries.push(entry);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_element {
        return Err("no HTML elements found".to_string());
    }
    Ok(entries)
}

/// Remove the bodies of `<script>` and `<style>` elements, keeping their
/// tags. Raw text may contain `<` (`if (a < b)`) and must never reach the
/// tokenizer. An element left open at end of input is an error.
fn drop_raw_text_bodies(html: &str) -> Result<String, String> {
    // ASCII lowercasing keeps byte offsets identical to `html`.
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;

    while let Some((open_at, tag)) = next_raw_text_open(&lower, pos) {
        let Some(gt) = lower[open_at..].find('>') else {
            break;
        };
        let body_start = open_at + gt + 1;
        out.push_str(&html[pos..body_start]);
        pos = body_start;
        if lower[..body_start].ends_with("/>") {
            continue;
        }
        let close = format!("</{tag}");
        match lower[body_start..].find(&close) {
            Some(len) => pos = body_start + len,
            None => return Err(format!("<{tag}> at byte {open_at} is never closed")),
        }
    }
    out.push_str(&html[pos..]);
    Ok(out)
}

/// Earliest `<script` or `<style` start tag at or after `from`.
fn next_raw_text_open(lower: &str, from: usize) -> Option<(usize, &'static str)> {
    HTML_RAW_TEXT
        .iter()
        .filter_map(|tag| {
            let needle = format!("<{tag}");
            let mut search = from;
            while let Some(found) = lower[search..].find(&needle) {
                let at = search + found;
                let after = lower[at + needle.len()..].chars().next();
                if matches!(after, Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace()) {
                    return Some((at, *tag));
                }
                search = at + needle.len();
            }
            None
        })
        .min_by_key(|(at, _)| *at)
}

/// HTML allows named entities XML does not know (`&nbsp;`); fall back to the
/// raw text rather than failing the file.
fn html_text(t: &BytesText<'_>) -> String {
    match t.unescape() {
        Ok(text) => text.into_owned(),
        Err(_) => String::from_utf8_lossy(t).into_owned(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn xml_children_of_root_are_records() {
        let xml = r#"<?xml version="1.0"?>
            <logs>
              <log type="error" timestamp="2024-01-15T10:00:00Z">
                <message>Checkout button unresponsive</message>
                <page>/cart</page>
              </log>
              <log type="info"><message>Page loaded</message></log>
            </logs>"#;
        let entries = parse_xml(xml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind.as_deref(), Some("error"));
        assert_eq!(
            entries[0].message.as_deref(),
            Some("Checkout button unresponsive")
        );
        assert_eq!(entries[0].fields["page"], "/cart");
        assert_eq!(entries[1].id, 2);
    }

    #[test]
    fn xml_record_text_becomes_message() {
        let entries = parse_xml("<events><event level=\"warn\">slow &amp; steady</event></events>")
            .unwrap();
        assert_eq!(entries[0].message.as_deref(), Some("slow & steady"));
        assert_eq!(entries[0].kind.as_deref(), Some("warn"));
    }

    #[test]
    fn xml_repeated_children_collect_into_array() {
        let entries = parse_xml("<r><e><tag>a</tag><tag>b</tag></e></r>").unwrap();
        assert_eq!(entries[0].fields["tag"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn xml_empty_record_elements_count() {
        let entries = parse_xml(r#"<r><e type="click"/><e type="scroll"/></r>"#).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].kind.as_deref(), Some("scroll"));
    }

    #[test]
    fn xml_root_without_children_is_one_record() {
        let entries = parse_xml("<log>single line</log>").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message.as_deref(), Some("single line"));
        assert!(parse_xml("<logs></logs>").unwrap().is_empty());
    }

    #[test]
    fn truncated_xml_is_rejected() {
        assert!(parse_xml("<logs><log><message>cut").is_err());
    }

    #[test]
    fn mismatched_xml_is_rejected() {
        assert!(parse_xml("<logs><log></logs>").is_err());
    }

    #[test]
    fn plain_text_is_not_xml() {
        assert!(parse_xml("just a log line").is_err());
    }

    #[test]
    fn html_visible_text_nodes_become_entries() {
        let html = r#"<!DOCTYPE html>
            <html><head><title>Console</title><style>body { color: red }</style></head>
            <body>
              <h1>Error   log</h1>
              <p>Image missing alt text<br>on /home</p>
              <script>console.log("hidden")</script>
              <p>Price&nbsp;shown twice</p>
            </body></html>"#;
        let entries = parse_html(html).unwrap();
        let messages: Vec<_> = entries.iter().filter_map(|e| e.message.as_deref()).collect();
        assert_eq!(
            messages,
            vec![
                "Console",
                "Error log",
                "Image missing alt text",
                "on /home",
                "Price&nbsp;shown twice",
            ]
        );
        assert_eq!(entries[1].fields["tag"], "h1");
    }

    #[test]
    fn html_script_with_comparisons_does_not_hide_later_text() {
        for script in ["if (a < b) { go(); }", "for(i=0;i<n;i++){}", "x = '<p>fake</p>';"] {
            let html = format!(
                "<html><body><SCRIPT type=\"text/javascript\">{script}</Script>\
                 <p>Checkout failed</p><p>Retry later</p></body></html>"
            );
            let entries = parse_html(&html).unwrap();
            let messages: Vec<_> = entries.iter().filter_map(|e| e.message.as_deref()).collect();
            assert_eq!(messages, vec!["Checkout failed", "Retry later"], "{script}");
        }
    }

    #[test]
    fn html_style_body_is_skipped_and_self_closed_script_is_harmless() {
        let html = "<style>a < b { color: red }</style><script src=\"app.js\"/><p>Shown</p>";
        let entries = parse_html(html).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message.as_deref(), Some("Shown"));
    }

    #[test]
    fn html_unclosed_script_is_rejected() {
        assert!(parse_html("<p>ok</p><script>if (a < b) {").is_err());
    }

    #[test]
    fn xml_text_after_nested_child_stays_with_its_parent() {
        let entries = parse_xml("<r><e><a><b>x</b>tail</a></e></r>").unwrap();
        assert_eq!(entries[0].fields["b"], "x");
        assert_eq!(entries[0].fields["a"], "tail");

        let entries = parse_xml("<r><e><a>head<b>x</b>tail</a></e></r>").unwrap();
        assert_eq!(entries[0].fields["a"], serde_json::json!(["head", "tail"]));
    }

    #[test]
    fn html_requires_markup() {
        assert!(parse_html("no tags here").is_err());
    }
}
