//! Domain-specific assertion macros for autoux harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *what* pipeline invariant was violated.

// ---------------------------------------------------------------------------
// Normalizer assertions
// ---------------------------------------------------------------------------

/// Assert that a parse result is a `PARSE_ERROR` of the given variant.
///
/// ```rust
/// assert_parse_error!(parse(b"", "a.log"), ParseError::Empty { .. });
/// ```
#[macro_export]
macro_rules! assert_parse_error {
    ($result:expr, $pattern:pat) => {{
        match $result {
            Err(err @ $pattern) => {
                assert_eq!(err.code(), autoux_core::ErrorCode::ParseError);
                assert!(
                    err.to_string().starts_with("PARSE_ERROR: "),
                    "parse error message must carry the PARSE_ERROR prefix: {err}"
                );
            }
            Err(other) => panic!(
                "assert_parse_error! failed: wrong variant.\n  expected: {}\n  actual:   {other:?}",
                stringify!($pattern)
            ),
            Ok(entries) => panic!(
                "assert_parse_error! failed: parse succeeded with {} entries",
                entries.len()
            ),
        }
    }};
}

/// Assert the promoted messages of a list of entries, in order.
///
/// ```rust
/// assert_messages!(entries, ["first", "second"]);
/// ```
#[macro_export]
macro_rules! assert_messages {
    ($entries:expr, [$($message:expr),* $(,)?]) => {{
        let entries: &[autoux_core::LogEntry] = &$entries;
        let actual: Vec<Option<&str>> = entries.iter().map(|e| e.message.as_deref()).collect();
        let expected: Vec<Option<&str>> = vec![$(Some($message)),*];
        pretty_assertions::assert_eq!(actual, expected, "entry messages differ");
    }};
}

/// Assert that entry ids run 1..=n with no gaps.
pub fn assert_sequential_ids(entries: &[autoux_core::LogEntry]) {
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(
            entry.id,
            i + 1,
            "entry ids must be 1-based and gapless; entry {i} has id {}",
            entry.id
        );
    }
}

// ---------------------------------------------------------------------------
// Markdown assertions
// ---------------------------------------------------------------------------

/// Assert that every needle appears in `haystack`, in the given order.
///
/// ```rust
/// assert_in_order!(markdown, ["### 1. ", "### 2. ", "### 3. "]);
/// ```
#[macro_export]
macro_rules! assert_in_order {
    ($haystack:expr, [$($needle:expr),+ $(,)?]) => {{
        let haystack: &str = &$haystack;
        let mut from = 0usize;
        $(
            let needle: &str = $needle;
            match haystack[from..].find(needle) {
                Some(pos) => from += pos + needle.len(),
                None => panic!(
                    "assert_in_order! failed: {needle:?} not found after byte {from}.\n--- document ---\n{haystack}"
                ),
            }
        )+
    }};
}

/// The body of the `### {heading}` section: everything up to the next
/// heading of level 3 or higher.
pub fn section<'a>(markdown: &'a str, heading: &str) -> &'a str {
    let marker = format!("### {heading}");
    let start = markdown
        .find(&marker)
        .unwrap_or_else(|| panic!("heading {marker:?} not found in:\n{markdown}"));
    let body = &markdown[start + marker.len()..];
    let end = ["\n### ", "\n## ", "\n# "]
        .iter()
        .filter_map(|next| body.find(next))
        .min()
        .unwrap_or(body.len());
    &body[..end]
}
