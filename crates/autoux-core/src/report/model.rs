//! Report data model: the AI analysis contract and the finished [`Report`].
//!
//! Field names serialize in camelCase so the JSON matches what the LLM
//! returns and what the route layer sends back to the browser.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;

/// Structured result of the LLM log analysis. Assumed shape-valid on arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResponse {
    /// 0–100, higher is better.
    pub ux_score: u8,
    #[serde(default)]
    pub issues: Vec<Issue>,
    /// Category label → number of issues, in the order the LLM listed them.
    #[serde(default)]
    pub categories: IndexMap<String, u32>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub metadata: AnalysisMetadata,
}

/// Severity counts and provenance reported alongside the issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisMetadata {
    pub total_issues: u32,
    pub critical_count: u32,
    pub high_count: u32,
    pub medium_count: u32,
    pub low_count: u32,
    pub analysis_model: String,
}

/// One UX problem found by the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub severity: Severity,
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub metadata: IssueMetadata,
}

/// How bad an issue is, independent of how the LLM spelled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityLevel {
    High,
    Medium,
    Low,
    /// Anything outside `high | medium | low`, including blank.
    Unrecognized,
}

/// Issue severity as received. `high`, `medium` and `low` are recognized in
/// any letter case; the source spelling is kept so the report carries it
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Severity {
    level: SeverityLevel,
    label: Cow<'static, str>,
}

impl Severity {
    pub const HIGH: Severity = Severity::known(SeverityLevel::High, "high");
    pub const MEDIUM: Severity = Severity::known(SeverityLevel::Medium, "medium");
    pub const LOW: Severity = Severity::known(SeverityLevel::Low, "low");

    const fn known(level: SeverityLevel, label: &'static str) -> Self {
        Severity { level, label: Cow::Borrowed(label) }
    }

    pub fn level(&self) -> SeverityLevel {
        self.level
    }

    /// The severity exactly as it appeared in the source.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        let word = value.trim();
        let level = if word.eq_ignore_ascii_case("high") {
            SeverityLevel::High
        } else if word.eq_ignore_ascii_case("medium") {
            SeverityLevel::Medium
        } else if word.eq_ignore_ascii_case("low") {
            SeverityLevel::Low
        } else {
            SeverityLevel::Unrecognized
        };
        Severity { level, label: Cow::Owned(value) }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.label.into_owned()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.label.trim() {
            "" => write!(f, "UNSPECIFIED"),
            word => write!(f, "{}", word.to_uppercase()),
        }
    }
}

/// The metadata bag attached to an issue.
///
/// Known keys are lifted into typed [`MetadataField`] variants; everything
/// else is kept as an opaque key/value pair. Source key order is preserved
/// and the bag serializes back to exactly the object it was read from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct IssueMetadata(Vec<MetadataField>);

#[derive(Debug, Clone, PartialEq)]
pub enum MetadataField {
    /// `responseTime`, in milliseconds.
    ResponseTime(Number),
    /// `wcagCriteria`, success-criterion ids such as `"1.4.3"`.
    WcagCriteria(Vec<String>),
    Other { key: String, value: Value },
}

impl IssueMetadata {
    pub fn iter(&self) -> std::slice::Iter<'_, MetadataField> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> IntoIterator for &'a IssueMetadata {
    type Item = &'a MetadataField;
    type IntoIter = std::slice::Iter<'a, MetadataField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<MetadataField> for IssueMetadata {
    fn from_iter<T: IntoIterator<Item = MetadataField>>(iter: T) -> Self {
        IssueMetadata(iter.into_iter().collect())
    }
}

impl MetadataField {
    pub const RESPONSE_TIME: &'static str = "responseTime";
    pub const WCAG_CRITERIA: &'static str = "wcagCriteria";

    /// Classify one source key/value pair.
    pub fn from_pair(key: String, value: Value) -> Self {
        match value {
            Value::Number(ms) if key == Self::RESPONSE_TIME => MetadataField::ResponseTime(ms),
            Value::Array(items)
                if key == Self::WCAG_CRITERIA && items.iter().all(Value::is_string) =>
            {
                MetadataField::WcagCriteria(
                    items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::String(s) => Some(s),
                            _ => None,
                        })
                        .collect(),
                )
            }
            value => MetadataField::Other { key, value },
        }
    }

    /// The source key this field was read from.
    pub fn key(&self) -> &str {
        match self {
            MetadataField::ResponseTime(_) => Self::RESPONSE_TIME,
            MetadataField::WcagCriteria(_) => Self::WCAG_CRITERIA,
            MetadataField::Other { key, .. } => key,
        }
    }

    /// Back to the source key/value pair.
    pub fn into_pair(self) -> (String, Value) {
        match self {
            MetadataField::ResponseTime(ms) => (Self::RESPONSE_TIME.to_string(), Value::Number(ms)),
            MetadataField::WcagCriteria(criteria) => (
                Self::WCAG_CRITERIA.to_string(),
                Value::Array(criteria.into_iter().map(Value::String).collect()),
            ),
            MetadataField::Other { key, value } => (key, value),
        }
    }
}

impl From<Map<String, Value>> for IssueMetadata {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter()
            .map(|(key, value)| MetadataField::from_pair(key, value))
            .collect()
    }
}

impl From<IssueMetadata> for Map<String, Value> {
    fn from(metadata: IssueMetadata) -> Self {
        metadata.0.into_iter().map(MetadataField::into_pair).collect()
    }
}

/// A suggested fix, ranked by `priority` (1 = most important).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub why: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub estimated_impact: String,
}

/// An [`AiResponse`] stamped with identity metadata. Built once by
/// [`ReportBuilder::add_metadata`](crate::report::ReportBuilder::add_metadata)
/// and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// `report-` followed by a unique suffix.
    pub id: String,
    /// ISO-8601 UTC instant with millisecond precision.
    pub timestamp: String,
    /// Report schema version.
    pub version: String,
    #[serde(flatten)]
    pub analysis: AiResponse,
}

/// What the route layer sends back: the report and its Markdown rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedReport {
    pub report: Report,
    pub markdown: String,
}
