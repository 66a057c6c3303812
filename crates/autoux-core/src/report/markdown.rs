//! Markdown rendering of a [`Report`].
//!
//! Rendering is a pure function of the report: the id and timestamp are
//! copied verbatim and nothing new is generated here.

use super::model::{Issue, MetadataField, Recommendation, Report, Severity, SeverityLevel};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt::{self, Display, Formatter};

const STANDARDS_REFERENCES: &str = "\
## Standards References

Findings are measured against the following standards:

- **WCAG 2.2** (Web Content Accessibility Guidelines): https://www.w3.org/TR/WCAG22/
  - Criteria are cited by success-criterion number, e.g. 1.1.1 Non-text Content, 1.4.3 Contrast (Minimum), 2.1.1 Keyboard
- **Core Web Vitals**: https://web.dev/articles/vitals
  - LCP (Largest Contentful Paint): good at 2.5s or less
  - INP (Interaction to Next Paint): good at 200ms or less
  - CLS (Cumulative Layout Shift): good at 0.1 or less
- **Nielsen Norman Group usability heuristics**: https://www.nngroup.com/articles/ten-usability-heuristics/
";

const UNCATEGORIZED: &str = "Uncategorized";

/// Qualitative band for a UX score.
///
/// | Band | Scores |
/// |------|--------|
/// | Excellent | 90–100 |
/// | Fair | 70–89 |
/// | Critical | 0–69 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Fair,
    Critical,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => ScoreBand::Excellent,
            70..=89 => ScoreBand::Fair,
            _ => ScoreBand::Critical,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "🟢 Excellent",
            ScoreBand::Fair => "🟡 Fair",
            ScoreBand::Critical => "🔴 Critical",
        }
    }
}

fn severity_marker(severity: &Severity) -> &'static str {
    match severity.level() {
        SeverityLevel::High => "🔴",
        SeverityLevel::Medium => "🟠",
        SeverityLevel::Low => "🟡",
        SeverityLevel::Unrecognized => "⚪",
    }
}

/// Group issues by category, keeping categories in first-seen order and
/// issues in input order within each category.
pub fn group_by_category(issues: &[Issue]) -> IndexMap<&str, Vec<&Issue>> {
    let mut groups: IndexMap<&str, Vec<&Issue>> = IndexMap::new();
    for issue in issues {
        let category = match issue.category.trim() {
            "" => UNCATEGORIZED,
            label => label,
        };
        groups.entry(category).or_default().push(issue);
    }
    groups
}

/// Recommendations in ascending priority order; ties keep input order.
pub fn by_priority(recommendations: &[Recommendation]) -> Vec<&Recommendation> {
    let mut ordered: Vec<&Recommendation> = recommendations.iter().collect();
    ordered.sort_by_key(|rec| rec.priority);
    ordered
}

/// Render `report` as a Markdown document.
pub fn generate_markdown(report: &Report) -> String {
    MarkdownReport(report).to_string()
}

/// [`Display`] adapter that writes a report as Markdown.
pub struct MarkdownReport<'a>(pub &'a Report);

impl Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let analysis = &report.analysis;
        let meta = &analysis.metadata;

        writeln!(f, "# AutoUX Analysis Report")?;
        writeln!(f)?;
        writeln!(
            f,
            "**UX Score:** {}/100 {}",
            analysis.ux_score,
            ScoreBand::from_score(analysis.ux_score).marker()
        )?;
        writeln!(f)?;
        writeln!(f, "**Report ID:** {}  ", report.id)?;
        writeln!(f, "**Generated:** {}  ", report.timestamp)?;
        if meta.analysis_model.is_empty() {
            writeln!(f, "**Schema Version:** {}", report.version)?;
        } else {
            writeln!(f, "**Schema Version:** {}  ", report.version)?;
            writeln!(f, "**Analysis Model:** {}", meta.analysis_model)?;
        }
        writeln!(f)?;

        writeln!(f, "## Summary")?;
        writeln!(f)?;
        writeln!(f, "- **Total Issues:** {}", meta.total_issues)?;
        writeln!(f, "- **Critical:** {}", meta.critical_count)?;
        writeln!(f, "- **High:** {}", meta.high_count)?;
        writeln!(f, "- **Medium:** {}", meta.medium_count)?;
        writeln!(f, "- **Low:** {}", meta.low_count)?;
        writeln!(f)?;

        write_issues(f, &analysis.issues)?;
        write_recommendations(f, &analysis.recommendations)?;

        f.write_str(STANDARDS_REFERENCES)
    }
}

fn write_issues(f: &mut Formatter<'_>, issues: &[Issue]) -> fmt::Result {
    writeln!(f, "## Issues by Category")?;
    writeln!(f)?;
    if issues.is_empty() {
        writeln!(f, "_No issues detected._")?;
        return writeln!(f);
    }

    for (category, group) in group_by_category(issues) {
        let noun = if group.len() == 1 { "issue" } else { "issues" };
        writeln!(f, "### {category} ({} {noun})", group.len())?;
        writeln!(f)?;
        for issue in group {
            writeln!(
                f,
                "- {} **{}** `{}`: {}",
                severity_marker(&issue.severity),
                issue.severity,
                issue.id,
                issue.description
            )?;
            for field in &issue.metadata {
                writeln!(f, "  - {}", MetadataLine(field))?;
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

fn write_recommendations(f: &mut Formatter<'_>, recommendations: &[Recommendation]) -> fmt::Result {
    if recommendations.is_empty() {
        return Ok(());
    }

    writeln!(f, "## Recommendations")?;
    writeln!(f)?;
    for rec in by_priority(recommendations) {
        writeln!(f, "### {}. {}", rec.priority, rec.title)?;
        writeln!(f)?;
        writeln!(f, "**Description:** {}", rec.description)?;
        writeln!(f)?;
        writeln!(f, "**Why this matters:** {}", rec.why)?;
        writeln!(f)?;
        if !rec.references.is_empty() {
            writeln!(f, "**References:**")?;
            writeln!(f)?;
            for url in &rec.references {
                writeln!(f, "- {url}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "**Estimated Impact:** {}", rec.estimated_impact)?;
        writeln!(f)?;
    }
    Ok(())
}

/// One `Label: value` line for an issue metadata field.
struct MetadataLine<'a>(&'a MetadataField);

impl Display for MetadataLine<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            MetadataField::ResponseTime(ms) => write!(f, "Response Time: {ms}ms"),
            MetadataField::WcagCriteria(criteria) => {
                write!(f, "WCAG Criteria: {}", criteria.join(", "))
            }
            MetadataField::Other { key, value } => {
                write!(f, "{}: {}", humanize_key(key), display_value(value))
            }
        }
    }
}

/// `pageUrl` / `page_url` → `Page Url`.
fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
