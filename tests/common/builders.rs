//! Test builders: ergonomic constructors for `AiResponse`, `Issue`,
//! `Recommendation` and deterministic report builders.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use autoux_core::report::{
    AiResponse, AnalysisMetadata, FixedClock, Issue, IssueMetadata, Recommendation, ReportBuilder,
    SequentialIds, Severity, SeverityLevel,
};
use chrono::TimeZone;

/// The instant every deterministic report is stamped with.
pub const FIXED_TIMESTAMP: &str = "2024-01-15T10:00:00.000Z";

/// A report builder with a fixed clock and `report-000001`, `report-000002`, … ids.
pub fn fixed_builder() -> ReportBuilder<FixedClock, SequentialIds> {
    let at = chrono::Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    ReportBuilder::with_sources(FixedClock(at), SequentialIds::new())
}

/// Deserialize an AIResponse fixture.
pub fn response_from(value: serde_json::Value) -> AiResponse {
    serde_json::from_value(value).expect("fixture must match the AIResponse shape")
}

// ---------------------------------------------------------------------------
// IssueBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Issue`] fixtures.
///
/// ```rust
/// let issue = IssueBuilder::new("issue-1", "Performance", "Slow checkout")
///     .severity("high")
///     .metadata(json!({ "responseTime": 3200 }))
///     .build();
/// ```
pub struct IssueBuilder {
    issue: Issue,
}

impl IssueBuilder {
    pub fn new(id: &str, category: &str, description: &str) -> Self {
        Self {
            issue: Issue {
                id: id.to_string(),
                kind: None,
                severity: Severity::MEDIUM,
                description: description.to_string(),
                category: category.to_string(),
                metadata: IssueMetadata::default(),
            },
        }
    }

    pub fn severity(mut self, severity: &str) -> Self {
        self.issue.severity = Severity::from(severity.to_string());
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.issue.kind = Some(kind.to_string());
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.issue.metadata = serde_json::from_value(metadata).expect("metadata must be an object");
        self
    }

    pub fn build(self) -> Issue {
        self.issue
    }
}

/// A recommendation with the given priority and title and filler text.
pub fn recommendation(priority: u32, title: &str) -> Recommendation {
    Recommendation {
        priority,
        title: title.to_string(),
        description: format!("Do: {title}"),
        why: format!("Because: {title}"),
        references: vec![format!("https://example.test/{priority}")],
        estimated_impact: "medium".to_string(),
    }
}

// ---------------------------------------------------------------------------
// AiResponseBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`AiResponse`] fixtures. Category counts and severity
/// totals are derived from the issues added.
pub struct AiResponseBuilder {
    response: AiResponse,
}

impl AiResponseBuilder {
    pub fn new(ux_score: u8) -> Self {
        Self {
            response: AiResponse {
                ux_score,
                issues: Vec::new(),
                categories: Default::default(),
                recommendations: Vec::new(),
                metadata: AnalysisMetadata {
                    analysis_model: "test-model".to_string(),
                    ..Default::default()
                },
            },
        }
    }

    pub fn issue(mut self, issue: Issue) -> Self {
        *self.response.categories.entry(issue.category.clone()).or_insert(0) += 1;
        let meta = &mut self.response.metadata;
        meta.total_issues += 1;
        match issue.severity.level() {
            SeverityLevel::High => meta.high_count += 1,
            SeverityLevel::Medium => meta.medium_count += 1,
            SeverityLevel::Low => meta.low_count += 1,
            SeverityLevel::Unrecognized => {}
        }
        self.response.issues.push(issue);
        self
    }

    pub fn recommendation(mut self, recommendation: Recommendation) -> Self {
        self.response.recommendations.push(recommendation);
        self
    }

    pub fn build(self) -> AiResponse {
        self.response
    }
}
