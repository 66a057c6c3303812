//! Report builder: stamps an [`AiResponse`] with identity metadata and
//! renders it as Markdown.
//!
//! ```text
//! AiResponse ──► add_metadata ──► Report ──► generate_markdown ──► String
//!      └──────────────── generate_report ───────────────────────────┘
//! ```

pub mod builder;
pub mod markdown;
pub mod model;

pub use builder::{
    add_metadata, generate_report, Clock, FixedClock, IdSource, ReportBuilder, SequentialIds,
    SystemClock, UuidIds, REPORT_ID_PREFIX, REPORT_VERSION,
};
pub use markdown::{generate_markdown, group_by_category, MarkdownReport, ScoreBand};
pub use model::{
    AiResponse, AnalysisMetadata, GeneratedReport, Issue, IssueMetadata, MetadataField,
    Recommendation, Report, Severity, SeverityLevel,
};
