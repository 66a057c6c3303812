//! autoux-core: the AutoUX analysis pipeline core.
//!
//! Two pure, synchronous components with an external LLM call between them:
//!
//! ```text
//! raw file ──► normalizer::parse ──► Vec<LogEntry>
//!                                        │
//!                                   (LLM analysis)
//!                                        ▼
//!                  report::generate_report(AiResponse) ──► Report + Markdown
//! ```
//!
//! Neither component performs I/O or holds shared state; the report builder
//! only reads the clock and id source it was built with.

pub mod config;
pub mod error;
pub mod normalizer;
pub mod report;
pub mod types;

pub use error::{ErrorCode, ParseError};
pub use normalizer::parse;
pub use report::{AiResponse, GeneratedReport, Report, ReportBuilder};
pub use types::{LogEntry, LogFormat};
