//! autoux: upload → normalize → analyze → report.
//!
//! This crate wires the pure core in `autoux-core` to the outside world: the
//! upload gate that runs before the normalizer, the [`analyzer::Analyzer`]
//! seam standing in for the LLM client, and report persistence for the CLI.
//!
//! # Architecture
//!
//! ```text
//! upload::validate_upload ──► autoux_core::parse ──► Analyzer::analyze
//!                                                          │
//!                     output::save_report ◄── ReportBuilder::generate_report
//! ```
//!
//! Every failure keeps its [`autoux_core::ErrorCode`] all the way out, so a
//! caller can tell client-format problems from upstream AI problems.

pub mod analyzer;
pub mod output;
pub mod pipeline;
pub mod upload;

pub use analyzer::{AnalysisError, Analyzer, RecordedAnalyzer};
pub use pipeline::{analyze_upload, PipelineError};
pub use upload::{validate_upload, UploadError};
