//! Report identity: id, timestamp and schema version.
//!
//! The builder owns a [`Clock`] and an [`IdSource`]. Production code uses
//! [`SystemClock`] and [`UuidIds`]; tests swap in [`FixedClock`] and
//! [`SequentialIds`] to get byte-for-byte reproducible reports.

use super::markdown::generate_markdown;
use super::model::{AiResponse, GeneratedReport, Report};
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Schema version stamped on every report.
pub const REPORT_VERSION: &str = "1.0.0";
/// Every report id starts with this.
pub const REPORT_ID_PREFIX: &str = "report-";

// ---------------------------------------------------------------------------
// Clock / id capabilities
// ---------------------------------------------------------------------------

/// Source of "now" for report timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Source of the unique part of a report id (everything after `report-`).
pub trait IdSource {
    fn next_suffix(&self) -> String;
}

/// Time-ordered UUIDv7 suffixes, unique across processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_suffix(&self) -> String {
        uuid::Uuid::now_v7().simple().to_string()
    }
}

/// `000001`, `000002`, … Unique within one instance.
#[derive(Debug, Default)]
pub struct SequentialIds {
    issued: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_suffix(&self) -> String {
        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{n:06}")
    }
}

// ---------------------------------------------------------------------------
// ReportBuilder
// ---------------------------------------------------------------------------

/// Turns an [`AiResponse`] into a [`Report`] and its Markdown rendering.
#[derive(Debug, Default)]
pub struct ReportBuilder<C = SystemClock, I = UuidIds> {
    clock: C,
    ids: I,
}

impl ReportBuilder {
    /// Builder backed by the system clock and UUIDv7 ids.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock, I: IdSource> ReportBuilder<C, I> {
    pub fn with_sources(clock: C, ids: I) -> Self {
        Self { clock, ids }
    }

    /// Stamp a copy of `response` with a fresh id, the current time and
    /// [`REPORT_VERSION`]. The response itself is left untouched.
    pub fn add_metadata(&self, response: &AiResponse) -> Report {
        let id = format!("{REPORT_ID_PREFIX}{}", self.ids.next_suffix());
        let timestamp = self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true);
        tracing::debug!(%id, %timestamp, "stamped report");

        Report {
            id,
            timestamp,
            version: REPORT_VERSION.to_string(),
            analysis: response.clone(),
        }
    }

    /// [`add_metadata`](Self::add_metadata) followed by [`generate_markdown`].
    pub fn generate_report(&self, response: &AiResponse) -> GeneratedReport {
        let report = self.add_metadata(response);
        let markdown = generate_markdown(&report);
        GeneratedReport { report, markdown }
    }
}

/// [`ReportBuilder::add_metadata`] with the system clock and UUIDv7 ids.
pub fn add_metadata(response: &AiResponse) -> Report {
    ReportBuilder::new().add_metadata(response)
}

/// [`ReportBuilder::generate_report`] with the system clock and UUIDv7 ids.
pub fn generate_report(response: &AiResponse) -> GeneratedReport {
    ReportBuilder::new().generate_report(response)
}
