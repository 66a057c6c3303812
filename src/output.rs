//! Writing finished reports to disk.

use anyhow::Context;
use autoux_core::GeneratedReport;
use std::path::{Path, PathBuf};

/// Where a report ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReport {
    pub markdown: PathBuf,
    pub json: Option<PathBuf>,
}

/// Write `<report id>.md` (and `<report id>.json` when `write_json` is set)
/// into `dir`, creating it if needed.
pub fn save_report(
    generated: &GeneratedReport,
    dir: &Path,
    write_json: bool,
) -> anyhow::Result<SavedReport> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let id = &generated.report.id;
    let markdown = dir.join(format!("{id}.md"));
    std::fs::write(&markdown, &generated.markdown)
        .with_context(|| format!("writing {}", markdown.display()))?;

    let json = if write_json {
        let path = dir.join(format!("{id}.json"));
        let body = serde_json::to_string_pretty(generated)?;
        std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        Some(path)
    } else {
        None
    };

    tracing::debug!(report_id = %id, dir = %dir.display(), "saved report");
    Ok(SavedReport { markdown, json })
}
