use std::path::PathBuf;

use moodsync_core::SyncReport;

/// Outcome of one `sync` invocation, for summary rendering and exit codes.
#[derive(Debug)]
pub struct SyncRunResult {
    pub source: PathBuf,
    /// Rows read from the export (before the processing cap).
    pub source_rows: usize,
    pub report: SyncReport,
}

impl SyncRunResult {
    pub fn has_failures(&self) -> bool {
        self.report.has_failures()
    }
}
