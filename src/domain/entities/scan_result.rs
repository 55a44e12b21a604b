//! Scan run result entity
//!
//! Aggregate counts and the ordered record list of one scan run.

use super::scan_record::{FileStatus, ScannerFileRecord};
use serde::{Deserialize, Serialize};

/// Result of a complete scan run
///
/// `total_found == imported + skipped + failed` holds once the run has
/// finished; duplicates are part of `skipped` and also counted separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRunResult {
    pub total_found: usize,
    pub imported: usize,
    pub skipped: usize,
    pub duplicates: usize,
    pub failed: usize,
    /// Set when a source hit the per-source visit ceiling
    pub truncated: bool,
    pub records: Vec<ScannerFileRecord>,
}

impl ScanRunResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a caller-named path that does not exist
    pub fn add_missing_path(&mut self, record: ScannerFileRecord) {
        debug_assert_eq!(record.status(), FileStatus::Failed);
        self.total_found += 1;
        self.failed += 1;
        self.records.push(record);
    }

    /// Counts records by status
    pub fn count_status(&self, status: FileStatus) -> usize {
        self.records
            .iter()
            .filter(|record| record.status() == status)
            .count()
    }

    /// Whether the aggregate counters are consistent
    pub fn is_balanced(&self) -> bool {
        self.total_found == self.imported + self.skipped + self.failed
            && self.duplicates <= self.skipped
    }

    /// Returns a summary string
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Found {} files: {} imported, {} skipped ({} duplicates), {} failed\n",
            self.total_found, self.imported, self.skipped, self.duplicates, self.failed
        );

        let copied = self.count_status(FileStatus::Copied);
        let decoded = self.count_status(FileStatus::Decoded);
        if copied + decoded > 0 {
            summary.push_str(&format!("  - copied: {}\n", copied));
            summary.push_str(&format!("  - decoded: {}\n", decoded));
        }

        if self.truncated {
            summary.push_str("Some sources were truncated at the visit limit\n");
        }

        summary
    }
}
