//! Scan options DTO

use crate::domain::services::DEFAULT_MAX_PROBE_BYTES;
use std::path::PathBuf;

/// Options for one scan run
#[derive(Debug, Clone, Default)]
pub struct ScanRunOptions {
    /// Built-in source ids to scan
    pub selected_sources: Vec<String>,
    /// Ad hoc paths named by the caller for this run only
    pub additional_paths: Vec<PathBuf>,
    /// Ask the duplicate checker about every staged asset
    pub skip_duplicates: bool,
    /// Overrides the configured auto-tag flag when set
    pub auto_tag_platform: Option<bool>,
    /// Destination category for every platform in this run
    pub category_override: Option<String>,
}

impl ScanRunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the built-in sources to scan
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an ad hoc path
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.additional_paths.push(path.into());
        self
    }

    pub fn skip_duplicates(mut self) -> Self {
        self.skip_duplicates = true;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category_override = Some(category.into());
        self
    }
}

/// Bounds applied to every run
#[derive(Debug, Clone)]
pub struct ScanLimits {
    /// Files visited per source root before the walk stops
    pub max_files_per_source: usize,
    /// Smallest file considered (inclusive)
    pub min_file_bytes: u64,
    /// Largest file considered (inclusive)
    pub max_file_bytes: u64,
    /// Largest cache file handed to the XOR codec
    pub max_probe_bytes: usize,
    /// Where the staging root is created (OS temp dir when unset)
    pub staging_parent: Option<PathBuf>,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_files_per_source: 5000,
            min_file_bytes: 1,
            max_file_bytes: 16 * 1024 * 1024, // 16MB
            max_probe_bytes: DEFAULT_MAX_PROBE_BYTES,
            staging_parent: None,
        }
    }
}

impl ScanLimits {
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files_per_source = max_files;
        self
    }

    pub fn with_size_window(mut self, min_bytes: u64, max_bytes: u64) -> Self {
        self.min_file_bytes = min_bytes;
        self.max_file_bytes = max_bytes;
        self
    }

    pub fn with_staging_parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.staging_parent = Some(parent.into());
        self
    }
}
