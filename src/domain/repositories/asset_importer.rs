//! Import hand-off traits
//!
//! The permanent collection is an external collaborator: it decides
//! whether a staged file is already known and commits staged files.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the permanent collection
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Import error: {0}")]
    Other(String),
}

/// Options for one import hand-off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub target_category: String,
    /// The scanner already filtered duplicates, so this is normally false
    pub skip_duplicates: bool,
    pub auto_generate_tags: bool,
    pub extra_tags: Vec<String>,
}

impl ImportOptions {
    pub fn new(target_category: impl Into<String>) -> Self {
        Self {
            target_category: target_category.into(),
            skip_duplicates: false,
            auto_generate_tags: true,
            extra_tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.extra_tags = tags;
        self
    }
}

/// Result of one import hand-off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub success: usize,
    pub failed: usize,
}

/// Commits staged files into the permanent collection
pub trait AssetImporter: Send + Sync {
    /// Imports every staged file as one unit of work
    fn import_prepared(
        &self,
        paths: &[PathBuf],
        options: &ImportOptions,
    ) -> Result<ImportSummary, ImportError>;
}

/// Answers whether a staged file is already in the collection
pub trait DuplicateChecker: Send + Sync {
    fn is_duplicate(&self, staged_path: &Path) -> Result<bool, ImportError>;
}
