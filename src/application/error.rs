//! Fatal scan errors
//!
//! Per-file problems are scan records, not errors. These variants abort a
//! run, and are only returned after the staging area has been torn down.

use crate::domain::entities::Platform;
use crate::domain::repositories::{CategoryError, ImportError, SettingsError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to load scanner settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to create staging area: {0}")]
    Staging(#[source] std::io::Error),

    #[error("Failed to prepare category {category} for {platform}: {source}")]
    Category {
        platform: Platform,
        category: String,
        #[source]
        source: CategoryError,
    },

    #[error("Import failed for {platform}: {source}")]
    Import {
        platform: Platform,
        #[source]
        source: ImportError,
    },
}
