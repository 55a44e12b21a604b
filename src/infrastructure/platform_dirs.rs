//! Per-OS application-data roots

use crate::domain::services::AppDataRoots;
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Resolves roaming/local application-data roots for the current user
pub fn detect_app_data_roots() -> AppDataRoots {
    match BaseDirs::new() {
        Some(base) => AppDataRoots::from_parts(
            Some(base.config_dir().to_path_buf()),
            Some(base.data_local_dir().to_path_buf()),
            Some(base.home_dir().to_path_buf()),
        ),
        None => AppDataRoots::from_parts(None, None, None),
    }
}

/// Directory holding magpie's own settings and library
pub fn magpie_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "magpie")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("magpie"))
}
