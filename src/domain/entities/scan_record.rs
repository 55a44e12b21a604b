//! Per-file scan records
//!
//! Every file the walker visits produces exactly one record. Expected
//! per-file conditions (unreadable paths, unknown formats, duplicates) are
//! expressed here rather than as errors.

use super::platform::Platform;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Reason strings attached to skipped and failed records
pub mod reason {
    pub const PATH_MISSING: &str = "路径不存在";
    pub const PATH_UNREADABLE: &str = "无法读取路径";
    pub const DIRECTORY_INACCESSIBLE: &str = "目录不可访问";
    pub const SIZE_MISMATCH: &str = "文件大小不匹配";
    pub const COPY_FAILED: &str = "复制失败";
    pub const WRITE_FAILED: &str = "写入失败";
    pub const UNRECOGNIZED_CACHE: &str = "无法识别的缓存格式";
    pub const UNSUPPORTED_TYPE: &str = "不支持的文件类型";
    pub const DUPLICATE: &str = "已存在相同文件";
}

/// Outcome of visiting one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// A plain image copied into staging
    Copied,
    /// An obfuscated cache file recovered into staging
    Decoded,
    Skipped,
    Failed,
}

impl FileStatus {
    pub fn is_prepared(&self) -> bool {
        matches!(self, FileStatus::Copied | FileStatus::Decoded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerFileRecord {
    original_path: PathBuf,
    staged_path: Option<PathBuf>,
    status: FileStatus,
    reason: Option<String>,
    platform: Option<Platform>,
}

impl ScannerFileRecord {
    pub fn copied(original: &Path, staged: PathBuf, platform: Platform) -> Self {
        Self {
            original_path: original.to_path_buf(),
            staged_path: Some(staged),
            status: FileStatus::Copied,
            reason: None,
            platform: Some(platform),
        }
    }

    pub fn decoded(original: &Path, staged: PathBuf, platform: Platform) -> Self {
        Self {
            original_path: original.to_path_buf(),
            staged_path: Some(staged),
            status: FileStatus::Decoded,
            reason: None,
            platform: Some(platform),
        }
    }

    pub fn skipped(original: &Path, reason: &str, platform: Option<Platform>) -> Self {
        Self {
            original_path: original.to_path_buf(),
            staged_path: None,
            status: FileStatus::Skipped,
            reason: Some(reason.to_string()),
            platform,
        }
    }

    pub fn failed(original: &Path, reason: &str, platform: Option<Platform>) -> Self {
        Self {
            original_path: original.to_path_buf(),
            staged_path: None,
            status: FileStatus::Failed,
            reason: Some(reason.to_string()),
            platform,
        }
    }

    /// Turns a staged record into a duplicate skip
    pub fn into_duplicate(self) -> Self {
        Self {
            staged_path: None,
            status: FileStatus::Skipped,
            reason: Some(reason::DUPLICATE.to_string()),
            ..self
        }
    }

    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    pub fn staged_path(&self) -> Option<&Path> {
        self.staged_path.as_deref()
    }

    pub fn status(&self) -> FileStatus {
        self.status
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }
}

/// A staged asset waiting for the import hand-off
#[derive(Debug, Clone)]
pub struct PreparedAsset {
    pub platform: Platform,
    pub original_path: PathBuf,
    pub staged_path: PathBuf,
    pub record: ScannerFileRecord,
}
