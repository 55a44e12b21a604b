//! Scanner configuration DTO
//!
//! Persisted as one JSON record under [`SCANNER_CONFIG_KEY`].

use crate::domain::entities::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Settings key the configuration is stored under
pub const SCANNER_CONFIG_KEY: &str = "scanner.config";

/// Persistent scanner configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerConfig {
    /// Built-in source ids selected for scanning
    pub enabled_sources: Vec<String>,
    /// Extra directories scanned on every run
    pub custom_paths: Vec<PathBuf>,
    pub auto_scan_on_launch: bool,
    /// Destination category per platform
    pub category_mapping: BTreeMap<Platform, String>,
    /// Category used when a platform has no mapping
    pub fallback_category: Option<String>,
    /// Per-source replacement for the built-in default path
    pub path_overrides: BTreeMap<String, PathBuf>,
    pub merge_into_default: bool,
    pub auto_tag_platform: bool,
    pub last_scan_at: Option<DateTime<Utc>>,
}

impl ScannerConfig {
    /// Restores the storage invariants: ids and paths de-duplicated, paths
    /// absolute. Paths that cannot be made absolute are dropped.
    pub fn normalize(&mut self) {
        self.enabled_sources = dedup_ids(std::mem::take(&mut self.enabled_sources));
        self.custom_paths = dedup_paths(std::mem::take(&mut self.custom_paths));
        self.path_overrides = std::mem::take(&mut self.path_overrides)
            .into_iter()
            .filter_map(|(id, path)| absolute_path(&path).map(|path| (id, path)))
            .collect();
        self.category_mapping
            .retain(|_, category| !category.trim().is_empty());
        if self
            .fallback_category
            .as_deref()
            .is_some_and(|category| category.trim().is_empty())
        {
            self.fallback_category = None;
        }
    }

    /// Applies a partial update
    ///
    /// List-valued fields are replaced wholesale. Map-valued fields are merged
    /// key by key; an empty value removes the key.
    pub fn merge(&mut self, patch: ScannerConfigPatch) {
        if let Some(enabled_sources) = patch.enabled_sources {
            self.enabled_sources = enabled_sources;
        }
        if let Some(custom_paths) = patch.custom_paths {
            self.custom_paths = custom_paths;
        }
        if let Some(auto_scan_on_launch) = patch.auto_scan_on_launch {
            self.auto_scan_on_launch = auto_scan_on_launch;
        }
        if let Some(category_mapping) = patch.category_mapping {
            for (platform, category) in category_mapping {
                if category.trim().is_empty() {
                    self.category_mapping.remove(&platform);
                } else {
                    self.category_mapping.insert(platform, category);
                }
            }
        }
        if let Some(fallback_category) = patch.fallback_category {
            self.fallback_category = Some(fallback_category);
        }
        if let Some(path_overrides) = patch.path_overrides {
            for (id, path) in path_overrides {
                if path.as_os_str().is_empty() {
                    self.path_overrides.remove(&id);
                } else {
                    self.path_overrides.insert(id, path);
                }
            }
        }
        if let Some(merge_into_default) = patch.merge_into_default {
            self.merge_into_default = merge_into_default;
        }
        if let Some(auto_tag_platform) = patch.auto_tag_platform {
            self.auto_tag_platform = auto_tag_platform;
        }
        if let Some(last_scan_at) = patch.last_scan_at {
            self.last_scan_at = Some(last_scan_at);
        }
        self.normalize();
    }
}

/// Partial update of [`ScannerConfig`]; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerConfigPatch {
    pub enabled_sources: Option<Vec<String>>,
    pub custom_paths: Option<Vec<PathBuf>>,
    pub auto_scan_on_launch: Option<bool>,
    pub category_mapping: Option<BTreeMap<Platform, String>>,
    /// An empty string clears the fallback
    pub fallback_category: Option<String>,
    pub path_overrides: Option<BTreeMap<String, PathBuf>>,
    pub merge_into_default: Option<bool>,
    pub auto_tag_platform: Option<bool>,
    pub last_scan_at: Option<DateTime<Utc>>,
}

fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .filter_map(|path| absolute_path(path))
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

fn absolute_path(path: &Path) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        return None;
    }
    std::path::absolute(path).ok()
}
