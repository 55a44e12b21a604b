//! Detected source entity
//!
//! A candidate cache directory as seen on this machine right now.

use super::platform::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A known cache location, resolved and probed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedSource {
    pub id: String,
    pub platform: Platform,
    pub label: String,
    pub description: String,
    /// Effective path: the override when one is configured, else the default
    pub path: PathBuf,
    pub exists: bool,
    pub recommended: bool,
    pub last_modified: Option<DateTime<Utc>>,
    pub default_path: PathBuf,
    pub is_overridden: bool,
}
