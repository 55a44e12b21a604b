//! Source catalog service
//!
//! Built-in knowledge of where chat and browser applications keep their
//! sticker caches, plus existence probing of those locations.

use crate::domain::entities::{DetectedSource, Platform};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Which application-data root a default path hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// Per-user roaming data (`%APPDATA%`, `~/.config`, `~/Library/Application Support`)
    Roaming,
    /// Per-user machine-local data (`%LOCALAPPDATA%`, `~/.local/share`, ...)
    Local,
}

/// Application-data roots for the current user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDataRoots {
    pub roaming: PathBuf,
    pub local: PathBuf,
}

impl AppDataRoots {
    pub fn new(roaming: PathBuf, local: PathBuf) -> Self {
        Self { roaming, local }
    }

    /// Fills in whatever the platform could not tell us
    ///
    /// A missing home falls back to the OS temp directory; missing roots fall
    /// back to the conventional location under home for the target OS.
    pub fn from_parts(
        roaming: Option<PathBuf>,
        local: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Self {
        let home = home.unwrap_or_else(std::env::temp_dir);
        let roaming = roaming.unwrap_or_else(|| home.join(ROAMING_FALLBACK));
        let local = local.unwrap_or_else(|| home.join(LOCAL_FALLBACK));
        Self { roaming, local }
    }

    pub fn root(&self, kind: RootKind) -> &Path {
        match kind {
            RootKind::Roaming => &self.roaming,
            RootKind::Local => &self.local,
        }
    }
}

#[cfg(target_os = "windows")]
const ROAMING_FALLBACK: &str = "AppData/Roaming";
#[cfg(target_os = "windows")]
const LOCAL_FALLBACK: &str = "AppData/Local";

#[cfg(target_os = "macos")]
const ROAMING_FALLBACK: &str = "Library/Application Support";
#[cfg(target_os = "macos")]
const LOCAL_FALLBACK: &str = "Library/Application Support";

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const ROAMING_FALLBACK: &str = ".config";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const LOCAL_FALLBACK: &str = ".local/share";

/// A built-in cache location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceCandidate {
    pub id: &'static str,
    pub platform: Platform,
    pub label: &'static str,
    pub description: &'static str,
    pub recommended: bool,
    pub root: RootKind,
    pub segments: &'static [&'static str],
}

impl SourceCandidate {
    pub fn default_path(&self, roots: &AppDataRoots) -> PathBuf {
        self.segments
            .iter()
            .fold(roots.root(self.root).to_path_buf(), |path, segment| {
                path.join(segment)
            })
    }
}

pub const BUILTIN_SOURCES: [SourceCandidate; 7] = [
    SourceCandidate {
        id: "wechat-emoji",
        platform: Platform::WeChat,
        label: "微信表情",
        description: "微信自定义表情与聊天图片缓存 (.dat)",
        recommended: true,
        root: RootKind::Roaming,
        segments: &["Tencent", "WeChat", "CustomEmotion"],
    },
    SourceCandidate {
        id: "wechat-files",
        platform: Platform::WeChat,
        label: "微信文件缓存",
        description: "微信图片缓存目录，体积较大",
        recommended: false,
        root: RootKind::Roaming,
        segments: &["Tencent", "WeChat", "FileStorage", "Image"],
    },
    SourceCandidate {
        id: "qq-emoji",
        platform: Platform::Qq,
        label: "QQ 表情",
        description: "QQ 收藏表情与表情包缓存",
        recommended: true,
        root: RootKind::Roaming,
        segments: &["Tencent", "QQ", "Emotion"],
    },
    SourceCandidate {
        id: "telegram-stickers",
        platform: Platform::Telegram,
        label: "Telegram 贴纸",
        description: "Telegram Desktop 媒体缓存",
        recommended: true,
        root: RootKind::Roaming,
        segments: &["Telegram Desktop", "tdata", "user_data", "media_cache"],
    },
    SourceCandidate {
        id: "discord-cache",
        platform: Platform::Discord,
        label: "Discord 缓存",
        description: "Discord 客户端 HTTP 缓存中的表情与贴纸",
        recommended: false,
        root: RootKind::Roaming,
        segments: &["discord", "Cache", "Cache_Data"],
    },
    SourceCandidate {
        id: "chrome-cache",
        platform: Platform::Chrome,
        label: "Chrome 缓存",
        description: "Chrome 默认配置文件的 HTTP 缓存",
        recommended: false,
        root: RootKind::Local,
        segments: &["Google", "Chrome", "User Data", "Default", "Cache", "Cache_Data"],
    },
    SourceCandidate {
        id: "edge-cache",
        platform: Platform::Edge,
        label: "Edge 缓存",
        description: "Edge 默认配置文件的 HTTP 缓存",
        recommended: false,
        root: RootKind::Local,
        segments: &["Microsoft", "Edge", "User Data", "Default", "Cache", "Cache_Data"],
    },
];

/// Resolves and probes the built-in sources
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    roots: AppDataRoots,
    candidates: Vec<SourceCandidate>,
}

impl SourceCatalog {
    pub fn new(roots: AppDataRoots) -> Self {
        Self::with_candidates(roots, BUILTIN_SOURCES.to_vec())
    }

    pub fn with_candidates(roots: AppDataRoots, candidates: Vec<SourceCandidate>) -> Self {
        Self { roots, candidates }
    }

    pub fn roots(&self) -> &AppDataRoots {
        &self.roots
    }

    pub fn find(&self, id: &str) -> Option<&SourceCandidate> {
        self.candidates.iter().find(|candidate| candidate.id == id)
    }

    /// Resolves every candidate against the configured path overrides
    ///
    /// Probe failures never surface: a missing or unreadable path is
    /// reported as `exists = false` without a modification time.
    pub fn detect_sources(&self, overrides: &BTreeMap<String, PathBuf>) -> Vec<DetectedSource> {
        self.candidates
            .iter()
            .map(|candidate| self.detect(candidate, overrides))
            .collect()
    }

    fn detect(
        &self,
        candidate: &SourceCandidate,
        overrides: &BTreeMap<String, PathBuf>,
    ) -> DetectedSource {
        let default_path = candidate.default_path(&self.roots);
        let override_path = overrides.get(candidate.id);
        let path = override_path.cloned().unwrap_or_else(|| default_path.clone());
        let (exists, last_modified) = probe(&path);

        DetectedSource {
            id: candidate.id.to_string(),
            platform: candidate.platform,
            label: candidate.label.to_string(),
            description: candidate.description.to_string(),
            path,
            exists,
            recommended: candidate.recommended,
            last_modified,
            default_path,
            is_overridden: override_path.is_some(),
        }
    }
}

fn probe(path: &Path) -> (bool, Option<DateTime<Utc>>) {
    match fs::metadata(path) {
        Ok(metadata) => {
            let modified = metadata.modified().ok().map(DateTime::<Utc>::from);
            (true, modified)
        }
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "source probe failed");
            (false, None)
        }
    }
}
