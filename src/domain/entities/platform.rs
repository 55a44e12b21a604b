//! Platform entity
//!
//! Chat and browser applications whose caches the scanner knows about.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An application whose cached stickers can be recovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    WeChat,
    Qq,
    Telegram,
    Discord,
    Chrome,
    Edge,
    /// User-configured or ad hoc directories
    Custom,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::WeChat,
        Platform::Qq,
        Platform::Telegram,
        Platform::Discord,
        Platform::Chrome,
        Platform::Edge,
        Platform::Custom,
    ];

    /// Stable identifier, also used as the auto-generated platform tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::WeChat => "wechat",
            Platform::Qq => "qq",
            Platform::Telegram => "telegram",
            Platform::Discord => "discord",
            Platform::Chrome => "chrome",
            Platform::Edge => "edge",
            Platform::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::WeChat => "微信",
            Platform::Qq => "QQ",
            Platform::Telegram => "Telegram",
            Platform::Discord => "Discord",
            Platform::Chrome => "Chrome",
            Platform::Edge => "Edge",
            Platform::Custom => "自定义",
        }
    }

    /// Accent color for a category created on behalf of this platform
    pub fn color(&self) -> &'static str {
        match self {
            Platform::WeChat => "#07C160",
            Platform::Qq => "#12B7F5",
            Platform::Telegram => "#229ED9",
            Platform::Discord => "#5865F2",
            Platform::Chrome => "#4285F4",
            Platform::Edge => "#0C59A4",
            Platform::Custom => "#8E8E93",
        }
    }

    pub fn parse(value: &str) -> Option<Platform> {
        Platform::ALL
            .into_iter()
            .find(|platform| platform.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
