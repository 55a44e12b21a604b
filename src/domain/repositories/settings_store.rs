//! Settings store trait
//!
//! Generic key/value persistence used for the scanner configuration.

use thiserror::Error;

/// Errors that can occur when reading or writing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed settings data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Stored record '{key}' cannot be decoded: {source}")]
    Undecodable {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Settings error: {0}")]
    Other(String),
}

/// Key/value store holding opaque JSON records
///
/// # Example
///
/// ```
/// use magpie::domain::repositories::SettingsStore;
/// use magpie::infrastructure::persistence::MemorySettingsStore;
///
/// let store = MemorySettingsStore::new();
/// store.set("answer", serde_json::json!(42)).unwrap();
/// assert_eq!(store.get("answer").unwrap(), Some(serde_json::json!(42)));
/// ```
pub trait SettingsStore: Send + Sync {
    /// Returns the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, SettingsError>;

    /// Replaces the value stored under `key`
    fn set(&self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
}
