//! Scanner settings
//!
//! Reads and writes [`ScannerConfig`] through a [`SettingsStore`].

use crate::application::dto::{SCANNER_CONFIG_KEY, ScannerConfig, ScannerConfigPatch};
use crate::domain::repositories::{SettingsError, SettingsStore};

pub struct ScannerSettings;

impl ScannerSettings {
    /// Loads the configuration; missing or undecodable records yield the
    /// default configuration
    pub fn load(store: &dyn SettingsStore) -> Result<ScannerConfig, SettingsError> {
        match Self::decode(store) {
            Err(SettingsError::Undecodable { source, .. }) => {
                tracing::warn!(error = %source, "stored scanner config is unreadable, using defaults");
                Ok(ScannerConfig::default())
            }
            other => other,
        }
    }

    /// Merges `patch` into the stored configuration and returns the result
    ///
    /// An undecodable stored record is left untouched and reported as
    /// [`SettingsError::Undecodable`].
    pub fn save(
        store: &dyn SettingsStore,
        patch: ScannerConfigPatch,
    ) -> Result<ScannerConfig, SettingsError> {
        let mut config = Self::decode(store)?;
        config.merge(patch);
        store.set(SCANNER_CONFIG_KEY, serde_json::to_value(&config)?)?;
        Ok(config)
    }

    fn decode(store: &dyn SettingsStore) -> Result<ScannerConfig, SettingsError> {
        let Some(value) = store.get(SCANNER_CONFIG_KEY)? else {
            return Ok(ScannerConfig::default());
        };

        let mut config = serde_json::from_value::<ScannerConfig>(value).map_err(|source| {
            SettingsError::Undecodable {
                key: SCANNER_CONFIG_KEY.to_string(),
                source,
            }
        })?;
        config.normalize();
        Ok(config)
    }
}
