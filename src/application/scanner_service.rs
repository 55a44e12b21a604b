//! Scanner service
//!
//! The operation surface the rest of the application talks to: detect
//! sources, get config, save config and run a scan.

use crate::application::dto::{ScanLimits, ScanRunOptions, ScannerConfig, ScannerConfigPatch};
use crate::application::error::ScanError;
use crate::application::run_scan::RunScanUseCase;
use crate::application::scanner_settings::ScannerSettings;
use crate::domain::entities::{DetectedSource, ScanRunResult};
use crate::domain::repositories::{
    AssetImporter, CategoryStore, DuplicateChecker, SettingsError, SettingsStore,
};
use crate::domain::services::SourceCatalog;
use std::sync::Arc;

pub struct ScannerService {
    catalog: SourceCatalog,
    settings: Arc<dyn SettingsStore>,
    categories: Arc<dyn CategoryStore>,
    importer: Arc<dyn AssetImporter>,
    duplicates: Arc<dyn DuplicateChecker>,
    limits: ScanLimits,
}

impl ScannerService {
    pub fn new(
        catalog: SourceCatalog,
        settings: Arc<dyn SettingsStore>,
        categories: Arc<dyn CategoryStore>,
        importer: Arc<dyn AssetImporter>,
        duplicates: Arc<dyn DuplicateChecker>,
    ) -> Self {
        Self {
            catalog,
            settings,
            categories,
            importer,
            duplicates,
            limits: ScanLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    pub fn limits(&self) -> &ScanLimits {
        &self.limits
    }

    /// Resolves and probes every built-in source. Never fails: unreadable
    /// settings are treated as "no overrides".
    pub fn detect_sources(&self) -> Vec<DetectedSource> {
        let config = ScannerSettings::load(self.settings.as_ref()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cannot read scanner settings, ignoring overrides");
            ScannerConfig::default()
        });
        self.catalog.detect_sources(&config.path_overrides)
    }

    pub fn get_config(&self) -> Result<ScannerConfig, SettingsError> {
        ScannerSettings::load(self.settings.as_ref())
    }

    /// Merges `patch` into the stored configuration
    pub fn save_config(&self, patch: ScannerConfigPatch) -> Result<ScannerConfig, SettingsError> {
        ScannerSettings::save(self.settings.as_ref(), patch)
    }

    pub fn run_scan(&self, options: &ScanRunOptions) -> Result<ScanRunResult, ScanError> {
        RunScanUseCase::new(
            &self.catalog,
            self.settings.as_ref(),
            self.categories.as_ref(),
            self.importer.as_ref(),
            self.duplicates.as_ref(),
            &self.limits,
        )
        .execute(options)
    }
}
