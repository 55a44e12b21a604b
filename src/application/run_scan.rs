//! Run scan use case
//!
//! Resolves the working set of sources, walks each one sequentially, hands
//! the staged assets to the importer per platform and always tears the
//! staging area down before returning.

use crate::application::dto::{ScanLimits, ScanRunOptions, ScannerConfig, ScannerConfigPatch};
use crate::application::error::ScanError;
use crate::application::scanner_settings::ScannerSettings;
use crate::application::walker::DirectoryWalker;
use crate::domain::entities::{
    Category, DEFAULT_CATEGORY_ID, Platform, PreparedAsset, ScanRunResult, ScannerFileRecord,
    reason,
};
use crate::domain::repositories::{
    AssetImporter, CategoryStore, DuplicateChecker, ImportOptions, SettingsStore,
};
use crate::domain::services::{SourceCatalog, XorSignatureCodec};
use crate::infrastructure::staging::StagingArea;
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

const DEFAULT_CATEGORY_NAME: &str = "默认";

/// Phases of a scan run, used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Resolving,
    Walking,
    Importing,
    TearingDown,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanPhase::Resolving => "resolving sources",
            ScanPhase::Walking => "walking",
            ScanPhase::Importing => "importing",
            ScanPhase::TearingDown => "tearing down",
        };
        f.write_str(name)
    }
}

/// A root to walk, with the platform its assets are attributed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingSource {
    pub path: PathBuf,
    pub platform: Platform,
    pub label: String,
}

/// Destination category for one platform
///
/// Precedence: run override, platform mapping, configured fallback,
/// `default`. "Merge into default" wins over all of them.
pub fn resolve_category(
    platform: Platform,
    config: &ScannerConfig,
    category_override: Option<&str>,
) -> String {
    if config.merge_into_default {
        return DEFAULT_CATEGORY_ID.to_string();
    }
    category_override
        .filter(|category| !category.trim().is_empty())
        .or_else(|| config.category_mapping.get(&platform).map(String::as_str))
        .or(config.fallback_category.as_deref())
        .unwrap_or(DEFAULT_CATEGORY_ID)
        .to_string()
}

/// Scan orchestrator
pub struct RunScanUseCase<'a> {
    catalog: &'a SourceCatalog,
    settings: &'a dyn SettingsStore,
    categories: &'a dyn CategoryStore,
    importer: &'a dyn AssetImporter,
    duplicates: &'a dyn DuplicateChecker,
    limits: &'a ScanLimits,
}

impl<'a> RunScanUseCase<'a> {
    pub fn new(
        catalog: &'a SourceCatalog,
        settings: &'a dyn SettingsStore,
        categories: &'a dyn CategoryStore,
        importer: &'a dyn AssetImporter,
        duplicates: &'a dyn DuplicateChecker,
        limits: &'a ScanLimits,
    ) -> Self {
        Self {
            catalog,
            settings,
            categories,
            importer,
            duplicates,
            limits,
        }
    }

    /// Executes one scan run
    ///
    /// The staging area is removed on every exit path; an error from the
    /// import step is returned only after that cleanup.
    pub fn execute(&self, options: &ScanRunOptions) -> Result<ScanRunResult, ScanError> {
        let start_time = Instant::now();
        let config = ScannerSettings::load(self.settings)?;
        let mut result = ScanRunResult::new();

        tracing::debug!(phase = %ScanPhase::Resolving, "scan phase");
        let sources = self.resolve_sources(&config, options, &mut result);
        if sources.is_empty() {
            tracing::info!("No existing sources to scan");
            return Ok(result);
        }

        let staging = StagingArea::create(self.limits.staging_parent.as_deref())
            .map_err(ScanError::Staging)?;
        let outcome = self.run_staged(&staging, &config, options, &sources, &mut result);

        tracing::debug!(phase = %ScanPhase::TearingDown, "scan phase");
        staging.teardown();
        outcome?;

        tracing::info!(
            "Scan complete: {} found, {} imported, {} skipped, {} failed in {:.2}s",
            result.total_found,
            result.imported,
            result.skipped,
            result.failed,
            start_time.elapsed().as_secs_f64()
        );

        Ok(result)
    }

    /// Builds the working set: selected built-in sources that exist, existing
    /// custom paths, then existing ad hoc paths. Missing ad hoc paths are
    /// recorded as failures.
    pub fn resolve_sources(
        &self,
        config: &ScannerConfig,
        options: &ScanRunOptions,
        result: &mut ScanRunResult,
    ) -> Vec<WorkingSource> {
        let detected = self.catalog.detect_sources(&config.path_overrides);
        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut sources = Vec::new();
        let mut push = |path: &Path, platform: Platform, label: &str| {
            if seen.insert(path.to_path_buf()) {
                sources.push(WorkingSource {
                    path: path.to_path_buf(),
                    platform,
                    label: label.to_string(),
                });
            }
        };

        for id in &options.selected_sources {
            match detected.iter().find(|source| &source.id == id) {
                Some(source) if source.exists => push(&source.path, source.platform, &source.label),
                Some(source) => {
                    tracing::debug!(id = %id, path = %source.path.display(), "selected source missing")
                }
                None => tracing::warn!(id = %id, "unknown source id"),
            }
        }

        for path in &config.custom_paths {
            if path.exists() {
                push(path, Platform::Custom, Platform::Custom.label());
            }
        }

        for path in &options.additional_paths {
            if path.exists() {
                push(path, Platform::Custom, Platform::Custom.label());
            } else {
                tracing::warn!(path = %path.display(), "requested path does not exist");
                result.add_missing_path(ScannerFileRecord::failed(path, reason::PATH_MISSING, None));
            }
        }

        sources
    }

    fn run_staged(
        &self,
        staging: &StagingArea,
        config: &ScannerConfig,
        options: &ScanRunOptions,
        sources: &[WorkingSource],
        result: &mut ScanRunResult,
    ) -> Result<(), ScanError> {
        let codec = XorSignatureCodec::with_max_probe_bytes(self.limits.max_probe_bytes);
        let duplicates = options.skip_duplicates.then_some(self.duplicates);
        let walker = DirectoryWalker::new(&codec, staging, self.limits, duplicates);

        tracing::debug!(phase = %ScanPhase::Walking, sources = sources.len(), "scan phase");
        let mut grouped: BTreeMap<Platform, Vec<PreparedAsset>> = BTreeMap::new();
        for source in sources {
            tracing::info!("Scanning {} ({})", source.label, source.path.display());
            let outcome = walker.walk(&source.path, source.platform, &mut result.records);

            result.total_found += outcome.total;
            result.skipped += outcome.skipped;
            result.failed += outcome.failed;
            result.duplicates += outcome.duplicates;
            result.truncated |= outcome.truncated;

            for asset in outcome.prepared {
                grouped.entry(asset.platform).or_default().push(asset);
            }
        }

        tracing::debug!(phase = %ScanPhase::Importing, platforms = grouped.len(), "scan phase");
        let auto_tag = options.auto_tag_platform.unwrap_or(config.auto_tag_platform);
        for (platform, assets) in grouped {
            self.import_platform(platform, &assets, config, options, auto_tag, result)?;
        }

        let stamp = ScannerConfigPatch {
            last_scan_at: Some(Utc::now()),
            ..Default::default()
        };
        if let Err(e) = ScannerSettings::save(self.settings, stamp) {
            tracing::warn!(error = %e, "failed to record scan time");
        }

        Ok(())
    }

    fn import_platform(
        &self,
        platform: Platform,
        assets: &[PreparedAsset],
        config: &ScannerConfig,
        options: &ScanRunOptions,
        auto_tag: bool,
        result: &mut ScanRunResult,
    ) -> Result<(), ScanError> {
        let category = resolve_category(platform, config, options.category_override.as_deref());
        self.ensure_category(platform, &category)?;

        let paths: Vec<PathBuf> = assets.iter().map(|asset| asset.staged_path.clone()).collect();
        let tags = if auto_tag {
            vec![platform.as_str().to_string()]
        } else {
            Vec::new()
        };
        let import_options = ImportOptions::new(category.as_str()).with_tags(tags);

        let summary = self
            .importer
            .import_prepared(&paths, &import_options)
            .map_err(|source| ScanError::Import { platform, source })?;

        // Whatever the importer did not confirm counts as failed
        let imported = summary.success.min(paths.len());
        result.imported += imported;
        result.failed += paths.len() - imported;

        tracing::info!(
            "Imported {} of {} {} assets into '{}'",
            imported,
            paths.len(),
            platform,
            category
        );
        Ok(())
    }

    fn ensure_category(&self, platform: Platform, id: &str) -> Result<(), ScanError> {
        let to_error = |source| ScanError::Category {
            platform,
            category: id.to_string(),
            source,
        };

        if self.categories.contains(id).map_err(to_error)? {
            return Ok(());
        }

        let name = if id == DEFAULT_CATEGORY_ID {
            DEFAULT_CATEGORY_NAME
        } else {
            platform.label()
        };
        tracing::info!(category = %id, "creating category");
        self.categories
            .create(&Category::new(id, name, platform.color()))
            .map_err(to_error)
    }
}
