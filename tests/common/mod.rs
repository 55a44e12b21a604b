//! Shared fixtures and fake collaborators for integration tests

#![allow(dead_code)]

use magpie::application::ScannerService;
use magpie::application::dto::ScanLimits;
use magpie::domain::entities::{Category, PNG_MAGIC};
use magpie::domain::repositories::{
    AssetImporter, CategoryError, CategoryStore, DuplicateChecker, ImportError, ImportOptions,
    ImportSummary,
};
use magpie::domain::services::{AppDataRoots, SourceCatalog, xor_bytes};
use magpie::infrastructure::persistence::MemorySettingsStore;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// One call to the importer, with staged contents captured before teardown
#[derive(Debug, Clone)]
pub struct ImportCall {
    pub paths: Vec<PathBuf>,
    pub options: ImportOptions,
    pub contents: Vec<Vec<u8>>,
}

/// Importer that records every hand-off
#[derive(Default)]
pub struct RecordingImporter {
    pub calls: Mutex<Vec<ImportCall>>,
    /// Caps the reported success count
    pub success_cap: Option<usize>,
    /// Calls with this index or later fail
    pub fail_from_call: Option<usize>,
    /// Panics instead of importing
    pub panic: bool,
}

impl RecordingImporter {
    pub fn failing() -> Self {
        Self::failing_from(0)
    }

    /// Succeeds for the first `calls` hand-offs, then fails
    pub fn failing_from(calls: usize) -> Self {
        Self {
            fail_from_call: Some(calls),
            ..Default::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic: true,
            ..Default::default()
        }
    }

    pub fn capped(cap: usize) -> Self {
        Self {
            success_cap: Some(cap),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<ImportCall> {
        self.calls.lock().clone()
    }

    pub fn imported_paths(&self) -> Vec<PathBuf> {
        self.calls().into_iter().flat_map(|call| call.paths).collect()
    }
}

impl AssetImporter for RecordingImporter {
    fn import_prepared(
        &self,
        paths: &[PathBuf],
        options: &ImportOptions,
    ) -> Result<ImportSummary, ImportError> {
        if self.panic {
            panic!("importer crashed");
        }
        if self
            .fail_from_call
            .is_some_and(|from| self.calls.lock().len() >= from)
        {
            return Err(ImportError::Other("library unavailable".into()));
        }
        let contents = paths
            .iter()
            .map(fs::read)
            .collect::<Result<Vec<_>, _>>()?;
        self.calls.lock().push(ImportCall {
            paths: paths.to_vec(),
            options: options.clone(),
            contents,
        });
        let success = self
            .success_cap
            .map_or(paths.len(), |cap| cap.min(paths.len()));
        Ok(ImportSummary {
            success,
            failed: paths.len() - success,
        })
    }
}

/// Treats staged files whose contents are in `known` as duplicates
#[derive(Default)]
pub struct ContentDuplicates {
    pub known: Mutex<Vec<Vec<u8>>>,
}

impl ContentDuplicates {
    pub fn knowing(contents: Vec<u8>) -> Self {
        Self {
            known: Mutex::new(vec![contents]),
        }
    }
}

impl DuplicateChecker for ContentDuplicates {
    fn is_duplicate(&self, staged_path: &Path) -> Result<bool, ImportError> {
        let data = fs::read(staged_path)?;
        Ok(self.known.lock().contains(&data))
    }
}

#[derive(Default)]
pub struct MemoryCategories {
    pub categories: Mutex<Vec<Category>>,
}

impl CategoryStore for MemoryCategories {
    fn list(&self) -> Result<Vec<Category>, CategoryError> {
        Ok(self.categories.lock().clone())
    }

    fn create(&self, category: &Category) -> Result<(), CategoryError> {
        let mut categories = self.categories.lock();
        if categories.iter().any(|existing| existing.id == category.id) {
            return Err(CategoryError::AlreadyExists(category.id.clone()));
        }
        categories.push(category.clone());
        Ok(())
    }
}

/// A scanner wired to fakes, with its own app-data roots and staging parent
pub struct Harness {
    pub service: ScannerService,
    pub settings: Arc<MemorySettingsStore>,
    pub categories: Arc<MemoryCategories>,
    pub importer: Arc<RecordingImporter>,
    pub duplicates: Arc<ContentDuplicates>,
    pub app_data: TempDir,
    pub staging_parent: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(RecordingImporter::default(), ContentDuplicates::default())
    }

    pub fn with(importer: RecordingImporter, duplicates: ContentDuplicates) -> Self {
        Self::with_limits(importer, duplicates, ScanLimits::default())
    }

    pub fn with_limits(
        importer: RecordingImporter,
        duplicates: ContentDuplicates,
        limits: ScanLimits,
    ) -> Self {
        let app_data = tempfile::tempdir().unwrap();
        let staging_parent = tempfile::tempdir().unwrap();
        let roots = AppDataRoots::new(
            app_data.path().join("roaming"),
            app_data.path().join("local"),
        );

        let settings = Arc::new(MemorySettingsStore::new());
        let categories = Arc::new(MemoryCategories::default());
        let importer = Arc::new(importer);
        let duplicates = Arc::new(duplicates);

        let service = ScannerService::new(
            SourceCatalog::new(roots),
            settings.clone(),
            categories.clone(),
            importer.clone(),
            duplicates.clone(),
        )
        .with_limits(limits.with_staging_parent(staging_parent.path()));

        Self {
            service,
            settings,
            categories,
            importer,
            duplicates,
            app_data,
            staging_parent,
        }
    }

    /// Creates the default directory of a built-in source
    pub fn create_source(&self, id: &str) -> PathBuf {
        let candidate = self.service.catalog().find(id).unwrap();
        let path = candidate.default_path(self.service.catalog().roots());
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Whether anything is left under the staging parent
    pub fn staging_is_empty(&self) -> bool {
        fs::read_dir(self.staging_parent.path())
            .unwrap()
            .next()
            .is_none()
    }
}

/// A minimal buffer that starts with the PNG signature
pub fn png_bytes() -> Vec<u8> {
    let mut data = PNG_MAGIC.to_vec();
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D]);
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&[0x00; 13]);
    data
}

/// `png_bytes` obfuscated with `key`
pub fn xored_png(key: u8) -> Vec<u8> {
    let mut data = png_bytes();
    xor_bytes(&mut data, key);
    data
}

pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, data).unwrap();
    path
}
