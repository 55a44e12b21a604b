//! Infrastructure tests
//!
//! Source detection and full runs against the on-disk library.

mod common;

use common::*;
use magpie::application::ScannerService;
use magpie::application::dto::{ScanLimits, ScanRunOptions, ScannerConfigPatch};
use magpie::domain::entities::Platform;
use magpie::domain::repositories::{CategoryStore, DuplicateChecker};
use magpie::domain::services::{AppDataRoots, BUILTIN_SOURCES, SourceCatalog};
use magpie::infrastructure::library::LocalLibrary;
use magpie::infrastructure::persistence::JsonFileSettingsStore;
use rstest::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use tempfile::TempDir;

// ============================================================================
// Source detection
// ============================================================================

#[fixture]
fn app_data() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn catalog(app_data: &TempDir) -> SourceCatalog {
    SourceCatalog::new(AppDataRoots::new(
        app_data.path().join("roaming"),
        app_data.path().join("local"),
    ))
}

#[rstest]
fn test_detect_reports_every_builtin_source(app_data: TempDir) {
    let detected = catalog(&app_data).detect_sources(&BTreeMap::new());

    assert_eq!(detected.len(), BUILTIN_SOURCES.len());
    assert!(detected.iter().all(|source| !source.exists));
    assert!(detected.iter().all(|source| source.last_modified.is_none()));
    assert!(detected.iter().all(|source| source.path == source.default_path));
}

#[rstest]
fn test_detect_finds_existing_default_path(app_data: TempDir) {
    let catalog = catalog(&app_data);
    let qq = catalog.find("qq-emoji").unwrap();
    std::fs::create_dir_all(qq.default_path(catalog.roots())).unwrap();

    let detected = catalog.detect_sources(&BTreeMap::new());
    let source = detected.iter().find(|s| s.id == "qq-emoji").unwrap();
    assert!(source.exists);
    assert!(source.last_modified.is_some());
    assert!(!source.is_overridden);
}

#[rstest]
fn test_override_replaces_default_path(app_data: TempDir) {
    let elsewhere = tempfile::tempdir().unwrap();
    let mut overrides = BTreeMap::new();
    overrides.insert("discord-cache".to_string(), elsewhere.path().to_path_buf());

    let detected = catalog(&app_data).detect_sources(&overrides);
    let source = detected.iter().find(|s| s.id == "discord-cache").unwrap();
    assert!(source.exists);
    assert!(source.is_overridden);
    assert_eq!(source.path, elsewhere.path());
    assert_ne!(source.path, source.default_path);
}

// ============================================================================
// Full runs against the local library
// ============================================================================

struct Local {
    service: ScannerService,
    library: Arc<LocalLibrary>,
    _dirs: Vec<TempDir>,
}

#[fixture]
fn local() -> Local {
    let data = tempfile::tempdir().unwrap();
    let app_data = tempfile::tempdir().unwrap();
    let staging = tempfile::tempdir().unwrap();

    let settings = Arc::new(JsonFileSettingsStore::new(data.path().join("settings.json")));
    let library = Arc::new(LocalLibrary::open(data.path().join("library")).unwrap());
    let service = ScannerService::new(
        catalog(&app_data),
        settings,
        library.clone(),
        library.clone(),
        library.clone(),
    )
    .with_limits(ScanLimits::default().with_staging_parent(staging.path()));

    Local {
        service,
        library,
        _dirs: vec![data, app_data, staging],
    }
}

#[rstest]
fn test_scan_into_library(local: Local) {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "a.png", &png_bytes());
    write_file(dir.path(), "b.dat", &xored_png(0x42));

    let result = local
        .service
        .run_scan(&ScanRunOptions::new().with_path(dir.path()))
        .unwrap();

    assert_eq!(result.imported, 2);
    let assets = local.library.assets();
    // Both files decode to identical bytes, so the library keeps one asset
    assert_eq!(assets.len(), 1);
    assert!(assets[0].file.ends_with(".png"));
}

#[rstest]
fn test_second_scan_skips_known_assets(local: Local) {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "a.png", &png_bytes());
    let options = ScanRunOptions::new().with_path(dir.path()).skip_duplicates();

    let first = local.service.run_scan(&options).unwrap();
    assert_eq!(first.imported, 1);

    let second = local.service.run_scan(&options).unwrap();
    assert_eq!(second.imported, 0);
    assert_eq!(second.duplicates, 1);
    assert!(second.is_balanced());

    let staged_copy = dir.path().join("a.png");
    assert!(local.library.is_duplicate(&staged_copy).unwrap());
}

#[rstest]
fn test_mapped_category_is_created_in_library(local: Local) {
    let mut mapping = BTreeMap::new();
    mapping.insert(Platform::Custom, "found".to_string());
    local
        .service
        .save_config(ScannerConfigPatch {
            category_mapping: Some(mapping),
            auto_tag_platform: Some(true),
            ..Default::default()
        })
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "a.png", &png_bytes());
    local
        .service
        .run_scan(&ScanRunOptions::new().with_path(dir.path()))
        .unwrap();

    assert!(local.library.contains("found").unwrap());
    let asset = &local.library.assets()[0];
    assert_eq!(asset.category, "found");
    assert!(asset.tags.contains(&"custom".to_string()));
}

#[rstest]
fn test_service_detect_uses_saved_overrides(local: Local) {
    let elsewhere = tempfile::tempdir().unwrap();
    let mut overrides = BTreeMap::new();
    overrides.insert("edge-cache".to_string(), elsewhere.path().to_path_buf());
    local
        .service
        .save_config(ScannerConfigPatch {
            path_overrides: Some(overrides),
            ..Default::default()
        })
        .unwrap();

    let detected = local.service.detect_sources();
    let edge = detected.iter().find(|s| s.id == "edge-cache").unwrap();
    assert!(edge.exists);
    assert!(edge.is_overridden);
}
