//! Domain layer unit tests
//!
//! Tests for entities and their invariants.

use magpie::domain::entities::{
    FileStatus, FileType, IMAGE_SIGNATURES, JPEG_MAGIC, PNG_MAGIC, Platform, ScanRunResult,
    ScannerFileRecord, reason,
};
use rstest::*;
use std::path::{Path, PathBuf};

// ============================================================================
// FileType Tests
// ============================================================================

#[rstest]
#[case(FileType::Jpeg, "jpg")]
#[case(FileType::Png, "png")]
#[case(FileType::Gif, "gif")]
#[case(FileType::WebP, "webp")]
fn test_file_type_extension(#[case] file_type: FileType, #[case] expected: &str) {
    assert_eq!(file_type.extension(), expected);
}

// ============================================================================
// MagicSignature Tests
// ============================================================================

#[rstest]
fn test_plain_headers_match_their_signature() {
    let png = IMAGE_SIGNATURES[0];
    assert!(png.matches_header(PNG_MAGIC));
    assert!(!png.matches_header(JPEG_MAGIC));
    assert!(!png.matches_header(&PNG_MAGIC[..4]));
}

#[rstest]
fn test_png_is_tried_first() {
    assert_eq!(IMAGE_SIGNATURES[0].file_type(), FileType::Png);
    assert_eq!(IMAGE_SIGNATURES[0].required_len(), 8);
}

// ============================================================================
// Platform Tests
// ============================================================================

#[rstest]
#[case("wechat", Platform::WeChat)]
#[case("QQ", Platform::Qq)]
#[case(" telegram ", Platform::Telegram)]
#[case("custom", Platform::Custom)]
fn test_platform_parse(#[case] input: &str, #[case] expected: Platform) {
    assert_eq!(Platform::parse(input), Some(expected));
}

#[rstest]
fn test_platform_parse_unknown() {
    assert_eq!(Platform::parse("myspace"), None);
}

#[rstest]
fn test_platform_serializes_as_tag() {
    for platform in Platform::ALL {
        let json = serde_json::to_value(platform).unwrap();
        assert_eq!(json, serde_json::json!(platform.as_str()));
    }
}

// ============================================================================
// ScannerFileRecord Tests
// ============================================================================

#[fixture]
fn copied_record() -> ScannerFileRecord {
    ScannerFileRecord::copied(
        Path::new("/cache/a.png"),
        PathBuf::from("/staging/qq/1/a.png"),
        Platform::Qq,
    )
}

#[rstest]
fn test_copied_record(copied_record: ScannerFileRecord) {
    assert_eq!(copied_record.status(), FileStatus::Copied);
    assert!(copied_record.status().is_prepared());
    assert_eq!(copied_record.reason(), None);
    assert_eq!(copied_record.platform(), Some(Platform::Qq));
}

#[rstest]
fn test_duplicate_record_drops_staged_path(copied_record: ScannerFileRecord) {
    let duplicate = copied_record.into_duplicate();
    assert_eq!(duplicate.status(), FileStatus::Skipped);
    assert_eq!(duplicate.reason(), Some(reason::DUPLICATE));
    assert_eq!(duplicate.staged_path(), None);
    assert_eq!(duplicate.original_path(), Path::new("/cache/a.png"));
}

#[rstest]
fn test_record_json_shape(copied_record: ScannerFileRecord) {
    let json = serde_json::to_value(&copied_record).unwrap();
    assert_eq!(json["status"], "copied");
    assert_eq!(json["platform"], "qq");
    assert_eq!(json["originalPath"], "/cache/a.png");
}

// ============================================================================
// ScanRunResult Tests
// ============================================================================

#[rstest]
fn test_missing_path_keeps_result_balanced() {
    let mut result = ScanRunResult::new();
    result.add_missing_path(ScannerFileRecord::failed(
        Path::new("/gone"),
        reason::PATH_MISSING,
        None,
    ));

    assert_eq!(result.total_found, 1);
    assert_eq!(result.failed, 1);
    assert!(result.is_balanced());
    assert_eq!(result.count_status(FileStatus::Failed), 1);
}

#[rstest]
fn test_unbalanced_result_is_detected() {
    let result = ScanRunResult {
        total_found: 2,
        imported: 1,
        ..Default::default()
    };
    assert!(!result.is_balanced());
}

#[rstest]
fn test_summary_mentions_truncation() {
    let result = ScanRunResult {
        truncated: true,
        ..Default::default()
    };
    assert!(result.summary().contains("truncated"));
}
