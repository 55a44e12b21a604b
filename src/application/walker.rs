//! Directory walker
//!
//! Visits one source root with an explicit work stack, classifies every file
//! it finds, stages the usable ones and appends exactly one record per
//! visited file.

use crate::application::dto::ScanLimits;
use crate::domain::entities::{FileStatus, Platform, PreparedAsset, ScannerFileRecord, reason};
use crate::domain::repositories::DuplicateChecker;
use crate::domain::services::XorSignatureCodec;
use crate::infrastructure::staging::StagingArea;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions copied into staging as they are
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Cache suffixes that may hide an obfuscated image
pub const SPECIAL_EXTENSIONS: [&str; 4] = ["dat", "cache", "tmp", "bin"];

/// How a file is handled, decided from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Image,
    Special,
    Unsupported,
}

pub fn classify(path: &Path) -> FileClass {
    let Some(ext) = path.extension() else {
        return FileClass::Special;
    };
    let ext = ext.to_string_lossy().to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        FileClass::Image
    } else if ext.is_empty() || SPECIAL_EXTENSIONS.contains(&ext.as_str()) {
        FileClass::Special
    } else {
        FileClass::Unsupported
    }
}

/// Counters and staged assets produced by one walk
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub prepared: Vec<PreparedAsset>,
    pub total: usize,
    pub duplicates: usize,
    pub skipped: usize,
    pub failed: usize,
    /// The visit ceiling stopped the walk early
    pub truncated: bool,
}

impl WalkOutcome {
    fn push(&mut self, records: &mut Vec<ScannerFileRecord>, record: ScannerFileRecord) {
        self.total += 1;
        match record.status() {
            FileStatus::Skipped => self.skipped += 1,
            FileStatus::Failed => self.failed += 1,
            _ => {}
        }
        records.push(record);
    }
}

/// Walks source roots for one scan run
pub struct DirectoryWalker<'a> {
    codec: &'a XorSignatureCodec,
    staging: &'a StagingArea,
    limits: &'a ScanLimits,
    /// Consulted only when duplicate suppression was requested
    duplicates: Option<&'a dyn DuplicateChecker>,
}

impl<'a> DirectoryWalker<'a> {
    pub fn new(
        codec: &'a XorSignatureCodec,
        staging: &'a StagingArea,
        limits: &'a ScanLimits,
        duplicates: Option<&'a dyn DuplicateChecker>,
    ) -> Self {
        Self {
            codec,
            staging,
            limits,
            duplicates,
        }
    }

    /// Walks `root` (a directory or a single file) and appends one record
    /// per visited file to `records`
    pub fn walk(
        &self,
        root: &Path,
        platform: Platform,
        records: &mut Vec<ScannerFileRecord>,
    ) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();
        let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];
        let mut seen_dirs: HashSet<PathBuf> = HashSet::new();
        let mut visited = 0usize;

        while let Some(path) = stack.pop() {
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "cannot stat path");
                    if !self.take_visit(&mut visited, &mut outcome) {
                        break;
                    }
                    let record =
                        ScannerFileRecord::failed(&path, reason::PATH_UNREADABLE, Some(platform));
                    outcome.push(records, record);
                    continue;
                }
            };

            if metadata.is_dir() {
                let canonical = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
                if !seen_dirs.insert(canonical) {
                    continue;
                }
                match fs::read_dir(&path) {
                    Ok(entries) => {
                        let mut children: Vec<PathBuf> =
                            entries.flatten().map(|entry| entry.path()).collect();
                        // Pop order follows name order
                        children.sort_unstable_by(|a, b| b.cmp(a));
                        stack.extend(children);
                    }
                    Err(e) => {
                        tracing::debug!(path = %path.display(), error = %e, "cannot read directory");
                        if !self.take_visit(&mut visited, &mut outcome) {
                            break;
                        }
                        let record = ScannerFileRecord::failed(
                            &path,
                            reason::DIRECTORY_INACCESSIBLE,
                            Some(platform),
                        );
                        outcome.push(records, record);
                    }
                }
                continue;
            }

            if !self.take_visit(&mut visited, &mut outcome) {
                break;
            }
            let record = self.visit_file(&path, metadata.len(), platform);
            self.settle(record, platform, records, &mut outcome);
        }

        if outcome.truncated {
            tracing::warn!(
                root = %root.display(),
                limit = self.limits.max_files_per_source,
                "visit limit reached, remaining files not scanned"
            );
        }

        outcome
    }

    fn take_visit(&self, visited: &mut usize, outcome: &mut WalkOutcome) -> bool {
        if *visited >= self.limits.max_files_per_source {
            outcome.truncated = true;
            return false;
        }
        *visited += 1;
        true
    }

    /// Produces the record for one regular file
    fn visit_file(&self, path: &Path, size: u64, platform: Platform) -> ScannerFileRecord {
        if size < self.limits.min_file_bytes.max(1) || size > self.limits.max_file_bytes {
            return ScannerFileRecord::skipped(path, reason::SIZE_MISMATCH, Some(platform));
        }

        match classify(path) {
            FileClass::Image => self.copy_image(path, platform),
            FileClass::Special => self.decode_cache(path, size, platform),
            FileClass::Unsupported => {
                ScannerFileRecord::skipped(path, reason::UNSUPPORTED_TYPE, Some(platform))
            }
        }
    }

    fn copy_image(&self, path: &Path, platform: Platform) -> ScannerFileRecord {
        let Some(file_name) = path.file_name() else {
            return ScannerFileRecord::failed(path, reason::COPY_FAILED, Some(platform));
        };
        let staged = self
            .staging
            .allocate(platform)
            .map(|dir| dir.join(file_name))
            .and_then(|target| fs::copy(path, &target).map(|_| target));

        match staged {
            Ok(target) => {
                tracing::debug!(path = %path.display(), "copied");
                ScannerFileRecord::copied(path, target, platform)
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "copy failed");
                ScannerFileRecord::failed(path, reason::COPY_FAILED, Some(platform))
            }
        }
    }

    fn decode_cache(&self, path: &Path, size: u64, platform: Platform) -> ScannerFileRecord {
        if size > self.codec.max_probe_bytes() as u64 {
            return ScannerFileRecord::skipped(path, reason::UNRECOGNIZED_CACHE, Some(platform));
        }
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "read failed");
                return ScannerFileRecord::failed(path, reason::PATH_UNREADABLE, Some(platform));
            }
        };
        let Some(decoded) = self.codec.recover(&data) else {
            return ScannerFileRecord::skipped(path, reason::UNRECOGNIZED_CACHE, Some(platform));
        };

        let file_name = decoded_file_name(path, &decoded.data, decoded.extension());
        let staged = self
            .staging
            .allocate(platform)
            .map(|dir| dir.join(&file_name))
            .and_then(|target| fs::write(&target, &decoded.data).map(|_| target));

        match staged {
            Ok(target) => {
                tracing::debug!(
                    path = %path.display(),
                    key = decoded.key,
                    format = %decoded.file_type,
                    "decoded cache file"
                );
                ScannerFileRecord::decoded(path, target, platform)
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "write failed");
                ScannerFileRecord::failed(path, reason::WRITE_FAILED, Some(platform))
            }
        }
    }

    /// Applies duplicate suppression and files the record
    fn settle(
        &self,
        record: ScannerFileRecord,
        platform: Platform,
        records: &mut Vec<ScannerFileRecord>,
        outcome: &mut WalkOutcome,
    ) {
        let Some(staged) = record.staged_path().map(Path::to_path_buf) else {
            outcome.push(records, record);
            return;
        };

        if let Some(checker) = self.duplicates {
            let duplicate = checker.is_duplicate(&staged).unwrap_or_else(|e| {
                tracing::warn!(path = %staged.display(), error = %e, "duplicate check failed");
                false
            });
            if duplicate {
                outcome.duplicates += 1;
                outcome.push(records, record.into_duplicate());
                return;
            }
        }

        outcome.prepared.push(PreparedAsset {
            platform,
            original_path: record.original_path().to_path_buf(),
            staged_path: staged,
            record: record.clone(),
        });
        outcome.push(records, record);
    }
}

/// Name for a recovered cache file: the original stem with the recovered
/// extension, or a content hash when there is no usable stem
pub fn decoded_file_name(original: &Path, data: &[u8], extension: &str) -> String {
    let stem = original
        .file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .filter(|stem| !stem.is_empty() && !stem.starts_with('.'));

    match stem {
        Some(stem) => format!("{}.{}", stem, extension),
        None => {
            let digest = hex::encode(Sha256::digest(data));
            format!("{}.{}", &digest[..16], extension)
        }
    }
}
