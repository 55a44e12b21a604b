//! Staging area
//!
//! One temporary directory tree per scan run. Every staged asset gets its own
//! randomly named subdirectory so identical basenames from different sources
//! never collide. The tree is removed by [`StagingArea::teardown`] or, on any
//! other exit path, when the area is dropped.

use crate::domain::entities::Platform;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

const STAGING_PREFIX: &str = "magpie-staging-";

#[derive(Debug)]
pub struct StagingArea {
    root: TempDir,
}

impl StagingArea {
    /// Creates the staging root under `parent`, or the OS temp dir
    pub fn create(parent: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX);
        let root = match parent {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                builder.tempdir_in(parent)?
            }
            None => builder.tempdir()?,
        };
        tracing::debug!(root = %root.path().display(), "staging root created");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Creates a fresh, uniquely named subdirectory for one asset
    pub fn allocate(&self, platform: Platform) -> io::Result<PathBuf> {
        let dir = self
            .root
            .path()
            .join(platform.as_str())
            .join(Uuid::new_v4().simple().to_string());
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Removes the whole tree. Errors are logged and swallowed so they never
    /// mask the outcome of the run.
    pub fn teardown(self) {
        let root = self.root.path().to_path_buf();
        match self.root.close() {
            Ok(()) => tracing::debug!(root = %root.display(), "staging root removed"),
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "failed to remove staging root")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocations_are_distinct() {
        let parent = tempfile::tempdir().unwrap();
        let staging = StagingArea::create(Some(parent.path())).unwrap();

        let first = staging.allocate(Platform::WeChat).unwrap();
        let second = staging.allocate(Platform::WeChat).unwrap();

        assert_ne!(first, second);
        assert!(first.is_dir());
        assert!(first.starts_with(staging.root()));
    }

    #[test]
    fn test_teardown_removes_tree() {
        let parent = tempfile::tempdir().unwrap();
        let staging = StagingArea::create(Some(parent.path())).unwrap();
        let dir = staging.allocate(Platform::Qq).unwrap();
        fs::write(dir.join("a.png"), b"x").unwrap();
        let root = staging.root().to_path_buf();

        staging.teardown();

        assert!(!root.exists());
    }

    #[test]
    fn test_drop_removes_tree() {
        let parent = tempfile::tempdir().unwrap();
        let root = {
            let staging = StagingArea::create(Some(parent.path())).unwrap();
            staging.allocate(Platform::Custom).unwrap();
            staging.root().to_path_buf()
        };
        assert!(!root.exists());
    }
}
