//! Local sticker library
//!
//! A content-addressed directory that plays the permanent collection for the
//! command-line tool: it stores categories, answers duplicate checks by
//! SHA-256, and commits staged files.
//!
//! ```text
//! <root>/index.json
//! <root>/files/<sha256>.<ext>
//! ```

use crate::domain::entities::{Category, DEFAULT_CATEGORY_ID};
use crate::domain::repositories::{
    AssetImporter, CategoryError, CategoryStore, DuplicateChecker, ImportError, ImportOptions,
    ImportSummary,
};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const INDEX_FILE: &str = "index.json";
const FILES_DIR: &str = "files";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryAsset {
    pub hash: String,
    pub file: String,
    pub category: String,
    pub tags: Vec<String>,
    pub imported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LibraryIndex {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    assets: Vec<LibraryAsset>,
}

impl LibraryIndex {
    fn find_hash(&self, hash: &str) -> Option<usize> {
        self.assets.iter().position(|asset| asset.hash == hash)
    }
}

#[derive(Debug)]
pub struct LocalLibrary {
    root: PathBuf,
    index: Mutex<LibraryIndex>,
}

impl LocalLibrary {
    /// Opens (or creates) a library rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ImportError> {
        let root = root.into();
        fs::create_dir_all(root.join(FILES_DIR))?;

        let index = match fs::read_to_string(root.join(INDEX_FILE)) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                ImportError::Other(format!("corrupt library index: {}", e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => LibraryIndex {
                categories: vec![Category::new(DEFAULT_CATEGORY_ID, "默认", "#8E8E93")],
                assets: Vec::new(),
            },
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            root,
            index: Mutex::new(index),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns a snapshot of every stored asset
    pub fn assets(&self) -> Vec<LibraryAsset> {
        self.index.lock().assets.clone()
    }

    fn save_index(&self, index: &LibraryIndex) -> std::io::Result<()> {
        let raw = serde_json::to_string_pretty(index)?;
        let tmp = self.root.join(format!("{}.tmp", INDEX_FILE));
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, self.root.join(INDEX_FILE))
    }

    fn import_one(
        &self,
        index: &mut LibraryIndex,
        path: &Path,
        options: &ImportOptions,
    ) -> Result<bool, ImportError> {
        let data = fs::read(path)?;
        let hash = hash_bytes(&data);
        let tags = asset_tags(path, options);

        if let Some(position) = index.find_hash(&hash) {
            if options.skip_duplicates {
                tracing::debug!(path = %path.display(), "already in library");
                return Ok(false);
            }
            // Known content keeps its category; only new tags are added
            let asset = &mut index.assets[position];
            for tag in tags {
                if !asset.tags.contains(&tag) {
                    asset.tags.push(tag);
                }
            }
            return Ok(true);
        }

        let file = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => format!("{}.{}", hash, ext.to_ascii_lowercase()),
            None => hash.clone(),
        };
        fs::write(self.root.join(FILES_DIR).join(&file), &data)?;
        index.assets.push(LibraryAsset {
            hash,
            file,
            category: options.target_category.clone(),
            tags,
            imported_at: Utc::now(),
        });
        Ok(true)
    }
}

impl CategoryStore for LocalLibrary {
    fn list(&self) -> Result<Vec<Category>, CategoryError> {
        Ok(self.index.lock().categories.clone())
    }

    fn create(&self, category: &Category) -> Result<(), CategoryError> {
        let mut index = self.index.lock();
        if index.categories.iter().any(|existing| existing.id == category.id) {
            return Err(CategoryError::AlreadyExists(category.id.clone()));
        }
        index.categories.push(category.clone());
        self.save_index(&index)?;
        Ok(())
    }
}

impl DuplicateChecker for LocalLibrary {
    fn is_duplicate(&self, staged_path: &Path) -> Result<bool, ImportError> {
        let hash = hash_bytes(&fs::read(staged_path)?);
        Ok(self.index.lock().find_hash(&hash).is_some())
    }
}

impl AssetImporter for LocalLibrary {
    fn import_prepared(
        &self,
        paths: &[PathBuf],
        options: &ImportOptions,
    ) -> Result<ImportSummary, ImportError> {
        let mut index = self.index.lock();
        if !index
            .categories
            .iter()
            .any(|category| category.id == options.target_category)
        {
            return Err(ImportError::CategoryNotFound(options.target_category.clone()));
        }

        let mut summary = ImportSummary::default();
        for path in paths {
            match self.import_one(&mut index, path, options) {
                Ok(true) => summary.success += 1,
                Ok(false) => summary.failed += 1,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to import asset");
                    summary.failed += 1;
                }
            }
        }

        self.save_index(&index)?;
        Ok(summary)
    }
}

fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn asset_tags(path: &Path, options: &ImportOptions) -> Vec<String> {
    let mut tags = Vec::new();
    if options.auto_generate_tags {
        if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
            tags.push(ext.to_ascii_lowercase());
        }
    }
    for tag in &options.extra_tags {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_new_library_has_default_category() {
        let dir = tempfile::tempdir().unwrap();
        let library = LocalLibrary::open(dir.path()).unwrap();
        assert!(library.contains(DEFAULT_CATEGORY_ID).unwrap());
    }

    #[test]
    fn test_import_then_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        let library = LocalLibrary::open(dir.path()).unwrap();
        let path = staged(staging.path(), "a.png", b"png-bytes");

        assert!(!library.is_duplicate(&path).unwrap());
        let summary = library
            .import_prepared(
                &[path.clone()],
                &ImportOptions::new(DEFAULT_CATEGORY_ID).with_tags(vec!["qq".into()]),
            )
            .unwrap();

        assert_eq!(summary, ImportSummary { success: 1, failed: 0 });
        assert!(library.is_duplicate(&path).unwrap());
        assert_eq!(library.assets()[0].tags, vec!["png".to_string(), "qq".to_string()]);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let library = LocalLibrary::open(dir.path()).unwrap();
        let result = library.import_prepared(&[], &ImportOptions::new("nope"));
        assert!(matches!(result, Err(ImportError::CategoryNotFound(_))));
    }

    #[test]
    fn test_index_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let library = LocalLibrary::open(dir.path()).unwrap();
            library
                .create(&Category::new("wechat", "微信", "#07C160"))
                .unwrap();
        }
        let library = LocalLibrary::open(dir.path()).unwrap();
        assert!(library.contains("wechat").unwrap());
    }

    #[test]
    fn test_reimport_keeps_existing_category() {
        let dir = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        let library = LocalLibrary::open(dir.path()).unwrap();
        library
            .create(&Category::new("memes", "Memes", "#FF9500"))
            .unwrap();
        let path = staged(staging.path(), "a.png", b"png-bytes");

        library
            .import_prepared(&[path.clone()], &ImportOptions::new(DEFAULT_CATEGORY_ID))
            .unwrap();
        let summary = library
            .import_prepared(
                &[path],
                &ImportOptions::new("memes").with_tags(vec!["telegram".into()]),
            )
            .unwrap();

        assert_eq!(summary.success, 1);
        let assets = library.assets();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].category, DEFAULT_CATEGORY_ID);
        assert!(assets[0].tags.contains(&"telegram".to_string()));
    }
}
