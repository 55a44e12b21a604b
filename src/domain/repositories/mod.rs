//! Repository traits (interfaces)
//!
//! Contracts for the collaborators the scanner depends on but does not own.
//! They follow the Dependency Inversion Principle (DIP) from SOLID.

mod asset_importer;
mod category_store;
mod settings_store;

pub use asset_importer::{
    AssetImporter, DuplicateChecker, ImportError, ImportOptions, ImportSummary,
};
pub use category_store::{CategoryError, CategoryStore};
pub use settings_store::{SettingsError, SettingsStore};
