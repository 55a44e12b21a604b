//! Application layer
//!
//! Use cases and application services that orchestrate domain logic.

pub mod dto;
mod error;
mod run_scan;
mod scanner_service;
mod scanner_settings;
mod walker;

pub use error::ScanError;
pub use run_scan::{RunScanUseCase, ScanPhase, WorkingSource, resolve_category};
pub use scanner_service::ScannerService;
pub use scanner_settings::ScannerSettings;
pub use walker::{
    DirectoryWalker, FileClass, IMAGE_EXTENSIONS, SPECIAL_EXTENSIONS, WalkOutcome, classify,
    decoded_file_name,
};
