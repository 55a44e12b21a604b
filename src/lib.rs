//! Magpie recovers stickers and emoji that chat and browser applications
//! leave in their caches, including single-byte XOR obfuscated files, and
//! hands them to a library importer.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::{ScanError, ScannerService};
pub use domain::entities::{DetectedSource, FileStatus, Platform, ScanRunResult, ScannerFileRecord};
