//! Infrastructure layer
//!
//! Concrete implementations of the domain repositories, plus the
//! platform-specific code the scanner needs at run time.

pub mod library;
pub mod persistence;
pub mod platform_dirs;
pub mod staging;
