//! Data Transfer Objects

mod scan_options;
mod scanner_config;

pub use scan_options::{ScanLimits, ScanRunOptions};
pub use scanner_config::{SCANNER_CONFIG_KEY, ScannerConfig, ScannerConfigPatch};
