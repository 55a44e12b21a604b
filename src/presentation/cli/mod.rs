//! CLI module

mod commands;
mod report;

pub use commands::{Cli, Commands, ConfigCommand, parse_assignment};
pub use report::{render_config, render_scan_result, render_sources};
