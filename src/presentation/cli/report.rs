//! Terminal output for CLI commands

use crate::application::dto::ScannerConfig;
use crate::domain::entities::{DetectedSource, FileStatus, ScanRunResult};
use std::fmt::Write;

/// Renders detected sources as a fixed-width table
pub fn render_sources(sources: &[DetectedSource]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<18} {:<9} {:<6} {:<5} PATH", "ID", "PLATFORM", "FOUND", "REC");
    let _ = writeln!(out, "{}", "-".repeat(60));

    for source in sources {
        let found = if source.exists { "yes" } else { "no" };
        let recommended = if source.recommended { "*" } else { "" };
        let overridden = if source.is_overridden { " (override)" } else { "" };
        let _ = writeln!(
            out,
            "{:<18} {:<9} {:<6} {:<5} {}{}",
            source.id,
            source.platform,
            found,
            recommended,
            source.path.display(),
            overridden
        );
    }
    out
}

pub fn render_config(config: &ScannerConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(config)
}

/// Renders a scan result, either as the summary plus skipped/failed details
/// or as pretty JSON
pub fn render_scan_result(result: &ScanRunResult, json: bool) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string_pretty(result);
    }

    let mut out = result.summary();
    let problems: Vec<_> = result
        .records
        .iter()
        .filter(|record| !record.status().is_prepared())
        .collect();

    if !problems.is_empty() {
        let _ = writeln!(out);
        for record in problems {
            let marker = match record.status() {
                FileStatus::Failed => "!",
                _ => "-",
            };
            let _ = writeln!(
                out,
                "{} {} ({})",
                marker,
                record.original_path().display(),
                record.reason().unwrap_or_default()
            );
        }
    }
    Ok(out)
}
