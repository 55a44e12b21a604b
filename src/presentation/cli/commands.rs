//! CLI commands using clap

use crate::application::dto::{ScanRunOptions, ScannerConfigPatch};
use crate::domain::entities::Platform;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Magpie - sticker cache scanner
///
/// Finds stickers and emoji cached by chat and browser applications,
/// recovers XOR-obfuscated cache files and imports them into a local
/// library.
#[derive(Parser)]
#[command(name = "magpie")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Import cached stickers and emoji into a local library", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Settings file (defaults to the per-user data directory)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Library directory (defaults to the per-user data directory)
    #[arg(long, global = true)]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the built-in cache locations and whether they exist
    Sources {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show or change the scanner configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Scan sources and import what is found
    Scan {
        /// Built-in source id to scan (repeatable)
        #[arg(short, long = "source")]
        sources: Vec<String>,

        /// Extra directory or file to scan (repeatable)
        #[arg(short, long = "path")]
        paths: Vec<PathBuf>,

        /// Skip files already present in the library
        #[arg(long)]
        skip_duplicates: bool,

        /// Tag imported assets with their platform (defaults to the configured value)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        tag_platform: Option<bool>,

        /// Import everything into this category
        #[arg(long)]
        category: Option<String>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the stored configuration as JSON
    Show,

    /// Merge the given values into the stored configuration
    Set {
        /// Replace the enabled source ids
        #[arg(long = "enable", value_delimiter = ',')]
        enabled_sources: Option<Vec<String>>,

        /// Replace the custom scan paths
        #[arg(long = "custom-path")]
        custom_paths: Option<Vec<PathBuf>>,

        #[arg(long)]
        auto_scan_on_launch: Option<bool>,

        /// Map a platform to a category, `platform=category` (empty category clears)
        #[arg(long = "map")]
        category_mapping: Vec<String>,

        /// Category for platforms without a mapping (empty clears)
        #[arg(long)]
        fallback_category: Option<String>,

        /// Override a source path, `id=path` (empty path clears)
        #[arg(long = "override")]
        path_overrides: Vec<String>,

        #[arg(long)]
        merge_into_default: Option<bool>,

        #[arg(long)]
        auto_tag_platform: Option<bool>,
    },
}

impl Commands {
    /// Builds run options for the `scan` command
    pub fn scan_options(&self) -> Option<ScanRunOptions> {
        let Commands::Scan {
            sources,
            paths,
            skip_duplicates,
            tag_platform,
            category,
            ..
        } = self
        else {
            return None;
        };

        Some(ScanRunOptions {
            selected_sources: sources.clone(),
            additional_paths: paths.clone(),
            skip_duplicates: *skip_duplicates,
            auto_tag_platform: *tag_platform,
            category_override: category.clone(),
        })
    }
}

impl ConfigCommand {
    /// Builds the settings patch for `config set`
    pub fn patch(&self) -> Result<Option<ScannerConfigPatch>, String> {
        let ConfigCommand::Set {
            enabled_sources,
            custom_paths,
            auto_scan_on_launch,
            category_mapping,
            fallback_category,
            path_overrides,
            merge_into_default,
            auto_tag_platform,
        } = self
        else {
            return Ok(None);
        };

        let mapping = category_mapping
            .iter()
            .map(|entry| {
                let (platform, category) = parse_assignment(entry)?;
                let platform = Platform::parse(&platform)
                    .ok_or_else(|| format!("unknown platform '{}'", platform))?;
                Ok((platform, category))
            })
            .collect::<Result<BTreeMap<_, _>, String>>()?;

        let overrides = path_overrides
            .iter()
            .map(|entry| parse_assignment(entry).map(|(id, path)| (id, PathBuf::from(path))))
            .collect::<Result<BTreeMap<_, _>, String>>()?;

        Ok(Some(ScannerConfigPatch {
            enabled_sources: enabled_sources.clone(),
            custom_paths: custom_paths.clone(),
            auto_scan_on_launch: *auto_scan_on_launch,
            category_mapping: (!mapping.is_empty()).then_some(mapping),
            fallback_category: fallback_category.clone(),
            path_overrides: (!overrides.is_empty()).then_some(overrides),
            merge_into_default: *merge_into_default,
            auto_tag_platform: *auto_tag_platform,
            last_scan_at: None,
        }))
    }
}

/// Splits `key=value`; the value may be empty
pub fn parse_assignment(entry: &str) -> Result<(String, String), String> {
    let (key, value) = entry
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", entry))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", entry));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
