use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use magpie::application::ScannerService;
use magpie::domain::services::SourceCatalog;
use magpie::infrastructure::library::LocalLibrary;
use magpie::infrastructure::persistence::JsonFileSettingsStore;
use magpie::infrastructure::platform_dirs::{detect_app_data_roots, magpie_data_dir};
use magpie::presentation::cli::{
    Cli, Commands, ConfigCommand, render_config, render_scan_result, render_sources,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    let service = build_service(cli.settings.clone(), cli.library.clone())?;

    match &cli.command {
        Commands::Sources { json } => {
            let sources = service.detect_sources();
            if *json {
                println!("{}", serde_json::to_string_pretty(&sources)?);
            } else {
                print!("{}", render_sources(&sources));
            }
        }
        Commands::Config { command } => match command {
            ConfigCommand::Show => {
                let config = service
                    .get_config()
                    .context("Failed to read scanner settings")?;
                println!("{}", render_config(&config)?);
            }
            ConfigCommand::Set { .. } => {
                let patch = command
                    .patch()
                    .map_err(|e| anyhow!(e))?
                    .context("Nothing to update")?;
                let config = service
                    .save_config(patch)
                    .context("Failed to save scanner settings")?;
                println!("{}", render_config(&config)?);
            }
        },
        Commands::Scan { json, .. } => {
            let mut options = cli
                .command
                .scan_options()
                .context("Invalid scan options")?;
            if options.selected_sources.is_empty() && options.additional_paths.is_empty() {
                let config = service
                    .get_config()
                    .context("Failed to read scanner settings")?;
                options.selected_sources = config.enabled_sources;
            }

            let result = service.run_scan(&options).context("Scan failed")?;
            print!("{}", render_scan_result(&result, *json)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("magpie=debug")
    } else if verbose {
        EnvFilter::new("magpie=info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_service(settings: Option<PathBuf>, library: Option<PathBuf>) -> Result<ScannerService> {
    let data_dir = magpie_data_dir();
    let settings_path = settings.unwrap_or_else(|| data_dir.join("settings.json"));
    let library_path = library.unwrap_or_else(|| data_dir.join("library"));

    let settings = Arc::new(JsonFileSettingsStore::new(settings_path));
    let library = Arc::new(
        LocalLibrary::open(&library_path)
            .with_context(|| format!("Failed to open library at {:?}", library_path))?,
    );

    Ok(ScannerService::new(
        SourceCatalog::new(detect_app_data_roots()),
        settings,
        library.clone(),
        library.clone(),
        library,
    ))
}
