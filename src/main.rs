//! Browsersync Launcher - a terminal control panel for Browsersync
//!
//! This is the binary entry point. All logic lives in the library crates.

use std::path::PathBuf;

use clap::Parser;

use bslaunch_app::config::{
    default_config_dir, default_config_path, init_config_dir, load_settings, SettingsOverrides,
};
use bslaunch_app::Engine;
use bslaunch_core::prelude::*;

/// Browsersync Launcher - start, stop and configure a Browsersync server
#[derive(Parser, Debug)]
#[command(name = "bslaunch")]
#[command(about = "A terminal control panel for Browsersync", long_about = None)]
struct Args {
    /// Launcher id; last-used settings are remembered per id
    #[arg(long)]
    id: Option<String>,

    /// Settings file (default: <config dir>/browsersync-launcher/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// License file shown by the license viewer
    #[arg(long, value_name = "PATH")]
    license: Option<PathBuf>,

    /// Browsersync executable name or path
    #[arg(long, value_name = "COMMAND")]
    engine: Option<String>,

    /// Run in headless mode (NDJSON events on stdout, commands on stdin)
    #[arg(long)]
    headless: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Logs go to a file, the TUI owns stdout
    bslaunch_core::logging::init()?;

    let config_path = match args.config {
        Some(path) => path,
        None => {
            if let Err(e) = init_config_dir(&default_config_dir()) {
                warn!("Could not create the config directory: {}", e);
            }
            default_config_path()
        }
    };
    info!("Settings file: {}", config_path.display());

    let settings = load_settings(&config_path).with_overrides(SettingsOverrides {
        id: args.id,
        license_path: args.license,
        engine_command: args.engine,
    });

    let bindings = if args.headless {
        browsersync_launcher::headless::ui_bindings()
    } else {
        bslaunch_tui::ui_bindings()
    };

    let engine = match Engine::new(settings, &bindings) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Launcher construction failed: {}", e);
            if args.headless {
                browsersync_launcher::headless::HeadlessEvent::error(e.to_string(), true).emit();
            } else {
                eprintln!("❌ {}", e);
            }
            std::process::exit(1);
        }
    };

    let result = if args.headless {
        browsersync_launcher::run_headless(engine).await
    } else {
        bslaunch_tui::run(engine).await
    };

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("Browsersync Launcher exiting");
    result
}
