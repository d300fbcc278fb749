//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Directory name used under the platform data/config directories.
pub const APP_DIR_NAME: &str = "browsersync-launcher";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/browsersync-launcher/logs/`
/// Log level is controlled by `BSLAUNCH_LOG` environment variable.
///
/// # Examples
/// ```bash
/// BSLAUNCH_LOG=debug cargo run
/// BSLAUNCH_LOG=bslaunch_server=trace cargo run
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "bslaunch.log");

    // Default to info for our crates, allow override via BSLAUNCH_LOG
    let env_filter = EnvFilter::try_from_env("BSLAUNCH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(
            "browsersync_launcher=info,bslaunch_app=info,bslaunch_server=info,bslaunch_tui=info,warn",
        )
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("Browsersync Launcher starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR_NAME).join("logs")
}

/// Get the log file path for the current day
pub fn get_current_log_file() -> PathBuf {
    get_log_directory().join("bslaunch.log")
}
