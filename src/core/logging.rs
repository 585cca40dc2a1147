//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - Configuration summary at startup (secrets never printed)

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config::AppConfig;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to initialize logger
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at application startup
pub fn log_configuration(config: &AppConfig) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("⚙️  Configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Port:            {}", config.port);
    log::info!("Sheet:           {} / {}", config.sheet.spreadsheet_id, config.sheet.title);
    log::info!("Service account: {}", config.sheet.client_email);
    log::info!("Slip verifier:   {}", config.slip.verify_url);
    log::info!("Slip storage:    {}", config.slip.storage_dir.display());

    if config.sheet.expected_headers.is_empty() {
        log::warn!("⚠️  SHEET_HEADERS not set, sheet layout will not be validated");
    } else {
        log::info!("Header check:    {} columns", config.sheet.expected_headers.len());
    }
}
