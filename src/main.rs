use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;

use orderdesk::cli::{Cli, Commands};
use orderdesk::core::{init_logger, log_configuration, AppConfig};
use orderdesk::slip::{EasySlipClient, SlipChecker};
use orderdesk::storage::{verify_sheet_layout, GoogleSheetsClient, SheetStore};
use orderdesk::telegram::TelegramMessenger;
use orderdesk::web::{run_server, AppState};

/// Main entry point
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (configuration, logging, clients, bind).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics through the logger instead of only stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Load environment variables from .env if present
    let _ = dotenv();

    let config = AppConfig::from_env()?;
    init_logger(&config.log_file_path)?;

    match cli.command {
        Some(Commands::Run { port }) => run(config, port).await,
        Some(Commands::Search { account }) => run_search(config, &account).await,
        Some(Commands::CheckSheet) => run_check_sheet(config).await,
        None => {
            log::info!("No command specified, running server");
            run(config, None).await
        }
    }
}

/// Build collaborators from the configuration and serve HTTP
async fn run(config: AppConfig, port_override: Option<u16>) -> Result<()> {
    log_configuration(&config);
    let store: Arc<dyn SheetStore> = Arc::new(GoogleSheetsClient::new(config.sheet.clone())?);

    if !config.sheet.expected_headers.is_empty() {
        let rows = verify_sheet_layout(store.as_ref(), &config.sheet.title, &config.sheet.expected_headers).await?;
        log::info!("✅ Sheet layout verified ({} data rows)", rows);
    }

    let messenger = Arc::new(TelegramMessenger::new(&config.bot_token)?);
    let verifier = Arc::new(EasySlipClient::new(config.slip.clone())?);
    let slip_checker = Arc::new(SlipChecker::new(messenger, verifier, config.slip.storage_dir.clone()));

    let state = AppState {
        store,
        sheet_title: Arc::from(config.sheet.title.as_str()),
        admin_password: Arc::from(config.admin_password.as_str()),
        slip_checker,
    };

    run_server(port_override.unwrap_or(config.port), state).await
}

/// Print grouped orders for one account
async fn run_search(config: AppConfig, account: &str) -> Result<()> {
    let store = GoogleSheetsClient::new(config.sheet.clone())?;
    let groups = orderdesk::search_grouped(&store, &config.sheet.title, account).await?;
    println!("{}", serde_json::to_string_pretty(&groups)?);
    Ok(())
}

/// Validate the sheet header row
async fn run_check_sheet(config: AppConfig) -> Result<()> {
    if config.sheet.expected_headers.is_empty() {
        return Err(anyhow::anyhow!("SHEET_HEADERS is not set, nothing to check against"));
    }

    let store = GoogleSheetsClient::new(config.sheet.clone())?;
    let rows = verify_sheet_layout(&store, &config.sheet.title, &config.sheet.expected_headers).await?;
    println!("✅ Sheet '{}' matches the expected layout ({} data rows)", config.sheet.title, rows);
    Ok(())
}
