use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::error::{AppError, AppResult};

/// Spreadsheet layout constants
pub mod sheet {
    /// Number of positional columns in the orders sheet
    pub const COLUMN_COUNT: usize = 19;

    /// Default sheet (tab) title holding every order line
    pub const DEFAULT_TITLE: &str = "รวมทั้งหมด";

    /// Fixed store timezone: Asia/Bangkok, UTC+07:00, no DST
    pub const TIMEZONE_OFFSET_SECS: i32 = 7 * 3600;

    /// Release date substituted for unset release dates when sorting
    pub const TBA_SENTINEL: (i32, u32, u32) = (2060, 1, 1);

    /// Label used for records without a release date
    pub const TBA_LABEL: &str = "TBA";
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Timeout for photo downloads and slip verification calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Slip verification configuration
pub mod slip {
    /// Default verification endpoint
    pub const DEFAULT_VERIFY_URL: &str = "https://developer.easyslip.com/api/v1/verify";

    /// Default directory for slips that could not be decoded
    pub const DEFAULT_DIR: &str = "slips";
}

/// Google service-account configuration
pub mod google {
    pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
    pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";
    pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
}

/// Process-wide configuration
///
/// Loaded once at startup by [`AppConfig::from_env`] and shared behind an `Arc`.
/// Never re-read per request.
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub log_file_path: String,
    pub sheet: SheetConfig,
    pub admin_password: String,
    pub bot_token: String,
    pub slip: SlipConfig,
}

#[derive(Clone)]
pub struct SheetConfig {
    pub spreadsheet_id: String,
    pub title: String,
    pub client_email: String,
    pub private_key: String,
    /// Expected header labels; empty disables header validation
    pub expected_headers: Vec<String>,
    pub api_url: String,
    pub token_url: String,
}

#[derive(Clone)]
pub struct SlipConfig {
    pub verify_url: String,
    pub token: String,
    pub storage_dir: PathBuf,
}

// Secrets stay out of debug output.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("log_file_path", &self.log_file_path)
            .field("spreadsheet_id", &self.sheet.spreadsheet_id)
            .field("sheet_title", &self.sheet.title)
            .field("client_email", &self.sheet.client_email)
            .field("expected_headers", &self.sheet.expected_headers.len())
            .field("verify_url", &self.slip.verify_url)
            .field("slip_dir", &self.slip.storage_dir)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    /// Builds the configuration from environment variables.
    ///
    /// Fails with [`AppError::Config`] naming the first missing required variable.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| optional(key).ok_or_else(|| AppError::Config(format!("{} is not set", key)));

        let port = match optional("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("PORT is invalid ({}): {}", raw, e)))?,
            None => 3000,
        };

        let sheet = SheetConfig {
            spreadsheet_id: required("NANA_SHEET")?,
            title: optional("SHEET_TITLE").unwrap_or_else(|| sheet::DEFAULT_TITLE.to_string()),
            client_email: required("CLIENT_EMAIL")?,
            private_key: unescape_private_key(&required("PRIVATE_KEY")?),
            expected_headers: optional("SHEET_HEADERS")
                .map(|raw| parse_headers(&raw))
                .unwrap_or_default(),
            api_url: google::SHEETS_API_URL.to_string(),
            token_url: google::TOKEN_URL.to_string(),
        };

        let bot_token = optional("TELEGRAM_BOT_TOKEN")
            .or_else(|| optional("BOT_TOKEN"))
            .ok_or_else(|| AppError::Config("TELEGRAM_BOT_TOKEN is not set".to_string()))?;

        let slip = SlipConfig {
            verify_url: optional("EASY_SLIP_URL").unwrap_or_else(|| slip::DEFAULT_VERIFY_URL.to_string()),
            token: required("EASY_SLIP_TOKEN")?,
            storage_dir: PathBuf::from(optional("SLIP_DIR").unwrap_or_else(|| slip::DEFAULT_DIR.to_string())),
        };

        Ok(Self {
            port,
            log_file_path: optional("LOG_FILE_PATH").unwrap_or_else(|| "app.log".to_string()),
            sheet,
            admin_password: required("NANA_PASSWORD")?,
            bot_token,
            slip,
        })
    }
}

/// Service-account keys pasted into `.env` files carry literal `\n` sequences.
fn unescape_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

fn parse_headers(raw: &str) -> Vec<String> {
    raw.split(',').map(|label| label.trim().to_string()).collect()
}
