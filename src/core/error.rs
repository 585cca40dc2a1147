use thiserror::Error;

/// Centralized error types for the application
///
/// Collaborator failures (spreadsheet, Telegram, verification API) and local
/// failures are all converted to this enum. Uses `thiserror` for automatic
/// conversion and display formatting.
///
/// # Example
///
/// ```no_run
/// use orderdesk::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Spreadsheet API answered with a non-success status
    #[error("Spreadsheet API error ({status}): {body}")]
    Sheets { status: reqwest::StatusCode, body: String },

    /// Service-account token exchange failed
    #[error("Google auth error: {0}")]
    Auth(String),

    /// Sheet header row no longer matches the expected column layout
    #[error("Sheet schema drift: {0}")]
    Schema(String),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Telegram file download errors
    #[error("Telegram download error: {0}")]
    TelegramDownload(#[from] teloxide::DownloadError),

    /// HTTP/Fetch errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Anyhow errors (for general error handling)
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Auth(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = AppError::Config("NANA_SHEET is not set".to_string());
        assert_eq!(err.to_string(), "Configuration error: NANA_SHEET is not set");
    }

    #[test]
    fn test_sheets_error_display() {
        let err = AppError::Sheets {
            status: reqwest::StatusCode::FORBIDDEN,
            body: "denied".to_string(),
        };
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
