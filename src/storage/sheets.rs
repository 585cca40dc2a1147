//! Spreadsheet collaborator.
//!
//! [`SheetStore`] is the narrow contract the order pipeline depends on.
//! [`GoogleSheetsClient`] implements it over the Sheets v4 REST API with a
//! service-account JWT-bearer token.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::core::config::{google, SheetConfig};
use crate::core::error::{AppError, AppResult};

/// One row as read from the sheet. Trailing empty cells are absent.
pub type RawRow = Vec<String>;

/// One row to append. Cells keep their JSON type (`RAW` input option).
pub type SheetRow = Vec<Value>;

#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Reads every row of the sheet titled `title`, header included.
    async fn read_range(&self, title: &str) -> AppResult<Vec<RawRow>>;

    /// Appends `rows` after the last row of `title` in one call.
    async fn append_rows(&self, title: &str, rows: Vec<SheetRow>) -> AppResult<()>;
}

/// Refresh the access token this long before Google says it expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);
const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Serialize)]
struct AppendBody<'a> {
    values: &'a [SheetRow],
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

pub struct GoogleSheetsClient {
    http: reqwest::Client,
    config: SheetConfig,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleSheetsClient {
    pub fn new(config: SheetConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(crate::core::config::network::timeout())
            .build()?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: reqwest::Client, config: SheetConfig) -> Self {
        Self {
            http,
            config,
            token: Mutex::new(None),
        }
    }

    /// Returns a cached access token or exchanges a fresh JWT assertion.
    async fn access_token(&self) -> AppResult<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let assertion = self.sign_assertion()?;
        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Auth(format!("token endpoint returned {}: {}", status, body)));
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        log::debug!("Obtained Sheets access token valid for {}s", token.expires_in);

        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }

    fn sign_assertion(&self) -> AppResult<String> {
        use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &self.config.client_email,
            scope: google::SHEETS_SCOPE,
            aud: &self.config.token_url,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.config.private_key.as_bytes())?;
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
    }

    fn values_url(&self, title: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.spreadsheet_id,
            urlencoding::encode(title)
        )
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsClient {
    async fn read_range(&self, title: &str) -> AppResult<Vec<RawRow>> {
        let token = self.access_token().await?;
        let response = self.http.get(self.values_url(title)).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Sheets { status, body });
        }

        let range: ValueRange = response.json().await?;
        log::debug!("Read {} rows from sheet '{}'", range.values.len(), title);

        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn append_rows(&self, title: &str, rows: Vec<SheetRow>) -> AppResult<()> {
        let token = self.access_token().await?;
        let url = format!("{}:append", self.values_url(title));
        let response = self
            .http
            .post(url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(token)
            .json(&AppendBody { values: &rows })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Sheets { status, body });
        }

        log::info!("Appended {} rows to sheet '{}'", rows.len(), title);
        Ok(())
    }
}

/// Formatted values arrive as strings; anything else is stringified.
fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
