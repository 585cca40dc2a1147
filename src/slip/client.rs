//! Slip verification API client (EasySlip-compatible).
//!
//! The API answers with a JSON envelope `{status, data, message}` whose
//! `status` mirrors the HTTP status, so non-2xx responses still carry a
//! usable body.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use crate::core::config::{network, SlipConfig};
use crate::core::error::{AppError, AppResult};

/// Verified transfer details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlipDetails {
    pub trans_ref: String,
    pub date: String,
    pub amount: String,
    pub sender_name: String,
    pub receiver_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlipOutcome {
    /// status 200
    Verified(SlipDetails),
    /// status 404: the bank has no such transfer
    NotFound { message: String },
    /// Any other status; `message` is relayed as-is
    Other { status: u16, message: String },
}

#[async_trait]
pub trait VerificationApi: Send + Sync {
    /// Verifies a decoded QR payload.
    async fn verify_payload(&self, payload: &str) -> AppResult<SlipOutcome>;

    /// Verifies by uploading the slip image stored at `path`.
    async fn verify_image(&self, path: &Path) -> AppResult<SlipOutcome>;
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    status: u16,
    #[serde(default)]
    data: Option<SlipData>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SlipData {
    #[serde(rename = "transRef")]
    trans_ref: String,
    date: String,
    amount: AmountData,
    sender: Party,
    receiver: Party,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AmountData {
    amount: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Party {
    account: PartyAccount,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartyAccount {
    name: PartyName,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartyName {
    th: Option<String>,
    en: Option<String>,
}

impl PartyName {
    fn display(&self) -> String {
        self.th
            .as_deref()
            .or(self.en.as_deref())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("-")
            .to_string()
    }
}

fn display_amount(amount: &Value) -> String {
    match amount {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

impl VerifyResponse {
    fn into_outcome(self) -> SlipOutcome {
        let message = self.message.unwrap_or_default();
        match (self.status, self.data) {
            (200, Some(data)) => SlipOutcome::Verified(SlipDetails {
                trans_ref: data.trans_ref,
                date: data.date,
                amount: display_amount(&data.amount.amount),
                sender_name: data.sender.account.name.display(),
                receiver_name: data.receiver.account.name.display(),
            }),
            (404, _) => SlipOutcome::NotFound { message },
            (status, _) => SlipOutcome::Other { status, message },
        }
    }
}

pub struct EasySlipClient {
    http: reqwest::Client,
    config: SlipConfig,
}

impl EasySlipClient {
    pub fn new(config: SlipConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder().timeout(network::timeout()).build()?;
        Ok(Self { http, config })
    }

    async fn parse(response: reqwest::Response) -> AppResult<SlipOutcome> {
        let http_status = response.status();
        let body = response.text().await?;
        let parsed: VerifyResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::Validation(format!(
                "verification API returned {} with unreadable body ({}): {}",
                http_status,
                e,
                body.chars().take(200).collect::<String>()
            ))
        })?;
        Ok(parsed.into_outcome())
    }
}

#[async_trait]
impl VerificationApi for EasySlipClient {
    async fn verify_payload(&self, payload: &str) -> AppResult<SlipOutcome> {
        let response = self
            .http
            .get(&self.config.verify_url)
            .query(&[("payload", payload)])
            .bearer_auth(&self.config.token)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn verify_image(&self, path: &Path) -> AppResult<SlipOutcome> {
        use reqwest::multipart::{Form, Part};

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "slip.jpg".to_string());
        let part = Part::bytes(bytes).file_name(file_name).mime_str("image/jpeg")?;

        let response = self
            .http
            .post(&self.config.verify_url)
            .bearer_auth(&self.config.token)
            .multipart(Form::new().part("file", part))
            .send()
            .await?;
        Self::parse(response).await
    }
}
