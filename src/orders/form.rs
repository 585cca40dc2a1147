//! Admin order form → sheet rows.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::core::dates;
use crate::core::error::AppResult;
use crate::storage::sheets::{SheetRow, SheetStore};

/// Literal the storefront's date picker sends for a cleared field.
const INVALID_DATE: &str = "Invalid date";

#[derive(Debug, Clone, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub account: Value,
    #[serde(rename = "paymentMethod", default)]
    pub payment_method: Value,
    #[serde(default)]
    pub address: Value,
    #[serde(default)]
    pub caution: Value,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub product: Vec<ProductLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductLine {
    #[serde(default)]
    pub product_name: Value,
    #[serde(default)]
    pub product_detail: Value,
    #[serde(default)]
    pub product_amount: Value,
    #[serde(default)]
    pub product_price: Value,
    #[serde(default)]
    pub product_pay: Value,
    #[serde(default)]
    pub product_total2: Value,
    #[serde(default)]
    pub paid_date: Value,
    #[serde(default)]
    pub release_date: Value,
    #[serde(default)]
    pub product_shipping_method: Value,
    #[serde(default)]
    pub already_order: Value,
}

/// One sheet row per product line, all stamped with `now`.
///
/// Layout: timestamp, account, name, detail, amount, price, payment method,
/// pay, total, paid date, release date, shipping, reserved (blank),
/// already ordered, address, caution.
pub fn build_rows(submission: &FormSubmission, now: DateTime<Utc>) -> Vec<SheetRow> {
    let timestamp = Value::String(dates::format_timestamp(&now));

    submission
        .product
        .iter()
        .map(|item| {
            vec![
                timestamp.clone(),
                cell(&submission.account),
                cell(&item.product_name),
                cell(&item.product_detail),
                cell(&item.product_amount),
                cell(&item.product_price),
                cell(&submission.payment_method),
                cell(&item.product_pay),
                cell(&item.product_total2),
                Value::String(form_date(&item.paid_date)),
                Value::String(form_date(&item.release_date)),
                cell(&item.product_shipping_method),
                Value::String(String::new()),
                cell(&item.already_order),
                cell(&submission.address),
                cell(&submission.caution),
            ]
        })
        .collect()
}

/// Appends every product line of `submission` to `title` in one batch.
///
/// Returns the number of rows written.
pub async fn write_submission(
    store: &dyn SheetStore,
    title: &str,
    submission: &FormSubmission,
    now: DateTime<Utc>,
) -> AppResult<usize> {
    let rows = build_rows(submission, now);
    let count = rows.len();
    if count == 0 {
        log::info!("Form for '{}' has no product lines, nothing to append", submission.account);
        return Ok(0);
    }

    store.append_rows(title, rows).await?;
    log::info!("Recorded {} order lines for '{}'", count, submission.account);
    Ok(count)
}

/// `M/D/YYYY` in the store timezone, or empty for blank/unparseable input.
///
/// Numbers are epoch milliseconds; other non-string values are empty.
fn form_date(raw: &Value) -> String {
    match raw {
        Value::String(s) => match s.trim() {
            "" | INVALID_DATE => String::new(),
            value => dates::parse_flexible(value)
                .map(|dt| dates::format_short_date(&dt))
                .unwrap_or_default(),
        },
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .map(|dt| dates::format_short_date(&dt))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ProductLine>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ProductLine>>::deserialize(deserializer)?.unwrap_or_default())
}

fn cell(value: &Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        other => other.clone(),
    }
}
