//! Named-column layout of the orders sheet.
//!
//! The sheet has 19 positional columns. Columns 12, 14, 15 and 17 are not
//! read back by the search path (col 14/15 hold the address and caution the
//! admin form writes; 12 and 17 are blank in the sheet).

use crate::core::config::sheet::COLUMN_COUNT;
use crate::core::error::{AppError, AppResult};
use crate::storage::sheets::SheetStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Timestamp,
    Account,
    ProductName,
    ProductDetail,
    Amount,
    ProductPay,
    PaymentMethod,
    Paid,
    Remaining,
    PaidDate,
    ReleaseDate,
    ShippingMethod,
    Reserved,
    ProductStatus,
    Address,
    Caution,
    TrackingNo,
    Unused,
    Images,
}

impl Column {
    /// Every column in sheet order.
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Timestamp,
        Column::Account,
        Column::ProductName,
        Column::ProductDetail,
        Column::Amount,
        Column::ProductPay,
        Column::PaymentMethod,
        Column::Paid,
        Column::Remaining,
        Column::PaidDate,
        Column::ReleaseDate,
        Column::ShippingMethod,
        Column::Reserved,
        Column::ProductStatus,
        Column::Address,
        Column::Caution,
        Column::TrackingNo,
        Column::Unused,
        Column::Images,
    ];

    /// Zero-based position in a sheet row.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Checks the sheet's header row against the configured labels.
///
/// Comparison trims whitespace and ignores case. An empty `expected` list
/// skips validation. Every drifted column is listed in the error.
pub fn validate_header(header: &[String], expected: &[String]) -> AppResult<()> {
    if expected.is_empty() {
        return Ok(());
    }

    if expected.len() != COLUMN_COUNT {
        return Err(AppError::Config(format!(
            "SHEET_HEADERS must list {} labels, got {}",
            COLUMN_COUNT,
            expected.len()
        )));
    }

    let drifted: Vec<String> = expected
        .iter()
        .enumerate()
        .filter_map(|(i, want)| {
            let got = header.get(i).map(|s| s.trim()).unwrap_or("");
            if got.to_lowercase() == want.trim().to_lowercase() {
                None
            } else {
                Some(format!("column {} expected '{}' found '{}'", i, want.trim(), got))
            }
        })
        .collect();

    if drifted.is_empty() {
        Ok(())
    } else {
        Err(AppError::Schema(drifted.join("; ")))
    }
}

/// Reads the sheet and validates its first row.
///
/// Returns the number of data rows below the header.
pub async fn verify_sheet_layout(store: &dyn SheetStore, title: &str, expected: &[String]) -> AppResult<usize> {
    let rows = store.read_range(title).await?;
    let Some((header, data)) = rows.split_first() else {
        return Err(AppError::Schema(format!("sheet '{}' is empty", title)));
    };
    validate_header(header, expected)?;
    Ok(data.len())
}
