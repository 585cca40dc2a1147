use crate::core::error::AppResult;
use crate::storage::sheets::SheetStore;

use super::filter::filter_by_account;
use super::grouper::{group_by_release, sort_by_release_desc, ReleaseGroup};
use super::mapper::{map_row, OrderRecord};

/// Matched, mapped and release-sorted records for `account`.
pub async fn find_orders(store: &dyn SheetStore, title: &str, account: &str) -> AppResult<Vec<OrderRecord>> {
    let rows = store.read_range(title).await?;
    let total = rows.len();
    let matched = filter_by_account(rows, account);
    log::info!("Account '{}' matched {} of {} rows", account, matched.len(), total);

    let mut records: Vec<OrderRecord> = matched.iter().enumerate().map(|(i, row)| map_row(row, i)).collect();
    sort_by_release_desc(&mut records);
    Ok(records)
}

/// Full search pipeline: read → filter → map → sort → group.
///
/// An unknown account yields an empty list, not an error.
pub async fn search_grouped(store: &dyn SheetStore, title: &str, account: &str) -> AppResult<Vec<ReleaseGroup>> {
    let records = find_orders(store, title, account).await?;
    Ok(group_by_release(records))
}
