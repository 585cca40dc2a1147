use crate::storage::schema::Column;
use crate::storage::sheets::RawRow;

/// Case-folds and strips every whitespace character.
pub fn normalize_account(account: &str) -> String {
    account
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Rows whose account cell matches `account`, in original order.
///
/// Rows without an account cell never match.
pub fn filter_by_account(rows: Vec<RawRow>, account: &str) -> Vec<RawRow> {
    let wanted = normalize_account(account);
    rows.into_iter()
        .filter(|row| {
            row.get(Column::Account.index())
                .is_some_and(|cell| normalize_account(cell) == wanted)
        })
        .collect()
}
