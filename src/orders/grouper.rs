use serde::Serialize;

use super::mapper::OrderRecord;

/// One release-month bucket of the search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseGroup {
    pub key: String,
    pub value: Vec<OrderRecord>,
}

/// Stable sort, most recent (and TBA) release first.
pub fn sort_by_release_desc(records: &mut [OrderRecord]) {
    records.sort_by(|a, b| b.release_date_compare.cmp(&a.release_date_compare));
}

/// Buckets records by `release_date_format`.
///
/// Buckets appear in order of first occurrence in `records`; members keep
/// their relative order.
pub fn group_by_release(records: Vec<OrderRecord>) -> Vec<ReleaseGroup> {
    let mut groups: Vec<ReleaseGroup> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|g| g.key == record.release_date_format) {
            Some(group) => group.value.push(record),
            None => groups.push(ReleaseGroup {
                key: record.release_date_format.clone(),
                value: vec![record],
            }),
        }
    }
    groups
}
