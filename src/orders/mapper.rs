//! Raw sheet row → [`OrderRecord`].

use serde::Serialize;

use crate::core::config::sheet::{COLUMN_COUNT, TBA_LABEL};
use crate::core::dates;
use crate::storage::schema::Column;

/// One order line as returned to the client.
///
/// Field names follow the JSON the storefront already consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: Option<String>,
    #[serde(rename = "@Twitter")]
    pub account: Option<String>,
    /// Position in the matched result set, not a stored key.
    pub id: usize,
    pub product_name: Option<String>,
    pub product_detail: Option<String>,
    pub amount: Option<String>,
    pub product_pay: Option<String>,
    pub payment_method: Option<String>,
    pub paid: Option<String>,
    #[serde(rename = "total2")]
    pub remaining: Option<String>,
    pub paid_date: Option<String>,
    pub release_date: Option<String>,
    pub shipping_method: Option<String>,
    pub product_status: Option<String>,
    pub tracking_no: Option<String>,
    pub image: Option<Vec<String>>,
    pub release_date_format: String,
    pub release_date_compare: i64,
    pub success: bool,
}

/// A row padded to exactly [`COLUMN_COUNT`] slots; empty cells are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedRow(Vec<Option<String>>);

impl PaddedRow {
    /// Pads on the right with `None`; never truncates.
    pub fn new(raw: &[String]) -> Self {
        let mut cells: Vec<Option<String>> = raw
            .iter()
            .map(|cell| if cell.is_empty() { None } else { Some(cell.clone()) })
            .collect();
        if cells.len() < COLUMN_COUNT {
            cells.resize(COLUMN_COUNT, None);
        }
        Self(cells)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.0.get(column.index()).and_then(|cell| cell.as_deref())
    }

    fn owned(&self, column: Column) -> Option<String> {
        self.get(column).map(str::to_string)
    }
}

/// Maps one raw row at position `index` of its result set.
pub fn map_row(raw: &[String], index: usize) -> OrderRecord {
    let row = PaddedRow::new(raw);
    let release = row.get(Column::ReleaseDate).and_then(dates::parse_flexible);

    let (release_date_format, release_date_compare) = match release {
        Some(dt) => (dates::month_year_label(&dt), dt.timestamp_millis()),
        None => (TBA_LABEL.to_string(), dates::tba_sentinel_millis()),
    };

    OrderRecord {
        timestamp: row.owned(Column::Timestamp),
        account: row.owned(Column::Account),
        id: index,
        product_name: row.owned(Column::ProductName),
        product_detail: row.owned(Column::ProductDetail),
        amount: row.owned(Column::Amount),
        product_pay: row.owned(Column::ProductPay),
        payment_method: row.owned(Column::PaymentMethod),
        paid: row.owned(Column::Paid),
        remaining: row.owned(Column::Remaining),
        paid_date: row.owned(Column::PaidDate),
        release_date: row.owned(Column::ReleaseDate),
        shipping_method: row.owned(Column::ShippingMethod),
        product_status: row.owned(Column::ProductStatus),
        tracking_no: row.owned(Column::TrackingNo),
        image: row.get(Column::Images).and_then(split_images),
        release_date_format,
        release_date_compare,
        success: true,
    }
}

fn split_images(cell: &str) -> Option<Vec<String>> {
    if cell.trim().is_empty() {
        return None;
    }
    Some(cell.split(',').map(|url| url.trim().to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_short_row_padded_to_column_count() {
        for len in 0..COLUMN_COUNT {
            let raw: Vec<String> = (0..len).map(|i| format!("c{}", i)).collect();
            let padded = PaddedRow::new(&raw);
            assert_eq!(padded.len(), COLUMN_COUNT);
            assert!(padded.get(Column::Images).is_none());
        }
    }

    #[test]
    fn test_long_row_not_truncated() {
        let raw: Vec<String> = (0..COLUMN_COUNT + 3).map(|i| i.to_string()).collect();
        assert_eq!(PaddedRow::new(&raw).len(), COLUMN_COUNT + 3);
    }

    #[test]
    fn test_full_row_mapping() {
        let raw = row(&[
            "3/1/2024 10:00:00",
            "@buyer",
            "Figure A",
            "Blue",
            "2",
            "1500",
            "Deposit",
            "500",
            "1000",
            "4/30/2024",
            "6/15/2024",
            "EMS",
            "reserved",
            "Ordered",
            "Bangkok address",
            "Fragile",
            "TH123",
            "unused",
            "https://a/1.jpg, https://a/2.jpg ,https://a/3.jpg",
        ]);

        let record = map_row(&raw, 4);
        assert_eq!(record.id, 4);
        assert_eq!(record.account.as_deref(), Some("@buyer"));
        assert_eq!(record.product_name.as_deref(), Some("Figure A"));
        assert_eq!(record.product_pay.as_deref(), Some("1500"));
        assert_eq!(record.remaining.as_deref(), Some("1000"));
        assert_eq!(record.shipping_method.as_deref(), Some("EMS"));
        assert_eq!(record.product_status.as_deref(), Some("Ordered"));
        assert_eq!(record.tracking_no.as_deref(), Some("TH123"));
        assert_eq!(
            record.image,
            Some(vec![
                "https://a/1.jpg".to_string(),
                "https://a/2.jpg".to_string(),
                "https://a/3.jpg".to_string()
            ])
        );
        assert_eq!(record.release_date_format, "June 2024");
        assert!(record.release_date_compare < dates::tba_sentinel_millis());
        assert!(record.success);
    }

    #[test]
    fn test_missing_release_date_is_tba() {
        let record = map_row(&row(&["ts", "@buyer", "Item"]), 0);
        assert_eq!(record.release_date, None);
        assert_eq!(record.release_date_format, TBA_LABEL);
        assert_eq!(record.release_date_compare, dates::tba_sentinel_millis());
        assert_eq!(record.image, None);
        assert_eq!(record.tracking_no, None);
    }

    #[test]
    fn test_malformed_release_date_treated_as_empty() {
        let mut raw = vec![String::new(); 11];
        raw[10] = "soon™".to_string();
        let record = map_row(&raw, 0);
        assert_eq!(record.release_date.as_deref(), Some("soon™"));
        assert_eq!(record.release_date_format, TBA_LABEL);
        assert_eq!(record.release_date_compare, dates::tba_sentinel_millis());
    }

    #[test]
    fn test_empty_cells_become_null() {
        let record = map_row(&row(&["", "@buyer", "", "detail"]), 0);
        assert_eq!(record.timestamp, None);
        assert_eq!(record.product_name, None);
        assert_eq!(record.product_detail.as_deref(), Some("detail"));
    }

    #[test]
    fn test_blank_image_cell_is_null_not_empty_list() {
        let mut raw = vec![String::new(); COLUMN_COUNT];
        raw[18] = "   ".to_string();
        assert_eq!(map_row(&raw, 0).image, None);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(map_row(&row(&["ts", "@buyer"]), 2)).unwrap();
        assert_eq!(value["@Twitter"], "@buyer");
        assert_eq!(value["Timestamp"], "ts");
        assert_eq!(value["id"], 2);
        assert!(value["total2"].is_null());
        assert_eq!(value["release_date_format"], "TBA");
        assert_eq!(value["success"], true);
    }
}
