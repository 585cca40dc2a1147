//! Spreadsheet storage: collaborator contract, REST client and column schema

pub mod schema;
pub mod sheets;

// Re-exports for convenience
pub use schema::{validate_header, verify_sheet_layout, Column};
pub use sheets::{GoogleSheetsClient, RawRow, SheetRow, SheetStore};
