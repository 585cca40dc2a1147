//! Order pipeline: sheet rows in, grouped records out; form submissions in, sheet rows out

pub mod filter;
pub mod form;
pub mod grouper;
pub mod mapper;
pub mod search;

// Re-exports for convenience
pub use form::{build_rows, write_submission, FormSubmission, ProductLine};
pub use grouper::ReleaseGroup;
pub use mapper::OrderRecord;
pub use search::{find_orders, search_grouped};
