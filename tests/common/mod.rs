//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod fakes;
pub mod fixtures;

#[allow(unused_imports)]
pub use fakes::{FakeVerificationApi, InMemorySheetStore, RecordingMessenger};
#[allow(unused_imports)]
pub use fixtures::{blank_png, order_row, photo_update, qr_png, sheet_config, slip_config, TestApp};
