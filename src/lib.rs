//! Orderdesk - pre-order backend on top of a Google Sheet
//!
//! This library provides the order search and admin form pipeline and the
//! Telegram payment-slip checker behind the HTTP server.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging and date helpers
//! - `storage`: Spreadsheet collaborator and column schema
//! - `orders`: Row mapping, account filtering, release grouping, form rows
//! - `slip`: QR decoding, verification API and chat notifications
//! - `telegram`: Webhook payload types and messaging collaborator
//! - `web`: HTTP router, handlers and admin authentication

pub mod cli;
pub mod core;
pub mod orders;
pub mod slip;
pub mod storage;
pub mod telegram;
pub mod web;

// Re-export commonly used types for convenience
pub use core::{AppConfig, AppError, AppResult};
pub use orders::{search_grouped, OrderRecord, ReleaseGroup};
pub use storage::{GoogleSheetsClient, SheetStore};
pub use web::{create_router, AppState};
