//! Test fixtures shared by the integration tests
//!
//! Sheet rows, webhook payloads, slip images and a router wired to fakes.

#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use serde_json::{json, Value};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use orderdesk::core::config::{SheetConfig, SlipConfig};
use orderdesk::slip::{SlipChecker, SlipOutcome};
use orderdesk::storage::RawRow;
use orderdesk::web::{create_router, AppState};

use super::fakes::{FakeVerificationApi, InMemorySheetStore, RecordingMessenger};

pub const ADMIN_PASSWORD: &str = "nana-admin";
pub const SHEET_TITLE: &str = "รวมทั้งหมด";

/// A 19-column order row for `account` released on `release`.
pub fn order_row(account: &str, product: &str, release: &str) -> RawRow {
    let mut row = vec![String::new(); 19];
    row[0] = "1/2/2024 10:00:00".to_string();
    row[1] = account.to_string();
    row[2] = product.to_string();
    row[4] = "1".to_string();
    row[10] = release.to_string();
    row[13] = "ordered".to_string();
    row
}

/// Telegram update with one photo message.
pub fn photo_update(chat_id: i64, message_id: i32) -> Value {
    json!({
        "update_id": 900,
        "message": {
            "message_id": message_id,
            "date": 1704067200,
            "chat": {"id": chat_id, "type": "private"},
            "photo": [
                {"file_id": "small", "file_unique_id": "AQADs", "width": 90, "height": 90, "file_size": 1200},
                {"file_id": "large", "file_unique_id": "AQADl", "width": 1280, "height": 1280, "file_size": 98000}
            ]
        }
    })
}

pub fn qr_png(payload: &str) -> Vec<u8> {
    let code = QrCode::new(payload.as_bytes()).unwrap();
    let rendered = code.render::<Luma<u8>>().min_dimensions(300, 300).build();
    encode_png(DynamicImage::ImageLuma8(rendered))
}

pub fn blank_png() -> Vec<u8> {
    encode_png(DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
        240,
        240,
        Luma([255u8]),
    )))
}

fn encode_png(image: DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
    buf
}

pub fn sheet_config(base_url: &str) -> SheetConfig {
    SheetConfig {
        spreadsheet_id: "sheet-123".to_string(),
        title: SHEET_TITLE.to_string(),
        client_email: "orders@project.iam.gserviceaccount.com".to_string(),
        private_key: include_str!("../fixtures/service_account_key.pem").to_string(),
        expected_headers: Vec::new(),
        api_url: format!("{}/v4", base_url),
        token_url: format!("{}/token", base_url),
    }
}

pub fn slip_config(base_url: &str, storage_dir: &Path) -> SlipConfig {
    SlipConfig {
        verify_url: format!("{}/api/v1/verify", base_url),
        token: "slip-token".to_string(),
        storage_dir: storage_dir.to_path_buf(),
    }
}

/// Router wired to in-memory collaborators
pub struct TestApp {
    pub router: axum::Router,
    pub store: Arc<InMemorySheetStore>,
    pub messenger: Arc<RecordingMessenger>,
    pub api: Arc<FakeVerificationApi>,
    pub slip_dir: tempfile::TempDir,
}

impl TestApp {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self::with_slip(rows, RecordingMessenger::unreachable(), SlipOutcome::Other {
            status: 500,
            message: "unused".to_string(),
        })
    }

    pub fn with_slip(rows: Vec<RawRow>, messenger: RecordingMessenger, outcome: SlipOutcome) -> Self {
        let store = Arc::new(InMemorySheetStore::with_rows(rows));
        let messenger = Arc::new(messenger);
        let api = Arc::new(FakeVerificationApi::answering(outcome));
        let slip_dir = tempfile::tempdir().unwrap();

        let slip_checker = Arc::new(SlipChecker::new(
            messenger.clone(),
            api.clone(),
            slip_dir.path().to_path_buf(),
        ));
        let state = AppState {
            store: store.clone(),
            sheet_title: Arc::from(SHEET_TITLE),
            admin_password: Arc::from(ADMIN_PASSWORD),
            slip_checker,
        };

        Self {
            router: create_router(state),
            store,
            messenger,
            api,
            slip_dir,
        }
    }
}
