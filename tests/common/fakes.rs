//! In-process stand-ins for the sheet, Telegram and the verification API.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use orderdesk::core::{AppError, AppResult};
use orderdesk::slip::{SlipOutcome, VerificationApi};
use orderdesk::storage::{RawRow, SheetRow, SheetStore};
use orderdesk::telegram::Messenger;

/// Sheet backed by a vector; appends are recorded as written.
#[derive(Default)]
pub struct InMemorySheetStore {
    rows: Mutex<Vec<RawRow>>,
    appended: Mutex<Vec<SheetRow>>,
    fail_reads: AtomicBool,
}

impl InMemorySheetStore {
    pub fn with_rows(rows: Vec<RawRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn appended(&self) -> Vec<SheetRow> {
        self.appended.lock().unwrap().clone()
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl SheetStore for InMemorySheetStore {
    async fn read_range(&self, _title: &str) -> AppResult<Vec<RawRow>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Validation("sheet unavailable".to_string()));
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn append_rows(&self, _title: &str, rows: Vec<SheetRow>) -> AppResult<()> {
        self.appended.lock().unwrap().extend(rows);
        Ok(())
    }
}

/// Messenger that serves canned file bytes and records what it was asked to send.
pub struct RecordingMessenger {
    file: Option<Bytes>,
    pub reactions: Mutex<Vec<(i64, i32, String)>>,
    pub messages: Mutex<Vec<(i64, String)>>,
}

impl RecordingMessenger {
    pub fn serving(file: Vec<u8>) -> Self {
        Self {
            file: Some(Bytes::from(file)),
            reactions: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Every download fails.
    pub fn unreachable() -> Self {
        Self {
            file: None,
            reactions: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn reactions(&self) -> Vec<(i64, i32, String)> {
        self.reactions.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<(i64, String)> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn download_file(&self, file_id: &str) -> AppResult<Bytes> {
        self.file
            .clone()
            .ok_or_else(|| AppError::Validation(format!("file {} is gone", file_id)))
    }

    async fn set_reaction(&self, chat_id: i64, message_id: i32, emoji: &str) -> AppResult<()> {
        self.reactions
            .lock()
            .unwrap()
            .push((chat_id, message_id, emoji.to_string()));
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> AppResult<()> {
        self.messages.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

/// Verification API answering every call with the same outcome.
///
/// Uploaded files are read at call time, since the checker removes them afterwards.
pub struct FakeVerificationApi {
    outcome: Option<SlipOutcome>,
    payload_calls: AtomicUsize,
    image_calls: AtomicUsize,
    pub payloads: Mutex<Vec<String>>,
    pub images: Mutex<Vec<PathBuf>>,
    pub uploaded: Mutex<Vec<Vec<u8>>>,
}

impl FakeVerificationApi {
    pub fn answering(outcome: SlipOutcome) -> Self {
        Self::with_outcome(Some(outcome))
    }

    /// Every call fails as a transport error would.
    pub fn unreachable() -> Self {
        Self::with_outcome(None)
    }

    fn with_outcome(outcome: Option<SlipOutcome>) -> Self {
        Self {
            outcome,
            payload_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
            images: Mutex::new(Vec::new()),
            uploaded: Mutex::new(Vec::new()),
        }
    }

    fn answer(&self) -> AppResult<SlipOutcome> {
        self.outcome
            .clone()
            .ok_or_else(|| AppError::Validation("verification API unreachable".to_string()))
    }

    pub fn payload_calls(&self) -> usize {
        self.payload_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VerificationApi for FakeVerificationApi {
    async fn verify_payload(&self, payload: &str) -> AppResult<SlipOutcome> {
        self.payload_calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(payload.to_string());
        self.answer()
    }

    async fn verify_image(&self, path: &Path) -> AppResult<SlipOutcome> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.images.lock().unwrap().push(path.to_path_buf());
        self.uploaded.lock().unwrap().push(std::fs::read(path)?);
        self.answer()
    }
}
