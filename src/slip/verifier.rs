//! Slip check for one webhook update.
//!
//! Received → Decoding → (Verifying | DownloadingFallback → VerifyingByImage)
//! → Responding → Done. Every failure ends the run with a log line; nothing is
//! propagated to the webhook caller. A persisted slip image is removed once
//! its upload returns.

use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::error::AppResult;
use crate::telegram::update::{SlipPhoto, WebhookUpdate};
use crate::telegram::Messenger;

use super::client::{SlipOutcome, VerificationApi};
use super::messages::notification_for;
use super::qr::{decode_slip, DecodeOutcome};

/// How the slip was submitted for verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyPath {
    Payload,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Downloading,
    Persisting,
    Verifying,
}

/// Where a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckReport {
    /// The update carried no photo.
    Skipped,
    /// A collaborator failed before a verdict was reached.
    Failed { stage: Stage, error: String },
    /// A verdict was reached and the chat was notified (best effort).
    Notified { via: VerifyPath, outcome: SlipOutcome },
}

pub struct SlipChecker {
    messenger: Arc<dyn Messenger>,
    api: Arc<dyn VerificationApi>,
    storage_dir: PathBuf,
}

impl SlipChecker {
    pub fn new(messenger: Arc<dyn Messenger>, api: Arc<dyn VerificationApi>, storage_dir: PathBuf) -> Self {
        Self {
            messenger,
            api,
            storage_dir,
        }
    }

    /// Runs the whole check for `update`. Never fails.
    pub async fn handle(&self, update: &WebhookUpdate) -> CheckReport {
        let Some(photo) = update.slip_photo() else {
            return CheckReport::Skipped;
        };
        log::info!(
            "Slip photo received in chat {} (message {})",
            photo.chat_id,
            photo.message_id
        );

        let image = match self.messenger.download_file(&photo.file_id).await {
            Ok(bytes) => bytes,
            Err(e) => return failed(Stage::Downloading, &photo, e.to_string()),
        };

        let (via, verdict) = match decode_slip(image).await {
            DecodeOutcome::Payload(payload) => {
                log::info!("QR payload decoded for message {}", photo.message_id);
                (VerifyPath::Payload, self.api.verify_payload(&payload).await)
            }
            DecodeOutcome::RawImage(bytes) => {
                log::debug!("No QR in message {}, uploading image instead", photo.message_id);
                let path = match self.persist(&photo, &bytes).await {
                    Ok(path) => path,
                    Err(e) => return failed(Stage::Persisting, &photo, e.to_string()),
                };
                let verdict = self.api.verify_image(&path).await;
                discard(&path).await;
                (VerifyPath::Image, verdict)
            }
        };

        let outcome = match verdict {
            Ok(outcome) => outcome,
            Err(e) => return failed(Stage::Verifying, &photo, e.to_string()),
        };

        self.respond(&photo, &outcome).await;
        CheckReport::Notified { via, outcome }
    }

    async fn persist(&self, photo: &SlipPhoto, bytes: &Bytes) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(&self.storage_dir).await?;
        let path = slip_path(&self.storage_dir, photo);
        tokio::fs::write(&path, bytes).await?;
        log::info!("Saved slip image to {}", path.display());
        Ok(path)
    }

    async fn respond(&self, photo: &SlipPhoto, outcome: &SlipOutcome) {
        let note = notification_for(outcome);

        if let Some(emoji) = note.reaction {
            if let Err(e) = self.messenger.set_reaction(photo.chat_id, photo.message_id, emoji).await {
                log::warn!(
                    "Failed to set reaction '{}' on message {} in chat {}: {}",
                    emoji,
                    photo.message_id,
                    photo.chat_id,
                    e
                );
            }
        }

        if note.text.trim().is_empty() {
            log::warn!("Verification returned no message for chat {}, nothing to send", photo.chat_id);
            return;
        }
        if let Err(e) = self.messenger.send_message(photo.chat_id, &note.text).await {
            log::warn!("Failed to send message to chat {}: {}", photo.chat_id, e);
        }
    }
}

fn failed(stage: Stage, photo: &SlipPhoto, error: String) -> CheckReport {
    log::error!(
        "Slip check for message {} in chat {} failed while {:?}: {}",
        photo.message_id,
        photo.chat_id,
        stage,
        error
    );
    CheckReport::Failed { stage, error }
}

async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        log::warn!("Failed to remove slip image {}: {}", path.display(), e);
    }
}

/// Unique per run, so a redelivered update never shares a file with the first delivery.
fn slip_path(dir: &Path, photo: &SlipPhoto) -> PathBuf {
    let run = uuid::Uuid::new_v4().simple().to_string();
    let unique: String = photo
        .file_unique_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if unique.is_empty() {
        dir.join(format!("slip_{}_{}.jpg", photo.chat_id, run))
    } else {
        dir.join(format!("slip_{}_{}_{}.jpg", photo.chat_id, unique, run))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(unique: &str) -> SlipPhoto {
        SlipPhoto {
            chat_id: -42,
            message_id: 7,
            file_id: "file".to_string(),
            file_unique_id: unique.to_string(),
        }
    }

    fn file_name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    #[test]
    fn test_slip_path_uses_unique_id() {
        let path = slip_path(Path::new("/tmp/slips"), &photo("AQADx_-1"));
        assert_eq!(path.parent(), Some(Path::new("/tmp/slips")));
        let name = file_name(&path);
        assert!(name.starts_with("slip_-42_AQADx_-1_"), "{}", name);
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_slip_path_strips_path_characters() {
        let path = slip_path(Path::new("slips"), &photo("../../etc"));
        assert_eq!(path.parent(), Some(Path::new("slips")));
        assert!(file_name(&path).starts_with("slip_-42_etc_"));
    }

    #[test]
    fn test_slip_path_without_unique_id() {
        let name = file_name(&slip_path(Path::new("slips"), &photo("")));
        assert!(name.starts_with("slip_-42_"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_slip_path_differs_per_run() {
        let first = slip_path(Path::new("slips"), &photo("AQADl"));
        let second = slip_path(Path::new("slips"), &photo("AQADl"));
        assert_ne!(first, second);
    }
}
