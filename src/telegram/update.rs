//! The subset of a Telegram `Update` the slip webhook reads.
//!
//! Unknown fields are ignored so any update kind deserializes; only
//! messages carrying a photo are acted upon.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookUpdate {
    #[serde(default)]
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i32,
    pub chat: ChatRef,
    #[serde(default)]
    pub photo: Option<Vec<PhotoSize>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChatRef {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    #[serde(default)]
    pub file_unique_id: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub file_size: Option<u64>,
}

/// A photo message ready for slip checking.
#[derive(Debug, Clone)]
pub struct SlipPhoto {
    pub chat_id: i64,
    pub message_id: i32,
    pub file_id: String,
    pub file_unique_id: String,
}

impl WebhookUpdate {
    /// The largest variant of the message photo, if the update has one.
    pub fn slip_photo(&self) -> Option<SlipPhoto> {
        let message = self.message.as_ref()?;
        let largest = message
            .photo
            .as_deref()?
            .iter()
            .max_by_key(|p| (u64::from(p.width) * u64::from(p.height), p.file_size.unwrap_or(0)))?;

        Some(SlipPhoto {
            chat_id: message.chat.id,
            message_id: message.message_id,
            file_id: largest.file_id.clone(),
            file_unique_id: largest.file_unique_id.clone(),
        })
    }
}
