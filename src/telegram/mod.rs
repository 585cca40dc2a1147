//! Telegram integration: webhook payload types and the messaging collaborator

pub mod messenger;
pub mod update;

// Re-exports for convenience
pub use messenger::{Messenger, TelegramMessenger};
pub use update::{SlipPhoto, WebhookUpdate};
