//! Messaging collaborator: photo download, reactions and replies.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::ClientBuilder;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileId, MessageId, ParseMode, ReactionType};

use crate::core::config::network;
use crate::core::error::AppResult;

#[async_trait]
pub trait Messenger: Send + Sync {
    /// Downloads the bytes of a file previously sent to the bot.
    async fn download_file(&self, file_id: &str) -> AppResult<Bytes>;

    /// Reacts to a message with `emoji`.
    async fn set_reaction(&self, chat_id: i64, message_id: i32, emoji: &str) -> AppResult<()>;

    /// Sends a Markdown message to a chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> AppResult<()>;
}

pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    /// Creates a messenger whose HTTP calls share the network timeout.
    pub fn new(token: &str) -> AppResult<Self> {
        let client = ClientBuilder::new().timeout(network::timeout()).build()?;
        Ok(Self {
            bot: Bot::with_client(token, client),
        })
    }

    /// Points the bot at a different Bot API server.
    pub fn with_api_url(mut self, url: url::Url) -> Self {
        self.bot = self.bot.set_api_url(url);
        self
    }

    /// Picks `emoji` if the chat allows it, otherwise the chat's first allowed emoji.
    async fn allowed_reaction(&self, chat_id: ChatId, emoji: &str) -> Option<String> {
        let Ok(chat) = self.bot.get_chat(chat_id).await else {
            return Some(emoji.to_string());
        };
        let Some(available) = chat.available_reactions() else {
            return Some(emoji.to_string());
        };

        let allowed = available
            .iter()
            .any(|reaction| matches!(reaction, ReactionType::Emoji { emoji: allowed } if allowed == emoji));
        if allowed {
            return Some(emoji.to_string());
        }

        let fallback = available.iter().find_map(|reaction| match reaction {
            ReactionType::Emoji { emoji } => Some(emoji.clone()),
            _ => None,
        });
        match &fallback {
            Some(first) => log::debug!(
                "Reaction '{}' not allowed in chat {}, falling back to '{}'",
                emoji,
                chat_id.0,
                first
            ),
            None => log::debug!("No emoji reactions available in chat {}, skipping", chat_id.0),
        }
        fallback
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn download_file(&self, file_id: &str) -> AppResult<Bytes> {
        let file = self.bot.get_file(FileId(file_id.to_string())).await?;
        let mut buf: Vec<u8> = Vec::new();
        self.bot.download_file(&file.path, &mut buf).await?;
        log::debug!("Downloaded {} bytes for file {}", buf.len(), file_id);
        Ok(Bytes::from(buf))
    }

    async fn set_reaction(&self, chat_id: i64, message_id: i32, emoji: &str) -> AppResult<()> {
        let chat_id = ChatId(chat_id);
        let Some(chosen) = self.allowed_reaction(chat_id, emoji).await else {
            return Ok(());
        };

        self.bot
            .set_message_reaction(chat_id, MessageId(message_id))
            .reaction(vec![ReactionType::Emoji { emoji: chosen.clone() }])
            .await?;
        log::info!("Added reaction {} to message {} in chat {}", chosen, message_id, chat_id.0);
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> AppResult<()> {
        // Legacy Markdown: the texts use single-asterisk bold
        #[allow(deprecated)]
        let parse_mode = ParseMode::Markdown;
        self.bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(parse_mode)
            .await?;
        log::info!("Sent message to chat {}", chat_id);
        Ok(())
    }
}
