use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::warn;

use common::{AlertSink, Error, Result};

/// Delivers alert text to a fixed set of Telegram chats.
pub struct TelegramSink {
    bot: Bot,
    chat_ids: Vec<ChatId>,
}

impl TelegramSink {
    pub fn new(token: impl Into<String>, chat_ids: &[i64]) -> Self {
        Self::with_bot(Bot::new(token), chat_ids)
    }

    /// Use a preconfigured bot (custom API URL, client, ...).
    pub fn with_bot(bot: Bot, chat_ids: &[i64]) -> Self {
        Self {
            bot,
            chat_ids: chat_ids.iter().map(|&id| ChatId(id)).collect(),
        }
    }

    pub fn chat_ids(&self) -> &[ChatId] {
        &self.chat_ids
    }
}

#[async_trait]
impl AlertSink for TelegramSink {
    async fn send(&self, text: &str) -> Result<()> {
        let failed = send_alert(&self.bot, &self.chat_ids, text).await;
        if failed == 0 {
            Ok(())
        } else {
            Err(Error::SinkUnavailable(format!(
                "{failed} of {} chats did not receive the alert",
                self.chat_ids.len()
            )))
        }
    }
}

/// Send a message to every chat. Returns how many deliveries failed.
pub async fn send_alert(bot: &Bot, chat_ids: &[ChatId], message: &str) -> usize {
    let mut failed = 0;
    for &chat_id in chat_ids {
        if let Err(e) = bot.send_message(chat_id, message).await {
            warn!(chat_id = ?chat_id, error = %e, "Failed to send Telegram alert");
            failed += 1;
        }
    }
    failed
}
