use std::sync::Arc;

use tracing::{error, info};

use crate::errors::AppError;
use crate::external::slack::{ChatProvider, SlackMessage};
use crate::models::ChatMessage;
use crate::services::user_directory::UserDirectory;

pub const HISTORY_LIMIT: u32 = 50;

const CHANNEL_BOILERPLATE: [&str; 2] = ["has joined the channel", "has left the channel"];

pub struct ChatService {
    provider: Option<Arc<dyn ChatProvider>>,
    channel_id: Option<String>,
}

impl ChatService {
    /// `provider` is `None` when no bot token is configured.
    pub fn new(provider: Option<Arc<dyn ChatProvider>>, channel_id: Option<String>) -> Self {
        Self {
            provider,
            channel_id: channel_id.filter(|c| !c.is_empty()),
        }
    }

    /// The latest channel messages, newest first as Slack returns them, with
    /// author names resolved where possible.
    pub async fn fetch_messages(&self) -> Result<Vec<ChatMessage>, AppError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| AppError::Configuration("Slack bot token not configured".to_string()))?;
        let channel = self.channel_id.as_deref().ok_or_else(|| {
            AppError::Configuration("Slack jobs channel ID not configured".to_string())
        })?;

        let raw = provider
            .conversation_history(channel, HISTORY_LIMIT)
            .await
            .map_err(|e| {
                error!("Fetching channel history failed: {}", e);
                AppError::from(e)
            })?;

        let directory = UserDirectory::build(provider.as_ref(), &raw).await;
        let messages: Vec<ChatMessage> = raw
            .into_iter()
            .map(|m| normalize_message(m, &directory))
            .collect();

        info!("Fetched {} channel messages", messages.len());
        Ok(messages)
    }
}

fn normalize_message(message: SlackMessage, directory: &UserDirectory) -> ChatMessage {
    let user_name = directory.resolve(&message);
    ChatMessage {
        ts: message.ts,
        text: message.text,
        user: message.user,
        user_name,
        bot_id: message.bot_id,
        subtype: message.subtype,
    }
}

pub fn is_channel_boilerplate(text: &str) -> bool {
    let text = text.to_lowercase();
    CHANNEL_BOILERPLATE.iter().any(|phrase| text.contains(phrase))
}

/// Messages worth showing as job posts, oldest first.
///
/// Drops bot posts, empty messages and join/leave notices.
pub fn job_feed(messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let mut feed: Vec<ChatMessage> = messages
        .into_iter()
        .filter(|m| m.bot_id.is_none())
        .filter(|m| !m.text.trim().is_empty())
        .filter(|m| !is_channel_boilerplate(&m.text))
        .collect();
    feed.sort_by(|a, b| a.timestamp().total_cmp(&b.timestamp()));
    feed
}
