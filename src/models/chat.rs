use serde::{Deserialize, Serialize};

/// A channel message as served to the front-end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Slack timestamp, a float encoded as a string. Doubles as the sort key.
    pub ts: String,
    pub text: String,
    pub user: Option<String>,
    #[serde(rename = "userName", default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub bot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

impl ChatMessage {
    pub fn timestamp(&self) -> f64 {
        self.ts.parse::<f64>().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatFeed {
    pub messages: Vec<ChatMessage>,
    pub success: bool,
    pub count: usize,
}

impl ChatFeed {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            count: messages.len(),
            messages,
            success: true,
        }
    }
}
