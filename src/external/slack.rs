use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

use crate::external::UpstreamError;

const MEMBERS_PAGE_SIZE: u32 = 200;
// Bounds the cursor walk in case the workspace keeps handing back cursors.
const MAX_MEMBER_PAGES: usize = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackMessage {
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    /// Legacy display name some integrations still attach.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_profile: Option<SlackMessageProfile>,
}

/// Profile snippet Slack embeds on messages posted by workspace members.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackMessageProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile: SlackUserProfile,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackUserProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub display_name_normalized: Option<String>,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub real_name_normalized: Option<String>,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn conversation_history(
        &self,
        channel: &str,
        limit: u32,
    ) -> Result<Vec<SlackMessage>, UpstreamError>;

    /// `Ok(None)` when the workspace does not know the user.
    async fn user_info(&self, user_id: &str) -> Result<Option<SlackUser>, UpstreamError>;

    async fn list_members(&self) -> Result<Vec<SlackUser>, UpstreamError>;
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    messages: Vec<SlackMessage>,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    user: Option<SlackUser>,
}

#[derive(Debug, Deserialize)]
struct MembersResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    members: Vec<SlackUser>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: Option<String>,
}

fn api_error(error: Option<String>) -> UpstreamError {
    UpstreamError::Api(error.unwrap_or_else(|| "unknown_error".to_string()))
}

pub struct SlackClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl SlackClient {
    pub fn new(client: reqwest::Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let url = format!("{}/{}", self.base_url, method);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            error!("Slack {} returned {}", method, status);
            return Err(UpstreamError::Status(format!(
                "Slack API error: {}",
                status.as_u16()
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ChatProvider for SlackClient {
    async fn conversation_history(
        &self,
        channel: &str,
        limit: u32,
    ) -> Result<Vec<SlackMessage>, UpstreamError> {
        let resp: HistoryResponse = self
            .call(
                "conversations.history",
                &[("channel", channel.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        if !resp.ok {
            return Err(api_error(resp.error));
        }

        Ok(resp.messages)
    }

    async fn user_info(&self, user_id: &str) -> Result<Option<SlackUser>, UpstreamError> {
        let resp: UserInfoResponse = self
            .call("users.info", &[("user", user_id.to_string())])
            .await?;

        if !resp.ok {
            return match resp.error.as_deref() {
                Some("user_not_found") => Ok(None),
                _ => Err(api_error(resp.error)),
            };
        }

        Ok(resp.user)
    }

    async fn list_members(&self) -> Result<Vec<SlackUser>, UpstreamError> {
        let mut members = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_MEMBER_PAGES {
            let mut query = vec![("limit", MEMBERS_PAGE_SIZE.to_string())];
            if let Some(c) = &cursor {
                query.push(("cursor", c.clone()));
            }

            let resp: MembersResponse = self.call("users.list", &query).await?;
            if !resp.ok {
                return Err(api_error(resp.error));
            }

            members.extend(resp.members);

            cursor = resp
                .response_metadata
                .and_then(|m| m.next_cursor)
                .filter(|c| !c.is_empty());
            if cursor.is_none() {
                break;
            }
        }

        debug!("Loaded {} workspace members", members.len());
        Ok(members)
    }
}
