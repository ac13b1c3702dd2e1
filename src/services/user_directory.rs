use std::collections::HashMap;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::external::slack::{ChatProvider, SlackMessage, SlackUser};

fn first_non_empty<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Display name for a directory entry, most human-friendly field first:
/// normalized display name, display name, normalized real name, real name,
/// username, then the raw id.
pub fn display_name_for(user: &SlackUser) -> Option<String> {
    let profile = &user.profile;
    first_non_empty([
        profile.display_name_normalized.as_deref(),
        profile.display_name.as_deref(),
        profile.real_name_normalized.as_deref(),
        profile.real_name.as_deref(),
        user.name.as_deref(),
        Some(user.id.as_str()),
    ])
}

/// Name carried on the message itself: the embedded profile's display and real
/// names, then the legacy `username` field.
pub fn name_from_message(message: &SlackMessage) -> Option<String> {
    let profile = message.user_profile.as_ref();
    first_non_empty([
        profile.and_then(|p| p.display_name.as_deref()),
        profile.and_then(|p| p.real_name.as_deref()),
        profile.and_then(|p| p.name.as_deref()),
        message.username.as_deref(),
    ])
}

/// User id to display name, built for one history request and dropped with it.
#[derive(Debug, Default)]
pub struct UserDirectory {
    names: HashMap<String, String>,
}

impl UserDirectory {
    /// Resolve every human author in `messages`.
    ///
    /// Each id is looked up individually (concurrently). Ids the per-user lookup
    /// cannot answer are matched against the workspace member list, which is
    /// fetched at most once. Lookup failures only degrade to the next source.
    pub async fn build(provider: &dyn ChatProvider, messages: &[SlackMessage]) -> Self {
        let mut ids: Vec<&str> = Vec::new();
        for message in messages.iter().filter(|m| m.bot_id.is_none()) {
            if let Some(user) = message.user.as_deref() {
                if !user.is_empty() && !ids.contains(&user) {
                    ids.push(user);
                }
            }
        }

        let mut names = HashMap::new();
        if ids.is_empty() {
            return Self { names };
        }

        let lookups = join_all(ids.iter().map(|&id| provider.user_info(id))).await;

        let mut unresolved: Vec<&str> = Vec::new();
        for (&id, lookup) in ids.iter().zip(lookups) {
            match lookup {
                Ok(Some(user)) => match display_name_for(&user) {
                    Some(name) => {
                        names.insert(id.to_string(), name);
                    }
                    None => unresolved.push(id),
                },
                Ok(None) => {
                    debug!("User {} not found via per-user lookup", id);
                    unresolved.push(id);
                }
                Err(e) => {
                    warn!("Per-user lookup failed for {}: {}", id, e);
                    unresolved.push(id);
                }
            }
        }

        if !unresolved.is_empty() {
            match provider.list_members().await {
                Ok(members) => {
                    for member in members.iter().filter(|m| unresolved.contains(&m.id.as_str())) {
                        if let Some(name) = display_name_for(member) {
                            names.insert(member.id.clone(), name);
                        }
                    }
                }
                Err(e) => warn!("Member listing failed, {} users unresolved: {}", unresolved.len(), e),
            }
        }

        Self { names }
    }

    pub fn get(&self, user_id: &str) -> Option<&str> {
        self.names.get(user_id).map(String::as_str)
    }

    /// Name for the author of `message`; `None` for bots and unresolvable users.
    pub fn resolve(&self, message: &SlackMessage) -> Option<String> {
        if message.bot_id.is_some() {
            return None;
        }
        let user = message.user.as_deref()?;
        self.get(user)
            .map(str::to_string)
            .or_else(|| name_from_message(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::slack::{SlackMessageProfile, SlackUserProfile};
    use crate::services::test_support::{slack_message, slack_user, StubChatProvider};

    #[test]
    fn test_display_name_priority() {
        let mut user = SlackUser {
            id: "U1".into(),
            name: Some("alex".into()),
            profile: SlackUserProfile {
                display_name: Some("Alex".into()),
                display_name_normalized: Some("Alex N".into()),
                real_name: Some("Alex Doe".into()),
                real_name_normalized: Some("Alex Doe N".into()),
            },
        };
        assert_eq!(display_name_for(&user).as_deref(), Some("Alex N"));

        user.profile.display_name_normalized = Some("  ".into());
        assert_eq!(display_name_for(&user).as_deref(), Some("Alex"));

        user.profile.display_name = None;
        assert_eq!(display_name_for(&user).as_deref(), Some("Alex Doe N"));

        user.profile.real_name_normalized = None;
        assert_eq!(display_name_for(&user).as_deref(), Some("Alex Doe"));

        user.profile.real_name = Some(String::new());
        assert_eq!(display_name_for(&user).as_deref(), Some("alex"));

        user.name = None;
        assert_eq!(display_name_for(&user).as_deref(), Some("U1"));
    }

    #[test]
    fn test_name_from_message_fallbacks() {
        let mut message = slack_message("1.0", "hi", Some("U1"));
        assert_eq!(name_from_message(&message), None);

        message.username = Some("legacy-bot-name".into());
        assert_eq!(name_from_message(&message).as_deref(), Some("legacy-bot-name"));

        message.user_profile = Some(SlackMessageProfile {
            display_name: Some(String::new()),
            real_name: Some("Jordan Smith".into()),
            name: Some("jordan".into()),
        });
        assert_eq!(name_from_message(&message).as_deref(), Some("Jordan Smith"));
    }

    #[tokio::test]
    async fn test_per_user_lookup_wins() {
        let mut provider = StubChatProvider::default();
        provider.directory.insert("U1".into(), slack_user("U1", "Sam"));
        let messages = vec![
            slack_message("1.0", "a", Some("U1")),
            slack_message("2.0", "b", Some("U1")),
        ];

        let directory = UserDirectory::build(&provider, &messages).await;
        assert_eq!(directory.get("U1"), Some("Sam"));
        assert_eq!(provider.info_calls(), 1);
        assert_eq!(provider.member_calls(), 0);
    }

    #[tokio::test]
    async fn test_falls_back_to_member_listing() {
        let provider = StubChatProvider {
            members: vec![slack_user("U1", "Alex"), slack_user("U2", "Other")],
            ..StubChatProvider::default()
        };
        let messages = vec![slack_message("1.0", "hiring", Some("U1"))];

        let directory = UserDirectory::build(&provider, &messages).await;
        assert_eq!(directory.resolve(&messages[0]).as_deref(), Some("Alex"));
        assert_eq!(directory.get("U2"), None);
    }

    #[tokio::test]
    async fn test_lookup_error_degrades_to_member_listing() {
        let provider = StubChatProvider {
            failing_lookups: vec!["U1".into()],
            members: vec![slack_user("U1", "Alex")],
            ..StubChatProvider::default()
        };
        let messages = vec![
            slack_message("1.0", "a", Some("U1")),
            slack_message("2.0", "b", Some("U3")),
        ];

        let directory = UserDirectory::build(&provider, &messages).await;
        assert_eq!(directory.get("U1"), Some("Alex"));
        assert_eq!(provider.member_calls(), 1);
    }

    #[tokio::test]
    async fn test_message_fields_are_last_resort() {
        let provider = StubChatProvider {
            members_error: Some("ratelimited".into()),
            ..StubChatProvider::default()
        };
        let mut message = slack_message("1.0", "a", Some("U9"));
        message.user_profile = Some(SlackMessageProfile {
            display_name: Some("Casey".into()),
            ..SlackMessageProfile::default()
        });
        let anonymous = slack_message("2.0", "b", Some("U10"));

        let directory = UserDirectory::build(&provider, &[message.clone(), anonymous.clone()]).await;
        assert_eq!(directory.resolve(&message).as_deref(), Some("Casey"));
        assert_eq!(directory.resolve(&anonymous), None);
    }

    #[tokio::test]
    async fn test_bots_and_userless_messages_are_skipped() {
        let provider = StubChatProvider::default();
        let mut bot = slack_message("1.0", "deploy done", Some("U5"));
        bot.bot_id = Some("B1".into());
        let system = slack_message("2.0", "topic changed", None);

        let directory = UserDirectory::build(&provider, &[bot.clone(), system.clone()]).await;
        assert_eq!(provider.info_calls(), 0);
        assert_eq!(provider.member_calls(), 0);
        assert_eq!(directory.resolve(&bot), None);
        assert_eq!(directory.resolve(&system), None);
    }
}
