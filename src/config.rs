use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_LOCAL_JOBS_TTL_SECS: i64 = 6 * 60 * 60;
pub const DEFAULT_REMOTE_JOBS_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub bot_token: Option<String>,
    pub channel_id: Option<String>,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct AdzunaConfig {
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    pub api_base: String,
    pub location: String,
    pub keyword: String,
}

impl AdzunaConfig {
    /// Both halves of the credential pair, if present.
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.app_id, &self.app_key) {
            (Some(id), Some(key)) => Some((id.clone(), key.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub environment: String,
    pub upstream_timeout: Duration,
    pub local_jobs_ttl: chrono::Duration,
    pub remote_jobs_ttl: chrono::Duration,
    pub slack: SlackConfig,
    pub adzuna: AdzunaConfig,
    pub remoteok_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: "development".to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            local_jobs_ttl: chrono::Duration::seconds(DEFAULT_LOCAL_JOBS_TTL_SECS),
            remote_jobs_ttl: chrono::Duration::seconds(DEFAULT_REMOTE_JOBS_TTL_SECS),
            slack: SlackConfig {
                bot_token: None,
                channel_id: None,
                api_base: "https://slack.com/api".to_string(),
            },
            adzuna: AdzunaConfig {
                app_id: None,
                app_key: None,
                api_base: "https://api.adzuna.com/v1/api".to_string(),
                location: "reno nv".to_string(),
                keyword: "software engineer".to_string(),
            },
            remoteok_url: "https://remoteok.io/api".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let environment = get("ENVIRONMENT").unwrap_or_else(|| {
            if get("VERCEL").is_some() {
                "production".to_string()
            } else {
                defaults.environment.clone()
            }
        });

        Self {
            port: get("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            environment,
            upstream_timeout: get("UPSTREAM_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
            local_jobs_ttl: get("LOCAL_JOBS_CACHE_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .map(chrono::Duration::seconds)
                .unwrap_or(defaults.local_jobs_ttl),
            remote_jobs_ttl: get("REMOTE_JOBS_CACHE_TTL_SECS")
                .and_then(|v| v.parse().ok())
                .map(chrono::Duration::seconds)
                .unwrap_or(defaults.remote_jobs_ttl),
            slack: SlackConfig {
                bot_token: get("SLACK_BOT_TOKEN"),
                channel_id: get("SLACK_JOBS_CHANNEL_ID"),
                api_base: get("SLACK_API_BASE").unwrap_or(defaults.slack.api_base),
            },
            adzuna: AdzunaConfig {
                app_id: get("ADZUNA_APP_ID"),
                app_key: get("ADZUNA_APP_KEY"),
                api_base: get("ADZUNA_API_BASE").unwrap_or(defaults.adzuna.api_base),
                location: get("ADZUNA_WHERE").unwrap_or(defaults.adzuna.location),
                keyword: get("ADZUNA_WHAT").unwrap_or(defaults.adzuna.keyword),
            },
            remoteok_url: get("REMOTEOK_API_URL").unwrap_or(defaults.remoteok_url),
        }
    }
}
