use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::external::adzuna::{AdzunaClient, LocalJobProvider};
use crate::external::remoteok::{RemoteJobProvider, RemoteOkClient};
use crate::external::slack::{ChatProvider, SlackClient};
use crate::external::{build_http_client, UpstreamError};
use crate::services::chat_service::ChatService;
use crate::services::job_aggregator::JobAggregator;
use crate::services::local_jobs_service::LocalJobsService;
use crate::services::remote_jobs_service::RemoteJobsService;
use crate::services::response_cache::ResponseCache;

#[derive(Clone)]
pub struct AppState {
    pub environment: String,
    pub chat: Arc<ChatService>,
    pub local_jobs: Arc<LocalJobsService>,
    pub remote_jobs: Arc<RemoteJobsService>,
    pub aggregator: Arc<JobAggregator>,
}

/// Upstream clients. `None` means the credentials for that upstream are missing.
pub struct Providers {
    pub chat: Option<Arc<dyn ChatProvider>>,
    pub local: Option<Arc<dyn LocalJobProvider>>,
    pub remote: Arc<dyn RemoteJobProvider>,
}

impl Providers {
    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        let client = build_http_client(config.upstream_timeout)?;

        let chat = match &config.slack.bot_token {
            Some(token) => Some(Arc::new(SlackClient::new(
                client.clone(),
                config.slack.api_base.clone(),
                token.clone(),
            )) as Arc<dyn ChatProvider>),
            None => {
                warn!("SLACK_BOT_TOKEN not set; /api/jobs will report a configuration error");
                None
            }
        };

        let local = match config.adzuna.credentials() {
            Some((app_id, app_key)) => Some(Arc::new(AdzunaClient::new(
                client.clone(),
                config.adzuna.api_base.clone(),
                app_id,
                app_key,
                config.adzuna.location.clone(),
                config.adzuna.keyword.clone(),
            )) as Arc<dyn LocalJobProvider>),
            None => {
                warn!("Adzuna credentials not set; local job searches will report a configuration error");
                None
            }
        };

        let remote: Arc<dyn RemoteJobProvider> =
            Arc::new(RemoteOkClient::new(client, config.remoteok_url.clone()));

        Ok(Self {
            chat,
            local,
            remote,
        })
    }
}

impl AppState {
    pub fn new(config: &AppConfig, providers: Providers) -> Self {
        let local_jobs = Arc::new(LocalJobsService::new(
            providers.local,
            ResponseCache::new(config.local_jobs_ttl),
        ));
        let remote_jobs = Arc::new(RemoteJobsService::new(
            providers.remote,
            ResponseCache::new(config.remote_jobs_ttl),
        ));
        let aggregator = Arc::new(JobAggregator::new(local_jobs.clone(), remote_jobs.clone()));

        info!(
            "Job caches ready (local TTL {}s, remote TTL {}s)",
            config.local_jobs_ttl.num_seconds(),
            config.remote_jobs_ttl.num_seconds()
        );

        Self {
            environment: config.environment.clone(),
            chat: Arc::new(ChatService::new(providers.chat, config.slack.channel_id.clone())),
            local_jobs,
            remote_jobs,
            aggregator,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        Ok(Self::new(config, Providers::from_config(config)?))
    }
}
