use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use killfeed_application::commands::killmail_commands::{resolve_channel, CHANNEL_KEY};
use killfeed_application::membership::build_membership_resolver;
use killfeed_application::{AppState, Metrics};
use killfeed_domain::ports::{ConfigStore, DirectoryClient, KillFeed};
use killfeed_infrastructure::{AppConfig, DiscordPoster, EsiClient, JsonTableStore, RedisQFeed};

pub struct AppContext {
    pub state: AppState,
    /// `None` when the live feed is disabled in config.
    pub feed: Option<Arc<dyn KillFeed>>,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let store = Arc::new(JsonTableStore::open(&runtime_config.data_path).await?);
        if let Some(channel_id) = runtime_config.channel_id {
            store.set(CHANNEL_KEY, &channel_id.to_string()).await?;
        }
        let channel_id = resolve_channel(store.as_ref())
            .await
            .with_context(|| format!("no usable destination in {}", store.path().display()))?;
        info!(channel_id = %channel_id, "destination channel resolved");

        let directory: Arc<dyn DirectoryClient> = Arc::new(EsiClient::new(&runtime_config)?);
        let membership = build_membership_resolver(
            directory.clone(),
            Duration::from_secs(runtime_config.membership_cache_ttl_seconds),
        );
        let poster = Arc::new(DiscordPoster::new(&runtime_config)?);

        let feed: Option<Arc<dyn KillFeed>> = if runtime_config.feed_enabled {
            Some(Arc::new(RedisQFeed::new(&runtime_config)?))
        } else {
            None
        };

        let state = AppState {
            config: runtime_config,
            channel_id,
            watchlist_repo: store.clone(),
            config_store: store,
            directory,
            membership,
            poster,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state, feed })
    }
}
