use std::sync::Arc;

use killfeed_domain::ports::{
    ConfigStore, DirectoryClient, MembershipResolver, NotificationPoster, WatchlistRepository,
};
use killfeed_domain::{ChannelId, RuntimeConfig};

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    /// Destination resolved from the config store at startup.
    pub channel_id: ChannelId,
    pub watchlist_repo: Arc<dyn WatchlistRepository>,
    pub config_store: Arc<dyn ConfigStore>,
    pub directory: Arc<dyn DirectoryClient>,
    pub membership: Arc<dyn MembershipResolver>,
    pub poster: Arc<dyn NotificationPoster>,
    pub metrics: Arc<Metrics>,
}
