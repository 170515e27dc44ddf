// Runtime configuration snapshot shared through application state

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub data_path: String,
    pub channel_id: Option<u64>,
    pub esi_base_url: String,
    pub esi_datasource: String,
    pub user_agent: String,
    pub discord_api_base: String,
    pub discord_bot_token: Option<String>,
    pub feed_enabled: bool,
    pub redisq_url: String,
    pub redisq_queue_id: String,
    pub redisq_ttw_seconds: u64,
    pub request_timeout_seconds: u64,
    pub membership_cache_ttl_seconds: u64,
    pub max_concurrent_killmails: usize,
    pub max_body_bytes: u64,
}
