use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use killfeed_domain::RuntimeConfig;

use crate::config::validation::validate_http_url;

pub const CONFIG_PATH_ENV: &str = "KILLFEED_CONFIG";
const MAX_REDISQ_TTW_SECONDS: u64 = 10;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
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

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            data_path: "./killfeed.json".to_string(),
            channel_id: None,
            esi_base_url: "https://esi.evetech.net/latest".to_string(),
            esi_datasource: "tranquility".to_string(),
            user_agent: format!("killfeed/{}", env!("CARGO_PKG_VERSION")),
            discord_api_base: "https://discord.com/api/v10".to_string(),
            discord_bot_token: None,
            feed_enabled: true,
            redisq_url: "https://zkillredisq.stream/listen.php".to_string(),
            redisq_queue_id: "killfeed".to_string(),
            redisq_ttw_seconds: 10,
            request_timeout_seconds: 15,
            membership_cache_ttl_seconds: 300,
            max_concurrent_killmails: 8,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::from_toml(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        self.api_token = non_blank(self.api_token.take());
        self.discord_bot_token = non_blank(self.discord_bot_token.take());
        if let Some(channel_id) = self.channel_id {
            if channel_id == 0 {
                self.channel_id = None;
            }
        }
        self.esi_base_url = self.esi_base_url.trim().trim_end_matches('/').to_string();
        self.discord_api_base = self
            .discord_api_base
            .trim()
            .trim_end_matches('/')
            .to_string();
        self.redisq_queue_id = self.redisq_queue_id.trim().to_string();
        self.user_agent = self.user_agent.trim().to_string();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_path = resolve_path(base, &self.data_path);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.data_path.trim().is_empty() {
            return Err(anyhow!("data_path must not be empty"));
        }
        validate_http_url("esi_base_url", &self.esi_base_url)?;
        validate_http_url("discord_api_base", &self.discord_api_base)?;
        validate_http_url("redisq_url", &self.redisq_url)?;
        if self.user_agent.is_empty() {
            return Err(anyhow!("user_agent must not be empty"));
        }
        if self.discord_bot_token.is_none() {
            return Err(anyhow!("discord_bot_token must be set"));
        }
        if self.feed_enabled && self.redisq_queue_id.is_empty() {
            return Err(anyhow!("redisq_queue_id must not be empty when the feed is enabled"));
        }
        if self.redisq_ttw_seconds == 0 || self.redisq_ttw_seconds > MAX_REDISQ_TTW_SECONDS {
            return Err(anyhow!(
                "redisq_ttw_seconds must be between 1 and {}",
                MAX_REDISQ_TTW_SECONDS
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.max_concurrent_killmails == 0 {
            return Err(anyhow!("max_concurrent_killmails must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            data_path: self.data_path.clone(),
            channel_id: self.channel_id,
            esi_base_url: self.esi_base_url.clone(),
            esi_datasource: self.esi_datasource.clone(),
            user_agent: self.user_agent.clone(),
            discord_api_base: self.discord_api_base.clone(),
            discord_bot_token: self.discord_bot_token.clone(),
            feed_enabled: self.feed_enabled,
            redisq_url: self.redisq_url.clone(),
            redisq_queue_id: self.redisq_queue_id.clone(),
            redisq_ttw_seconds: self.redisq_ttw_seconds,
            request_timeout_seconds: self.request_timeout_seconds,
            membership_cache_ttl_seconds: self.membership_cache_ttl_seconds,
            max_concurrent_killmails: self.max_concurrent_killmails,
            max_body_bytes: self.max_body_bytes,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("KILLFEED_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("KILLFEED_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("KILLFEED_DATA_PATH") {
            self.data_path = value;
        }
        if let Ok(value) = env::var("KILLFEED_CHANNEL_ID") {
            self.channel_id = value.trim().parse().ok();
        }
        if let Ok(value) = env::var("KILLFEED_ESI_BASE_URL") {
            self.esi_base_url = value;
        }
        if let Ok(value) = env::var("KILLFEED_ESI_DATASOURCE") {
            self.esi_datasource = value;
        }
        if let Ok(value) = env::var("KILLFEED_USER_AGENT") {
            self.user_agent = value;
        }
        if let Ok(value) = env::var("KILLFEED_DISCORD_API_BASE") {
            self.discord_api_base = value;
        }
        if let Ok(value) = env::var("KILLFEED_DISCORD_BOT_TOKEN") {
            self.discord_bot_token = Some(value);
        }
        if let Ok(value) = env::var("KILLFEED_FEED_ENABLED") {
            self.feed_enabled = value.parse().unwrap_or(self.feed_enabled);
        }
        if let Ok(value) = env::var("KILLFEED_REDISQ_URL") {
            self.redisq_url = value;
        }
        if let Ok(value) = env::var("KILLFEED_REDISQ_QUEUE_ID") {
            self.redisq_queue_id = value;
        }
        if let Ok(value) = env::var("KILLFEED_REDISQ_TTW_SECONDS") {
            self.redisq_ttw_seconds = value.parse().unwrap_or(self.redisq_ttw_seconds);
        }
        if let Ok(value) = env::var("KILLFEED_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("KILLFEED_MEMBERSHIP_CACHE_TTL_SECONDS") {
            self.membership_cache_ttl_seconds =
                value.parse().unwrap_or(self.membership_cache_ttl_seconds);
        }
        if let Ok(value) = env::var("KILLFEED_MAX_CONCURRENT_KILLMAILS") {
            self.max_concurrent_killmails =
                value.parse().unwrap_or(self.max_concurrent_killmails);
        }
        if let Ok(value) = env::var("KILLFEED_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
