use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use killfeed_domain::ports::KillFeed;
use killfeed_domain::{KillPackage, RuntimeConfig};

#[derive(Debug, Deserialize)]
struct RedisQResponse {
    #[serde(default)]
    package: Option<Value>,
}

/// Long-poll client for the zKillboard RedisQ endpoint.
pub struct RedisQFeed {
    client: Client,
    url: String,
    queue_id: String,
    ttw_seconds: u64,
}

impl RedisQFeed {
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        // The server holds the request open for up to `ttw` seconds.
        let timeout = config.request_timeout_seconds.max(1) + config.redisq_ttw_seconds;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            url: config.redisq_url.clone(),
            queue_id: config.redisq_queue_id.clone(),
            ttw_seconds: config.redisq_ttw_seconds,
        })
    }
}

#[async_trait]
impl KillFeed for RedisQFeed {
    async fn next_package(&self) -> Result<Option<KillPackage>> {
        let ttw = self.ttw_seconds.to_string();
        let body = self
            .client
            .get(&self.url)
            .query(&[("queueID", self.queue_id.as_str()), ("ttw", ttw.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<Option<KillPackage>> {
    let response: RedisQResponse = serde_json::from_str(body)?;
    let Some(package) = response.package.filter(|value| !value.is_null()) else {
        return Ok(None);
    };
    let kill_id = package.get("killID").cloned().unwrap_or(Value::Null);
    serde_json::from_value(package)
        .map(Some)
        .map_err(|err| anyhow!("malformed package for killID {}: {}", kill_id, err))
}
