use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use killfeed_domain::ports::NotificationPoster;
use killfeed_domain::{ChannelId, Marker, MessageHandle, MessageId, Notification, RuntimeConfig};

#[derive(Debug, Deserialize)]
struct CreatedMessage {
    id: String,
}

/// Posts notifications as embeds through the Discord REST API.
pub struct DiscordPoster {
    client: Client,
    api_base: String,
    authorization: String,
}

impl DiscordPoster {
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        let token = config
            .discord_bot_token
            .as_deref()
            .ok_or_else(|| anyhow!("discord_bot_token not configured"))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(1)))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            api_base: config.discord_api_base.trim_end_matches('/').to_string(),
            authorization: format!("Bot {}", token),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("discord_api_base cannot be a base url"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl NotificationPoster for DiscordPoster {
    async fn post(&self, channel: ChannelId, notification: &Notification) -> Result<MessageHandle> {
        let channel_id = channel.to_string();
        let url = self.url(&["channels", &channel_id, "messages"])?;
        let created: CreatedMessage = self
            .client
            .post(url)
            .header(AUTHORIZATION, &self.authorization)
            .json(&embed_payload(notification))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let message_id = created
            .id
            .parse::<u64>()
            .map_err(|_| anyhow!("discord returned non-numeric message id '{}'", created.id))?;
        debug!(channel_id = %channel, message_id, "notification posted");
        Ok(MessageHandle {
            channel_id: channel,
            message_id: MessageId(message_id),
        })
    }

    async fn add_marker(&self, handle: &MessageHandle, marker: Marker) -> Result<()> {
        let channel_id = handle.channel_id.to_string();
        let message_id = handle.message_id.to_string();
        let url = self.url(&[
            "channels",
            &channel_id,
            "messages",
            &message_id,
            "reactions",
            marker.glyph(),
            "@me",
        ])?;
        self.client
            .put(url)
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_LENGTH, "0")
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

fn embed_payload(notification: &Notification) -> Value {
    json!({
        "embeds": [{
            "title": notification.title,
            "description": notification.description,
            "url": notification.url,
            "timestamp": notification.timestamp.to_rfc3339(),
            "color": notification.colour.0,
            "thumbnail": { "url": notification.thumbnail_url },
        }]
    })
}
