use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use killfeed_domain::ports::DirectoryClient;
use killfeed_domain::{
    Alliance, AllianceId, Character, CharacterId, Constellation, ConstellationId, Corporation,
    CorporationId, PipelineError, PipelineResult, Region, RegionId, RuntimeConfig, ServerStatus,
    ShipType, ShipTypeId, SolarSystem, SolarSystemId,
};

/// Directory client backed by the public ESI API.
pub struct EsiClient {
    client: Client,
    base_url: String,
    datasource: String,
}

impl EsiClient {
    pub fn new(config: &RuntimeConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(1)))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            base_url: config.esi_base_url.trim_end_matches('/').to_string(),
            datasource: config.esi_datasource.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/", self.base_url, path.trim_matches('/'))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        entity: &'static str,
        id: i64,
        path: &str,
    ) -> PipelineResult<T> {
        let url = self.endpoint(path);
        debug!(url = %url, "esi request");
        let response = self
            .client
            .get(&url)
            .query(&[("datasource", self.datasource.as_str())])
            .send()
            .await
            .map_err(|err| PipelineError::transport(format!("GET {}: {}", url, err)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PipelineError::not_found(entity, id));
        }
        if !status.is_success() {
            return Err(PipelineError::transport(format!(
                "GET {} responded {}",
                url, status
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|err| PipelineError::transport(format!("GET {}: {}", url, err)))?;
        decode(&url, &body)
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> PipelineResult<T> {
    serde_json::from_str(body)
        .map_err(|err| PipelineError::parse(format!("unexpected payload from {}: {}", url, err)))
}

#[async_trait]
impl DirectoryClient for EsiClient {
    async fn solar_system(&self, id: SolarSystemId) -> PipelineResult<SolarSystem> {
        self.fetch("solar_system", id.0, &format!("universe/systems/{}", id))
            .await
    }

    async fn constellation(&self, id: ConstellationId) -> PipelineResult<Constellation> {
        self.fetch(
            "constellation",
            id.0,
            &format!("universe/constellations/{}", id),
        )
        .await
    }

    async fn region(&self, id: RegionId) -> PipelineResult<Region> {
        self.fetch("region", id.0, &format!("universe/regions/{}", id))
            .await
    }

    async fn ship_type(&self, id: ShipTypeId) -> PipelineResult<ShipType> {
        self.fetch("type", id.0, &format!("universe/types/{}", id))
            .await
    }

    async fn character(&self, id: CharacterId) -> PipelineResult<Character> {
        self.fetch("character", id.0, &format!("characters/{}", id))
            .await
    }

    async fn corporation(&self, id: CorporationId) -> PipelineResult<Corporation> {
        self.fetch("corporation", id.0, &format!("corporations/{}", id))
            .await
    }

    async fn alliance(&self, id: AllianceId) -> PipelineResult<Alliance> {
        self.fetch("alliance", id.0, &format!("alliances/{}", id))
            .await
    }

    async fn alliance_corporations(&self, id: AllianceId) -> PipelineResult<Vec<CorporationId>> {
        self.fetch("alliance", id.0, &format!("alliances/{}/corporations", id))
            .await
    }

    async fn status(&self) -> PipelineResult<ServerStatus> {
        self.fetch("status", 0, "status").await
    }
}
