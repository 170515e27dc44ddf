// Minimal port stubs for handler tests

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;

use killfeed_application::membership::DirectoryMembershipResolver;
use killfeed_application::{AppState, Metrics};
use killfeed_domain::{
    Alliance, AllianceId, Attacker, ChannelId, Character, CharacterId, ConfigStore,
    Constellation, ConstellationId, Corporation, CorporationId, DirectoryClient, KillId,
    KillPackage, Killmail, Marker, MessageHandle, Notification, NotificationPoster,
    PipelineError, PipelineResult, Region, RegionId, RuntimeConfig, ServerStatus, ShipType,
    ShipTypeId, SolarSystem, SolarSystemId, Victim, WatchEntry, WatchKind, WatchlistRepository,
    ZkbMeta,
};

pub fn runtime_config(api_token: Option<&str>) -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        api_token: api_token.map(str::to_string),
        data_path: "./killfeed.json".to_string(),
        channel_id: Some(1),
        esi_base_url: "https://esi.evetech.net/latest".to_string(),
        esi_datasource: "tranquility".to_string(),
        user_agent: "killfeed-tests".to_string(),
        discord_api_base: "https://discord.com/api/v10".to_string(),
        discord_bot_token: Some("token".to_string()),
        feed_enabled: false,
        redisq_url: "https://zkillredisq.stream/listen.php".to_string(),
        redisq_queue_id: "tests".to_string(),
        redisq_ttw_seconds: 1,
        request_timeout_seconds: 1,
        membership_cache_ttl_seconds: 0,
        max_concurrent_killmails: 1,
        max_body_bytes: 1024 * 1024,
    }
}

/// Only `status` is answered; every lookup reports not found.
pub struct StubDirectory {
    pub online: bool,
}

#[async_trait]
impl DirectoryClient for StubDirectory {
    async fn solar_system(&self, id: SolarSystemId) -> PipelineResult<SolarSystem> {
        Err(PipelineError::not_found("solar_system", id.0))
    }

    async fn constellation(&self, id: ConstellationId) -> PipelineResult<Constellation> {
        Err(PipelineError::not_found("constellation", id.0))
    }

    async fn region(&self, id: RegionId) -> PipelineResult<Region> {
        Err(PipelineError::not_found("region", id.0))
    }

    async fn ship_type(&self, id: ShipTypeId) -> PipelineResult<ShipType> {
        Err(PipelineError::not_found("ship_type", id.0))
    }

    async fn character(&self, id: CharacterId) -> PipelineResult<Character> {
        Err(PipelineError::not_found("character", id.0))
    }

    async fn corporation(&self, id: CorporationId) -> PipelineResult<Corporation> {
        Err(PipelineError::not_found("corporation", id.0))
    }

    async fn alliance(&self, id: AllianceId) -> PipelineResult<Alliance> {
        Err(PipelineError::not_found("alliance", id.0))
    }

    async fn alliance_corporations(&self, _id: AllianceId) -> PipelineResult<Vec<CorporationId>> {
        Ok(Vec::new())
    }

    async fn status(&self) -> PipelineResult<ServerStatus> {
        if self.online {
            Ok(ServerStatus {
                players: 21000,
                server_version: "2150001".to_string(),
            })
        } else {
            Err(PipelineError::transport("directory offline"))
        }
    }
}

#[derive(Default)]
pub struct MemoryWatchlist {
    entries: Mutex<Vec<WatchEntry>>,
}

#[async_trait]
impl WatchlistRepository for MemoryWatchlist {
    async fn search(&self, kind: WatchKind) -> anyhow::Result<Vec<WatchEntry>> {
        let entries = self.entries.lock().map_err(|_| anyhow!("poisoned"))?;
        Ok(entries.iter().filter(|e| e.kind == kind).copied().collect())
    }

    async fn list(&self) -> anyhow::Result<Vec<WatchEntry>> {
        Ok(self.entries.lock().map_err(|_| anyhow!("poisoned"))?.clone())
    }

    async fn insert(&self, entry: WatchEntry) -> anyhow::Result<bool> {
        let mut entries = self.entries.lock().map_err(|_| anyhow!("poisoned"))?;
        if entries.contains(&entry) {
            return Ok(false);
        }
        entries.push(entry);
        Ok(true)
    }

    async fn remove(&self, entry: WatchEntry) -> anyhow::Result<bool> {
        let mut entries = self.entries.lock().map_err(|_| anyhow!("poisoned"))?;
        let before = entries.len();
        entries.retain(|e| *e != entry);
        Ok(entries.len() != before)
    }
}

pub struct EmptyConfigStore;

#[async_trait]
impl ConfigStore for EmptyConfigStore {
    async fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct RefusingPoster;

#[async_trait]
impl NotificationPoster for RefusingPoster {
    async fn post(&self, _channel: ChannelId, _notification: &Notification) -> anyhow::Result<MessageHandle> {
        Err(anyhow!("posting disabled in tests"))
    }

    async fn add_marker(&self, _handle: &MessageHandle, _marker: Marker) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn state_with(directory: StubDirectory, api_token: Option<&str>) -> AppState {
    let directory: Arc<dyn DirectoryClient> = Arc::new(directory);
    AppState {
        config: runtime_config(api_token),
        channel_id: ChannelId(1),
        watchlist_repo: Arc::new(MemoryWatchlist::default()),
        config_store: Arc::new(EmptyConfigStore),
        membership: Arc::new(DirectoryMembershipResolver::new(directory.clone())),
        directory,
        poster: Arc::new(RefusingPoster),
        metrics: Arc::new(Metrics::default()),
    }
}

pub fn sample_package() -> KillPackage {
    KillPackage {
        kill_id: KillId(91234567),
        killmail: Killmail {
            killmail_time: "2021-05-24T18:03:11Z".to_string(),
            solar_system_id: SolarSystemId(30002187),
            victim: Victim {
                corporation_id: CorporationId(1000125),
                alliance_id: None,
                character_id: None,
                ship_type_id: ShipTypeId(587),
                damage_taken: 0,
            },
            attackers: vec![Attacker {
                corporation_id: Some(CorporationId(1000126)),
                ..Attacker::default()
            }],
        },
        zkb: ZkbMeta::default(),
    }
}

