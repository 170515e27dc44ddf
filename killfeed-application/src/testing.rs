// In-memory fakes of the ports, shared by the application tests

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;

use killfeed_domain::{
    Alliance, AllianceId, Attacker, ChannelId, Character, CharacterId, ConfigStore,
    Constellation, ConstellationId, Corporation, CorporationId, DirectoryClient, KillId,
    KillPackage, Killmail, Marker, MessageHandle, MessageId, Notification, NotificationPoster,
    PipelineError, PipelineResult, Region, RegionId, RuntimeConfig, ServerStatus, ShipType,
    ShipTypeId, SolarSystem, SolarSystemId, Victim, WatchEntry, WatchKind, WatchlistRepository,
    ZkbMeta,
};

use crate::membership::DirectoryMembershipResolver;
use crate::{AppState, Metrics};

pub const SYSTEM: SolarSystemId = SolarSystemId(30002187);
pub const CONSTELLATION: ConstellationId = ConstellationId(20000322);
pub const REGION: RegionId = RegionId(10000043);
pub const RIFTER: ShipTypeId = ShipTypeId(587);
pub const PILOT: CharacterId = CharacterId(2112000001);
pub const WATCHED_CORP: CorporationId = CorporationId(98000001);
pub const WATCHED_ALLIANCE: AllianceId = AllianceId(99000001);
pub const ALLIANCE_MEMBER: CorporationId = CorporationId(98000050);
pub const STRANGER: CorporationId = CorporationId(1000125);

#[derive(Default)]
pub struct FakeDirectory {
    pub corporations: HashMap<CorporationId, String>,
    pub alliances: HashMap<AllianceId, String>,
    pub members: HashMap<AllianceId, Vec<CorporationId>>,
    pub fail_membership: bool,
    pub fail_region: bool,
    pub calls: AtomicUsize,
    pub membership_calls: AtomicUsize,
}

impl FakeDirectory {
    pub fn standard() -> Self {
        Self {
            corporations: HashMap::from([
                (WATCHED_CORP, "Red Corp".to_string()),
                (ALLIANCE_MEMBER, "Member Corp".to_string()),
                (STRANGER, "Stranger Corp".to_string()),
            ]),
            alliances: HashMap::from([(WATCHED_ALLIANCE, "Blue Alliance".to_string())]),
            members: HashMap::from([(WATCHED_ALLIANCE, vec![ALLIANCE_MEMBER])]),
            ..Self::default()
        }
    }

    /// Lookups other than alliance membership.
    pub fn enrichment_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn membership_calls(&self) -> usize {
        self.membership_calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DirectoryClient for FakeDirectory {
    async fn solar_system(&self, id: SolarSystemId) -> PipelineResult<SolarSystem> {
        self.hit();
        if id != SYSTEM {
            return Err(PipelineError::not_found("solar_system", id.0));
        }
        Ok(SolarSystem {
            name: "Amarr".to_string(),
            constellation_id: CONSTELLATION,
        })
    }

    async fn constellation(&self, id: ConstellationId) -> PipelineResult<Constellation> {
        self.hit();
        if id != CONSTELLATION {
            return Err(PipelineError::not_found("constellation", id.0));
        }
        Ok(Constellation {
            name: "Throne Worlds".to_string(),
            region_id: REGION,
        })
    }

    async fn region(&self, id: RegionId) -> PipelineResult<Region> {
        self.hit();
        if self.fail_region {
            return Err(PipelineError::transport("region lookup timed out"));
        }
        if id != REGION {
            return Err(PipelineError::not_found("region", id.0));
        }
        Ok(Region {
            name: "Domain".to_string(),
        })
    }

    async fn ship_type(&self, id: ShipTypeId) -> PipelineResult<ShipType> {
        self.hit();
        if id != RIFTER {
            return Err(PipelineError::not_found("type", id.0));
        }
        Ok(ShipType {
            name: "Rifter".to_string(),
        })
    }

    async fn character(&self, id: CharacterId) -> PipelineResult<Character> {
        self.hit();
        if id != PILOT {
            return Err(PipelineError::not_found("character", id.0));
        }
        Ok(Character {
            name: "Jane Doe".to_string(),
        })
    }

    async fn corporation(&self, id: CorporationId) -> PipelineResult<Corporation> {
        self.hit();
        self.corporations
            .get(&id)
            .map(|name| Corporation {
                name: name.clone(),
                ticker: String::new(),
            })
            .ok_or_else(|| PipelineError::not_found("corporation", id.0))
    }

    async fn alliance(&self, id: AllianceId) -> PipelineResult<Alliance> {
        self.hit();
        self.alliances
            .get(&id)
            .map(|name| Alliance {
                name: name.clone(),
                ticker: String::new(),
            })
            .ok_or_else(|| PipelineError::not_found("alliance", id.0))
    }

    async fn alliance_corporations(&self, id: AllianceId) -> PipelineResult<Vec<CorporationId>> {
        self.membership_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_membership {
            return Err(PipelineError::transport("connection refused"));
        }
        Ok(self.members.get(&id).cloned().unwrap_or_default())
    }

    async fn status(&self) -> PipelineResult<ServerStatus> {
        Ok(ServerStatus {
            players: 20000,
            server_version: "test".to_string(),
        })
    }
}

#[derive(Default)]
pub struct MemoryWatchlist {
    entries: Mutex<Vec<WatchEntry>>,
}

impl MemoryWatchlist {
    pub fn with(entries: Vec<WatchEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl WatchlistRepository for MemoryWatchlist {
    async fn search(&self, kind: WatchKind) -> anyhow::Result<Vec<WatchEntry>> {
        let entries = self.entries.lock().map_err(|_| anyhow!("poisoned"))?;
        Ok(entries.iter().filter(|e| e.kind == kind).copied().collect())
    }

    async fn list(&self) -> anyhow::Result<Vec<WatchEntry>> {
        let entries = self.entries.lock().map_err(|_| anyhow!("poisoned"))?;
        Ok(entries.clone())
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

#[derive(Default)]
pub struct MemoryConfigStore {
    values: Mutex<BTreeMap<String, String>>,
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let values = self.values.lock().map_err(|_| anyhow!("poisoned"))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self.values.lock().map_err(|_| anyhow!("poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPoster {
    pub posts: Mutex<Vec<(ChannelId, Notification)>>,
    pub markers: Mutex<Vec<(MessageHandle, Marker)>>,
    pub fail_markers: bool,
}

#[async_trait]
impl NotificationPoster for RecordingPoster {
    async fn post(
        &self,
        channel: ChannelId,
        notification: &Notification,
    ) -> anyhow::Result<MessageHandle> {
        let mut posts = self.posts.lock().map_err(|_| anyhow!("poisoned"))?;
        posts.push((channel, notification.clone()));
        Ok(MessageHandle {
            channel_id: channel,
            message_id: MessageId(posts.len() as u64),
        })
    }

    async fn add_marker(&self, handle: &MessageHandle, marker: Marker) -> anyhow::Result<()> {
        if self.fail_markers {
            return Err(anyhow!("missing permissions"));
        }
        let mut markers = self.markers.lock().map_err(|_| anyhow!("poisoned"))?;
        markers.push((*handle, marker));
        Ok(())
    }
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        api_token: None,
        data_path: "./killfeed.json".to_string(),
        channel_id: None,
        esi_base_url: "http://esi.invalid/latest".to_string(),
        esi_datasource: "tranquility".to_string(),
        user_agent: "killfeed-tests".to_string(),
        discord_api_base: "http://discord.invalid/api/v10".to_string(),
        discord_bot_token: None,
        feed_enabled: false,
        redisq_url: "http://redisq.invalid/listen.php".to_string(),
        redisq_queue_id: "killfeed-tests".to_string(),
        redisq_ttw_seconds: 1,
        request_timeout_seconds: 5,
        membership_cache_ttl_seconds: 0,
        max_concurrent_killmails: 4,
        max_body_bytes: 1024 * 1024,
    }
}

pub struct TestHarness {
    pub state: AppState,
    pub directory: Arc<FakeDirectory>,
    pub poster: Arc<RecordingPoster>,
}

pub fn harness(directory: FakeDirectory, poster: RecordingPoster) -> TestHarness {
    let directory = Arc::new(directory);
    let poster = Arc::new(poster);
    let watchlist = MemoryWatchlist::with(vec![
        WatchEntry::corporation(WATCHED_CORP),
        WatchEntry::alliance(WATCHED_ALLIANCE),
    ]);
    let state = AppState {
        config: runtime_config(),
        channel_id: ChannelId(845040859476394067),
        watchlist_repo: Arc::new(watchlist),
        config_store: Arc::new(MemoryConfigStore::default()),
        directory: directory.clone(),
        membership: Arc::new(DirectoryMembershipResolver::new(directory.clone())),
        poster: poster.clone(),
        metrics: Arc::new(Metrics::default()),
    };
    TestHarness {
        state,
        directory,
        poster,
    }
}

pub fn attacker(corporation_id: Option<CorporationId>) -> Attacker {
    Attacker {
        corporation_id,
        ..Attacker::default()
    }
}

pub fn package(victim: Victim, attackers: Vec<Attacker>, total_value: f64) -> KillPackage {
    KillPackage {
        kill_id: KillId(91234567),
        killmail: Killmail {
            killmail_time: "2021-05-24T18:03:11Z".to_string(),
            solar_system_id: SYSTEM,
            victim,
            attackers,
        },
        zkb: ZkbMeta {
            total_value,
            ..ZkbMeta::default()
        },
    }
}

pub fn victim(corporation_id: CorporationId, character_id: Option<CharacterId>) -> Victim {
    Victim {
        corporation_id,
        alliance_id: None,
        character_id,
        ship_type_id: RIFTER,
        damage_taken: 0,
    }
}
