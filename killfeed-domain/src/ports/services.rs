use std::collections::HashSet;

use async_trait::async_trait;

use crate::entities::{
    Alliance, Character, Constellation, Corporation, KillPackage, MessageHandle, Notification,
    Region, ServerStatus, ShipType, SolarSystem,
};
use crate::error::PipelineResult;
use crate::value_objects::{
    AllianceId, ChannelId, CharacterId, ConstellationId, CorporationId, Marker, RegionId,
    ShipTypeId, SolarSystemId,
};

/// Lookups against the game's public directory.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    async fn solar_system(&self, id: SolarSystemId) -> PipelineResult<SolarSystem>;
    async fn constellation(&self, id: ConstellationId) -> PipelineResult<Constellation>;
    async fn region(&self, id: RegionId) -> PipelineResult<Region>;
    async fn ship_type(&self, id: ShipTypeId) -> PipelineResult<ShipType>;
    async fn character(&self, id: CharacterId) -> PipelineResult<Character>;
    async fn corporation(&self, id: CorporationId) -> PipelineResult<Corporation>;
    async fn alliance(&self, id: AllianceId) -> PipelineResult<Alliance>;
    async fn alliance_corporations(&self, id: AllianceId) -> PipelineResult<Vec<CorporationId>>;
    async fn status(&self) -> PipelineResult<ServerStatus>;
}

#[async_trait]
pub trait MembershipResolver: Send + Sync {
    async fn members_of(&self, alliance: AllianceId) -> PipelineResult<HashSet<CorporationId>>;

    /// Drops any remembered membership. Called whenever the watchlist changes.
    async fn invalidate(&self) {}
}

#[async_trait]
pub trait NotificationPoster: Send + Sync {
    async fn post(
        &self,
        channel: ChannelId,
        notification: &Notification,
    ) -> anyhow::Result<MessageHandle>;
    async fn add_marker(&self, handle: &MessageHandle, marker: Marker) -> anyhow::Result<()>;
}

#[async_trait]
pub trait KillFeed: Send + Sync {
    /// Long-polls for the next package; `None` when the poll window passed empty.
    async fn next_package(&self) -> anyhow::Result<Option<KillPackage>>;
}
