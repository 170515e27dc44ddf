use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use killfeed_domain::ports::{DirectoryClient, MembershipResolver};
use killfeed_domain::{AllianceId, CorporationId, PipelineResult};

/// Asks the directory on every call. No retries; errors propagate.
pub struct DirectoryMembershipResolver {
    directory: Arc<dyn DirectoryClient>,
}

impl DirectoryMembershipResolver {
    pub fn new(directory: Arc<dyn DirectoryClient>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl MembershipResolver for DirectoryMembershipResolver {
    async fn members_of(&self, alliance: AllianceId) -> PipelineResult<HashSet<CorporationId>> {
        let members = self.directory.alliance_corporations(alliance).await?;
        debug!(alliance_id = %alliance, count = members.len(), "resolved alliance members");
        Ok(members.into_iter().collect())
    }
}

struct CachedMembers {
    fetched_at: Instant,
    members: HashSet<CorporationId>,
}

#[derive(Default)]
struct CacheState {
    /// Bumped on every invalidation; fetches started earlier are not stored.
    generation: u64,
    entries: HashMap<AllianceId, CachedMembers>,
}

/// Remembers each alliance's members for `ttl`. Failures are not cached.
pub struct CachedMembershipResolver {
    inner: Arc<dyn MembershipResolver>,
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl CachedMembershipResolver {
    pub fn new(inner: Arc<dyn MembershipResolver>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }
}

#[async_trait]
impl MembershipResolver for CachedMembershipResolver {
    async fn members_of(&self, alliance: AllianceId) -> PipelineResult<HashSet<CorporationId>> {
        let generation = {
            let state = self.state.read().await;
            if let Some(cached) = state.entries.get(&alliance) {
                if cached.fetched_at.elapsed() < self.ttl {
                    return Ok(cached.members.clone());
                }
            }
            state.generation
        };

        let members = self.inner.members_of(alliance).await?;
        let mut state = self.state.write().await;
        if state.generation == generation {
            state.entries.insert(
                alliance,
                CachedMembers {
                    fetched_at: Instant::now(),
                    members: members.clone(),
                },
            );
        } else {
            debug!(alliance_id = %alliance, "watchlist changed during lookup, result not cached");
        }
        Ok(members)
    }

    async fn invalidate(&self) {
        {
            let mut state = self.state.write().await;
            state.generation = state.generation.wrapping_add(1);
            state.entries.clear();
        }
        self.inner.invalidate().await;
        debug!("alliance membership cache cleared");
    }
}

/// A ttl of zero keeps the uncached behaviour.
pub fn build_membership_resolver(
    directory: Arc<dyn DirectoryClient>,
    ttl: Duration,
) -> Arc<dyn MembershipResolver> {
    let direct: Arc<dyn MembershipResolver> = Arc::new(DirectoryMembershipResolver::new(directory));
    if ttl.is_zero() {
        return direct;
    }
    Arc::new(CachedMembershipResolver::new(direct, ttl))
}
