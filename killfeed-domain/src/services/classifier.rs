use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::entities::{KillPackage, WatchKind};
use crate::error::{PipelineError, PipelineResult};
use crate::ports::{MembershipResolver, WatchlistRepository};
use crate::value_objects::{AllianceId, CorporationId, Relevancy};

/// Decides whether a killmail concerns the watchlist.
///
/// The watchlist is read and alliance membership is resolved on every call;
/// resolution is deferred until a direct corporation check misses, and then
/// happens once per alliance for the rest of the call. Any lookup failure
/// fails the classification instead of reporting `Irrelevant`.
pub struct RelevancyClassifier {
    watchlist: Arc<dyn WatchlistRepository>,
    membership: Arc<dyn MembershipResolver>,
}

impl RelevancyClassifier {
    pub fn new(
        watchlist: Arc<dyn WatchlistRepository>,
        membership: Arc<dyn MembershipResolver>,
    ) -> Self {
        Self {
            watchlist,
            membership,
        }
    }

    pub async fn classify(&self, package: &KillPackage) -> PipelineResult<Relevancy> {
        let mut watched = self.snapshot().await?;
        let resolver = self.membership.as_ref();

        if watched
            .contains(package.victim().corporation_id, resolver)
            .await?
        {
            return Ok(Relevancy::Lossmail);
        }

        for attacker in package.attackers() {
            let Some(corporation_id) = attacker.corporation_id else {
                continue;
            };
            if watched.contains(corporation_id, resolver).await? {
                return Ok(Relevancy::Killmail);
            }
        }

        Ok(Relevancy::Irrelevant)
    }

    pub async fn is_corp_relevant(&self, corporation_id: CorporationId) -> PipelineResult<bool> {
        let mut watched = self.snapshot().await?;
        watched
            .contains(corporation_id, self.membership.as_ref())
            .await
    }

    async fn snapshot(&self) -> PipelineResult<WatchSnapshot> {
        let corporations = self
            .watchlist
            .search(WatchKind::Corporation)
            .await
            .map_err(PipelineError::Storage)?
            .into_iter()
            .map(|entry| CorporationId(entry.id))
            .collect();
        let alliances = self
            .watchlist
            .search(WatchKind::Alliance)
            .await
            .map_err(PipelineError::Storage)?
            .into_iter()
            .map(|entry| AllianceId(entry.id))
            .collect();
        Ok(WatchSnapshot {
            corporations,
            alliances,
            members: None,
        })
    }
}

struct WatchSnapshot {
    corporations: HashSet<CorporationId>,
    alliances: Vec<AllianceId>,
    members: Option<HashSet<CorporationId>>,
}

impl WatchSnapshot {
    async fn contains(
        &mut self,
        corporation_id: CorporationId,
        resolver: &dyn MembershipResolver,
    ) -> PipelineResult<bool> {
        if self.corporations.contains(&corporation_id) {
            return Ok(true);
        }
        if self.members.is_none() {
            let sets = try_join_all(
                self.alliances
                    .iter()
                    .map(|alliance| resolver.members_of(*alliance)),
            )
            .await?;
            self.members = Some(sets.into_iter().flatten().collect());
        }
        Ok(self
            .members
            .as_ref()
            .is_some_and(|members| members.contains(&corporation_id)))
    }
}
