use tracing::debug;

use killfeed_domain::ports::DirectoryClient;
use killfeed_domain::{EnrichedContext, KillPackage, PipelineResult};

/// Resolves the names a notification needs.
///
/// System, constellation and region are chained: each lookup needs the ID
/// returned by the previous one. Any failed lookup aborts the whole context.
pub async fn fetch_context(
    directory: &dyn DirectoryClient,
    package: &KillPackage,
) -> PipelineResult<EnrichedContext> {
    let victim = package.victim();

    let system = directory
        .solar_system(package.killmail.solar_system_id)
        .await?;
    let constellation = directory.constellation(system.constellation_id).await?;
    let region = directory.region(constellation.region_id).await?;

    let ship_type = directory.ship_type(victim.ship_type_id).await?;

    // Structures have no character.
    let character = match victim.character_id {
        Some(character_id) => Some(directory.character(character_id).await?.name),
        None => None,
    };

    let affiliation = match victim.alliance_id {
        Some(alliance_id) => directory.alliance(alliance_id).await?.name,
        None => directory.corporation(victim.corporation_id).await?.name,
    };

    debug!(kill_id = %package.kill_id, system = %system.name, "killmail context resolved");

    Ok(EnrichedContext {
        solar_system: system.name,
        region: region.name,
        ship_type: ship_type.name,
        character,
        affiliation,
    })
}
