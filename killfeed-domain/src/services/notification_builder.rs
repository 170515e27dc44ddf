use crate::entities::{EnrichedContext, KillPackage, Notification};
use crate::error::PipelineResult;
use crate::services::annotator::markers_for;
use crate::utils::{format_thousands, parse_killmail_time};
use crate::value_objects::{KillId, Relevancy, ShipTypeId};

const ZKILLBOARD_KILL_URL: &str = "https://zkillboard.com/kill";
const IMAGESERVER_TYPE_URL: &str = "https://imageserver.eveonline.com/Type";
const CURRENCY_UNIT: &str = "ISK";

pub fn kill_url(kill_id: KillId) -> String {
    format!("{}/{}/", ZKILLBOARD_KILL_URL, kill_id)
}

pub fn ship_thumbnail_url(ship_type_id: ShipTypeId) -> String {
    format!("{}/{}_64.png", IMAGESERVER_TYPE_URL, ship_type_id)
}

pub fn build_notification(
    package: &KillPackage,
    relevancy: Relevancy,
    context: &EnrichedContext,
) -> PipelineResult<Notification> {
    let timestamp = parse_killmail_time(&package.killmail.killmail_time)?;
    let identity = context.identity();

    let title = format!(
        "{} | {} | {}",
        context.solar_system, context.ship_type, identity
    );
    // Trailing zero-width space keeps an empty spacer line under the embed body.
    let description = format!(
        "{} lost their {} in {} ({})\nTotal Value: {} {}\n\u{200b}",
        identity,
        context.ship_type,
        context.solar_system,
        context.region,
        format_thousands(package.zkb.total_value),
        CURRENCY_UNIT,
    );

    Ok(Notification {
        title,
        description,
        url: kill_url(package.kill_id),
        timestamp,
        colour: relevancy.colour(),
        thumbnail_url: ship_thumbnail_url(package.victim().ship_type_id),
        markers: markers_for(relevancy),
    })
}
