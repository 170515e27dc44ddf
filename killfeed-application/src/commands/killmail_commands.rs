use tracing::{debug, error, info, warn};

use killfeed_domain::ports::ConfigStore;
use killfeed_domain::services::{build_notification, kill_url, RelevancyClassifier};
use killfeed_domain::{
    ChannelId, KillPackage, KillmailOutcome, Marker, MessageHandle, PipelineError,
    PipelineResult, PipelineStage, StageError,
};

use crate::enrichment::fetch_context;
use crate::AppState;

pub const CHANNEL_KEY: &str = "channel";

/// Reads the destination channel from the config store.
///
/// Called once at startup: without a destination nothing can ever be posted.
pub async fn resolve_channel(store: &dyn ConfigStore) -> PipelineResult<ChannelId> {
    let raw = store
        .get(CHANNEL_KEY)
        .await
        .map_err(PipelineError::Storage)?
        .ok_or_else(|| PipelineError::config("destination channel is not configured"))?;
    raw.trim()
        .parse::<u64>()
        .map(ChannelId)
        .map_err(|_| PipelineError::config(format!("invalid channel id '{}'", raw)))
}

/// Runs one killmail through classify, enrich, build, post and annotate.
pub async fn process_killmail(
    state: &AppState,
    package: &KillPackage,
) -> Result<KillmailOutcome, StageError> {
    state.metrics.record_received();
    let result = run_pipeline(state, package).await;
    match &result {
        Ok(KillmailOutcome::Dropped) => state.metrics.record_dropped(),
        Ok(KillmailOutcome::Posted { .. }) => state.metrics.record_posted(),
        Err(_) => state.metrics.record_failed(),
    }
    result
}

/// Fire-and-forget entry point used by the feed: logs instead of returning.
pub async fn handle_killmail(state: AppState, package: KillPackage) {
    match process_killmail(&state, &package).await {
        Ok(KillmailOutcome::Dropped) => {}
        Ok(KillmailOutcome::Posted { relevancy, handle }) => {
            info!(
                kill_id = %package.kill_id,
                relevancy = %relevancy,
                message_id = %handle.message_id,
                "killmail posted"
            );
        }
        Err(err) => {
            error!(
                kill_id = %err.kill_id,
                stage = %err.stage,
                "killmail processing failed: {}",
                err.source
            );
        }
    }
}

async fn run_pipeline(
    state: &AppState,
    package: &KillPackage,
) -> Result<KillmailOutcome, StageError> {
    let kill_id = package.kill_id;
    let failed = |stage: PipelineStage| move |source: PipelineError| StageError {
        kill_id,
        stage,
        source,
    };

    package
        .validate()
        .map_err(failed(PipelineStage::Received))?;

    let classifier =
        RelevancyClassifier::new(state.watchlist_repo.clone(), state.membership.clone());
    let relevancy = classifier
        .classify(package)
        .await
        .map_err(failed(PipelineStage::Classified))?;
    if !relevancy.is_relevant() {
        debug!(kill_id = %kill_id, "ignoring irrelevant killmail");
        return Ok(KillmailOutcome::Dropped);
    }

    info!(kill_id = %kill_id, relevancy = %relevancy, "posting {}", kill_url(kill_id));
    let context = fetch_context(state.directory.as_ref(), package)
        .await
        .map_err(failed(PipelineStage::Enriched))?;
    let notification = build_notification(package, relevancy, &context)
        .map_err(failed(PipelineStage::Notified))?;
    let handle = state
        .poster
        .post(state.channel_id, &notification)
        .await
        .map_err(|err| failed(PipelineStage::Notified)(PipelineError::Delivery(err)))?;

    annotate(state, &handle, &notification.markers).await;
    Ok(KillmailOutcome::Posted { relevancy, handle })
}

// The message is already out; a missing reaction is not worth failing over.
async fn annotate(state: &AppState, handle: &MessageHandle, markers: &[Marker]) {
    for marker in markers {
        if let Err(err) = state.poster.add_marker(handle, *marker).await {
            state.metrics.record_marker_error();
            warn!(
                message_id = %handle.message_id,
                stage = %PipelineStage::Annotated,
                marker = ?marker,
                "failed to attach marker: {}",
                err
            );
        }
    }
}
