use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::{info, warn};

use killfeed_application::commands::killmail_commands;
use killfeed_application::AppState;
use killfeed_domain::{KillPackage, KillmailOutcome};

use crate::error::HttpError;
use crate::middleware::authorize;

/// Runs a submitted package through the same pipeline as the live feed.
pub async fn submit_killmail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(package): Json<KillPackage>,
) -> Result<Json<KillmailOutcome>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let outcome = killmail_commands::process_killmail(&state, &package)
        .await
        .map_err(|err| {
            warn!(kill_id = %err.kill_id, stage = %err.stage, "submitted killmail failed: {}", err.source);
            HttpError::from(err)
        })?;
    info!(kill_id = %package.kill_id, ?outcome, "submitted killmail processed");
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use killfeed_domain::{KillId, WatchEntry};
    use serde_json::Value;

    use crate::testing::{sample_package, state_with, StubDirectory};

    async fn error_body(err: HttpError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[tokio::test]
    async fn unwatched_killmail_is_dropped() {
        let state = state_with(StubDirectory { online: true }, None);
        let Json(outcome) = submit_killmail(State(state.clone()), HeaderMap::new(), Json(sample_package()))
            .await
            .expect("submit");
        assert_eq!(outcome, KillmailOutcome::Dropped);
        assert!(state.metrics.render_prometheus().contains("killfeed_killmails_dropped_total 1"));
    }

    #[tokio::test]
    async fn enrichment_failure_reports_stage_as_bad_gateway() {
        let state = state_with(StubDirectory { online: true }, None);
        let package = sample_package();
        state
            .watchlist_repo
            .insert(WatchEntry::corporation(package.victim().corporation_id))
            .await
            .expect("watch victim");

        let err = submit_killmail(State(state.clone()), HeaderMap::new(), Json(package))
            .await
            .expect_err("directory knows nothing");
        let (status, body) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["stage"], "enriched");
        assert!(body["error"]
            .as_str()
            .expect("message")
            .contains("solar_system 30002187 not found"));
        assert!(state.metrics.render_prometheus().contains("killfeed_killmails_failed_total 1"));
    }

    #[tokio::test]
    async fn malformed_package_is_unprocessable() {
        let state = state_with(StubDirectory { online: true }, None);
        let mut package = sample_package();
        package.kill_id = KillId(0);

        let err = submit_killmail(State(state), HeaderMap::new(), Json(package))
            .await
            .expect_err("zero kill id");
        let (status, body) = error_body(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["stage"], "received");
    }

    #[tokio::test]
    async fn submission_requires_token_when_configured() {
        let state = state_with(StubDirectory { online: true }, Some("s3cret"));
        let err = submit_killmail(State(state), HeaderMap::new(), Json(sample_package()))
            .await
            .expect_err("no token");
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
