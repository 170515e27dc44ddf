use axum::routing::{delete, get, post};
use axum::Router;

use killfeed_application::AppState;

use crate::handlers::{killmail_handlers, ops_handlers, watchlist_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .route(
            "/v1/watchlist",
            get(watchlist_handlers::list_watchlist).put(watchlist_handlers::put_watch_entry),
        )
        .route(
            "/v1/watchlist/:kind/:id",
            delete(watchlist_handlers::delete_watch_entry),
        )
        .route("/v1/killmails", post(killmail_handlers::submit_killmail))
        .with_state(state)
}
