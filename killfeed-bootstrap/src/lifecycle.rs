use std::time::Duration;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use killfeed_application::AppState;
use killfeed_interfaces_http::build_router;

use crate::context::AppContext;
use crate::killmail_feed::spawn_killmail_feed;

/// Grace period for the feed to drain in-flight killmails after the server stops.
const FEED_DRAIN_SECONDS: u64 = 10;

fn build_router_with_layers(state: AppState) -> Router {
    build_router(state.clone())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(
            usize::try_from(state.config.max_body_bytes).unwrap_or(usize::MAX),
        ))
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_standalone() -> Result<()> {
    let context = AppContext::new().await?;
    let state = context.state;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let feed_task = match context.feed {
        Some(feed) => Some(spawn_killmail_feed(state.clone(), feed, shutdown_rx)),
        None => {
            info!("killmail feed disabled; only manual submissions are processed");
            None
        }
    };

    let app = build_router_with_layers(state.clone());
    let addr: std::net::SocketAddr = state.config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Some(task) = feed_task {
        match tokio::time::timeout(Duration::from_secs(FEED_DRAIN_SECONDS), task).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!("killmail feed task ended abnormally: {}", err),
            Err(_) => warn!("killmail feed did not stop within {}s", FEED_DRAIN_SECONDS),
        }
    }
    info!(posted = state.metrics.posted(), "shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("sigterm handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
