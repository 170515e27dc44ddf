use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Semaphore};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use killfeed_application::commands::killmail_commands;
use killfeed_application::{AppState, Metrics};
use killfeed_domain::ports::KillFeed;
use killfeed_domain::KillPackage;

const RETRY_DELAY_SECONDS: u64 = 5;

#[derive(Debug, Clone, Copy)]
pub struct FeedSettings {
    /// Killmails processed at the same time; polling pauses while all slots are busy.
    pub max_in_flight: usize,
    pub retry_delay: Duration,
}

impl FeedSettings {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            max_in_flight: state.config.max_concurrent_killmails.max(1),
            retry_delay: Duration::from_secs(RETRY_DELAY_SECONDS),
        }
    }
}

/// Starts the live feed: every package goes through the full pipeline.
pub fn spawn_killmail_feed(
    state: AppState,
    feed: Arc<dyn KillFeed>,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let settings = FeedSettings::from_state(&state);
    let metrics = state.metrics.clone();
    tokio::spawn(run_feed_loop(feed, settings, metrics, shutdown, move |package| {
        killmail_commands::handle_killmail(state.clone(), package)
    }))
}

pub async fn run_feed_loop<F, Fut>(
    feed: Arc<dyn KillFeed>,
    settings: FeedSettings,
    metrics: Arc<Metrics>,
    mut shutdown: watch::Receiver<bool>,
    handler: F,
) where
    F: Fn(KillPackage) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let capacity = settings.max_in_flight.max(1);
    let slots = Arc::new(Semaphore::new(capacity));
    info!(max_in_flight = settings.max_in_flight, "killmail feed started");

    loop {
        if *shutdown.borrow() {
            break;
        }
        let permit = tokio::select! {
            permit = slots.clone().acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
        };

        let next = tokio::select! {
            next = feed.next_package() => next,
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
        };

        match next {
            Ok(Some(package)) => {
                debug!(kill_id = %package.kill_id, "killmail received");
                let task = handler(package);
                tokio::spawn(async move {
                    task.await;
                    drop(permit);
                });
            }
            Ok(None) => {}
            Err(err) => {
                metrics.record_feed_error();
                warn!(
                    "killmail feed poll failed, retrying in {:?}: {}",
                    settings.retry_delay, err
                );
                tokio::select! {
                    _ = sleep(settings.retry_delay) => {}
                    changed = shutdown.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }

    // Wait for in-flight killmails to release their slots.
    let _ = slots
        .acquire_many(u32::try_from(capacity).unwrap_or(u32::MAX))
        .await;
    info!("killmail feed stopped");
}
