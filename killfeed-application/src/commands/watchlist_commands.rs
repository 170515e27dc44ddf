use tracing::info;

use killfeed_domain::WatchEntry;

use crate::{AppError, AppState};

/// Adds an entry; returns `false` if it was already watched.
pub async fn add_watch_entry(state: &AppState, entry: WatchEntry) -> Result<bool, AppError> {
    validate_entry(&entry)?;
    let inserted = state
        .watchlist_repo
        .insert(entry)
        .await
        .map_err(AppError::Internal)?;
    if inserted {
        state.membership.invalidate().await;
        info!(kind = %entry.kind, id = entry.id, "watchlist entry added");
    }
    Ok(inserted)
}

pub async fn remove_watch_entry(state: &AppState, entry: WatchEntry) -> Result<(), AppError> {
    validate_entry(&entry)?;
    let removed = state
        .watchlist_repo
        .remove(entry)
        .await
        .map_err(AppError::Internal)?;
    if !removed {
        return Err(AppError::NotFound(format!(
            "{} {} is not on the watchlist",
            entry.kind, entry.id
        )));
    }
    state.membership.invalidate().await;
    info!(kind = %entry.kind, id = entry.id, "watchlist entry removed");
    Ok(())
}

fn validate_entry(entry: &WatchEntry) -> Result<(), AppError> {
    if entry.id <= 0 {
        return Err(AppError::BadRequest(format!(
            "{} id must be positive, got {}",
            entry.kind, entry.id
        )));
    }
    Ok(())
}
