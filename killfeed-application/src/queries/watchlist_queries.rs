use tracing::error;

use killfeed_domain::WatchEntry;

use crate::{AppError, AppState};

pub async fn list_watchlist(state: &AppState) -> Result<Vec<WatchEntry>, AppError> {
    let mut entries = state.watchlist_repo.list().await.map_err(|err| {
        error!("failed to list watchlist: {}", err);
        AppError::Internal(err)
    })?;
    entries.sort_by_key(|entry| (entry.kind.as_str(), entry.id));
    Ok(entries)
}
