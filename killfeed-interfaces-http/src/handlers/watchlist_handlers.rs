use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use killfeed_application::commands::watchlist_commands;
use killfeed_application::queries::watchlist_queries;
use killfeed_application::AppState;
use killfeed_domain::{WatchEntry, WatchKind};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn list_watchlist(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<WatchEntry>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let entries = watchlist_queries::list_watchlist(&state).await?;
    Ok(Json(entries))
}

/// `201` when the entry is new, `200` when it was already watched.
pub async fn put_watch_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(entry): Json<WatchEntry>,
) -> Result<(StatusCode, Json<WatchEntry>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let inserted = watchlist_commands::add_watch_entry(&state, entry).await?;
    let status = if inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(entry)))
}

pub async fn delete_watch_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let kind = kind.parse::<WatchKind>().map_err(HttpError::BadRequest)?;
    watchlist_commands::remove_watch_entry(&state, WatchEntry { kind, id }).await?;
    Ok(StatusCode::NO_CONTENT)
}
