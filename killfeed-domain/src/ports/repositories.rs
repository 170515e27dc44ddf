use async_trait::async_trait;

use crate::entities::{WatchEntry, WatchKind};

#[async_trait]
pub trait WatchlistRepository: Send + Sync {
    async fn search(&self, kind: WatchKind) -> anyhow::Result<Vec<WatchEntry>>;
    async fn list(&self) -> anyhow::Result<Vec<WatchEntry>>;
    /// Returns `false` when the entry was already present.
    async fn insert(&self, entry: WatchEntry) -> anyhow::Result<bool>;
    /// Returns `false` when there was nothing to remove.
    async fn remove(&self, entry: WatchEntry) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
