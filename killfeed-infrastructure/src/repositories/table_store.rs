use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use killfeed_domain::ports::{ConfigStore, WatchlistRepository};
use killfeed_domain::{WatchEntry, WatchKind};

const WATCHLIST_TABLE: &str = "killmails.relevancies";
const CONFIG_TABLE: &str = "killmails.config";

/// Rows may be stored as a plain list or keyed by document id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredRows {
    List(Vec<WatchEntry>),
    Keyed(BTreeMap<String, WatchEntry>),
}

impl Default for StoredRows {
    fn default() -> Self {
        StoredRows::List(Vec::new())
    }
}

impl StoredRows {
    fn into_entries(self) -> Vec<WatchEntry> {
        match self {
            StoredRows::List(entries) => entries,
            StoredRows::Keyed(rows) => rows.into_values().collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct StoredDocument {
    #[serde(rename = "killmails.relevancies", default)]
    relevancies: StoredRows,
    #[serde(rename = "killmails.config", default)]
    config: BTreeMap<String, Value>,
}

#[derive(Debug, Default, Clone, Serialize)]
struct Document {
    #[serde(rename = "killmails.relevancies")]
    relevancies: Vec<WatchEntry>,
    #[serde(rename = "killmails.config")]
    config: BTreeMap<String, Value>,
}

/// JSON file holding the watchlist and config tables.
///
/// The whole document is kept in memory and rewritten on every mutation.
pub struct JsonTableStore {
    path: PathBuf,
    document: RwLock<Document>,
}

impl JsonTableStore {
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let document = if fs::try_exists(&path).await? {
            let content = fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading table store {}", path.display()))?;
            if content.trim().is_empty() {
                Document::default()
            } else {
                let stored: StoredDocument = serde_json::from_str(&content)
                    .with_context(|| format!("parsing table store {}", path.display()))?;
                Document {
                    relevancies: stored.relevancies.into_entries(),
                    config: stored.config,
                }
            }
        } else {
            Document::default()
        };
        debug!(
            path = %path.display(),
            entries = document.relevancies.len(),
            "table store opened"
        );
        Ok(Self {
            path,
            document: RwLock::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `next` to disk and only then replaces the in-memory document.
    async fn commit(&self, current: &mut Document, next: Document) -> anyhow::Result<()> {
        self.persist(&next).await?;
        *current = next;
        Ok(())
    }

    async fn persist(&self, document: &Document) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing table store {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl WatchlistRepository for JsonTableStore {
    async fn search(&self, kind: WatchKind) -> anyhow::Result<Vec<WatchEntry>> {
        let document = self.document.read().await;
        Ok(document
            .relevancies
            .iter()
            .filter(|entry| entry.kind == kind)
            .copied()
            .collect())
    }

    async fn list(&self) -> anyhow::Result<Vec<WatchEntry>> {
        Ok(self.document.read().await.relevancies.clone())
    }

    async fn insert(&self, entry: WatchEntry) -> anyhow::Result<bool> {
        let mut document = self.document.write().await;
        if document.relevancies.contains(&entry) {
            return Ok(false);
        }
        let mut next = document.clone();
        next.relevancies.push(entry);
        self.commit(&mut document, next).await?;
        Ok(true)
    }

    async fn remove(&self, entry: WatchEntry) -> anyhow::Result<bool> {
        let mut document = self.document.write().await;
        if !document.relevancies.contains(&entry) {
            return Ok(false);
        }
        let mut next = document.clone();
        next.relevancies.retain(|existing| *existing != entry);
        self.commit(&mut document, next).await?;
        Ok(true)
    }
}

#[async_trait]
impl ConfigStore for JsonTableStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let document = self.document.read().await;
        Ok(document.config.get(key).map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }))
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut document = self.document.write().await;
        let mut next = document.clone();
        next.config
            .insert(key.to_string(), Value::String(value.to_string()));
        self.commit(&mut document, next).await
    }
}
