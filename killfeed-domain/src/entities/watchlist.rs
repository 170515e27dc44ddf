// Watchlist entity
// Corporations and alliances a community tracks

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::value_objects::{AllianceId, CorporationId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchKind {
    Corporation,
    Alliance,
}

impl WatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchKind::Corporation => "corporation",
            WatchKind::Alliance => "alliance",
        }
    }
}

impl fmt::Display for WatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "corporation" | "corp" => Ok(WatchKind::Corporation),
            "alliance" => Ok(WatchKind::Alliance),
            other => Err(format!("unknown watch kind '{}'", other)),
        }
    }
}

/// Stored as `{"type": "corporation", "value": 98000001}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchEntry {
    #[serde(rename = "type")]
    pub kind: WatchKind,
    #[serde(rename = "value")]
    pub id: i64,
}

impl WatchEntry {
    pub fn corporation(id: CorporationId) -> Self {
        Self {
            kind: WatchKind::Corporation,
            id: id.0,
        }
    }

    pub fn alliance(id: AllianceId) -> Self {
        Self {
            kind: WatchKind::Alliance,
            id: id.0,
        }
    }
}
