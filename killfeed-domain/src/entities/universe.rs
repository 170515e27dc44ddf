// Directory records
// Subsets of the ESI responses the pipeline reads

use serde::{Deserialize, Serialize};

use crate::value_objects::{ConstellationId, RegionId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarSystem {
    pub name: String,
    pub constellation_id: ConstellationId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constellation {
    pub name: String,
    pub region_id: RegionId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipType {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corporation {
    pub name: String,
    #[serde(default)]
    pub ticker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alliance {
    pub name: String,
    #[serde(default)]
    pub ticker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStatus {
    pub players: i64,
    #[serde(default)]
    pub server_version: String,
}
