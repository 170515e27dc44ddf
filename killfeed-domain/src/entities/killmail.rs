// Killmail entity
// One package as delivered by the zKillboard feed

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::value_objects::{
    AllianceId, CharacterId, CorporationId, KillId, ShipTypeId, SolarSystemId,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KillPackage {
    #[serde(rename = "killID")]
    pub kill_id: KillId,
    pub killmail: Killmail,
    pub zkb: ZkbMeta,
}

impl KillPackage {
    pub fn victim(&self) -> &Victim {
        &self.killmail.victim
    }

    pub fn attackers(&self) -> &[Attacker] {
        &self.killmail.attackers
    }

    /// Rejects packages whose identifiers could never resolve upstream.
    pub fn validate(&self) -> PipelineResult<()> {
        let checks = [
            ("killID", self.kill_id.0),
            ("solar_system_id", self.killmail.solar_system_id.0),
            ("victim.corporation_id", self.victim().corporation_id.0),
            ("victim.ship_type_id", self.victim().ship_type_id.0),
        ];
        for (field, value) in checks {
            if value <= 0 {
                return Err(PipelineError::parse(format!(
                    "{} must be positive, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Killmail {
    pub killmail_time: String,
    pub solar_system_id: SolarSystemId,
    pub victim: Victim,
    #[serde(default)]
    pub attackers: Vec<Attacker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Victim {
    pub corporation_id: CorporationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alliance_id: Option<AllianceId>,
    /// Absent when the victim is a structure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<CharacterId>,
    pub ship_type_id: ShipTypeId,
    #[serde(default)]
    pub damage_taken: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attacker {
    /// Absent for some NPC combatants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporation_id: Option<CorporationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alliance_id: Option<AllianceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<CharacterId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_type_id: Option<ShipTypeId>,
    #[serde(default)]
    pub damage_done: i64,
    #[serde(default)]
    pub final_blow: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZkbMeta {
    #[serde(rename = "totalValue", default)]
    pub total_value: f64,
    #[serde(rename = "locationID", default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub npc: bool,
    #[serde(default)]
    pub solo: bool,
    #[serde(default)]
    pub awox: bool,
}
