// Enriched context entity
// Human-readable names resolved for one killmail

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedContext {
    pub solar_system: String,
    pub region: String,
    pub ship_type: String,
    pub character: Option<String>,
    pub affiliation: String,
}

impl EnrichedContext {
    /// `"<character> (<affiliation>)"`, or the affiliation alone for structures.
    pub fn identity(&self) -> String {
        match self.character.as_deref().filter(|name| !name.is_empty()) {
            Some(character) => format!("{} ({})", character, self.affiliation),
            None => self.affiliation.clone(),
        }
    }
}
