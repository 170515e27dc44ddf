// Marker value object
// Reaction glyphs attached to a posted notification

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    RegionalIndicatorF,
}

impl Marker {
    pub fn glyph(&self) -> &'static str {
        match self {
            Marker::RegionalIndicatorF => "\u{1F1EB}",
        }
    }
}
