// Relevancy value object
// Outcome of checking a killmail against the watchlist

use std::fmt;

use serde::{Deserialize, Serialize};

/// Embed colour as a 24-bit RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Colour(pub u32);

impl Colour {
    pub const DEFAULT: Colour = Colour(0x000000);
    pub const DARK_RED: Colour = Colour(0x7a0000);
    pub const DARK_GREEN: Colour = Colour(0x007a00);
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevancy {
    Irrelevant,
    /// A watched corporation lost the ship.
    Lossmail,
    /// A watched corporation was on the attacking side.
    Killmail,
}

impl Relevancy {
    pub fn colour(&self) -> Colour {
        match self {
            Relevancy::Irrelevant => Colour::DEFAULT,
            Relevancy::Lossmail => Colour::DARK_RED,
            Relevancy::Killmail => Colour::DARK_GREEN,
        }
    }

    pub fn is_relevant(&self) -> bool {
        !matches!(self, Relevancy::Irrelevant)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relevancy::Irrelevant => "irrelevant",
            Relevancy::Lossmail => "lossmail",
            Relevancy::Killmail => "killmail",
        }
    }
}

impl fmt::Display for Relevancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
