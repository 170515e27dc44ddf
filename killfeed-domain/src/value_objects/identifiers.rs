// Identifier value objects
// External IDs as issued by the game directory, plus chat-side handles

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($($name:ident($inner:ty)),+ $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(pub $inner);

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }

            impl From<$inner> for $name {
                fn from(value: $inner) -> Self {
                    Self(value)
                }
            }
        )+
    };
}

numeric_id!(
    KillId(i64),
    CorporationId(i64),
    AllianceId(i64),
    CharacterId(i64),
    ShipTypeId(i64),
    SolarSystemId(i64),
    ConstellationId(i64),
    RegionId(i64),
    ChannelId(u64),
    MessageId(u64),
);
