// Pipeline progress for a single killmail

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::MessageHandle;
use crate::value_objects::Relevancy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Received,
    Classified,
    Enriched,
    Notified,
    Annotated,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Received => "received",
            PipelineStage::Classified => "classified",
            PipelineStage::Enriched => "enriched",
            PipelineStage::Notified => "notified",
            PipelineStage::Annotated => "annotated",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum KillmailOutcome {
    Dropped,
    Posted {
        relevancy: Relevancy,
        handle: MessageHandle,
    },
}
