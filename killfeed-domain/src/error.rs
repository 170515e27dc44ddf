// Pipeline error taxonomy

use thiserror::Error;

use crate::entities::PipelineStage;
use crate::value_objects::KillId;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Remote call failed or timed out.
    #[error("transport error: {0}")]
    Transport(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("storage error: {0}")]
    Storage(#[source] anyhow::Error),
    #[error("delivery error: {0}")]
    Delivery(#[source] anyhow::Error),
}

impl PipelineError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// A pipeline error tagged with the killmail and the stage it failed in.
#[derive(Debug, Error)]
#[error("killmail {kill_id} failed at {stage}: {source}")]
pub struct StageError {
    pub kill_id: KillId,
    pub stage: PipelineStage,
    #[source]
    pub source: PipelineError,
}
