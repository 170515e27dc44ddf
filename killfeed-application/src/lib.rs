// Killfeed Application Layer

pub mod commands;
pub mod enrichment;
pub mod error;
pub mod membership;
pub mod metrics;
pub mod queries;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use error::AppError;
pub use metrics::Metrics;
pub use state::AppState;
