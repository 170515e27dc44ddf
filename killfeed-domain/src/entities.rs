// Domain entities
pub mod context;
pub mod killmail;
pub mod notification;
pub mod pipeline;
pub mod runtime_config;
pub mod universe;
pub mod watchlist;

pub use context::*;
pub use killmail::*;
pub use notification::*;
pub use pipeline::*;
pub use runtime_config::*;
pub use universe::*;
pub use watchlist::*;
