pub mod config;
pub mod directory;
pub mod feed;
pub mod posting;
pub mod repositories;

pub use config::*;
pub use directory::*;
pub use feed::*;
pub use posting::*;
pub use repositories::*;
