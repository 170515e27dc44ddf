pub mod killmail_handlers;
pub mod ops_handlers;
pub mod watchlist_handlers;

pub use killmail_handlers::*;
pub use ops_handlers::*;
pub use watchlist_handlers::*;
