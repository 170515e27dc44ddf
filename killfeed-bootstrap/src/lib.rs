pub mod context;
pub mod killmail_feed;
pub mod lifecycle;

pub use lifecycle::run_standalone;
