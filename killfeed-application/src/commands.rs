pub mod killmail_commands;
pub mod watchlist_commands;
