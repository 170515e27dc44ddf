pub mod watchlist_queries;
