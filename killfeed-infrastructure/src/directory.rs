pub mod esi_client;

pub use esi_client::*;
