// Repository and Service Port Traits (Interfaces)
// Define what the pipeline needs from the outside world

pub mod repositories;
pub mod services;

pub use repositories::*;
pub use services::*;
