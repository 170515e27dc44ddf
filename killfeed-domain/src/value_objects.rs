// Domain value objects
pub mod identifiers;
pub mod marker;
pub mod relevancy;

pub use identifiers::*;
pub use marker::*;
pub use relevancy::*;
