// Domain services
pub mod annotator;
pub mod classifier;
pub mod notification_builder;

pub use annotator::*;
pub use classifier::*;
pub use notification_builder::*;
