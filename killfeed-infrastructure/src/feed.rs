pub mod redisq;

pub use redisq::*;
