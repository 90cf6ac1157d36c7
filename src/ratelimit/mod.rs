//! Rate limiting logic and state management.

mod bucket;
mod limiter;

pub use bucket::TokenBucket;
pub use limiter::RateLimiter;
