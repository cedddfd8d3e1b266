//! # Rate Limiting Feature
//!
//! Prevents spam with configurable request limits per client address.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod limiter;

pub use limiter::RateLimiter;
