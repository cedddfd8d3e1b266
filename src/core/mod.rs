//! # Core Module
//!
//! Core domain types and configuration for the persona gateway.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add shared chat wire types
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod types;

// Re-export commonly used items
pub use config::Config;
pub use types::{ChatMessage, Role};
