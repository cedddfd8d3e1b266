//! # Completion Feature
//!
//! Outbound call to the third-party chat-completion API.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod client;

pub use client::CompletionClient;
