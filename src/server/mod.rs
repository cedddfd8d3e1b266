//! # Server Module
//!
//! Inbound HTTP surface: routing, CORS, and the error body contract.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{router, AppState, ChatReply, ChatRequest};
