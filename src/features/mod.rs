//! # Features Module
//!
//! All feature modules of the persona gateway.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod completion;
pub mod composer;
pub mod personas;
pub mod rate_limiting;
pub mod transcript;

pub use completion::CompletionClient;
pub use composer::compose;
pub use personas::{render, PersonaDocument, PersonaManager};
pub use rate_limiting::RateLimiter;
pub use transcript::{normalize, TranscriptEntry, HISTORY_LIMIT};
