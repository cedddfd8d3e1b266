//! # Transcript Feature
//!
//! Normalization of raw caller transcripts into role-tagged messages:
//! markup stripping, "you:" label removal, positional role assignment
//! and last-N truncation.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod normalizer;

pub use normalizer::{normalize, TranscriptEntry, HISTORY_LIMIT};
