//! # Personas Feature
//!
//! Persona documents, route-keyed loading, and system prompt rendering.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Schema-union persona documents rendered through one template
//! - 1.0.0: Initial release

pub mod document;
pub mod manager;
pub mod renderer;

pub use document::PersonaDocument;
pub use manager::PersonaManager;
pub use renderer::render;
