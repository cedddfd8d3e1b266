// Core layer - shared types and configuration
pub mod core;

// Features layer - all feature modules
pub mod features;

// Server layer - inbound HTTP routes and error surface
pub mod server;

// Re-export core config for convenience
pub use core::{ChatMessage, Config, Role};

// Re-export feature items for convenience
pub use features::{
    // Completion
    CompletionClient,
    // Composer
    compose,
    // Personas
    render, PersonaDocument, PersonaManager,
    // Rate limiting
    RateLimiter,
    // Transcript
    normalize, TranscriptEntry, HISTORY_LIMIT,
};

// Re-export server items
pub use server::{router, ApiError, AppState};
