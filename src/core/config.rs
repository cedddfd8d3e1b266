//! # Core Configuration
//!
//! Environment-backed process configuration, loaded once at startup and
//! passed explicitly into the server state. Nothing reads the environment
//! after `Config::from_env` returns.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Added rate limit tuning via RATE_LIMIT_MAX / RATE_LIMIT_WINDOW_SECS
//! - 1.0.0: Initial creation with token, model, origins and persona directory

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Default inbound port
pub const DEFAULT_PORT: u16 = 4000;
/// Default completion model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Default chat-completions endpoint
pub const DEFAULT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Default directory holding persona documents
pub const DEFAULT_PERSONA_DIR: &str = "personas";
/// Default requests allowed per client per window
pub const DEFAULT_RATE_LIMIT_MAX: usize = 60;
/// Default rate limit window in seconds
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port the gateway listens on
    pub port: u16,
    /// Bearer token for the outbound completion API (required)
    pub api_token: String,
    /// Completion model identifier
    pub model: String,
    /// Chat-completions endpoint URL
    pub completions_url: String,
    /// Directory of persona JSON documents
    pub persona_dir: String,
    /// Persona id served by the bare /chat route
    pub default_persona: String,
    /// Exact origins allowed by CORS beyond localhost
    pub allowed_origins: Vec<String>,
    /// Requests allowed per client per window
    pub rate_limit_max: usize,
    /// Sliding window for rate limiting
    pub rate_limit_window: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Only `TOKEN` is required; everything else falls back to a default.
    pub fn from_env() -> Result<Self> {
        let api_token =
            env::var("TOKEN").context("TOKEN environment variable is required (API bearer token)")?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port number: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let rate_limit_max = match env::var("RATE_LIMIT_MAX") {
            Ok(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("RATE_LIMIT_MAX is not a valid count: {raw}"))?,
            Err(_) => DEFAULT_RATE_LIMIT_MAX,
        };

        let window_secs = match env::var("RATE_LIMIT_WINDOW_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("RATE_LIMIT_WINDOW_SECS is not a valid duration: {raw}"))?,
            Err(_) => DEFAULT_RATE_LIMIT_WINDOW_SECS,
        };

        Ok(Config {
            port,
            api_token,
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            completions_url: env::var("COMPLETIONS_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETIONS_URL.to_string()),
            persona_dir: env::var("PERSONA_DIR")
                .unwrap_or_else(|_| DEFAULT_PERSONA_DIR.to_string()),
            default_persona: env::var("DEFAULT_PERSONA").unwrap_or_else(|_| "nova".to_string()),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            rate_limit_max,
            rate_limit_window: Duration::from_secs(window_secs),
        })
    }
}

/// Split a comma-separated origin list, dropping empties and trailing slashes
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
