//! Inbound chat routes
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Consolidated the per-bot POST handlers into one parameterized route

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{header, HeaderValue, Method};
use axum::routing::post;
use axum::{Json, Router};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use uuid::Uuid;

use crate::core::Config;
use crate::features::completion::CompletionClient;
use crate::features::composer::compose;
use crate::features::personas::PersonaManager;
use crate::features::rate_limiting::RateLimiter;
use crate::features::transcript::TranscriptEntry;
use crate::server::error::ApiError;

/// Shared state behind every handler. Everything except the limiter is
/// immutable after startup, so concurrent requests need no coordination.
pub struct AppState {
    pub config: Config,
    pub personas: PersonaManager,
    pub limiter: RateLimiter,
    pub completions: CompletionClient,
}

impl AppState {
    pub fn new(config: Config, personas: PersonaManager) -> Arc<Self> {
        let limiter = RateLimiter::new(config.rate_limit_max, config.rate_limit_window);
        let completions = CompletionClient::new(&config);
        Arc::new(AppState {
            config,
            personas,
            limiter,
            completions,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<TranscriptEntry>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Build the gateway router: `/chat` serves the configured default
/// persona, `/chat/{persona}` selects by route id.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    Router::new()
        .route("/chat", post(chat_default))
        .route("/chat/{persona}", post(chat_persona))
        .layer(cors)
        .with_state(state)
}

/// Allow localhost in any form plus the configured origin allow-list.
/// Requests without an Origin header bypass CORS entirely.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed = allowed_origins.to_vec();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| origin_allowed(o, &allowed))
                .unwrap_or(false)
        }))
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

fn origin_allowed(origin: &str, allowed: &[String]) -> bool {
    origin.starts_with("http://localhost")
        || origin.starts_with("http://127.0.0.1")
        || allowed.iter().any(|a| a == origin)
}

async fn chat_default(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let persona_id = state.config.default_persona.clone();
    handle_chat(state, persona_id, addr.ip().to_string(), body).await
}

async fn chat_persona(
    State(state): State<Arc<AppState>>,
    Path(persona_id): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    handle_chat(state, persona_id, addr.ip().to_string(), body).await
}

async fn handle_chat(
    state: Arc<AppState>,
    persona_id: String,
    client: String,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let request_id = Uuid::new_v4();

    let persona = state
        .personas
        .get(&persona_id)
        .ok_or_else(|| ApiError::UnknownPersona(persona_id.clone()))?;

    if !state.limiter.check_rate_limit(&persona_id, &client) {
        let wait = state.limiter.retry_after(&persona_id, &client);
        warn!("[{request_id}] Rate limited | Persona: {persona_id} | Client: {client} | Retry in: {wait:?}");
        return Err(ApiError::RateLimited);
    }

    let Json(request) = body.map_err(|rejection| ApiError::InvalidRequest {
        message: "Request body must be JSON with a `messages` array".to_string(),
        details: Some(rejection.body_text()),
    })?;

    debug!(
        "[{request_id}] Received {} transcript entr(ies) | Persona: {persona_id} | Client: {client}",
        request.messages.len()
    );

    let composed = compose(persona, &request.messages);
    debug!(
        "[{request_id}] Composed {} message(s), system prompt {} chars",
        composed.len(),
        composed[0].content.len()
    );

    let reply = state.completions.complete(&composed).await.map_err(|err| {
        error!("[{request_id}] Completion call failed: {err:#}");
        ApiError::Upstream(err)
    })?;

    info!(
        "[{request_id}] Replied | Persona: {persona_id} | {} chars",
        reply.len()
    );
    Ok(Json(ChatReply { reply }))
}
