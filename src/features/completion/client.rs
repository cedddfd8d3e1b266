//! Outbound chat-completion API client
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Single POST client replacing the inline calls in each bot handler

use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::config::Config;
use crate::core::types::ChatMessage;

/// Most bytes of an upstream body quoted in error detail
const BODY_EXCERPT_LEN: usize = 300;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for the third-party chat-completions endpoint.
///
/// Fire-and-forget semantics: one POST, no retries, no timeout policy
/// beyond whatever reqwest does by default. Failures carry the upstream
/// status and a body excerpt as diagnostic detail.
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    url: String,
    token: String,
    model: String,
}

impl CompletionClient {
    pub fn new(config: &Config) -> Self {
        Self::with_endpoint(
            config.completions_url.clone(),
            config.api_token.clone(),
            config.model.clone(),
        )
    }

    pub fn with_endpoint(url: String, token: String, model: String) -> Self {
        CompletionClient {
            http: reqwest::Client::new(),
            url,
            token,
            model,
        }
    }

    /// POST the composed conversation and return the trimmed reply text
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        debug!(
            "Sending {} message(s) to completion API | Model: {}",
            messages.len(),
            self.model
        );

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&CompletionRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await
            .context("Completion request could not be sent")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Completion response body could not be read")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Completion API returned {status}: {}",
                excerpt(&body)
            ));
        }

        let parsed: CompletionResponse = serde_json::from_str(&body).with_context(|| {
            format!("Completion API returned a malformed body: {}", excerpt(&body))
        })?;

        let reply = parsed
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| {
                anyhow!("Completion API response had no reply text: {}", excerpt(&body))
            })?;

        Ok(reply.trim().to_string())
    }
}

/// Truncate an upstream body for inclusion in error messages
fn excerpt(body: &str) -> String {
    if body.len() <= BODY_EXCERPT_LEN {
        body.to_string()
    } else {
        let mut end = BODY_EXCERPT_LEN;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}
