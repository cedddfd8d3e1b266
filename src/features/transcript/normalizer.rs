//! Transcript cleanup and role assignment
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Consolidated the per-bot cleanup loops into one routine

use regex::Regex;
use serde::Deserialize;

use crate::core::types::ChatMessage;

/// Number of most-recent turns kept after normalization
pub const HISTORY_LIMIT: usize = 10;

/// One raw chat line from the caller.
///
/// Callers send either a bare string or an object carrying a `message`
/// field. Anything else inside the object is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TranscriptEntry {
    Text(String),
    Tagged {
        #[serde(default)]
        message: Option<String>,
    },
}

impl TranscriptEntry {
    /// Raw text of the entry before any cleanup
    pub fn text(&self) -> &str {
        match self {
            TranscriptEntry::Text(s) => s,
            TranscriptEntry::Tagged { message } => message.as_deref().unwrap_or(""),
        }
    }
}

/// Strip markup and a leading "you:" label from one chat line
fn clean(text: &str, markup: &Regex, label: &Regex) -> String {
    let stripped = markup.replace_all(text, "");
    label.replace(stripped.trim(), "").trim().to_string()
}

/// Normalize a raw transcript into role-tagged completion messages.
///
/// Roles alternate strictly by the entry's position in the *original*
/// transcript (even index user, odd index assistant), then the last
/// [`HISTORY_LIMIT`] entries are kept. Role assignment happens before
/// truncation, so a truncated window may open with an assistant turn.
/// That matches the deployed behavior and the frontend relies on it.
pub fn normalize(transcript: &[TranscriptEntry]) -> Vec<ChatMessage> {
    let markup = Regex::new(r"<[^>]*>").unwrap();
    let label = Regex::new(r"(?i)^you:\s*").unwrap();

    let history: Vec<ChatMessage> = transcript
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let content = clean(entry.text(), &markup, &label);
            if i % 2 == 0 {
                ChatMessage::user(content)
            } else {
                ChatMessage::assistant(content)
            }
        })
        .collect();

    let skip = history.len().saturating_sub(HISTORY_LIMIT);
    history.into_iter().skip(skip).collect()
}
