//! # Composer Feature
//!
//! Assembles the outbound conversation: one system message rendered from
//! the persona document, followed by the normalized transcript tail.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Consolidated prompt assembly from the per-bot handlers

use crate::core::types::ChatMessage;
use crate::features::personas::{render, PersonaDocument};
use crate::features::transcript::{normalize, TranscriptEntry};

/// Compose the full message sequence for the completion API.
///
/// The first element is always the rendered persona system message; the
/// tail is the normalized transcript (already truncated to the most
/// recent turns). The result is handed to the completion client as-is.
pub fn compose(persona: &PersonaDocument, transcript: &[TranscriptEntry]) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(render(persona))];
    messages.extend(normalize(transcript));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Role;
    use crate::features::transcript::HISTORY_LIMIT;

    #[test]
    fn test_system_message_always_first() {
        let persona: PersonaDocument = serde_json::from_str(r#"{"name": "Nova"}"#).unwrap();
        let transcript = vec![TranscriptEntry::Text("You: hi".into())];

        let composed = compose(&persona, &transcript);
        assert_eq!(composed[0].role, Role::System);
        assert!(composed[0].content.contains("- Name: Nova"));
        assert_eq!(composed[1], ChatMessage::user("hi"));
    }

    #[test]
    fn test_empty_transcript_yields_system_only() {
        let composed = compose(&PersonaDocument::default(), &[]);
        assert_eq!(composed.len(), 1);
        assert_eq!(composed[0].role, Role::System);
    }

    #[test]
    fn test_history_is_bounded() {
        let transcript: Vec<TranscriptEntry> = (0..30)
            .map(|i| TranscriptEntry::Text(format!("turn {i}")))
            .collect();

        let composed = compose(&PersonaDocument::default(), &transcript);
        assert_eq!(composed.len(), 1 + HISTORY_LIMIT);
        assert_eq!(composed.last().unwrap().content, "turn 29");
    }
}
