//! Persona document schema
//!
//! The persona files in production were written by hand over a long time
//! and no two of them agree on a shape: descriptions are strings, string
//! lists, or `{details: [...]}` objects; example dialogues come as
//! `{user, response}` pairs or speaker-tagged threads. Every field here is
//! an explicit `Option` and every field deserializes leniently - a value
//! of the wrong shape becomes `None` rather than failing the whole
//! document, so rendering can always fall back to a placeholder.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Unified the field unions of all deployed persona files

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field, mapping any wrong-shaped value to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// A static per-bot character record driving prompt generation.
///
/// Immutable after load; the manager keeps one per route for the
/// lifetime of the process.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonaDocument {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<Description>,
    #[serde(default, deserialize_with = "lenient")]
    pub personality: Option<Personality>,
    #[serde(default, deserialize_with = "lenient")]
    pub instruction: Option<Instruction>,
    #[serde(
        default,
        deserialize_with = "lenient",
        alias = "messageExamples"
    )]
    pub example_dialogues: Option<Vec<ExampleDialogue>>,
    #[serde(default, deserialize_with = "lenient")]
    pub add_ons: Option<Value>,
}

/// Description field: plain text, a list of lines, or `{details: [...]}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Lines(Vec<String>),
    Nested {
        #[serde(default, deserialize_with = "lenient")]
        details: Option<Vec<String>>,
    },
}

impl Description {
    /// Flatten to a single space-joined string; empty when nothing usable
    pub fn text(&self) -> String {
        match self {
            Description::Text(s) => s.trim().to_string(),
            Description::Lines(lines) => lines.join(" ").trim().to_string(),
            Description::Nested { details } => details
                .as_ref()
                .map(|d| d.join(" ").trim().to_string())
                .unwrap_or_default(),
        }
    }
}

/// A field that may be a single string or a list of strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn join(&self, sep: &str) -> String {
        match self {
            OneOrMany::One(s) => s.clone(),
            OneOrMany::Many(items) => items.join(sep),
        }
    }

    pub fn items(&self) -> Vec<&str> {
        match self {
            OneOrMany::One(s) => vec![s.as_str()],
            OneOrMany::Many(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Personality {
    #[serde(default, deserialize_with = "lenient")]
    pub traits: Option<OneOrMany>,
    #[serde(default, deserialize_with = "lenient")]
    pub values: Option<OneOrMany>,
    #[serde(default, deserialize_with = "lenient")]
    pub culture: Option<OneOrMany>,
    #[serde(default, deserialize_with = "lenient")]
    pub unexpected_scenarios: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Instruction {
    #[serde(default, deserialize_with = "lenient")]
    pub do_donts: Option<DoDonts>,
    #[serde(default, deserialize_with = "lenient")]
    pub message_length: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub emoji_use: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub catchphrases: Option<OneOrMany>,
    #[serde(default, deserialize_with = "lenient")]
    pub criticism_response: Option<OneOrMany>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoDonts {
    #[serde(
        default,
        deserialize_with = "lenient",
        rename = "do"
    )]
    pub do_items: Option<OneOrMany>,
    #[serde(default, deserialize_with = "lenient")]
    pub dont: Option<OneOrMany>,
}

/// One example exchange: either a `{user, response}` pair or a thread of
/// speaker-tagged lines (the persona's own name marks the reply line)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExampleDialogue {
    Thread(Vec<TaggedLine>),
    Pair {
        #[serde(default, deserialize_with = "lenient")]
        user: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        response: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaggedLine {
    #[serde(default, deserialize_with = "lenient", alias = "speaker")]
    pub user: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        alias = "text",
        alias = "content"
    )]
    pub message: Option<LineContent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LineContent {
    Text(String),
    Nested {
        #[serde(default, deserialize_with = "lenient")]
        text: Option<String>,
    },
}

impl LineContent {
    pub fn text(&self) -> &str {
        match self {
            LineContent::Text(s) => s,
            LineContent::Nested { text } => text.as_deref().unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_deserializes() {
        let doc: PersonaDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.name.is_none());
        assert!(doc.description.is_none());
        assert!(doc.example_dialogues.is_none());
    }

    #[test]
    fn test_wrong_shapes_become_none() {
        let doc: PersonaDocument = serde_json::from_str(
            r#"{"name": 42, "description": true, "personality": "not an object"}"#,
        )
        .unwrap();
        assert!(doc.name.is_none());
        assert!(doc.description.is_none());
        assert!(doc.personality.is_none());
    }

    #[test]
    fn test_description_shapes() {
        let text: Description = serde_json::from_str(r#""a hero""#).unwrap();
        assert_eq!(text.text(), "a hero");

        let lines: Description = serde_json::from_str(r#"["a", "hero"]"#).unwrap();
        assert_eq!(lines.text(), "a hero");

        let nested: Description =
            serde_json::from_str(r#"{"details": ["brave", "kind"]}"#).unwrap();
        assert_eq!(nested.text(), "brave kind");
    }

    #[test]
    fn test_one_or_many() {
        let one: OneOrMany = serde_json::from_str(r#""solo""#).unwrap();
        assert_eq!(one.join(", "), "solo");

        let many: OneOrMany = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(many.join(", "), "a, b");
        assert_eq!(many.items().len(), 2);
    }

    #[test]
    fn test_example_dialogue_pair_shape() {
        let dialogue: ExampleDialogue =
            serde_json::from_str(r#"{"user": "hello", "response": "hi there"}"#).unwrap();
        match dialogue {
            ExampleDialogue::Pair { user, response } => {
                assert_eq!(user.as_deref(), Some("hello"));
                assert_eq!(response.as_deref(), Some("hi there"));
            }
            ExampleDialogue::Thread(_) => panic!("expected pair shape"),
        }
    }

    #[test]
    fn test_example_dialogue_thread_shape() {
        let dialogue: ExampleDialogue = serde_json::from_str(
            r#"[{"user": "Visitor", "content": {"text": "hey"}},
                {"user": "Nova", "text": "greetings"}]"#,
        )
        .unwrap();
        match dialogue {
            ExampleDialogue::Thread(lines) => {
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[0].user.as_deref(), Some("Visitor"));
                assert_eq!(lines[0].message.as_ref().unwrap().text(), "hey");
                assert_eq!(lines[1].message.as_ref().unwrap().text(), "greetings");
            }
            ExampleDialogue::Pair { .. } => panic!("expected thread shape"),
        }
    }

    #[test]
    fn test_message_examples_alias() {
        let doc: PersonaDocument = serde_json::from_str(
            r#"{"messageExamples": [[{"user": "A", "text": "q"}, {"user": "B", "text": "a"}]]}"#,
        )
        .unwrap();
        assert_eq!(doc.example_dialogues.unwrap().len(), 1);
    }

    #[test]
    fn test_do_keyword_field() {
        let dd: DoDonts =
            serde_json::from_str(r#"{"do": ["be kind"], "dont": "be rude"}"#).unwrap();
        assert_eq!(dd.do_items.unwrap().items(), vec!["be kind"]);
        assert_eq!(dd.dont.unwrap().join(", "), "be rude");
    }
}
