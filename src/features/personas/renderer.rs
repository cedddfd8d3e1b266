//! System prompt rendering from a persona document
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Consolidated the seven near-identical template literals into one renderer

use serde_json::Value;

use super::document::{ExampleDialogue, OneOrMany, PersonaDocument};

/// Placeholder strings for missing persona fields.
///
/// The prompt shape is deliberately stable: every section is always
/// present, with a named placeholder standing in for anything the
/// document does not provide.
const NO_NAME: &str = "No name available";
const NO_DESCRIPTION: &str = "No description available";
const NO_TRAITS: &str = "No traits available";
const NO_VALUES: &str = "No values available";
const NO_CULTURE: &str = "No culture information available";
const NO_SCENARIOS: &str = "No specific instructions for scenarios";
const NO_INSTRUCTIONS: &str = "No instructions available";
const NO_RESTRICTIONS: &str = "No specific restrictions";
const NO_LENGTH: &str = "No preference specified";
const NO_EMOJI: &str = "No guidance provided";
const NO_CATCHPHRASES: &str = "No catchphrases provided";
const NO_CRITICISM: &str = "No specific guidance for criticism";
const NO_EXAMPLES: &str = "No example messages available";
const NO_ADD_ONS: &str = "None";

/// Join a list field, falling back to a placeholder when the field is
/// absent or joins to an empty string
fn join_or(field: Option<&OneOrMany>, sep: &str, placeholder: &str) -> String {
    match field.map(|f| f.join(sep)) {
        Some(joined) if !joined.trim().is_empty() => joined,
        _ => placeholder.to_string(),
    }
}

fn text_or(field: Option<&str>, placeholder: &str) -> String {
    match field {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Render do-items as dashed lines
fn render_do_items(items: Option<&OneOrMany>) -> String {
    match items {
        Some(list) if !list.items().is_empty() => list
            .items()
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => NO_INSTRUCTIONS.to_string(),
    }
}

/// Render example dialogues as `User:` / reply line pairs.
///
/// For speaker-tagged threads the line whose tag matches the persona's
/// name is the reply; every other tagged line is attributed to the user.
fn render_examples(persona: &PersonaDocument) -> String {
    let reply_label = persona.name.as_deref().unwrap_or("Response");
    let dialogues = match persona.example_dialogues.as_deref() {
        Some(d) if !d.is_empty() => d,
        _ => return NO_EXAMPLES.to_string(),
    };

    let mut lines = Vec::new();
    for dialogue in dialogues {
        match dialogue {
            ExampleDialogue::Pair { user, response } => {
                lines.push(format!("User: {}", user.as_deref().unwrap_or("")));
                lines.push(format!(
                    "{reply_label}: {}",
                    response.as_deref().unwrap_or("")
                ));
            }
            ExampleDialogue::Thread(tagged) => {
                for line in tagged {
                    let text = line.message.as_ref().map(|m| m.text()).unwrap_or("");
                    let is_reply = match (&line.user, &persona.name) {
                        (Some(speaker), Some(name)) => speaker == name,
                        _ => false,
                    };
                    if is_reply {
                        lines.push(format!("{reply_label}: {text}"));
                    } else {
                        lines.push(format!("User: {text}"));
                    }
                }
            }
        }
    }

    if lines.is_empty() {
        NO_EXAMPLES.to_string()
    } else {
        lines.join("\n")
    }
}

/// Render free-form add-ons as sorted `key: value` lines
fn render_add_ons(add_ons: Option<&Value>) -> String {
    match add_ons {
        Some(Value::Object(map)) if !map.is_empty() => map
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("- {key}: {s}"),
                other => format!("- {key}: {other}"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Some(Value::String(s)) if !s.trim().is_empty() => format!("- {s}"),
        _ => NO_ADD_ONS.to_string(),
    }
}

/// Render the system prompt for a persona document.
///
/// Pure and deterministic: the same document always produces a
/// byte-identical string, and no field shape ever makes it fail.
pub fn render(persona: &PersonaDocument) -> String {
    let personality = persona.personality.as_ref();
    let instruction = persona.instruction.as_ref();
    let do_donts = instruction.and_then(|i| i.do_donts.as_ref());

    let description = match persona.description.as_ref().map(|d| d.text()) {
        Some(text) if !text.is_empty() => text,
        _ => NO_DESCRIPTION.to_string(),
    };

    format!(
        "Character Overview:\n\
         - Name: {name}\n\
         - Description: {description}\n\
         \n\
         Personality:\n\
         - Traits: {traits}\n\
         - Values: {values}\n\
         - Culture: {culture}\n\
         - Unexpected Scenarios: {scenarios}\n\
         \n\
         Instructions:\n\
         {do_items}\n\
         - Avoid: {dont}\n\
         - Message Length: {length}\n\
         - Emoji Use: {emoji}\n\
         - Catchphrases: {catchphrases}\n\
         - Criticism Response: {criticism}\n\
         \n\
         Add-ons:\n\
         {add_ons}\n\
         \n\
         Example Messages:\n\
         {examples}",
        name = text_or(persona.name.as_deref(), NO_NAME),
        description = description,
        traits = join_or(personality.and_then(|p| p.traits.as_ref()), ", ", NO_TRAITS),
        values = join_or(personality.and_then(|p| p.values.as_ref()), ", ", NO_VALUES),
        culture = join_or(
            personality.and_then(|p| p.culture.as_ref()),
            ", ",
            NO_CULTURE
        ),
        scenarios = text_or(
            personality.and_then(|p| p.unexpected_scenarios.as_deref()),
            NO_SCENARIOS
        ),
        do_items = render_do_items(do_donts.and_then(|d| d.do_items.as_ref())),
        dont = join_or(do_donts.and_then(|d| d.dont.as_ref()), ", ", NO_RESTRICTIONS),
        length = text_or(
            instruction.and_then(|i| i.message_length.as_deref()),
            NO_LENGTH
        ),
        emoji = text_or(instruction.and_then(|i| i.emoji_use.as_deref()), NO_EMOJI),
        catchphrases = join_or(
            instruction.and_then(|i| i.catchphrases.as_ref()),
            ", ",
            NO_CATCHPHRASES
        ),
        criticism = join_or(
            instruction.and_then(|i| i.criticism_response.as_ref()),
            "\n",
            NO_CRITICISM
        ),
        add_ons = render_add_ons(persona.add_ons.as_ref()),
        examples = render_examples(persona),
    )
}
