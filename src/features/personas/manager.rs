//! # Feature: Persona System
//!
//! Route-keyed persona documents loaded from JSON files at startup. Each
//! file under the persona directory becomes one chat route: `nova.json`
//! serves `/chat/nova`. Documents are immutable for the process lifetime.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Personas load from a directory of JSON documents instead of compiled-in prompts
//! - 1.0.0: Initial release with hardcoded persona set

use anyhow::{bail, Context, Result};
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::document::PersonaDocument;
use super::renderer::render;

#[derive(Debug, Clone, Default)]
pub struct PersonaManager {
    personas: HashMap<String, PersonaDocument>,
}

impl PersonaManager {
    /// Load every `*.json` file in `dir` as a persona document, keyed by
    /// file stem. Fails if the directory is unreadable, a document is not
    /// valid JSON, or no persona was found at all.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read persona directory {}", dir.display()))?;

        let mut personas = HashMap::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read persona file {}", path.display()))?;
            let document: PersonaDocument = serde_json::from_str(&raw)
                .with_context(|| format!("Persona file {} is not valid JSON", path.display()))?;

            info!("Loaded persona '{id}' from {}", path.display());
            personas.insert(id.to_string(), document);
        }

        if personas.is_empty() {
            bail!("No persona documents found in {}", dir.display());
        }

        Ok(PersonaManager { personas })
    }

    /// Build a manager from in-memory documents (used by tests)
    pub fn from_documents(personas: HashMap<String, PersonaDocument>) -> Self {
        PersonaManager { personas }
    }

    pub fn get(&self, id: &str) -> Option<&PersonaDocument> {
        self.personas.get(id)
    }

    /// Rendered system prompt for a persona, if it exists
    pub fn system_prompt(&self, id: &str) -> Option<String> {
        self.personas.get(id).map(render)
    }

    /// All persona ids, sorted for stable listings
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.personas.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}
