//! Bundled model catalog.
//!
//! Static tables for the default model list, knowledge-cutoff lookup, and
//! summarization-model selection. The catalog is immutable data consulted
//! by consumers; mask validation deliberately does not cross-check model
//! names against it.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────
// Model Provider
// ─────────────────────────────────────────────────────────────────

/// Service providers the bundled models belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    OpenAi,
    Google,
}

impl ModelProvider {
    /// Stable provider id used in wire formats.
    pub fn id(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "openai",
            ModelProvider::Google => "google",
        }
    }

    /// Human-readable provider name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "OpenAI",
            ModelProvider::Google => "Google",
        }
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ─────────────────────────────────────────────────────────────────
// Model Entry
// ─────────────────────────────────────────────────────────────────

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelEntry {
    /// Model identifier as used in `modelConfig.model`.
    pub name: &'static str,

    /// Whether the model is currently selectable.
    pub available: bool,

    /// Owning provider.
    pub provider: ModelProvider,
}

// ─────────────────────────────────────────────────────────────────
// Bundled Data
// ─────────────────────────────────────────────────────────────────

/// Model a fresh session starts on.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Model used to summarize long histories.
pub const SUMMARIZE_MODEL: &str = "gpt-3.5-turbo";

/// Summarization model for Gemini-family sessions.
pub const GEMINI_SUMMARIZE_MODEL: &str = "gemini-pro";

/// Cutoff reported for models missing from the lookup table.
pub const DEFAULT_KNOWLEDGE_CUTOFF: &str = "2021-09";

const DEFAULT_MODELS: &[ModelEntry] = &[
    ModelEntry {
        name: "gpt-4-vision-preview",
        available: true,
        provider: ModelProvider::OpenAi,
    },
    ModelEntry {
        name: "gpt-3.5-turbo",
        available: true,
        provider: ModelProvider::OpenAi,
    },
];

const KNOWLEDGE_CUTOFFS: &[(&str, &str)] = &[
    ("gpt-4-turbo-preview", "2023-12"),
    ("gpt-4-1106-preview", "2023-04"),
    ("gpt-4-0125-preview", "2023-12"),
    ("gpt-4-vision-preview", "2023-04"),
    ("gemini-pro", "2023-12"),
];

// ─────────────────────────────────────────────────────────────────
// Model Catalog
// ─────────────────────────────────────────────────────────────────

/// Read-only lookup over the bundled model tables.
#[derive(Debug, Clone, Copy)]
pub struct ModelCatalog {
    entries: &'static [ModelEntry],
    cutoffs: &'static [(&'static str, &'static str)],
}

impl ModelCatalog {
    /// The catalog shipped with the binary.
    pub fn bundled() -> Self {
        Self {
            entries: DEFAULT_MODELS,
            cutoffs: KNOWLEDGE_CUTOFFS,
        }
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &'static [ModelEntry] {
        self.entries
    }

    /// Entries currently selectable.
    pub fn available(&self) -> impl Iterator<Item = &'static ModelEntry> {
        self.entries.iter().filter(|e| e.available)
    }

    /// Find an entry by exact model name.
    pub fn find(&self, name: &str) -> Option<&'static ModelEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Whether the model name is in the catalog.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Find an entry or fail with `ModelUnknown`.
    pub fn get(&self, name: &str) -> Result<&'static ModelEntry> {
        self.find(name).ok_or_else(|| Error::model_unknown(name))
    }

    /// Whether the cutoff table has an explicit entry for this model.
    pub fn has_cutoff(&self, model: &str) -> bool {
        self.cutoffs.iter().any(|(name, _)| *name == model)
    }

    /// Knowledge cutoff for a model, falling back to the default.
    pub fn knowledge_cutoff(&self, model: &str) -> &'static str {
        self.cutoffs
            .iter()
            .find(|(name, _)| *name == model)
            .map(|(_, cutoff)| *cutoff)
            .unwrap_or(DEFAULT_KNOWLEDGE_CUTOFF)
    }

    /// Model used to compress history for a session on `model`.
    pub fn summarize_model(model: &str) -> &'static str {
        if model.starts_with("gemini") {
            GEMINI_SUMMARIZE_MODEL
        } else {
            SUMMARIZE_MODEL
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
