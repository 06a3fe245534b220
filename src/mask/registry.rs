//! Built-in mask registry.
//!
//! An ordered, immutable table of bundled masks, partitioned by language
//! tag. Initialized once before any concurrent access and read-only after
//! that, so lookups need no synchronization.

use crate::error::{Error, Result};

use super::types::{MaskFile, MaskPreset};

/// Bundled mask table, embedded at compile time.
const BUILTIN_CN: &str = include_str!("../../config/masks/cn.toml");

/// Registry of built-in mask presets.
///
/// Holds masks in declaration order; all lookups preserve that order and
/// none of them mutate the table.
#[derive(Debug, Clone)]
pub struct MaskRegistry {
    masks: Vec<MaskPreset>,
}

impl MaskRegistry {
    /// Build the registry from the bundled mask table.
    ///
    /// Every bundled mask is re-checked against the validation contract:
    /// the registry must never hand out a preset that fails `validate`,
    /// so a malformed bundle is rejected here rather than at lookup time.
    pub fn builtin() -> Result<Self> {
        let table: MaskFile = toml::from_str(BUILTIN_CN)
            .map_err(|e| Error::Internal(format!("bundled mask table is malformed: {}", e)))?;
        let registry = Self::from_masks(table.masks);

        for mask in &registry.masks {
            mask.validate()
                .map_err(|report| Error::mask_invalid(mask.name.clone(), report))?;
        }

        Ok(registry)
    }

    /// Build a registry from an explicit mask list (declaration order kept).
    pub fn from_masks(masks: Vec<MaskPreset>) -> Self {
        Self { masks }
    }

    /// All masks in declaration order.
    pub fn all(&self) -> &[MaskPreset] {
        &self.masks
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Language tags present in the registry, first occurrence order.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = Vec::new();
        for mask in &self.masks {
            if !langs.contains(&mask.lang.as_str()) {
                langs.push(&mask.lang);
            }
        }
        langs
    }

    /// All masks whose `lang` matches, in declaration order.
    ///
    /// An unknown language yields an empty list, not an error.
    pub fn list_by_language(&self, lang: &str) -> Vec<&MaskPreset> {
        self.masks.iter().filter(|m| m.lang == lang).collect()
    }

    /// Exact-name lookup within a language partition.
    ///
    /// Duplicate names resolve to the first declared match; declaration
    /// order is stable, so the choice is deterministic. A miss is the
    /// recoverable `MaskNotFound` error.
    pub fn get_by_name(&self, lang: &str, name: &str) -> Result<&MaskPreset> {
        self.masks
            .iter()
            .find(|m| m.lang == lang && m.name == name)
            .ok_or_else(|| Error::mask_not_found(lang, name))
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
