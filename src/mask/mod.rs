//! Mask system: built-in conversation presets and user mask files.
//!
//! A mask bundles the seed messages and model parameters a new chat session
//! is initialized from. Built-in masks ship with the binary and are immutable
//! for the process lifetime; user-authored mask files must pass the same
//! validation contract.

pub mod loader;
pub mod registry;
pub mod types;
pub mod validate;

pub use loader::MaskLoader;
pub use registry::MaskRegistry;
pub use types::{ChatRole, MaskFile, MaskPreset, ModelConfig, SeedMessage};
pub use validate::{ValidationIssue, ValidationReport};
