//! Core types for the mask system.
//!
//! Serialized field names keep the wire format of mask files exported by the
//! web client (camelCase for the nested config, `createdAt` timestamps), so
//! existing exports load unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Chat Role
// ─────────────────────────────────────────────────────────────────

/// Conversation participant roles.
///
/// The wire format is an open string; modeling it as a closed enum keeps
/// invalid roles unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instructions, not shown as a regular turn.
    System,
    /// End-user turn.
    User,
    /// Model turn.
    Assistant,
}

impl ChatRole {
    /// Wire/slug form of the role.
    pub fn slug(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    /// All roles in conversation order.
    pub fn all() -> &'static [ChatRole] {
        &[ChatRole::System, ChatRole::User, ChatRole::Assistant]
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(ChatRole::System),
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            _ => Err(format!(
                "Unknown role '{}'. Valid: system, user, assistant",
                s
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Seed Message
// ─────────────────────────────────────────────────────────────────

/// A pre-authored conversation turn injected when a mask is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedMessage {
    /// Identifier, unique within the owning mask's `context`.
    pub id: String,

    /// Who speaks this turn.
    pub role: ChatRole,

    /// Literal message body.
    pub content: String,

    /// Display timestamp; an empty string means unset.
    #[serde(default)]
    pub date: String,
}

// ─────────────────────────────────────────────────────────────────
// Model Config
// ─────────────────────────────────────────────────────────────────

/// Parameters controlling a language-model invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier; cross-checked against the model catalog by
    /// consumers, not by structural validation.
    pub model: String,

    /// Sampling randomness, valid within [0, 2].
    pub temperature: f32,

    /// Upper bound on generated output length, must be positive.
    pub max_tokens: u32,

    /// Repetition control.
    pub presence_penalty: f32,

    /// Repetition control.
    pub frequency_penalty: f32,

    /// Whether prior conversation history is sent on each call.
    #[serde(rename = "sendMemory")]
    pub send_memory: bool,

    /// Cap on the number of prior turns retained. Signed so malformed
    /// user files surface a validation error instead of a parse error.
    #[serde(rename = "historyMessageCount")]
    pub history_message_count: i32,

    /// Length threshold above which history is summarized by the
    /// session layer.
    #[serde(rename = "compressMessageLengthThreshold")]
    pub compress_message_length_threshold: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.5,
            max_tokens: 2000,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            send_memory: false,
            history_message_count: 4,
            compress_message_length_threshold: 1000,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Mask Preset
// ─────────────────────────────────────────────────────────────────

/// A named, reusable conversation template.
///
/// Owns its seed messages and model config outright (composition, no
/// sharing). The order of `context` is meaningful: it is replayed in
/// sequence as conversation history when the mask is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskPreset {
    /// Opaque icon identifier (emoji codepoint token).
    pub avatar: String,

    /// Display label, unique within a language partition by convention.
    pub name: String,

    /// Language-partition tag (e.g. "cn").
    pub lang: String,

    /// True for masks shipped with the application.
    pub builtin: bool,

    /// Creation timestamp, milliseconds since the Unix epoch.
    #[serde(rename = "createdAt")]
    pub created_at: i64,

    /// Seed conversation turns, replayed in order.
    pub context: Vec<SeedMessage>,

    /// Model invocation parameters.
    #[serde(rename = "modelConfig")]
    pub model_config: ModelConfig,
}

impl MaskPreset {
    /// Creation time as a UTC timestamp, if `created_at` is in range.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }
}

// ─────────────────────────────────────────────────────────────────
// Mask File
// ─────────────────────────────────────────────────────────────────

/// On-disk TOML shape of a mask table: `[[masks]]` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskFile {
    pub masks: Vec<MaskPreset>,
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
