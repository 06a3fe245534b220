//! Error types for chatmask
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::mask::validate::ValidationReport;

/// Result type alias for chatmask operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,

    // Mask errors (3xx)
    MaskNotFound = 300,
    MaskParseError = 301,
    MaskValidation = 302,

    // Model catalog errors (4xx)
    ModelUnknown = 400,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Mask errors
            400..=499 => 40, // Model catalog errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for chatmask
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Mask Errors
    // ─────────────────────────────────────────────────────────────

    /// No mask with the requested name in the language partition.
    /// A lookup miss is expected and recoverable; callers fall back
    /// to a default mask rather than aborting.
    #[error("No mask named '{name}' for language '{lang}'")]
    MaskNotFound { lang: String, name: String },

    /// Mask file could not be parsed
    #[error("Failed to parse mask file {path}: {message}")]
    MaskParse { path: PathBuf, message: String },

    /// Mask failed structural validation; the report lists every
    /// violated rule, not just the first
    #[error("Mask '{name}' failed validation: {report}")]
    MaskInvalid { name: String, report: ValidationReport },

    // ─────────────────────────────────────────────────────────────
    // Model Catalog Errors
    // ─────────────────────────────────────────────────────────────

    /// Model identifier not present in the bundled catalog
    #[error("Unknown model: {model}")]
    ModelUnknown { model: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::InternalError,
            Error::Json(_) => ErrorCode::InternalError,

            Error::MaskNotFound { .. } => ErrorCode::MaskNotFound,
            Error::MaskParse { .. } => ErrorCode::MaskParseError,
            Error::MaskInvalid { .. } => ErrorCode::MaskValidation,

            Error::ModelUnknown { .. } => ErrorCode::ModelUnknown,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Check if the error is recoverable (callers can degrade gracefully)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::MaskNotFound { .. }
                | Error::MaskParse { .. }
                | Error::MaskInvalid { .. }
                | Error::ModelUnknown { .. }
        )
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'chatmask config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'chatmask config validate' to see details."
            ),
            Error::Config(_) => Some(
                "Review the configuration file and fix the invalid values."
            ),

            Error::MaskNotFound { .. } => Some(
                "Run 'chatmask mask list' to see the masks available for a language."
            ),
            Error::MaskParse { .. } => Some(
                "Mask files must be TOML ([[masks]] tables) or JSON (an array of masks)."
            ),
            Error::MaskInvalid { .. } => Some(
                "Fix the listed fields and re-run 'chatmask mask check'."
            ),

            Error::ModelUnknown { .. } => Some(
                "Run 'chatmask models list' to see the bundled model catalog."
            ),

            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let suggestion = self.suggestion();

        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            code.as_str(),
            self
        );

        if let Some(hint) = suggestion {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        let code = self.code();
        format!("[{}] {}", code.as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors (for ergonomic error creation)
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    /// Create a mask not found error
    pub fn mask_not_found(lang: impl Into<String>, name: impl Into<String>) -> Self {
        Error::MaskNotFound {
            lang: lang.into(),
            name: name.into(),
        }
    }

    /// Create a mask parse error
    pub fn mask_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::MaskParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a mask validation error from a report
    pub fn mask_invalid(name: impl Into<String>, report: ValidationReport) -> Self {
        Error::MaskInvalid {
            name: name.into(),
            report,
        }
    }

    /// Create an unknown model error
    pub fn model_unknown(model: impl Into<String>) -> Self {
        Error::ModelUnknown {
            model: model.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
