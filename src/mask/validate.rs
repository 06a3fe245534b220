//! Structural validation for mask presets.
//!
//! Built-in and user-authored masks share one contract. Validation reports
//! every violated rule in a single pass, so an author importing a broken
//! mask gets the complete list of problems at once.

use std::collections::HashSet;
use std::fmt;
use std::ops::RangeInclusive;

use super::types::MaskPreset;

/// Valid sampling temperature range (closed interval).
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=2.0;

// ─────────────────────────────────────────────────────────────────
// Report Types
// ─────────────────────────────────────────────────────────────────

/// A single violated rule, tied to the field it concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Wire-format field path (e.g. "modelConfig.temperature").
    pub field: String,

    /// What is wrong with the value.
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All rules a mask violated, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for issue in &self.issues {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
            first = false;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────

impl MaskPreset {
    /// Structural check against the mask contract.
    ///
    /// Collects every violation instead of stopping at the first. Roles are
    /// already constrained by the `ChatRole` enum and need no runtime check.
    pub fn validate(&self) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::default();

        if self.name.trim().is_empty() {
            report.push("name", "must not be empty");
        }
        if self.avatar.trim().is_empty() {
            report.push("avatar", "must not be empty");
        }

        if self.context.is_empty() {
            report.push("context", "must contain at least one seed message");
        }
        let mut seen_ids: HashSet<&str> = HashSet::new();
        for (i, msg) in self.context.iter().enumerate() {
            if msg.id.trim().is_empty() {
                report.push(format!("context[{}].id", i), "must not be empty");
            } else if !seen_ids.insert(msg.id.as_str()) {
                report.push(
                    format!("context[{}].id", i),
                    format!("duplicate id '{}'", msg.id),
                );
            }
        }

        let mc = &self.model_config;
        if mc.model.trim().is_empty() {
            report.push("modelConfig.model", "must not be empty");
        }
        if !TEMPERATURE_RANGE.contains(&mc.temperature) {
            report.push(
                "modelConfig.temperature",
                format!(
                    "{} is outside the valid range [{}, {}]",
                    mc.temperature,
                    TEMPERATURE_RANGE.start(),
                    TEMPERATURE_RANGE.end()
                ),
            );
        }
        if mc.max_tokens == 0 {
            report.push("modelConfig.max_tokens", "must be greater than 0");
        }
        if mc.history_message_count < 0 {
            report.push(
                "modelConfig.historyMessageCount",
                format!("{} must not be negative", mc.history_message_count),
            );
        }

        if report.is_empty() {
            Ok(())
        } else {
            Err(report)
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::types::{ChatRole, MaskPreset, ModelConfig, SeedMessage};
    use super::*;

    fn valid_mask() -> MaskPreset {
        MaskPreset {
            avatar: "1f9d1-200d-1f3eb".to_string(),
            name: "Writer".to_string(),
            context: vec![SeedMessage {
                id: "trans-0".to_string(),
                role: ChatRole::User,
                content: "rewrite my text".to_string(),
                date: String::new(),
            }],
            model_config: ModelConfig::default(),
            lang: "en".to_string(),
            builtin: false,
            created_at: 1688899480524,
        }
    }

    #[test]
    fn test_valid_mask_passes() {
        assert!(valid_mask().validate().is_ok());
    }

    #[test]
    fn test_empty_context_fails() {
        let mut mask = valid_mask();
        mask.context.clear();
        let report = mask.validate().unwrap_err();
        assert!(report.issues.iter().any(|i| i.field == "context"));
    }

    #[test]
    fn test_temperature_boundaries() {
        let mut mask = valid_mask();

        mask.model_config.temperature = 2.0;
        assert!(mask.validate().is_ok());

        mask.model_config.temperature = 0.0;
        assert!(mask.validate().is_ok());

        mask.model_config.temperature = 2.01;
        assert!(mask.validate().is_err());

        mask.model_config.temperature = -0.1;
        assert!(mask.validate().is_err());
    }

    #[test]
    fn test_temperature_nan_fails() {
        let mut mask = valid_mask();
        mask.model_config.temperature = f32::NAN;
        assert!(mask.validate().is_err());
    }

    #[test]
    fn test_max_tokens_boundaries() {
        let mut mask = valid_mask();

        mask.model_config.max_tokens = 1;
        assert!(mask.validate().is_ok());

        mask.model_config.max_tokens = 0;
        let report = mask.validate().unwrap_err();
        assert!(report
            .issues
            .iter()
            .any(|i| i.field == "modelConfig.max_tokens"));
    }

    #[test]
    fn test_negative_history_count_fails() {
        let mut mask = valid_mask();
        mask.model_config.history_message_count = -1;
        let report = mask.validate().unwrap_err();
        assert!(report
            .issues
            .iter()
            .any(|i| i.field == "modelConfig.historyMessageCount"));

        mask.model_config.history_message_count = 0;
        assert!(mask.validate().is_ok());
    }

    #[test]
    fn test_duplicate_seed_ids_fail() {
        let mut mask = valid_mask();
        let mut dup = mask.context[0].clone();
        dup.content = "second turn".to_string();
        mask.context.push(dup);

        let report = mask.validate().unwrap_err();
        assert_eq!(report.len(), 1);
        assert!(report.issues[0].message.contains("duplicate"));
    }

    #[test]
    fn test_all_violations_reported_in_one_pass() {
        let mut mask = valid_mask();
        mask.name = String::new();
        mask.avatar = "  ".to_string();
        mask.context.clear();
        mask.model_config.model = String::new();
        mask.model_config.temperature = 3.0;
        mask.model_config.max_tokens = 0;
        mask.model_config.history_message_count = -4;

        let report = mask.validate().unwrap_err();
        assert_eq!(report.len(), 7);
    }

    #[test]
    fn test_report_display_lists_fields() {
        let mut mask = valid_mask();
        mask.model_config.max_tokens = 0;
        mask.model_config.temperature = 2.5;

        let report = mask.validate().unwrap_err();
        let text = report.to_string();
        assert!(text.contains("modelConfig.temperature"));
        assert!(text.contains("modelConfig.max_tokens"));
        assert!(text.contains("; "));
    }
}
