//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Panel ordering (SIM-010 to SIM-012)
    // ─────────────────────────────────────────────────────────────
    #[error("SIM-010: Index {index} is out of range for {len} panels")]
    OutOfRange { index: isize, len: usize },

    #[error("SIM-011: No drag gesture is active")]
    NoActiveDrag,

    #[error("SIM-012: Hover from slot {from} but the dragged panel is at slot {origin}")]
    HoverMismatch { from: usize, origin: usize },

    // ─────────────────────────────────────────────────────────────
    // Configuration (SIM-020)
    // ─────────────────────────────────────────────────────────────
    #[error("SIM-020: Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    // ─────────────────────────────────────────────────────────────
    // Session (SIM-030)
    // ─────────────────────────────────────────────────────────────
    #[error("SIM-030: Prompt is empty")]
    EmptyPrompt,
}

impl WorkbenchError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl FixSuggestion for WorkbenchError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            WorkbenchError::ConfigParse(_) => Some("Check YAML syntax: indentation and quoting"),
            WorkbenchError::Io(_) => Some("Check file path and permissions"),
            WorkbenchError::OutOfRange { .. } => {
                Some("Drag events must reference a slot inside the panel grid")
            }
            WorkbenchError::NoActiveDrag => Some("Start a drag before reporting hover or drop"),
            WorkbenchError::HoverMismatch { .. } => {
                Some("Report hovers from the slot the dragged panel currently occupies")
            }
            WorkbenchError::InvalidConfiguration { .. } => {
                Some("Use a positive interval_ms, at least one thought and unique panel ids")
            }
            WorkbenchError::EmptyPrompt => Some("Type a prompt before opening the workbench"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_carries_code() {
        let err = WorkbenchError::OutOfRange { index: -1, len: 6 };
        assert_eq!(
            err.to_string(),
            "SIM-010: Index -1 is out of range for 6 panels"
        );
        assert!(err.fix_suggestion().is_some());
    }

    #[test]
    fn hover_mismatch_names_both_slots() {
        let err = WorkbenchError::HoverMismatch { from: 2, origin: 0 };
        assert_eq!(
            err.to_string(),
            "SIM-012: Hover from slot 2 but the dragged panel is at slot 0"
        );
        assert!(err.fix_suggestion().is_some());
    }

    #[test]
    fn invalid_config_helper() {
        let err = WorkbenchError::invalid_config("interval_ms must be positive");
        assert!(matches!(err, WorkbenchError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("interval_ms must be positive"));
    }
}
