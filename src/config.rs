//! Workbench configuration (YAML)
//!
//! Every field is optional; the defaults reproduce the stock demo.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::WorkbenchError;
use crate::panel::{default_panels, PanelDescriptor};
use crate::reveal::{default_thoughts, DEFAULT_INTERVAL};

/// Panel ids: lowercase, start with a letter
static PANEL_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9_-]*$").expect("panel id regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkbenchConfig {
    /// Reveal tick period in milliseconds
    pub interval_ms: u64,

    /// Orchestrator thoughts, revealed in order
    pub thoughts: Vec<String>,

    /// Initial panel order
    pub panels: Vec<PanelDescriptor>,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            thoughts: default_thoughts(),
            panels: default_panels(),
        }
    }
}

impl WorkbenchConfig {
    /// Parse YAML and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, WorkbenchError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WorkbenchError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> Result<(), WorkbenchError> {
        if self.interval_ms == 0 {
            return Err(WorkbenchError::invalid_config("interval_ms must be positive"));
        }
        if self.thoughts.is_empty() {
            return Err(WorkbenchError::invalid_config(
                "thoughts must contain at least one message",
            ));
        }
        if self.panels.is_empty() {
            return Err(WorkbenchError::invalid_config(
                "panels must contain at least one panel",
            ));
        }

        let mut seen = HashSet::new();
        for panel in &self.panels {
            if !PANEL_ID_RE.is_match(&panel.id) {
                return Err(WorkbenchError::invalid_config(format!(
                    "panel id '{}' must match {}",
                    panel.id,
                    PANEL_ID_RE.as_str()
                )));
            }
            if !seen.insert(panel.id.as_str()) {
                return Err(WorkbenchError::invalid_config(format!(
                    "duplicate panel id '{}'",
                    panel.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelKind;

    #[test]
    fn empty_document_uses_defaults() {
        let config = WorkbenchConfig::from_yaml("{}").unwrap();
        assert_eq!(config, WorkbenchConfig::default());
        assert_eq!(config.interval(), Duration::from_millis(2000));
        assert_eq!(config.panels.len(), 6);
        assert_eq!(config.thoughts.len(), 5);
    }

    #[test]
    fn parse_custom_config() {
        let yaml = r#"
            interval_ms: 250
            thoughts:
              - "Reading the brief..."
              - "Done."
            panels:
              - { id: notes, kind: summary, label: "Notes" }
              - { id: repo, kind: code, label: "Repository" }
        "#;
        let config = WorkbenchConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.interval_ms, 250);
        assert_eq!(config.thoughts, vec!["Reading the brief...", "Done."]);
        assert_eq!(config.panels[1].kind, PanelKind::Code);
        assert_eq!(config.panels[0].label, "Notes");
    }

    #[test]
    fn zero_interval_rejected() {
        let err = WorkbenchConfig::from_yaml("interval_ms: 0").unwrap_err();
        assert!(err.to_string().contains("interval_ms must be positive"));
    }

    #[test]
    fn empty_thoughts_rejected() {
        let err = WorkbenchConfig::from_yaml("thoughts: []").unwrap_err();
        assert!(matches!(err, WorkbenchError::InvalidConfiguration { .. }));
    }

    #[test]
    fn duplicate_panel_rejected() {
        let yaml = r#"
            panels:
              - { id: pdf, kind: pdf, label: "A" }
              - { id: pdf, kind: web, label: "B" }
        "#;
        let err = WorkbenchConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate panel id 'pdf'"));
    }

    #[test]
    fn malformed_panel_id_rejected() {
        let yaml = r#"
            panels:
              - { id: "PDF Viewer", kind: pdf, label: "A" }
        "#;
        let err = WorkbenchConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("panel id 'PDF Viewer'"));
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let yaml = r#"
            panels:
              - { id: sheet, kind: spreadsheet, label: "A" }
        "#;
        assert!(matches!(
            WorkbenchConfig::from_yaml(yaml),
            Err(WorkbenchError::ConfigParse(_))
        ));
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        assert!(matches!(
            WorkbenchConfig::from_yaml("speed: 3"),
            Err(WorkbenchError::ConfigParse(_))
        ));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workbench.yaml");
        std::fs::write(&path, "interval_ms: 10\n").unwrap();
        let config = WorkbenchConfig::from_path(&path).unwrap();
        assert_eq!(config.interval_ms, 10);

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            WorkbenchConfig::from_path(missing),
            Err(WorkbenchError::Io(_))
        ));
    }
}
