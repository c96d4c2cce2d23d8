//! Panel descriptors and the ordered panel sequence
//!
//! A `PanelSequence` holds a fixed set of panels, unique by id. The only
//! mutation is `move_panel`, a single-element relocation, so the set of ids
//! never changes after construction.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WorkbenchError;

/// Number of columns in the dashboard grid
pub const GRID_COLUMNS: u16 = 8;

// ─────────────────────────────────────────────────────────────────────────────
// Panel Kind
// ─────────────────────────────────────────────────────────────────────────────

/// Category of agent output a panel stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Pdf,
    Web,
    Data,
    Slides,
    Code,
    Summary,
}

/// Footprint of a panel in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpan {
    pub cols: u16,
    pub rows: u16,
}

impl PanelKind {
    pub const ALL: [PanelKind; 6] = [
        PanelKind::Pdf,
        PanelKind::Web,
        PanelKind::Data,
        PanelKind::Slides,
        PanelKind::Code,
        PanelKind::Summary,
    ];

    /// Sizing policy on the 8-column grid. Has no effect on ordering.
    pub fn grid_span(self) -> GridSpan {
        let (cols, rows) = match self {
            PanelKind::Pdf => (4, 3),
            PanelKind::Web => (4, 2),
            PanelKind::Data => (2, 2),
            PanelKind::Slides => (2, 1),
            PanelKind::Code => (2, 2),
            PanelKind::Summary => (2, 1),
        };
        GridSpan { cols, rows }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PanelKind::Pdf => "pdf",
            PanelKind::Web => "web",
            PanelKind::Data => "data",
            PanelKind::Slides => "slides",
            PanelKind::Code => "code",
            PanelKind::Summary => "summary",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Panel Descriptor
// ─────────────────────────────────────────────────────────────────────────────

/// One dashboard tile. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelDescriptor {
    pub id: String,
    pub kind: PanelKind,
    pub label: String,
}

impl PanelDescriptor {
    pub fn new(id: impl Into<String>, kind: PanelKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
        }
    }
}

/// The six panels shown when a workbench opens
pub fn default_panels() -> Vec<PanelDescriptor> {
    vec![
        PanelDescriptor::new("pdf", PanelKind::Pdf, "PDF Document"),
        PanelDescriptor::new("web", PanelKind::Web, "Web Results"),
        PanelDescriptor::new("data", PanelKind::Data, "Data Table"),
        PanelDescriptor::new("slides", PanelKind::Slides, "Presentation Slides"),
        PanelDescriptor::new("code", PanelKind::Code, "Code"),
        PanelDescriptor::new("summary", PanelKind::Summary, "Summary"),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Panel Sequence
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered panels, unique by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSequence {
    panels: Vec<PanelDescriptor>,
}

impl PanelSequence {
    /// Build a sequence, rejecting duplicate ids
    pub fn new(panels: Vec<PanelDescriptor>) -> Result<Self, WorkbenchError> {
        let mut seen = HashSet::with_capacity(panels.len());
        for panel in &panels {
            if !seen.insert(panel.id.as_str()) {
                return Err(WorkbenchError::invalid_config(format!(
                    "duplicate panel id '{}'",
                    panel.id
                )));
            }
        }
        Ok(Self { panels })
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn as_slice(&self) -> &[PanelDescriptor] {
        &self.panels
    }

    pub fn iter(&self) -> impl Iterator<Item = &PanelDescriptor> {
        self.panels.iter()
    }

    pub fn get(&self, index: usize) -> Option<&PanelDescriptor> {
        self.panels.get(index)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.id == id)
    }

    /// Validate a signed index against the current length
    pub fn checked_index(&self, index: isize) -> Result<usize, WorkbenchError> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.panels.len())
            .ok_or(WorkbenchError::OutOfRange {
                index,
                len: self.panels.len(),
            })
    }

    /// Remove the panel at `from` and reinsert it so it ends up at `to`.
    ///
    /// Both indices are checked before anything moves; on error the order is
    /// untouched. `from == to` is a no-op.
    pub fn move_panel(&mut self, from: isize, to: isize) -> Result<(), WorkbenchError> {
        let from = self.checked_index(from)?;
        let to = self.checked_index(to)?;

        if from < to {
            self.panels[from..=to].rotate_left(1);
        } else if to < from {
            self.panels[to..=from].rotate_right(1);
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a PanelSequence {
    type Item = &'a PanelDescriptor;
    type IntoIter = std::slice::Iter<'a, PanelDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.panels.iter()
    }
}
