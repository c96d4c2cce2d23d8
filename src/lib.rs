//! SIMpol workbench - reorderable agent panels and a timed orchestrator log

pub mod config;
pub mod drag;
pub mod error;
pub mod panel;
pub mod reveal;
pub mod session;
pub mod tui;

pub use config::WorkbenchConfig;
pub use drag::{DragGesture, DropOutcome, PanelGrid};
pub use error::{FixSuggestion, WorkbenchError};
pub use panel::{GridSpan, PanelDescriptor, PanelKind, PanelSequence};
pub use reveal::{RevealProgress, RevealScript, RevealSequencer, RevealState};
pub use session::{Prompt, WorkbenchSession};
