//! TUI Module - Workbench Dashboard
//!
//! Terminal presentation layer for the workbench.
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  UI LAYER (app.rs, widgets/, layout.rs)             │
//! │  Pure rendering. Grid packing, hit testing. No ordering logic.      │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ AppState
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  DOMAIN LAYER (state.rs, events.rs)                 │
//! │  Routing, cursor, key/mouse → hover/drop translation.               │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ PanelGrid + watch<RevealProgress>
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  CORE (crate::session)                              │
//! │  Ordering engine and reveal sequencer, scoped to one session.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;
mod state;
mod theme;

pub mod layout;
pub mod widgets;

pub use app::TuiApp;
pub use state::{AppState, View};
pub use theme::WorkbenchTheme;

use crate::config::WorkbenchConfig;

/// Run the TUI dashboard
pub async fn run(config: WorkbenchConfig, prompt: Option<String>) -> anyhow::Result<()> {
    let app = TuiApp::new(config, prompt)?;
    app.run().await
}
