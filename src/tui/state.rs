//! AppState - Domain Layer
//!
//! Landing/workbench routing, the prompt box and the cursor over the grid.
//! The workbench itself lives in a `WorkbenchSession`.

use ratatui::layout::Rect;
use tracing::warn;

use crate::config::WorkbenchConfig;
use crate::error::WorkbenchError;
use crate::session::WorkbenchSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Workbench,
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub view: View,
    pub config: WorkbenchConfig,

    // Landing
    pub input: String,
    pub notice: Option<String>,

    // Workbench
    pub session: Option<WorkbenchSession>,
    pub cursor: usize,
    /// Panel rectangles from the last frame, in sequence order
    pub panel_rects: Vec<Rect>,

    // UI state
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: WorkbenchConfig) -> Self {
        Self {
            view: View::Landing,
            config,
            input: String::new(),
            notice: None,
            session: None,
            cursor: 0,
            panel_rects: Vec::new(),
            spinner_frame: 0,
            should_quit: false,
        }
    }

    /// Open a workbench for the text in the prompt box
    pub fn submit_prompt(&mut self) -> Result<(), WorkbenchError> {
        match WorkbenchSession::open(&self.input, &self.config) {
            Ok(session) => {
                self.session = Some(session);
                self.view = View::Workbench;
                self.cursor = 0;
                self.notice = None;
                Ok(())
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Back to the landing view. Stops the session's timer.
    pub fn leave_workbench(&mut self) {
        if let Some(session) = self.session.take() {
            session.close();
        }
        self.view = View::Landing;
        self.panel_rects.clear();
        self.cursor = 0;
    }

    pub fn panel_count(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |s| s.grid().sequence().len())
    }

    pub fn is_dragging(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.grid().active_drag().is_some())
    }

    /// Forward a hover to the grid. Out-of-range indices are a translation
    /// bug in the caller; log and ignore them.
    pub fn hover(&mut self, to: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.grid_mut().hover(to as isize) {
            Ok(_) => {
                if let Some(drag) = session.grid().active_drag() {
                    self.cursor = drag.origin;
                }
            }
            Err(e) => warn!(error = %e, "hover ignored"),
        }
    }

    pub fn begin_drag(&mut self, index: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.grid_mut().begin_drag(index as isize) {
            Ok(_) => self.cursor = index,
            Err(e) => warn!(error = %e, "drag ignored"),
        }
    }

    pub fn drop_panel(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.grid_mut().report_drop() {
            Ok(outcome) => self.cursor = outcome.to,
            Err(e) => warn!(error = %e, "drop ignored"),
        }
    }

    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}
