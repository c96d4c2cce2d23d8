//! Panel ordering engine and drag-gesture protocol
//!
//! The presentation layer forwards raw gestures as two operations:
//! - `report_hover(from, to)`: the dragged panel (currently at `from`) is over slot `to`
//! - `report_drop()`: the gesture ended
//!
//! Every hover with `from != to` performs exactly one move, after which the
//! gesture's origin becomes `to`. A single drag therefore produces one move
//! per slot crossed, and the drop itself changes nothing.

use tracing::{debug, warn};

use crate::error::WorkbenchError;
use crate::panel::PanelSequence;

/// A drag in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    /// Panel being carried
    pub panel_id: String,
    /// Index where the gesture began
    pub start: usize,
    /// Current index of the carried panel
    pub origin: usize,
    /// Moves performed so far
    pub moves: usize,
}

/// Result of a finished gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOutcome {
    pub panel_id: String,
    pub from: usize,
    pub to: usize,
    pub moves: usize,
}

/// Owns the panel order and the active gesture, if any
#[derive(Debug, Clone)]
pub struct PanelGrid {
    sequence: PanelSequence,
    drag: Option<DragGesture>,
}

impl PanelGrid {
    pub fn new(sequence: PanelSequence) -> Self {
        Self {
            sequence,
            drag: None,
        }
    }

    /// Current order, as the renderer should draw it
    pub fn sequence(&self) -> &PanelSequence {
        &self.sequence
    }

    pub fn active_drag(&self) -> Option<&DragGesture> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self, panel_id: &str) -> bool {
        self.drag
            .as_ref()
            .is_some_and(|d| d.panel_id == panel_id)
    }

    /// Relocate one panel. Fails with `OutOfRange` and leaves the order as is
    /// when either index falls outside the grid.
    pub fn move_panel(&mut self, from: isize, to: isize) -> Result<(), WorkbenchError> {
        self.sequence.move_panel(from, to)?;
        if from != to {
            debug!(
                from,
                to,
                panel = self.sequence.get(to as usize).map(|p| p.id.as_str()),
                "panel moved"
            );
        }
        Ok(())
    }

    /// Pick up the panel at `index`. Any unfinished gesture is discarded.
    pub fn begin_drag(&mut self, index: isize) -> Result<&DragGesture, WorkbenchError> {
        let index = self.sequence.checked_index(index)?;
        if let Some(stale) = self.drag.take() {
            warn!(panel = %stale.panel_id, "drag started while another was active");
        }
        let panel_id = self.sequence.as_slice()[index].id.clone();
        debug!(panel = %panel_id, index, "drag started");
        Ok(&*self.drag.insert(DragGesture {
            panel_id,
            start: index,
            origin: index,
            moves: 0,
        }))
    }

    /// Hover event carrying both indices. Returns whether the order changed.
    ///
    /// If a gesture is active, `from` must be the carried panel's slot and the
    /// origin follows the move. A mismatch is rejected with nothing changed.
    pub fn report_hover(&mut self, from: isize, to: isize) -> Result<bool, WorkbenchError> {
        let from_idx = self.sequence.checked_index(from)?;
        let to_idx = self.sequence.checked_index(to)?;
        if let Some(drag) = &self.drag {
            if drag.origin != from_idx {
                return Err(WorkbenchError::HoverMismatch {
                    from: from_idx,
                    origin: drag.origin,
                });
            }
        }
        if from_idx == to_idx {
            return Ok(false);
        }

        self.move_panel(from, to)?;
        if let Some(drag) = self.drag.as_mut() {
            drag.origin = to_idx;
            drag.moves += 1;
        }
        Ok(true)
    }

    /// Hover event for the active gesture, using its tracked origin
    pub fn hover(&mut self, to: isize) -> Result<bool, WorkbenchError> {
        let origin = self
            .drag
            .as_ref()
            .map(|d| d.origin)
            .ok_or(WorkbenchError::NoActiveDrag)?;
        self.report_hover(origin as isize, to)
    }

    /// End the gesture. The order is already final, so nothing moves here.
    pub fn report_drop(&mut self) -> Result<DropOutcome, WorkbenchError> {
        let drag = self.drag.take().ok_or(WorkbenchError::NoActiveDrag)?;
        debug!(panel = %drag.panel_id, from = drag.start, to = drag.origin, "drag dropped");
        Ok(DropOutcome {
            panel_id: drag.panel_id,
            from: drag.start,
            to: drag.origin,
            moves: drag.moves,
        })
    }
}
