//! Workbench session
//!
//! One session = one prompt, one panel grid, one reveal sequencer. The grid
//! and the sequencer live and die together: closing or dropping the session
//! stops the timer.

use std::fmt;

use tracing::info;

use crate::config::WorkbenchConfig;
use crate::drag::PanelGrid;
use crate::error::WorkbenchError;
use crate::panel::PanelSequence;
use crate::reveal::{RevealProgress, RevealSequencer, RevealState};

/// User prompt, guaranteed non-blank. Stored exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn new(text: impl Into<String>) -> Result<Self, WorkbenchError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(WorkbenchError::EmptyPrompt);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub struct WorkbenchSession {
    prompt: Prompt,
    grid: PanelGrid,
    reveal: RevealSequencer,
}

impl WorkbenchSession {
    /// Enter the workbench: validate everything, then start the reveal timer.
    ///
    /// Must run inside a Tokio runtime.
    pub fn open(prompt: &str, config: &WorkbenchConfig) -> Result<Self, WorkbenchError> {
        let prompt = Prompt::new(prompt)?;
        config.validate()?;

        let grid = PanelGrid::new(PanelSequence::new(config.panels.clone())?);
        let reveal = RevealSequencer::start(config.thoughts.clone(), config.interval())?;

        info!(panels = grid.sequence().len(), "workbench opened");
        Ok(Self {
            prompt,
            grid,
            reveal,
        })
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn grid(&self) -> &PanelGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut PanelGrid {
        &mut self.grid
    }

    pub fn reveal(&self) -> &RevealSequencer {
        &self.reveal
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal.state()
    }

    pub fn thoughts(&self) -> RevealProgress {
        self.reveal.snapshot()
    }

    /// Tear the session down, returning the final panel order
    pub fn close(self) -> PanelSequence {
        self.reveal.stop();
        info!(state = %self.reveal.state(), "workbench closed");
        self.grid.sequence().clone()
    }
}
