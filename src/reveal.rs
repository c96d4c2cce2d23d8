//! Timed reveal of the orchestrator thoughts
//!
//! - `RevealScript`: immutable, non-empty list of messages
//! - `RevealProgress`: pure cursor machine (log is always `script[..cursor]`)
//! - `RevealSequencer`: one Tokio task driving a single interval, publishing
//!   progress through a `watch` channel
//!
//! States only move forward: `Idle → Revealing → Complete`, or to `Stopped`
//! from any non-terminal state when the owner calls `stop()`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::error::WorkbenchError;

/// Tick period used when nothing else is configured
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);

/// The scripted orchestrator thoughts
pub fn default_thoughts() -> Vec<String> {
    [
        "Analyzing prompt for required document types and analysis tasks...",
        "Delegating PDF analysis to Document Agent...",
        "Initiating web search via Research Agent...",
        "Processing data tables with Analysis Agent...",
        "Generating summary with Writing Agent...",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Script
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered messages, fixed once created. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealScript(Arc<[String]>);

impl RevealScript {
    pub fn new(lines: Vec<String>) -> Result<Self, WorkbenchError> {
        if lines.is_empty() {
            return Err(WorkbenchError::invalid_config(
                "reveal script must contain at least one message",
            ));
        }
        Ok(Self(lines.into()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// State
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Started, nothing revealed yet
    Idle,
    /// Some but not all messages revealed
    Revealing,
    /// Every message revealed
    Complete,
    /// Halted by `stop()` before completion
    Stopped,
}

impl RevealState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Stopped)
    }
}

impl fmt::Display for RevealState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Revealing => write!(f, "REVEALING"),
            Self::Complete => write!(f, "COMPLETE"),
            Self::Stopped => write!(f, "STOPPED"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Progress (pure state machine)
// ─────────────────────────────────────────────────────────────────────────────

/// Cursor over a script plus the log of what has been revealed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealProgress {
    script: RevealScript,
    log: Vec<String>,
    state: RevealState,
    ticks_handled: u64,
}

impl RevealProgress {
    pub fn new(script: RevealScript) -> Self {
        Self {
            log: Vec::with_capacity(script.len()),
            script,
            state: RevealState::Idle,
            ticks_handled: 0,
        }
    }

    /// Handle one tick. Returns the index of the revealed message, or `None`
    /// once the machine is terminal.
    pub fn tick(&mut self) -> Option<usize> {
        self.ticks_handled += 1;
        if self.state.is_terminal() {
            return None;
        }

        let index = self.log.len();
        let line = self.script.get(index)?.to_owned();
        self.log.push(line);

        self.state = if self.log.len() == self.script.len() {
            RevealState::Complete
        } else {
            RevealState::Revealing
        };
        Some(index)
    }

    /// Halt without touching the log. Returns false if already terminal.
    pub fn stop(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = RevealState::Stopped;
        true
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.log.len()
    }

    pub fn total(&self) -> usize {
        self.script.len()
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Number of times the tick handler was called, including calls that
    /// arrived after the machine went terminal
    pub fn ticks_handled(&self) -> u64 {
        self.ticks_handled
    }

    pub fn script(&self) -> &RevealScript {
        &self.script
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sequencer
// ─────────────────────────────────────────────────────────────────────────────

/// Drives a `RevealProgress` from a periodic timer.
///
/// Owns the only schedule; dropping the sequencer stops it.
#[derive(Debug)]
pub struct RevealSequencer {
    progress: Arc<watch::Sender<RevealProgress>>,
    task: JoinHandle<()>,
    interval: Duration,
}

impl RevealSequencer {
    /// Validate the input and schedule the first tick one `interval` from now.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(script: Vec<String>, interval: Duration) -> Result<Self, WorkbenchError> {
        if interval.is_zero() {
            return Err(WorkbenchError::invalid_config(
                "reveal interval must be positive",
            ));
        }
        let script = RevealScript::new(script)?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            WorkbenchError::invalid_config(format!("reveal sequencer needs a Tokio runtime: {e}"))
        })?;

        let total = script.len();
        let (tx, _rx) = watch::channel(RevealProgress::new(script));
        let progress = Arc::new(tx);

        let first_tick = Instant::now() + interval;
        let task = runtime.spawn(drive(Arc::clone(&progress), first_tick, interval));

        info!(messages = total, interval_ms = interval.as_millis() as u64, "reveal started");
        Ok(Self {
            progress,
            task,
            interval,
        })
    }

    /// Halt scheduling now. Safe to call repeatedly or after completion.
    pub fn stop(&self) {
        let mut changed = false;
        self.progress.send_if_modified(|p| {
            changed = p.stop();
            changed
        });
        self.task.abort();
        if changed {
            info!(revealed = self.progress.borrow().cursor(), "reveal stopped");
        }
    }

    pub fn state(&self) -> RevealState {
        self.progress.borrow().state()
    }

    /// Copy of the current progress
    pub fn snapshot(&self) -> RevealProgress {
        self.progress.borrow().clone()
    }

    /// Receiver that observes every published change
    pub fn subscribe(&self) -> watch::Receiver<RevealProgress> {
        self.progress.subscribe()
    }

    /// Whether the timer task is still alive
    pub fn is_scheduled(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for RevealSequencer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn drive(progress: Arc<watch::Sender<RevealProgress>>, first: Instant, period: Duration) {
    let mut ticker = time::interval_at(first, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let mut finished = false;
        progress.send_if_modified(|p| match p.tick() {
            Some(index) => {
                debug!(index, "thought revealed");
                finished = p.state().is_terminal();
                true
            }
            None => {
                finished = true;
                false
            }
        });

        if finished {
            break;
        }
    }

    let p = progress.borrow();
    if p.state() == RevealState::Complete {
        info!(revealed = p.cursor(), "reveal complete");
    }
}
