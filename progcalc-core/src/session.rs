//! Calculator session - owns the current state and feeds it input events.

use serde::Serialize;
use tracing::{debug, trace};

use crate::base::{Base, BaseViews};
use crate::config::CalcConfig;
use crate::error::CalcResult;
use crate::event::{parse_script, InputEvent};
use crate::state::{CalculatorState, Mode};

/// Everything a front end needs to draw the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub display: String,
    pub mode: Mode,
    pub base: Base,
    /// Present in programmer mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<BaseViews>,
}

/// A running calculator.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: CalculatorState,
}

impl Calculator {
    /// Create a calculator in standard mode, base DEC.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator from a config.
    pub fn with_config(config: &CalcConfig) -> Self {
        Self {
            state: config.initial_state(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Current display text.
    pub fn display(&self) -> &str {
        self.state.display()
    }

    /// Apply one event and return the new state.
    pub fn press(&mut self, event: InputEvent) -> &CalculatorState {
        let next = self.state.apply(&event);

        if next == self.state {
            trace!(%event, display = next.display(), "key had no effect");
        } else {
            debug!(
                %event,
                display = next.display(),
                pending = ?next.pending_operator(),
                "key applied"
            );
        }

        self.state = next;
        &self.state
    }

    /// Apply a sequence of events.
    pub fn press_all<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.press(event);
        }
    }

    /// Parse and run a key script. Nothing is applied if parsing fails.
    pub fn run_script(&mut self, script: &str) -> CalcResult<()> {
        let events = parse_script(script)?;
        debug!(count = events.len(), "running key script");
        self.press_all(events);
        Ok(())
    }

    /// Observable state for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.state.display().to_string(),
            mode: self.state.mode(),
            base: self.state.base(),
            views: self.state.views(),
        }
    }
}
