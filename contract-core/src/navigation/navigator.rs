use thiserror::Error;
use tracing::debug;

use super::progress::Progress;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigatorError {
    #[error("a step navigator needs at least one step")]
    NoSteps,

    #[error("a step navigator needs at least one progress marker")]
    NoMarkers,
}

/// A completed move between step panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepChange {
    pub from: usize,
    pub to: usize,
}

/// Owns the current step index of a fixed sequence of step panels.
///
/// The index always stays in `[0, step_count - 1]`; moves that would leave
/// that range are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepNavigator {
    current: usize,
    step_count: usize,
    marker_count: usize,
}

impl StepNavigator {
    /// Creates a navigator with one progress marker per step, starting at step 0.
    pub fn new(step_count: usize) -> Result<Self, NavigatorError> {
        Self::with_markers(step_count, step_count)
    }

    pub fn with_markers(
        step_count: usize,
        marker_count: usize,
    ) -> Result<Self, NavigatorError> {
        if step_count == 0 {
            return Err(NavigatorError::NoSteps);
        }
        if marker_count == 0 {
            return Err(NavigatorError::NoMarkers);
        }
        Ok(Self {
            current: 0,
            step_count,
            marker_count,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn last_step(&self) -> usize {
        self.step_count - 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.last_step()
    }

    /// Whether the panel at `index` is the one currently shown.
    pub fn is_active(
        &self,
        index: usize,
    ) -> bool {
        index == self.current
    }

    /// Activates the step at `index`.
    ///
    /// Returns `None` and leaves the navigator untouched when `index` is out
    /// of range. Re-showing the current step is a valid change.
    pub fn show_step(
        &mut self,
        index: usize,
    ) -> Option<StepChange> {
        if index >= self.step_count {
            debug!(index, step_count = self.step_count, "ignoring out-of-range step");
            return None;
        }
        let change = StepChange {
            from: self.current,
            to: index,
        };
        self.current = index;
        debug!(from = change.from, to = change.to, "step changed");
        Some(change)
    }

    pub fn next(&mut self) -> Option<StepChange> {
        self.show_step(self.current + 1)
    }

    pub fn prev(&mut self) -> Option<StepChange> {
        self.current.checked_sub(1).and_then(|index| self.show_step(index))
    }

    /// Jumps to the final (summary) step.
    pub fn last(&mut self) -> Option<StepChange> {
        self.show_step(self.last_step())
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn progress(&self) -> Progress {
        Progress::compute(self.current, self.step_count, self.marker_count)
    }
}
