//! Step navigation for the contract wizard.
//!
//! The navigator owns the current step index and nothing else; progress and
//! marker states are derived from it on demand.

mod command;
mod navigator;
mod progress;

pub use command::{Command, CommandParseError};
pub use navigator::{NavigatorError, StepChange, StepNavigator};
pub use progress::{MarkerState, Progress};
