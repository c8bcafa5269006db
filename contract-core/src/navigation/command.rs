use std::{fmt, str::FromStr};

use thiserror::Error;

/// User-facing navigation and output commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Next,
    Prev,
    ShowSummary,
    Print,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown wizard action '{0}'")]
pub struct CommandParseError(pub String);

impl Command {
    pub const ALL: [Command; 4] = [Self::Next, Self::Prev, Self::ShowSummary, Self::Print];

    /// Action name carried by the control that triggers this command.
    pub fn action_name(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
            Self::ShowSummary => "summary",
            Self::Print => "print",
        }
    }

    /// Whether the current step must validate before the command runs.
    pub fn requires_validation(&self) -> bool {
        matches!(self, Self::Next | Self::ShowSummary)
    }
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.action_name() == s)
            .ok_or_else(|| CommandParseError(s.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.action_name())
    }
}
