//! Transient notification shown after saving a draft.

use std::time::Duration;

use tracing::debug;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2800);

pub const DRAFT_SAVED_MESSAGE: &str =
    "¡Borrador guardado! Puedes imprimirlo o copiar la información.";

/// Visibility flag plus the last message shown.
///
/// Every `show` asks the host to schedule a hide after `duration`; earlier
/// schedules are not cancelled, so an older timer can hide a newer message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    message: String,
    visible: bool,
    duration: Duration,
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Toast {
    pub fn new(duration: Duration) -> Self {
        Self {
            message: String::new(),
            visible: false,
            duration,
        }
    }

    /// Shows `message` and returns how long until the host should hide it.
    pub fn show(
        &mut self,
        message: impl Into<String>,
    ) -> Duration {
        self.message = message.into();
        self.visible = true;
        debug!(message = %self.message, "toast shown");
        self.duration
    }

    /// Hides the toast; a no-op when already hidden.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
