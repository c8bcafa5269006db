pub mod dialogs;
pub mod field_input;
pub mod summary_panel;
pub mod wizard_view;

use gpui::{App, ClickEvent, Pixels, SharedString, Size, Styled, Window, px};
use gpui_component::{
    Sizable,
    button::{Button, ButtonVariants},
};

pub use field_input::FieldInput;
pub use summary_panel::{SHOW_SUMMARY_LABEL, SummaryPanel};
pub use wizard_view::ContractWizardView;

use crate::config::WindowConfig;

#[derive(Debug, Clone, Copy)]
pub struct WindowPreferences {
    pub size: Size<Pixels>,
}

impl Default for WindowPreferences {
    fn default() -> Self {
        Self::from(&WindowConfig::default())
    }
}

impl From<&WindowConfig> for WindowPreferences {
    fn from(config: &WindowConfig) -> Self {
        Self {
            size: Size {
                width: px(config.width),
                height: px(config.height),
            },
        }
    }
}

/// How prominent a wizard button is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    Primary,
    Secondary,
}

/// Creates a fixed-width wizard button with a custom click handler.
pub fn make_button(
    id: impl Into<SharedString>,
    label: impl Into<SharedString>,
    role: ButtonRole,
    on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
) -> Button {
    let button = Button::new(id.into())
        .large()
        .w(px(170.))
        .label(label.into())
        .on_click(on_click);

    match role {
        ButtonRole::Primary => button.primary(),
        ButtonRole::Secondary => button.outline(),
    }
}
