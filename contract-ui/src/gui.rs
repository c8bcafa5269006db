use anyhow::Result;
use contract_core::{ContractWizard, FormSchema};
use gpui::{
    App, AppContext, AnyView, Bounds, KeyBinding, Menu, MenuItem, TitlebarOptions, WindowBounds,
    WindowOptions,
};
use gpui_component::{Root, Theme, ThemeMode};
use tracing::info;

use crate::{
    Quit,
    components::{ContractWizardView, WindowPreferences},
    config::{ThemeChoice, UiConfig},
    quit,
};

pub fn setup_app(
    config: &UiConfig,
    app_cx: &mut App,
) {
    // This must be called before using any GPUI Component features.
    gpui_component::init(app_cx);

    let mode = match config.theme {
        ThemeChoice::Light => ThemeMode::Light,
        ThemeChoice::Dark => ThemeMode::Dark,
    };
    Theme::change(mode, None, app_cx);

    app_cx.activate(true);

    // Bind platform-appropriate quit shortcut
    #[cfg(target_os = "macos")]
    app_cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);

    #[cfg(not(target_os = "macos"))]
    app_cx.bind_keys([
        KeyBinding::new("ctrl-q", Quit, None),
        KeyBinding::new("alt-F4", Quit, None),
    ]);

    app_cx.on_action(quit);

    app_cx.set_menus(vec![Menu {
        name: "Contrato de compraventa".into(),
        items: vec![MenuItem::action("Salir", Quit)],
    }]);
}

/// Opens the wizard window sized from the config and centred on the
/// primary display.
pub fn open_main_window(
    config: &UiConfig,
    app_cx: &mut App,
) -> Result<()> {
    let preferences = WindowPreferences::from(&config.window);
    let wizard = ContractWizard::new(FormSchema::vehicle_sale(), config.toast_duration())?;

    let options = WindowOptions {
        window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
            None,
            preferences.size,
            app_cx,
        ))),
        titlebar: Some(TitlebarOptions {
            title: Some("Contrato de compraventa de vehículo".into()),
            ..Default::default()
        }),
        ..Default::default()
    };

    app_cx.open_window(options, |window, cx| {
        let view = cx.new(|view_cx| ContractWizardView::new(wizard, window, view_cx));
        cx.new(|root_cx| Root::new(AnyView::from(view), window, root_cx))
    })?;

    info!("main window opened");
    Ok(())
}
