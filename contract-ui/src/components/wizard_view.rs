//! The wizard window body.
//!
//! Owns the [`ContractWizard`] and one [`FieldInput`] per schema field. Every
//! user action is forwarded to the wizard and the returned [`Effect`]s are
//! carried out here: scrolling, validation messages, printing, the clipboard
//! and the toast timer.

use std::time::Duration;

use anyhow::Context as _;
use contract_core::{Command, ContractWizard, Effect, MarkerState, Progress, ValidationFailure};
use gpui::{
    App, ClickEvent, ClipboardItem, Context, Div, FontWeight, InteractiveElement, IntoElement, ParentElement,
    Point, Render, ScrollHandle, SharedString, StatefulInteractiveElement, Styled, Subscription,
    Window, div, px, relative,
};
use gpui_component::{
    ActiveTheme, Disableable, h_flex, input::InputEvent, select::SelectEvent, v_flex,
};
use tracing::{debug, info, warn};

#[cfg(not(target_os = "linux"))]
use crate::{Quit, quit};
use crate::{
    components::{
        ButtonRole, SHOW_SUMMARY_LABEL, SummaryPanel,
        dialogs::{PRINT_FILE_NAME, pick_save_path, print_filters},
        field_input::{FieldControl, FieldInput},
        make_button,
    },
    logging::log_task_error,
};

pub struct ContractWizardView {
    wizard: ContractWizard,
    fields: Vec<FieldInput>,
    validation: Option<ValidationFailure>,
    scroll: ScrollHandle,
    _subscriptions: Vec<Subscription>,
}

impl ContractWizardView {
    pub fn new(
        wizard: ContractWizard,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let fields: Vec<FieldInput> = wizard
            .schema()
            .fields()
            .iter()
            .map(|spec| FieldInput::new(spec, window, cx))
            .collect();

        let mut subscriptions = vec![cx.on_window_closed(|_cx: &mut App| {
            info!("wizard window closed");
            #[cfg(not(target_os = "linux"))]
            quit(&Quit, _cx);
        })];

        for field in &fields {
            let name = field.name();
            match field.control() {
                FieldControl::Text(state) => subscriptions.push(cx.subscribe_in(
                    state,
                    window,
                    move |view, state, event: &InputEvent, window, cx| {
                        if matches!(event, InputEvent::Change { .. }) {
                            let value = state.read(cx).value().to_string();
                            view.input(name, value, window, cx);
                        }
                    },
                )),
                FieldControl::Select(state) => subscriptions.push(cx.subscribe_in(
                    state,
                    window,
                    move |view, state, _: &SelectEvent<Vec<SharedString>>, window, cx| {
                        let value = state
                            .read(cx)
                            .selected_value()
                            .map(|v| v.to_string())
                            .unwrap_or_default();
                        view.input(name, value, window, cx);
                    },
                )),
                FieldControl::Checkbox | FieldControl::Group => {}
            }
        }

        debug!(fields = fields.len(), "wizard view constructed");
        Self {
            wizard,
            fields,
            validation: None,
            scroll: ScrollHandle::new(),
            _subscriptions: subscriptions,
        }
    }

    fn input(
        &mut self,
        name: &'static str,
        value: String,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if self.wizard.state().value(name) == value {
            return;
        }
        self.clear_validation_for(name);
        let effects = self.wizard.input(name, value);
        self.apply(effects, window, cx);
    }

    pub(crate) fn toggle(
        &mut self,
        name: &'static str,
        checked: bool,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.clear_validation_for(name);
        let effects = self.wizard.set_checked(name, checked);
        self.apply(effects, window, cx);
    }

    pub(crate) fn toggle_document(
        &mut self,
        label: &'static str,
        selected: bool,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let effects = self.wizard.set_document(label, selected);
        self.apply(effects, window, cx);
    }

    fn dispatch(
        &mut self,
        command: Command,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let effects = self.wizard.dispatch(command);
        self.apply(effects, window, cx);
    }

    fn submit(
        &mut self,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let effects = self.wizard.submit();
        self.apply(effects, window, cx);
    }

    fn reset(
        &mut self,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let effects = self.wizard.reset();
        for field in &self.fields {
            field.clear(window, cx);
        }
        self.validation = None;
        self.apply(effects, window, cx);
    }

    fn clear_validation_for(
        &mut self,
        name: &str,
    ) {
        if self.validation.as_ref().is_some_and(|f| f.field == name) {
            self.validation = None;
        }
    }

    /// Carries out wizard effects in order, then redraws.
    fn apply(
        &mut self,
        effects: Vec<Effect>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        for effect in effects {
            match effect {
                Effect::ScrollIntoView { step } => {
                    debug!(step, "scrolling step into view");
                    self.validation = None;
                    self.scroll.set_offset(Point::default());
                }
                Effect::ReportValidity(failure) => {
                    warn!(
                        field = failure.field,
                        message = %failure.message(),
                        "step is invalid"
                    );
                    if let Some(field) = self.fields.iter().find(|f| f.name() == failure.field) {
                        field.focus(window, cx);
                    }
                    self.validation = Some(failure);
                }
                Effect::SummaryRendered => debug!("summary redrawn"),
                Effect::Print(document) => self.save_printable(document, cx),
                Effect::CopyToClipboard(text) => {
                    debug!(bytes = text.len(), "summary copied to clipboard");
                    cx.write_to_clipboard(ClipboardItem::new_string(text));
                }
                Effect::ShowToast { hide_after, .. } => self.schedule_toast_hide(hide_after, cx),
            }
        }
        cx.notify();
    }

    /// Asks where to save the printable contract and writes it there.
    fn save_printable(
        &self,
        document: String,
        cx: &mut Context<Self>,
    ) {
        cx.spawn(async move |_, _| log_task_error("print", write_printable(document).await))
            .detach();
    }

    /// Hides the toast after `hide_after`. Earlier timers keep running.
    fn schedule_toast_hide(
        &self,
        hide_after: Duration,
        cx: &mut Context<Self>,
    ) {
        cx.spawn(async move |this, cx| {
            cx.background_executor().timer(hide_after).await;
            let result = this.update(cx, |view, cx| {
                view.wizard.hide_toast();
                cx.notify();
            });
            log_task_error("toast", result);
        })
        .detach();
    }

    fn render_progress(
        &self,
        progress: &Progress,
        cx: &Context<Self>,
    ) -> Div {
        let theme = cx.theme();
        let steps = self.wizard.schema().steps();

        let markers = progress.markers().iter().enumerate().map(|(i, state)| {
            let (fill, text) = match state {
                MarkerState::Complete => (theme.primary, theme.primary_foreground),
                MarkerState::Active => (theme.accent, theme.accent_foreground),
                MarkerState::Pending => (theme.muted, theme.muted_foreground),
            };
            let title = steps.get(i).map(|s| s.title).unwrap_or_default();
            v_flex()
                .items_center()
                .gap_1()
                .child(
                    div()
                        .size(px(28.))
                        .rounded_full()
                        .bg(fill)
                        .text_color(text)
                        .flex()
                        .items_center()
                        .justify_center()
                        .child(SharedString::from((i + 1).to_string())),
                )
                .child(div().text_xs().child(title))
        });

        v_flex()
            .gap_2()
            .child(
                div()
                    .h(px(6.))
                    .w_full()
                    .rounded_full()
                    .bg(theme.muted)
                    .child(
                        div()
                            .h_full()
                            .w(relative(progress.fraction()))
                            .rounded_full()
                            .bg(theme.primary),
                    ),
            )
            .child(h_flex().justify_between().children(markers))
    }

    fn press(
        &mut self,
        button: WizardButton,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        match button {
            WizardButton::Command(command) => self.dispatch(command, window, cx),
            WizardButton::Save => self.submit(window, cx),
            WizardButton::Copy => {
                let effects = self.wizard.copy_summary();
                self.apply(effects, window, cx);
            }
            WizardButton::Reset => self.reset(window, cx),
        }
    }

    fn render_buttons(
        &self,
        cx: &mut Context<Self>,
    ) -> Div {
        let navigator = self.wizard.navigator();
        let on_first = navigator.current() == 0;

        let buttons = WizardButton::for_step(navigator.is_last()).iter().map(|&button| {
            make_button(
                button.id(),
                button.label(),
                button.role(),
                cx.listener(move |view, _: &ClickEvent, window, cx| view.press(button, window, cx)),
            )
            .w(px(140.))
            .disabled(on_first && button == WizardButton::Command(Command::Prev))
        });

        h_flex().gap_3().flex_wrap().justify_center().children(buttons)
    }

    fn render_toast(
        &self,
        cx: &Context<Self>,
    ) -> Option<Div> {
        let toast = self.wizard.toast();
        toast.is_visible().then(|| {
            div()
                .absolute()
                .bottom(px(24.))
                .right(px(24.))
                .px_4()
                .py_2()
                .rounded_md()
                .shadow_lg()
                .bg(cx.theme().success)
                .text_color(cx.theme().success_foreground)
                .child(SharedString::from(toast.message().to_string()))
        })
    }
}

/// Buttons under the step panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WizardButton {
    Command(Command),
    Save,
    Copy,
    Reset,
}

impl WizardButton {
    const INNER_STEP: &'static [WizardButton] = &[
        WizardButton::Command(Command::Prev),
        WizardButton::Command(Command::ShowSummary),
        WizardButton::Command(Command::Next),
    ];

    // Reaching this step with Next leaves the summary empty; ShowSummary fills it.
    const LAST_STEP: &'static [WizardButton] = &[
        WizardButton::Command(Command::Prev),
        WizardButton::Command(Command::ShowSummary),
        WizardButton::Save,
        WizardButton::Copy,
        WizardButton::Command(Command::Print),
        WizardButton::Reset,
    ];

    fn for_step(is_last: bool) -> &'static [WizardButton] {
        if is_last { Self::LAST_STEP } else { Self::INNER_STEP }
    }

    fn id(self) -> &'static str {
        match self {
            WizardButton::Command(command) => command.action_name(),
            WizardButton::Save => "save",
            WizardButton::Copy => "copy",
            WizardButton::Reset => "reset",
        }
    }

    fn label(self) -> &'static str {
        match self {
            WizardButton::Command(Command::Prev) => "Anterior",
            WizardButton::Command(Command::Next) => "Siguiente",
            WizardButton::Command(Command::ShowSummary) => SHOW_SUMMARY_LABEL,
            WizardButton::Command(Command::Print) => "Imprimir",
            WizardButton::Save => "Guardar borrador",
            WizardButton::Copy => "Copiar resumen",
            WizardButton::Reset => "Nuevo contrato",
        }
    }

    fn role(self) -> ButtonRole {
        match self {
            WizardButton::Command(Command::Next) | WizardButton::Save => ButtonRole::Primary,
            _ => ButtonRole::Secondary,
        }
    }
}

async fn write_printable(document: String) -> anyhow::Result<()> {
    let Some(path) = pick_save_path(PRINT_FILE_NAME.to_string(), print_filters()).await else {
        info!("print cancelled");
        return Ok(());
    };
    std::fs::write(&path, document)
        .with_context(|| format!("cannot write '{}'", path.display()))?;
    info!(path = %path.display(), "printable contract saved");
    Ok(())
}

impl Render for ContractWizardView {
    fn render(
        &mut self,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let current = self.wizard.current_step();
        let step_count = self.wizard.navigator().step_count();
        let progress = self.wizard.progress();
        let title = self
            .wizard
            .schema()
            .steps()
            .get(current)
            .map(|s| s.title)
            .unwrap_or_default();

        let fields: Vec<_> = self
            .fields
            .iter()
            .filter(|f| f.step() == current)
            .map(|f| {
                let error = self
                    .validation
                    .as_ref()
                    .filter(|v| v.field == f.name())
                    .map(ValidationFailure::message);
                f.render(&self.wizard, error, cx)
            })
            .collect();

        let summary = self
            .wizard
            .navigator()
            .is_last()
            .then(|| SummaryPanel::new(self.wizard.summary().clone()));

        v_flex()
            .size_full()
            .relative()
            .bg(cx.theme().background)
            .text_color(cx.theme().foreground)
            .child(
                v_flex()
                    .p_5()
                    .gap_3()
                    .child(self.render_progress(&progress, cx))
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child(format!("Paso {} de {}: {}", current + 1, step_count, title)),
                    ),
            )
            .child(
                div()
                    .id("step-panel")
                    .flex_1()
                    .overflow_y_scroll()
                    .track_scroll(&self.scroll)
                    .px_5()
                    .child(v_flex().gap_2().pb_5().children(fields).children(summary)),
            )
            .child(div().p_5().child(self.render_buttons(cx)))
            .children(self.render_toast(cx))
    }
}
