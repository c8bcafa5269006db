//! Wizard controller tying the form, navigator, summary and toast together.
//!
//! The controller never touches a screen. Every operation returns the
//! [`Effect`]s the host has to carry out, in order.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::{
    models::{DOCUMENTS_FIELD, FieldKind, FormSchema, FormState},
    navigation::{Command, CommandParseError, NavigatorError, Progress, StepChange, StepNavigator},
    summary::{SummaryView, render_summary},
    toast::{DRAFT_SAVED_MESSAGE, Toast},
    validation::{ValidationFailure, validate_step},
};

/// Title of the printable contract document.
pub const PRINT_TITLE: &str = "Contrato de compraventa de vehículo";

/// Something the host has to do after a wizard operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Scroll the newly active step panel to the top of the viewport.
    ScrollIntoView { step: usize },
    /// Show the validation message next to the offending field.
    ReportValidity(ValidationFailure),
    /// The summary was rebuilt and should be redrawn.
    SummaryRendered,
    /// Hand this printable document to the host print facility.
    Print(String),
    /// Put this plain-text summary on the clipboard.
    CopyToClipboard(String),
    /// Show the toast and hide it again after `hide_after`.
    ShowToast {
        message: String,
        hide_after: Duration,
    },
}

#[derive(Debug, Clone)]
pub struct ContractWizard {
    schema: FormSchema,
    state: FormState,
    navigator: StepNavigator,
    summary: SummaryView,
    toast: Toast,
}

impl ContractWizard {
    pub fn new(
        schema: FormSchema,
        toast_duration: Duration,
    ) -> Result<Self, NavigatorError> {
        let navigator = StepNavigator::new(schema.step_count())?;
        Ok(Self {
            schema,
            state: FormState::new(),
            navigator,
            summary: SummaryView::default(),
            toast: Toast::new(toast_duration),
        })
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    pub fn current_step(&self) -> usize {
        self.navigator.current()
    }

    pub fn progress(&self) -> Progress {
        self.navigator.progress()
    }

    /// The summary as last rendered.
    pub fn summary(&self) -> &SummaryView {
        &self.summary
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn validate_step(
        &self,
        index: usize,
    ) -> Result<(), ValidationFailure> {
        validate_step(&self.schema, &self.state, index)
    }

    /// Runs a navigation or output command.
    ///
    /// `Next` and `ShowSummary` are blocked by the first invalid required
    /// field of the current step; `Prev` and `Print` never validate.
    pub fn dispatch(
        &mut self,
        command: Command,
    ) -> Vec<Effect> {
        debug!(%command, step = self.navigator.current(), "dispatching command");

        if command.requires_validation() {
            if let Err(failure) = self.validate_step(self.navigator.current()) {
                return vec![Effect::ReportValidity(failure)];
            }
        }

        match command {
            Command::Next => {
                let change = self.navigator.next();
                scroll_effects(change)
            }
            Command::Prev => {
                let change = self.navigator.prev();
                scroll_effects(change)
            }
            Command::ShowSummary => {
                let mut effects = self.render_summary();
                effects.extend(scroll_effects(self.navigator.last()));
                effects
            }
            Command::Print => {
                info!("printing contract summary");
                let document = render_summary(&self.state).print_document(PRINT_TITLE);
                vec![Effect::Print(document)]
            }
        }
    }

    /// Dispatches a command given by its action name (`"next"`, `"prev"`,
    /// `"summary"`, `"print"`).
    pub fn dispatch_action(
        &mut self,
        action: &str,
    ) -> Result<Vec<Effect>, CommandParseError> {
        let command: Command = action.parse()?;
        Ok(self.dispatch(command))
    }

    /// Activates `index` directly; out-of-range indices change nothing.
    pub fn show_step(
        &mut self,
        index: usize,
    ) -> Vec<Effect> {
        scroll_effects(self.navigator.show_step(index))
    }

    /// Stores a typed or picked value for a text, number, date, time, select
    /// or textarea field.
    pub fn input(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Vec<Effect> {
        match self.schema.field(name).map(|f| f.kind) {
            Some(FieldKind::Checkbox | FieldKind::CheckboxGroup(_)) | None => {
                warn!(field = name, "ignoring text input for unknown or checkbox field");
                return Vec::new();
            }
            Some(_) => {}
        }
        self.state.set_value(name, value);
        self.after_input()
    }

    /// Ticks or unticks a single checkbox field.
    pub fn set_checked(
        &mut self,
        name: &str,
        checked: bool,
    ) -> Vec<Effect> {
        if !matches!(
            self.schema.field(name).map(|f| f.kind),
            Some(FieldKind::Checkbox)
        ) {
            warn!(field = name, "ignoring toggle for non-checkbox field");
            return Vec::new();
        }
        self.state.set_checked(name, checked);
        self.after_input()
    }

    /// Selects or deselects one handed-over document.
    ///
    /// The stored list always follows the order the options are laid out in.
    pub fn set_document(
        &mut self,
        label: &str,
        selected: bool,
    ) -> Vec<Effect> {
        let Some(options) = self
            .schema
            .field(DOCUMENTS_FIELD)
            .map(|f| f.kind.options())
            .filter(|options| options.iter().any(|o| *o == label))
        else {
            warn!(document = label, "ignoring unknown document option");
            return Vec::new();
        };

        let current = self.state.values(DOCUMENTS_FIELD);
        let selection: Vec<String> = options
            .iter()
            .filter(|option| {
                if **option == label {
                    selected
                } else {
                    current.iter().any(|c| c.as_str() == **option)
                }
            })
            .map(|option| option.to_string())
            .collect();

        self.state.set_values(DOCUMENTS_FIELD, selection);
        self.after_input()
    }

    /// Saves the draft: re-renders the summary and shows the toast. Nothing
    /// leaves the process.
    pub fn submit(&mut self) -> Vec<Effect> {
        let mut effects = self.render_summary();
        let hide_after = self.toast.show(DRAFT_SAVED_MESSAGE);
        info!("draft saved");
        effects.push(Effect::ShowToast {
            message: DRAFT_SAVED_MESSAGE.to_string(),
            hide_after,
        });
        effects
    }

    /// Plain-text summary of the current form state for the clipboard.
    ///
    /// Like printing, this reads a fresh render and leaves the shown summary
    /// untouched.
    pub fn copy_summary(&self) -> Vec<Effect> {
        info!("copying contract summary");
        vec![Effect::CopyToClipboard(render_summary(&self.state).to_string())]
    }

    /// Called by the host when a toast timer fires.
    pub fn hide_toast(&mut self) {
        self.toast.hide();
    }

    /// Rebuilds the summary from the current form state.
    pub fn render_summary(&mut self) -> Vec<Effect> {
        self.summary = render_summary(&self.state);
        vec![Effect::SummaryRendered]
    }

    /// Clears every field and returns to the first step.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.state.clear();
        self.summary = SummaryView::default();
        self.toast.hide();
        self.navigator.reset();
        info!("wizard reset");
        vec![Effect::ScrollIntoView { step: 0 }]
    }

    fn after_input(&mut self) -> Vec<Effect> {
        if self.navigator.is_last() {
            self.render_summary()
        } else {
            Vec::new()
        }
    }
}

fn scroll_effects(change: Option<StepChange>) -> Vec<Effect> {
    change
        .map(|c| Effect::ScrollIntoView { step: c.to })
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{toast::DEFAULT_TOAST_DURATION, validation::check_validity};

    fn wizard() -> ContractWizard {
        ContractWizard::new(FormSchema::vehicle_sale(), DEFAULT_TOAST_DURATION).unwrap()
    }

    fn fill_first_step(wizard: &mut ContractWizard) {
        wizard.input("ciudad_formalizacion", "Valencia");
        wizard.input("fecha_contrato", "2025-06-01");
    }

    #[test]
    fn empty_schema_is_rejected() {
        let result = ContractWizard::new(FormSchema::new(vec![], vec![]), DEFAULT_TOAST_DURATION);

        assert!(matches!(result, Err(NavigatorError::NoSteps)));
    }

    #[test]
    fn next_is_blocked_by_missing_required_field() {
        let mut wizard = wizard();
        wizard.input("ciudad_formalizacion", "Valencia");

        let effects = wizard.dispatch(Command::Next);

        assert_eq!(wizard.current_step(), 0);
        match effects.as_slice() {
            [Effect::ReportValidity(failure)] => assert_eq!(failure.field, "fecha_contrato"),
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn next_advances_when_step_is_valid() {
        let mut wizard = wizard();
        fill_first_step(&mut wizard);

        let effects = wizard.dispatch(Command::Next);

        assert_eq!(effects, vec![Effect::ScrollIntoView { step: 1 }]);
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn prev_never_validates() {
        let mut wizard = wizard();
        fill_first_step(&mut wizard);
        wizard.dispatch(Command::Next);

        let effects = wizard.dispatch(Command::Prev);

        assert_eq!(effects, vec![Effect::ScrollIntoView { step: 0 }]);
        assert_eq!(wizard.dispatch(Command::Prev), vec![]);
    }

    #[test]
    fn show_summary_renders_and_jumps_to_last_step() {
        let mut wizard = wizard();
        fill_first_step(&mut wizard);

        let effects = wizard.dispatch(Command::ShowSummary);

        assert_eq!(
            effects,
            vec![Effect::SummaryRendered, Effect::ScrollIntoView { step: 4 }]
        );
        assert_eq!(wizard.progress().percent(), 100.0);
        assert_eq!(
            wizard
                .summary()
                .section("Datos del contrato")
                .unwrap()
                .value("Ciudad de formalización"),
            Some("Valencia")
        );
    }

    #[test]
    fn input_on_last_step_rerenders_summary() {
        let mut wizard = wizard();
        assert_eq!(wizard.input("precio", "100"), vec![]);

        wizard.show_step(4);
        let effects = wizard.input("precio", "2500");

        assert_eq!(effects, vec![Effect::SummaryRendered]);
        assert_eq!(
            wizard
                .summary()
                .section("Condiciones económicas")
                .unwrap()
                .value("Precio de venta"),
            Some("2.500,00 €")
        );
    }

    #[test]
    fn unknown_action_is_an_error() {
        let mut wizard = wizard();

        assert!(wizard.dispatch_action("jump").is_err());
        assert_eq!(
            wizard.dispatch_action("prev").unwrap(),
            Vec::<Effect>::new()
        );
    }

    #[test]
    fn documents_follow_layout_order() {
        let mut wizard = wizard();
        wizard.set_document("Segunda llave", true);
        wizard.set_document("Permiso de circulación", true);
        wizard.set_document("Informe ITV", true);
        wizard.set_document("Informe ITV", false);

        assert_eq!(
            wizard.state().values(DOCUMENTS_FIELD),
            ["Permiso de circulación", "Segunda llave"]
        );
    }

    #[test]
    fn unknown_fields_and_options_are_ignored() {
        let mut wizard = wizard();

        wizard.input("matricula_extranjera", "X");
        wizard.input("clausula_datos", "on");
        wizard.set_checked("precio", true);
        wizard.set_document("Factura", true);

        assert!(wizard.state().is_empty());
    }

    #[test]
    fn print_carries_printable_document() {
        let mut wizard = wizard();
        wizard.input("vehiculo_matricula", "1234ABC");

        let effects = wizard.dispatch(Command::Print);

        match effects.as_slice() {
            [Effect::Print(document)] => {
                assert!(document.contains(PRINT_TITLE));
                assert!(document.contains("1234ABC"));
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn print_leaves_shown_summary_untouched() {
        let mut wizard = wizard();
        wizard.input("vehiculo_matricula", "1234ABC");

        wizard.dispatch(Command::Print);

        assert!(wizard.summary().is_empty());
    }

    #[test]
    fn copy_summary_gives_plain_text_without_rendering() {
        let mut wizard = wizard();
        wizard.input("vehiculo_matricula", "1234ABC");

        let effects = wizard.copy_summary();

        match effects.as_slice() {
            [Effect::CopyToClipboard(text)] => {
                assert!(text.contains("Vehículo\n"));
                assert!(text.contains("  Matrícula: 1234ABC\n"));
            }
            other => panic!("unexpected effects: {other:?}"),
        }
        assert!(wizard.summary().is_empty());
    }

    #[test]
    fn valid_price_beyond_decimal_range_is_formatted() {
        let mut wizard = wizard();
        wizard.show_step(4);

        wizard.input("precio", "79228162514264337593543950336");

        let price = wizard.schema().field("precio").unwrap();
        assert_eq!(check_validity(price, wizard.state()), Ok(()));
        assert_eq!(
            wizard
                .summary()
                .section("Condiciones económicas")
                .unwrap()
                .value("Precio de venta"),
            Some("79.228.162.514.264.340.000.000.000.000,00 €")
        );
    }

    #[test]
    fn show_summary_on_last_step_fills_the_summary() {
        let mut wizard = wizard();
        wizard.input("precio", "1500");
        wizard.input("forma_pago", "Transferencia bancaria");
        wizard.set_checked("clausula_datos", true);
        wizard.show_step(4);
        assert!(wizard.summary().is_empty());

        let effects = wizard.dispatch(Command::ShowSummary);

        assert_eq!(
            effects,
            vec![Effect::SummaryRendered, Effect::ScrollIntoView { step: 4 }]
        );
        assert_eq!(wizard.current_step(), 4);
        assert_eq!(
            wizard
                .summary()
                .section("Condiciones económicas")
                .unwrap()
                .value("Precio de venta"),
            Some("1.500,00 €")
        );
    }

    #[test]
    fn submit_renders_and_shows_toast() {
        let mut wizard = wizard();

        let effects = wizard.submit();

        assert_eq!(
            effects,
            vec![
                Effect::SummaryRendered,
                Effect::ShowToast {
                    message: DRAFT_SAVED_MESSAGE.to_string(),
                    hide_after: Duration::from_millis(2800),
                }
            ]
        );
        assert!(wizard.toast().is_visible());

        wizard.hide_toast();
        assert!(!wizard.toast().is_visible());
    }

    #[test]
    fn reset_returns_to_a_blank_first_step() {
        let mut wizard = wizard();
        fill_first_step(&mut wizard);
        wizard.dispatch(Command::ShowSummary);

        let effects = wizard.reset();

        assert_eq!(effects, vec![Effect::ScrollIntoView { step: 0 }]);
        assert_eq!(wizard.current_step(), 0);
        assert!(wizard.state().is_empty());
        assert!(wizard.summary().is_empty());
    }
}
