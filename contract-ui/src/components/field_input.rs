use contract_core::{ContractWizard, FieldKind, FieldSpec};
use gpui::{
    AnyElement, App, AppContext, Context, Div, ElementId, Entity, IntoElement, ParentElement,
    SharedString, Styled, TextAlign, Window, div, px,
};
use gpui_component::{
    checkbox::Checkbox,
    h_flex,
    input::{Input, InputState, MaskPattern},
    select::{Select, SelectState},
    v_flex,
};

use super::wizard_view::ContractWizardView;

pub type OptionSelect = SelectState<Vec<SharedString>>;

/// The gpui control backing one field.
///
/// Checkboxes keep no control state of their own; they are drawn from the
/// wizard's form state on every frame.
#[derive(Clone)]
pub enum FieldControl {
    Text(Entity<InputState>),
    Select(Entity<OptionSelect>),
    Checkbox,
    Group,
}

#[derive(Clone)]
pub struct FieldInput {
    spec: FieldSpec,
    control: FieldControl,
}

impl FieldInput {
    pub fn new(
        spec: &FieldSpec,
        window: &mut Window,
        cx: &mut Context<ContractWizardView>,
    ) -> Self {
        let control = match spec.kind {
            FieldKind::Checkbox => FieldControl::Checkbox,
            FieldKind::CheckboxGroup(_) => FieldControl::Group,
            FieldKind::Select(options) => {
                let items: Vec<SharedString> =
                    options.iter().map(|o| SharedString::from(*o)).collect();
                FieldControl::Select(cx.new(|cx| SelectState::new(items, None, window, cx)))
            }
            kind => FieldControl::Text(make_input_state(kind, window, cx)),
        };

        Self {
            spec: spec.clone(),
            control,
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn step(&self) -> usize {
        self.spec.step
    }

    pub fn control(&self) -> &FieldControl {
        &self.control
    }

    pub fn focus(
        &self,
        window: &mut Window,
        cx: &mut App,
    ) {
        if let FieldControl::Text(state) = &self.control {
            state.update(cx, |state, cx| state.focus(window, cx));
        }
    }

    /// Empties the control after a wizard reset.
    pub fn clear(
        &self,
        window: &mut Window,
        cx: &mut App,
    ) {
        match &self.control {
            FieldControl::Text(state) => {
                state.update(cx, |state, cx| state.set_value("", window, cx));
            }
            FieldControl::Select(state) => {
                state.update(cx, |state, cx| state.set_selected_index(None, window, cx));
            }
            FieldControl::Checkbox | FieldControl::Group => {}
        }
    }

    pub fn render(
        &self,
        wizard: &ContractWizard,
        error: Option<String>,
        cx: &mut Context<ContractWizardView>,
    ) -> AnyElement {
        let name = self.spec.name;
        let label = display_label(&self.spec);

        let control: AnyElement = match &self.control {
            FieldControl::Text(state) => Input::new(state).flex_grow().into_any_element(),
            FieldControl::Select(state) => Select::new(state)
                .placeholder("Selecciona una opción")
                .w_full()
                .into_any_element(),
            FieldControl::Checkbox => {
                return make_labeled_row("")
                    .child(
                        Checkbox::new(name)
                            .label(label)
                            .checked(wizard.state().is_checked(name))
                            .on_click(cx.listener(move |view, checked: &bool, window, cx| {
                                view.toggle(name, *checked, window, cx);
                            })),
                    )
                    .children(error.map(error_line))
                    .into_any_element();
            }
            FieldControl::Group => {
                let selected = wizard.state().values(name);
                let boxes = self.spec.kind.options().iter().enumerate().map(|(i, &option)| {
                    Checkbox::new(ElementId::from(SharedString::from(format!("{name}-{i}"))))
                        .label(option)
                        .checked(selected.iter().any(|s| s.as_str() == option))
                        .on_click(cx.listener(move |view, checked: &bool, window, cx| {
                            view.toggle_document(option, *checked, window, cx);
                        }))
                });
                v_flex().gap_1().children(boxes).into_any_element()
            }
        };

        v_flex()
            .gap_1()
            .child(make_labeled_row(label).child(control))
            .children(error.map(error_line))
            .into_any_element()
    }
}

fn make_input_state(
    kind: FieldKind,
    window: &mut Window,
    cx: &mut Context<ContractWizardView>,
) -> Entity<InputState> {
    cx.new(|closure_cx| {
        let state = InputState::new(window, closure_cx);
        let state = match kind {
            FieldKind::TextArea => state.multi_line(true),
            FieldKind::Number { .. } => state.mask_pattern(MaskPattern::Number {
                separator: None,
                fraction: Some(2),
            }),
            _ => state,
        };
        match placeholder(kind) {
            Some(hint) => state.placeholder(hint),
            None => state,
        }
    })
}

/// Format hint shown for kinds whose expected shape is not obvious.
fn placeholder(kind: FieldKind) -> Option<&'static str> {
    match kind {
        FieldKind::Date => Some("AAAA-MM-DD"),
        FieldKind::Time => Some("HH:MM"),
        FieldKind::Email => Some("nombre@dominio.es"),
        FieldKind::Tel => Some("+34 600 000 000"),
        _ => None,
    }
}

/// Field label with a trailing asterisk on required fields.
fn display_label(spec: &FieldSpec) -> SharedString {
    if spec.required {
        format!("{} *", spec.label).into()
    } else {
        spec.label.into()
    }
}

fn error_line(message: String) -> Div {
    div()
        .pl(px(170.))
        .text_sm()
        .text_color(gpui::red())
        .child(message)
}

/// Creates the common outer container and label used by every field row.
fn make_labeled_row(label: impl Into<SharedString>) -> Div {
    h_flex()
        .items_center()
        .gap_5()
        .p(px(2.))
        .rounded_md()
        .child(
            div()
                .min_w(px(150.))
                .text_align(TextAlign::Right)
                .child(label.into()),
        )
}
