//! Built-in field validity rules.
//!
//! Each field is checked the way a browser checks a constrained form
//! control: value missing first, then malformed input, type, length, range
//! and pattern. The first failing rule decides the message shown to the user.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::models::{FieldKind, FieldSpec, FormSchema, FormState};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email regex is valid")
});

/// Why a single field failed its constraints.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidityError {
    #[error("Completa este campo.")]
    ValueMissing,

    #[error("Marca esta casilla si deseas continuar.")]
    CheckboxUnchecked,

    #[error("Selecciona un elemento de la lista.")]
    NothingSelected,

    #[error("Introduce un número.")]
    BadNumber,

    #[error("Introduce una fecha válida.")]
    BadDate,

    #[error("Introduce una hora válida.")]
    BadTime,

    #[error(
        "Incluye un signo \"@\" en la dirección de correo electrónico. La dirección \"{0}\" no incluye el signo \"@\"."
    )]
    EmailMissingAt(String),

    #[error("Introduce una dirección de correo electrónico válida.")]
    EmailMalformed,

    #[error(
        "Reduce este texto a {max} caracteres como máximo (actualmente tiene {actual} caracteres)."
    )]
    TooLong { max: usize, actual: usize },

    #[error(
        "Alarga el texto a {min} caracteres como mínimo (actualmente tiene {actual} caracteres)."
    )]
    TooShort { min: usize, actual: usize },

    #[error("El valor debe ser superior o igual a {0}.")]
    RangeUnderflow(i64),

    #[error("El valor debe ser inferior o igual a {0}.")]
    RangeOverflow(i64),

    #[error("Utiliza un formato que coincida con el solicitado.")]
    PatternMismatch,
}

/// The first invalid field found while validating a step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{label}: {reason}")]
pub struct ValidationFailure {
    pub field: &'static str,
    pub label: &'static str,
    #[source]
    pub reason: ValidityError,
}

impl ValidationFailure {
    /// The message surfaced next to the offending field.
    pub fn message(&self) -> String {
        self.reason.to_string()
    }
}

/// Checks one field against its declared constraints.
///
/// Empty values are only invalid when the field is required.
pub fn check_validity(
    field: &FieldSpec,
    state: &FormState,
) -> Result<(), ValidityError> {
    match field.kind {
        FieldKind::Checkbox => {
            return if field.required && !state.is_checked(field.name) {
                Err(ValidityError::CheckboxUnchecked)
            } else {
                Ok(())
            };
        }
        FieldKind::CheckboxGroup(_) => {
            return if field.required && state.values(field.name).is_empty() {
                Err(ValidityError::CheckboxUnchecked)
            } else {
                Ok(())
            };
        }
        _ => {}
    }

    let value = state.value(field.name);
    if value.is_empty() {
        return match (field.required, field.kind) {
            (false, _) => Ok(()),
            (true, FieldKind::Select(_)) => Err(ValidityError::NothingSelected),
            (true, _) => Err(ValidityError::ValueMissing),
        };
    }

    match field.kind {
        FieldKind::Number { min, max } => check_number(value, min, max)?,
        FieldKind::Date => {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidityError::BadDate)?;
        }
        FieldKind::Time => {
            NaiveTime::parse_from_str(value, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
                .map_err(|_| ValidityError::BadTime)?;
        }
        FieldKind::Email => check_email(value)?,
        FieldKind::Select(options) if !options.iter().any(|o| *o == value) => {
            return Err(ValidityError::NothingSelected);
        }
        _ => {}
    }

    let length = value.chars().count();
    if let Some(max) = field.max_length.filter(|&max| length > max) {
        return Err(ValidityError::TooLong {
            max,
            actual: length,
        });
    }
    if let Some(min) = field.min_length.filter(|&min| length < min) {
        return Err(ValidityError::TooShort {
            min,
            actual: length,
        });
    }

    if let Some(pattern) = field.pattern.filter(|_| !field.kind.is_numeric()) {
        if !matches_pattern(field.name, pattern, value) {
            return Err(ValidityError::PatternMismatch);
        }
    }

    Ok(())
}

/// Validates the required fields of `step`, stopping at the first failure.
pub fn validate_step(
    schema: &FormSchema,
    state: &FormState,
    step: usize,
) -> Result<(), ValidationFailure> {
    for field in schema.fields_in_step(step).filter(|f| f.required) {
        if let Err(reason) = check_validity(field, state) {
            warn!(step, field = field.name, %reason, "field failed validation");
            return Err(ValidationFailure {
                field: field.name,
                label: field.label,
                reason,
            });
        }
    }
    Ok(())
}

fn check_number(
    value: &str,
    min: Option<i64>,
    max: Option<i64>,
) -> Result<(), ValidityError> {
    let number: f64 = value
        .trim()
        .parse()
        .ok()
        .filter(|n: &f64| n.is_finite())
        .ok_or(ValidityError::BadNumber)?;

    if let Some(min) = min.filter(|&min| number < min as f64) {
        return Err(ValidityError::RangeUnderflow(min));
    }
    if let Some(max) = max.filter(|&max| number > max as f64) {
        return Err(ValidityError::RangeOverflow(max));
    }
    Ok(())
}

fn check_email(value: &str) -> Result<(), ValidityError> {
    if !value.contains('@') {
        return Err(ValidityError::EmailMissingAt(value.to_string()));
    }
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidityError::EmailMalformed)
    }
}

/// Matches the whole value against an HTML-style pattern.
///
/// An invalid pattern constrains nothing, as in a browser.
fn matches_pattern(
    field: &str,
    pattern: &str,
    value: &str,
) -> bool {
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => re.is_match(value),
        Err(error) => {
            warn!(field, pattern, %error, "ignoring invalid field pattern");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::StepSpec;

    fn state_with(
        name: &str,
        value: &str,
    ) -> FormState {
        let mut state = FormState::new();
        state.set_value(name, value);
        state
    }

    #[test]
    fn required_text_must_not_be_empty() {
        let field = FieldSpec::text("ciudad_formalizacion", "Ciudad", 0).required();

        assert_eq!(
            check_validity(&field, &FormState::new()),
            Err(ValidityError::ValueMissing)
        );
        assert_eq!(
            check_validity(&field, &state_with("ciudad_formalizacion", "Madrid")),
            Ok(())
        );
    }

    #[test]
    fn optional_empty_field_is_valid_whatever_its_constraints() {
        let field = FieldSpec::new("vendedor_email", "Email", 1, FieldKind::Email);

        assert_eq!(check_validity(&field, &FormState::new()), Ok(()));
    }

    #[test]
    fn email_without_at_sign_names_the_value() {
        let field = FieldSpec::new("vendedor_email", "Email", 1, FieldKind::Email);
        let result = check_validity(&field, &state_with("vendedor_email", "ana.example.com"));

        assert_eq!(
            result,
            Err(ValidityError::EmailMissingAt("ana.example.com".to_string()))
        );
    }

    #[test]
    fn email_with_bad_domain_is_malformed() {
        let field = FieldSpec::new("vendedor_email", "Email", 1, FieldKind::Email);

        assert_eq!(
            check_validity(&field, &state_with("vendedor_email", "ana@-bad")),
            Err(ValidityError::EmailMalformed)
        );
        assert_eq!(
            check_validity(&field, &state_with("vendedor_email", "ana@example.es")),
            Ok(())
        );
    }

    #[test]
    fn pattern_must_match_the_whole_value() {
        let field = FieldSpec::text("vendedor_dni", "DNI/NIE", 1).pattern("[0-9]{8}[A-Z]");

        assert_eq!(
            check_validity(&field, &state_with("vendedor_dni", "12345678Z")),
            Ok(())
        );
        assert_eq!(
            check_validity(&field, &state_with("vendedor_dni", "12345678Z-extra")),
            Err(ValidityError::PatternMismatch)
        );
    }

    #[test]
    fn invalid_pattern_is_ignored() {
        let field = FieldSpec::text("vehiculo_bastidor", "VIN", 3).pattern("[unclosed");

        assert_eq!(
            check_validity(&field, &state_with("vehiculo_bastidor", "anything")),
            Ok(())
        );
    }

    #[test]
    fn number_checks_input_then_range() {
        let field = FieldSpec::new(
            "vehiculo_anio",
            "Año",
            3,
            FieldKind::Number {
                min: Some(1900),
                max: Some(2100),
            },
        );

        assert_eq!(
            check_validity(&field, &state_with("vehiculo_anio", "dos mil")),
            Err(ValidityError::BadNumber)
        );
        assert_eq!(
            check_validity(&field, &state_with("vehiculo_anio", "1899")),
            Err(ValidityError::RangeUnderflow(1900))
        );
        assert_eq!(
            check_validity(&field, &state_with("vehiculo_anio", "2101")),
            Err(ValidityError::RangeOverflow(2100))
        );
        assert_eq!(
            check_validity(&field, &state_with("vehiculo_anio", "2015")),
            Ok(())
        );
    }

    #[test]
    fn date_and_time_must_parse() {
        let date = FieldSpec::new("fecha_contrato", "Fecha", 0, FieldKind::Date);
        let time = FieldSpec::new("hora_entrega", "Hora", 0, FieldKind::Time);

        assert_eq!(
            check_validity(&date, &state_with("fecha_contrato", "2024-02-30")),
            Err(ValidityError::BadDate)
        );
        assert_eq!(
            check_validity(&date, &state_with("fecha_contrato", "2024-02-29")),
            Ok(())
        );
        assert_eq!(
            check_validity(&time, &state_with("hora_entrega", "25:00")),
            Err(ValidityError::BadTime)
        );
        assert_eq!(
            check_validity(&time, &state_with("hora_entrega", "10:30")),
            Ok(())
        );
    }

    #[test]
    fn too_long_reports_lengths() {
        let field = FieldSpec::text("vehiculo_matricula", "Matrícula", 3).max_length(4);
        let result = check_validity(&field, &state_with("vehiculo_matricula", "1234ABC"));

        assert_eq!(result, Err(ValidityError::TooLong { max: 4, actual: 7 }));
    }

    #[test]
    fn required_checkbox_must_be_checked() {
        let field =
            FieldSpec::new("clausula_datos", "Datos", 4, FieldKind::Checkbox).required();
        let mut state = FormState::new();

        assert_eq!(
            check_validity(&field, &state),
            Err(ValidityError::CheckboxUnchecked)
        );

        state.set_checked("clausula_datos", true);
        assert_eq!(check_validity(&field, &state), Ok(()));
    }

    #[test]
    fn required_select_rejects_unknown_option() {
        let field = FieldSpec::new("forma_pago", "Pago", 4, FieldKind::Select(&["Efectivo"]))
            .required();

        assert_eq!(
            check_validity(&field, &FormState::new()),
            Err(ValidityError::NothingSelected)
        );
        assert_eq!(
            check_validity(&field, &state_with("forma_pago", "Bitcoin")),
            Err(ValidityError::NothingSelected)
        );
    }

    #[test]
    fn validate_step_stops_at_first_invalid_required_field() {
        let schema = FormSchema::new(
            vec![StepSpec { title: "Uno" }],
            vec![
                FieldSpec::text("a", "A", 0).required(),
                FieldSpec::text("b", "B", 0).required(),
            ],
        );

        let failure = validate_step(&schema, &FormState::new(), 0).unwrap_err();

        assert_eq!(failure.field, "a");
        assert_eq!(failure.message(), "Completa este campo.");
    }

    #[test]
    fn validate_step_skips_optional_fields() {
        let schema = FormSchema::new(
            vec![StepSpec { title: "Uno" }],
            vec![
                FieldSpec::text("a", "A", 0).required(),
                FieldSpec::new("b", "B", 0, FieldKind::Email),
            ],
        );
        let mut state = state_with("a", "ok");
        state.set_value("b", "not-an-email");

        assert_eq!(validate_step(&schema, &state, 0), Ok(()));
    }

    #[test]
    fn validate_step_only_looks_at_its_own_step() {
        let schema = FormSchema::vehicle_sale();
        let mut state = FormState::new();
        state.set_value("ciudad_formalizacion", "Sevilla");
        state.set_value("fecha_contrato", "2025-03-01");

        assert_eq!(validate_step(&schema, &state, 0), Ok(()));
        assert_eq!(
            validate_step(&schema, &state, 1).unwrap_err().field,
            "vendedor_nombre"
        );
    }
}
