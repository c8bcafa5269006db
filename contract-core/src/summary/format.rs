//! Display formatting for summary values.
//!
//! Money is shown the `es-ES` way: `.` groups thousands, `,` separates two
//! decimals and the euro sign follows after a space.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

const CURRENCY_SUFFIX: &str = " €";

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use contract_core::summary::format::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parses user-typed numeric input the way a number field reads it.
///
/// Surrounding whitespace and a leading `+` are accepted, as is scientific
/// notation. Anything else, including `,` decimals, is not a number.
/// Amounts outside the `Decimal` range give `None`; see [`format_currency`].
pub fn parse_number(value: &str) -> Option<Decimal> {
    let literal = numeric_literal(value)?;
    if literal.contains(['e', 'E']) {
        return Decimal::from_scientific(literal).ok();
    }
    Decimal::from_str(literal).ok()
}

/// Strips whitespace and a leading `+`, and rejects anything that cannot
/// be a plain or scientific number literal.
fn numeric_literal(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let well_formed = !unsigned.is_empty()
        && !(trimmed.starts_with('+') && unsigned.starts_with(['+', '-']))
        && unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    well_formed.then_some(unsigned)
}

/// Formats a monetary amount for display.
///
/// Empty input renders empty and blank input counts as zero. Input that is
/// not a number is passed through unchanged. Numbers too large or too small
/// for `Decimal` are still formatted, through `f64`.
///
/// # Examples
///
/// ```
/// use contract_core::summary::format::format_currency;
///
/// assert_eq!(format_currency("1500"), "1.500,00 €");
/// assert_eq!(format_currency(""), "");
/// assert_eq!(format_currency("a convenir"), "a convenir");
/// assert_eq!(format_currency("1e30"), "1.000.000.000.000.000.000.000.000.000.000,00 €");
/// ```
pub fn format_currency(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    if value.trim().is_empty() {
        return format_euros(Decimal::ZERO);
    }
    if let Some(amount) = parse_number(value) {
        return format_euros(amount);
    }
    match numeric_literal(value)
        .and_then(|literal| literal.parse::<f64>().ok())
        .filter(|n| n.is_finite())
    {
        Some(amount) => format_wide_euros(amount),
        None => value.to_string(),
    }
}

/// Formats an `f64` amount that did not fit a `Decimal` literal.
fn format_wide_euros(amount: f64) -> String {
    if amount.abs() < 0.005 {
        return format_euros(Decimal::ZERO);
    }
    if let Ok(decimal) = Decimal::try_from(amount) {
        return format_euros(decimal);
    }
    // Beyond the Decimal range an f64 carries no fractional digits.
    let digits = format!("{}", amount.abs());
    let integer = digits.split_once('.').map_or(digits.as_str(), |(i, _)| i);
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{},00{CURRENCY_SUFFIX}", group_thousands(integer))
}

/// Formats an amount as `es-ES` euros with two decimals.
pub fn format_euros(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{},{fraction}{CURRENCY_SUFFIX}",
        group_thousands(integer)
    )
}

/// Inserts `.` between groups of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// Joins the non-empty parts with `separator`.
pub fn join_non_empty(
    parts: &[&str],
    separator: &str,
) -> String {
    parts
        .iter()
        .copied()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
