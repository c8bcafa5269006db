use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value submitted for a checked single checkbox.
pub const CHECKED_VALUE: &str = "on";

/// A single field's current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Many(Vec<String>),
}

/// Live key-value view of everything the user has typed, picked or ticked.
///
/// Unchecked checkboxes and untouched fields are simply absent, which reads
/// back as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    values: BTreeMap<String, FieldValue>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the single value of `name`, or `""` when absent or multi-valued.
    pub fn value(
        &self,
        name: &str,
    ) -> &str {
        match self.values.get(name) {
            Some(FieldValue::Single(value)) => value,
            _ => "",
        }
    }

    /// Returns every value of `name` in submission order.
    pub fn values(
        &self,
        name: &str,
    ) -> &[String] {
        match self.values.get(name) {
            Some(FieldValue::Many(values)) => values,
            Some(FieldValue::Single(value)) => std::slice::from_ref(value),
            None => &[],
        }
    }

    pub fn is_checked(
        &self,
        name: &str,
    ) -> bool {
        !self.value(name).is_empty()
    }

    /// Stores a single value; an empty value removes the field.
    pub fn set_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        let name = name.into();
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&name);
        } else {
            self.values.insert(name, FieldValue::Single(value));
        }
    }

    pub fn set_checked(
        &mut self,
        name: impl Into<String>,
        checked: bool,
    ) {
        let name = name.into();
        if checked {
            self.values
                .insert(name, FieldValue::Single(CHECKED_VALUE.to_string()));
        } else {
            self.values.remove(&name);
        }
    }

    /// Replaces the list value of `name`; an empty list removes the field.
    pub fn set_values(
        &mut self,
        name: impl Into<String>,
        values: Vec<String>,
    ) {
        let name = name.into();
        if values.is_empty() {
            self.values.remove(&name);
        } else {
            self.values.insert(name, FieldValue::Many(values));
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
