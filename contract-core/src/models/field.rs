/// Input kind of a form field, mirroring the control that captures it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Tel,
    /// ISO date, `YYYY-MM-DD`.
    Date,
    /// 24h time, `HH:MM` or `HH:MM:SS`.
    Time,
    Number {
        min: Option<i64>,
        max: Option<i64>,
    },
    Select(&'static [&'static str]),
    /// Single checkbox; checked holds the value `"on"`.
    Checkbox,
    /// Checkbox group whose selected option labels are collected as a list.
    CheckboxGroup(&'static [&'static str]),
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number { .. })
    }

    /// Options offered by select and checkbox-group fields.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::Select(options) | Self::CheckboxGroup(options) => options,
            _ => &[],
        }
    }
}

/// Declarative description of one form field and its constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub step: usize,
    pub kind: FieldKind,
    pub required: bool,
    /// Anchored the same way as an HTML `pattern` attribute.
    pub pattern: Option<&'static str>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl FieldSpec {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        step: usize,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            label,
            step,
            kind,
            required: false,
            pattern: None,
            min_length: None,
            max_length: None,
        }
    }

    pub const fn text(
        name: &'static str,
        label: &'static str,
        step: usize,
    ) -> Self {
        Self::new(name, label, step, FieldKind::Text)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn pattern(
        mut self,
        pattern: &'static str,
    ) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub const fn min_length(
        mut self,
        min: usize,
    ) -> Self {
        self.min_length = Some(min);
        self
    }

    pub const fn max_length(
        mut self,
        max: usize,
    ) -> Self {
        self.max_length = Some(max);
        self
    }
}
