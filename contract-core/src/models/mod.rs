mod field;
mod form_state;
mod schema;

pub use field::{FieldKind, FieldSpec};
pub use form_state::{CHECKED_VALUE, FieldValue, FormState};
pub use schema::{
    DOCUMENT_OPTIONS, DOCUMENTS_FIELD, FUEL_OPTIONS, FormSchema, PAYMENT_OPTIONS, StepSpec,
};
