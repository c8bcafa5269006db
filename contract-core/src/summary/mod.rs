//! Contract summary: a pure projection of the form state into labelled
//! sections, plus the formatting helpers it relies on.

pub mod format;
mod renderer;
mod view;

pub use renderer::{
    CLAUSE_DATA_SENTENCE, CLAUSE_INSPECTION_SENTENCE, CLAUSE_WARRANTY_SENTENCE,
    NO_CLAUSES_FALLBACK, NO_DOCUMENTS_FALLBACK, render_summary,
};
pub use view::{SummaryEntry, SummarySection, SummaryView};
