pub mod models;
pub mod navigation;
pub mod summary;
pub mod toast;
pub mod validation;
pub mod wizard;

pub use models::*;
pub use navigation::{
    Command, CommandParseError, MarkerState, NavigatorError, Progress, StepChange, StepNavigator,
};
pub use summary::{SummaryEntry, SummarySection, SummaryView, render_summary};
pub use toast::Toast;
pub use validation::{ValidationFailure, ValidityError, check_validity, validate_step};
pub use wizard::{ContractWizard, Effect};
