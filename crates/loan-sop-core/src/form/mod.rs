//! Editable form: controls, required-field validation and inline errors.

pub mod state;
pub mod validation;
pub mod view;

pub use state::FormState;
pub use validation::{check_field, validate_record, FieldError, ValidationReport};
pub use view::{render_form, FieldView, FormAction, FormSectionView, FormView, SelectOption};
