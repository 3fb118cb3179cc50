use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::{field_specs, FieldSpec, LoanSopRecord};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An inline message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub label: String,
    pub message: String,
}

/// Outcome of checking a record against the field registry's rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
    pub required_fields: usize,
    pub completed_required_fields: usize,
}

impl ValidationReport {
    pub fn error_for(&self, path: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.path == path)
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Check every registered field: required fields must be non-empty, and
/// select fields may only hold one of their options.
pub fn validate_record(record: &LoanSopRecord) -> ValidationReport {
    let mut errors = Vec::new();
    let mut required_fields = 0;
    let mut completed_required_fields = 0;

    for spec in field_specs() {
        if spec.required {
            required_fields += 1;
        }
        match check_field(spec, record) {
            Some(message) => errors.push(FieldError {
                path: spec.path.to_string(),
                label: spec.label.to_string(),
                message,
            }),
            None if spec.required => completed_required_fields += 1,
            None => {}
        }
    }

    debug!(errors = errors.len(), "record validated");

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        required_fields,
        completed_required_fields,
    }
}

/// The message for a single field, if it fails its rule.
pub fn check_field(spec: &FieldSpec, record: &LoanSopRecord) -> Option<String> {
    let value = spec.value(record);
    if value.trim().is_empty() {
        return spec
            .required
            .then(|| format!("{} is required", spec.label));
    }
    if let Some(options) = spec.options() {
        if !options.contains(&value.as_str()) {
            return Some(format!(
                "{} must be one of: {}",
                spec.label,
                options.join(", ")
            ));
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
