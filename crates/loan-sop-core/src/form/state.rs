use tracing::{debug, warn};

use super::validation::{check_field, validate_record, ValidationReport};
use super::view::{render_form, FormView};
use crate::schema::{find_field, LoanSopRecord};
use crate::SopResult;

/// Per-session form state: the errors currently shown inline.
///
/// The record itself is owned by the flow session and lent to the form for
/// each edit.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    report: Option<ValidationReport>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one control edit. A successful edit re-checks that field and
    /// drops its inline error once it passes; editing is never blocked by
    /// outstanding errors.
    pub fn edit(&mut self, record: &mut LoanSopRecord, path: &str, raw: &str) -> SopResult<()> {
        let spec = find_field(path)?;
        (spec.set)(record, raw)?;
        debug!(field = path, "form edit applied");

        if let Some(report) = self.report.as_mut() {
            if check_field(spec, record).is_none() {
                report.errors.retain(|e| e.path != path);
                report.is_valid = report.errors.is_empty();
            }
        }
        Ok(())
    }

    /// Validate the whole record and keep the result for inline display.
    pub fn submit(&mut self, record: &LoanSopRecord) -> &ValidationReport {
        let report = validate_record(record);
        if !report.is_valid {
            warn!(errors = report.errors.len(), "form submission blocked");
        }
        self.report.insert(report)
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    pub fn clear(&mut self) {
        self.report = None;
    }

    pub fn render(&self, record: &LoanSopRecord) -> FormView {
        render_form(record, self.report.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_mutates_shared_record() {
        let mut record = LoanSopRecord::default();
        let mut form = FormState::new();
        form.edit(&mut record, "signatures.managerName", "Pat Lee").unwrap();
        assert_eq!(record.signatures.manager_name, "Pat Lee");
    }

    #[test]
    fn test_edit_after_failed_submit_clears_that_error_only() {
        let mut record = LoanSopRecord::default();
        let mut form = FormState::new();
        let before = form.submit(&record).errors.len();

        form.edit(&mut record, "loanInformation.loanNumber", "LN-1").unwrap();
        let report = form.report().unwrap();
        assert_eq!(report.errors.len(), before - 1);
        assert!(report.error_for("loanInformation.loanNumber").is_none());
        assert!(report.error_for("loanInformation.borrowerName").is_some());
    }

    #[test]
    fn test_blanking_a_field_keeps_error() {
        let mut record = LoanSopRecord::default();
        let mut form = FormState::new();
        form.submit(&record);
        form.edit(&mut record, "loanInformation.loanNumber", "").unwrap();
        assert!(form
            .report()
            .unwrap()
            .error_for("loanInformation.loanNumber")
            .is_some());
    }

    #[test]
    fn test_rejected_edit_propagates_error() {
        let mut record = LoanSopRecord::default();
        let mut form = FormState::new();
        assert!(form
            .edit(&mut record, "loanTerms.loanTerm", "thirty years")
            .is_err());
        assert!(record.loan_terms.loan_term.is_none());
    }

    #[test]
    fn test_render_carries_submit_errors() {
        let record = LoanSopRecord::default();
        let mut form = FormState::new();
        assert!(form.render(&record).error_count == 0);
        form.submit(&record);
        assert!(form.render(&record).error_count > 0);
        form.clear();
        assert_eq!(form.render(&record).error_count, 0);
    }
}
