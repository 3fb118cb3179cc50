use loan_sop_core::export::{DocumentExporter, ExportArtifact, JsonExporter, PrintSink};
use loan_sop_core::flow::{FlowSession, Step, StepView, SubmitOutcome};
use loan_sop_core::preview::{PreviewDocument, RenderOptions};
use loan_sop_core::schema::{field_specs, Control, InputType};
use loan_sop_core::{LoanSopRecord, SopError, SopResult};

// ===========================================================================
// Fixtures
// ===========================================================================

fn value_for(control: Control, label: &str) -> String {
    match control {
        Control::Select(options) => options[options.len() - 1].to_string(),
        Control::Input(InputType::Number) => "250000".to_string(),
        Control::Input(InputType::Date) => "2024-02-29".to_string(),
        Control::Input(InputType::Text) | Control::TextArea => format!("{label} entry"),
    }
}

/// A session on the form step with every field filled in.
fn filled_session() -> FlowSession {
    let mut s = FlowSession::new();
    s.start().unwrap();
    for spec in field_specs() {
        s.edit(spec.path, &value_for(spec.control, spec.label))
            .unwrap();
    }
    s
}

#[derive(Default)]
struct RecordingExporter {
    received: Vec<(LoanSopRecord, PreviewDocument)>,
}

impl DocumentExporter for RecordingExporter {
    fn export(
        &mut self,
        record: &LoanSopRecord,
        document: &PreviewDocument,
    ) -> SopResult<ExportArtifact> {
        self.received.push((record.clone(), document.clone()));
        Ok(ExportArtifact {
            media_type: "application/pdf".into(),
            file_name: "out.pdf".into(),
            bytes: vec![0x25, 0x50, 0x44, 0x46],
        })
    }
}

#[derive(Default)]
struct RecordingPrinter {
    pages: usize,
}

impl PrintSink for RecordingPrinter {
    fn print(&mut self, _document: &PreviewDocument) -> SopResult<()> {
        self.pages += 1;
        Ok(())
    }
}

// ===========================================================================
// Transitions
// ===========================================================================

#[test]
fn test_start_preview_back() {
    let mut s = FlowSession::new();
    assert_eq!(s.step(), Step::Welcome);
    assert_eq!(s.start().unwrap(), Step::Form);
    s.preview().unwrap();
    assert_eq!(s.step(), Step::Preview);
    assert_eq!(s.back().unwrap(), Step::Form);
}

#[test]
fn test_unreachable_transitions_rejected() {
    let mut s = FlowSession::new();
    assert!(s.preview().is_err());
    assert!(s.submit().is_err());
    assert!(s.back().is_err());
    assert_eq!(s.step(), Step::Welcome);

    s.start().unwrap();
    assert!(s.start().is_err());
    assert!(s.back().is_err());
    assert_eq!(s.step(), Step::Form);

    s.preview().unwrap();
    assert!(s.start().is_err());
    assert!(s.preview().is_err());
    assert!(matches!(
        s.submit().unwrap_err(),
        SopError::InvalidTransition { .. }
    ));
    assert_eq!(s.step(), Step::Preview);
}

#[test]
fn test_preview_does_not_require_validation() {
    let mut s = FlowSession::new();
    s.start().unwrap();
    let doc = s.preview().unwrap();
    assert_eq!(doc.value_of("Loan Amount"), Some("$0.00"));
}

// ===========================================================================
// Submission
// ===========================================================================

#[test]
fn test_complete_submission_advances() {
    let mut s = filled_session();
    match s.submit().unwrap() {
        SubmitOutcome::Advanced(doc) => {
            assert_eq!(doc.value_of("Loan Amount"), Some("$250,000.00"));
            assert_eq!(doc.summary.risk.label, "Very High Risk");
            assert_eq!(doc.summary.decision.label, "Counter Offer");
        }
        other => panic!("Expected Advanced, got {other:?}"),
    }
    assert_eq!(s.step(), Step::Preview);
}

#[test]
fn test_each_blank_required_field_blocks_submission() {
    for spec in field_specs().iter().filter(|f| f.required) {
        let mut s = filled_session();
        s.edit(spec.path, "").unwrap();
        match s.submit().unwrap() {
            SubmitOutcome::Blocked(report) => {
                let err = report.error_for(spec.path).unwrap();
                assert!(err.message.contains(spec.label));
            }
            other => panic!("{} blank but got {other:?}", spec.path),
        }
        assert_eq!(s.step(), Step::Form, "{} blank advanced the flow", spec.path);
    }
}

// ===========================================================================
// Collaborators
// ===========================================================================

#[test]
fn test_generate_document_hands_snapshot_to_exporter() {
    let mut s = filled_session();
    s.submit().unwrap();

    let mut exporter = RecordingExporter::default();
    let artifact = s.generate_document(&mut exporter).unwrap();
    assert_eq!(artifact.file_name, "out.pdf");
    assert_eq!(exporter.received.len(), 1);
    assert_eq!(&exporter.received[0].0, s.record());
    assert_eq!(s.step(), Step::Preview);
}

#[test]
fn test_json_export_of_session_record() {
    let mut s = filled_session();
    s.submit().unwrap();
    let artifact = s.generate_document(&mut JsonExporter).unwrap();
    let back: LoanSopRecord = serde_json::from_slice(&artifact.bytes).unwrap();
    assert_eq!(&back, s.record());
}

#[test]
fn test_print_only_from_preview() {
    let mut s = filled_session();
    let mut printer = RecordingPrinter::default();
    assert!(s.print(&mut printer).is_err());
    s.preview().unwrap();
    s.print(&mut printer).unwrap();
    assert_eq!(printer.pages, 1);
}

// ===========================================================================
// Views
// ===========================================================================

#[test]
fn test_view_follows_active_step() {
    let mut s = FlowSession::with_options(RenderOptions::default());
    assert!(matches!(s.view().view, StepView::Welcome(_)));
    s.start().unwrap();
    assert!(matches!(s.view().view, StepView::Form(_)));
    s.preview().unwrap();
    let v = s.view();
    assert!(matches!(v.view, StepView::Preview(_)));
    assert_eq!(v.progress.percent_complete, 100);

    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["step"], "preview");
    assert!(json["view"]["sections"].is_array());
}
