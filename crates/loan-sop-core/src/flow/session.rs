use serde::{Deserialize, Serialize};
use tracing::info;

use super::step::{Progress, Step, StepAction, StepController};
use crate::export::{DocumentExporter, ExportArtifact, PrintSink};
use crate::form::{FormState, FormView, ValidationReport};
use crate::preview::{render_preview, PreviewDocument, RenderOptions};
use crate::schema::LoanSopRecord;
use crate::SopResult;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Landing page copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeView {
    pub headline: String,
    pub tagline: String,
    pub start_label: String,
}

impl Default for WelcomeView {
    fn default() -> Self {
        Self {
            headline: "Create Stunning SOP Documents".into(),
            tagline: "Generate professional Standard Operating Procedure documents \
                      for every loan file."
                .into(),
            start_label: "Start Creating SOP".into(),
        }
    }
}

/// What the active step shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", content = "view", rename_all = "snake_case")]
pub enum StepView {
    Welcome(WelcomeView),
    Form(FormView),
    Preview(PreviewDocument),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowView {
    pub progress: Progress,
    #[serde(flatten)]
    pub view: StepView,
}

/// Result of pressing submit on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Every rule passed; the flow moved to the preview.
    Advanced(PreviewDocument),
    /// Validation failed; the flow stays on the form.
    Blocked(ValidationReport),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One run of the Welcome → Form → Preview flow. Owns the single record the
/// form edits and the preview reads.
#[derive(Debug, Clone, Default)]
pub struct FlowSession {
    record: LoanSopRecord,
    steps: StepController,
    form: FormState,
    options: RenderOptions,
}

impl FlowSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Start from an existing record (e.g. loaded from JSON) at the welcome
    /// step.
    pub fn with_record(record: LoanSopRecord, options: RenderOptions) -> Self {
        Self {
            record,
            options,
            ..Self::default()
        }
    }

    pub fn step(&self) -> Step {
        self.steps.current()
    }

    pub fn record(&self) -> &LoanSopRecord {
        &self.record
    }

    pub fn progress(&self) -> Progress {
        self.steps.progress()
    }

    pub fn start(&mut self) -> SopResult<Step> {
        self.steps.apply(StepAction::Start)
    }

    /// Edit one field. Only the form may mutate the record.
    pub fn edit(&mut self, path: &str, raw: &str) -> SopResult<()> {
        self.steps.expect(Step::Form, "edit")?;
        self.form.edit(&mut self.record, path, raw)
    }

    /// Show the in-progress record without validating it.
    pub fn preview(&mut self) -> SopResult<PreviewDocument> {
        self.steps.apply(StepAction::Preview)?;
        Ok(self.render())
    }

    /// Validate; advance to the preview only if every rule passes.
    pub fn submit(&mut self) -> SopResult<SubmitOutcome> {
        self.steps.expect(Step::Form, &StepAction::Submit.to_string())?;
        let report = self.form.submit(&self.record).clone();
        if !report.is_valid {
            return Ok(SubmitOutcome::Blocked(report));
        }
        self.steps.apply(StepAction::Submit)?;
        Ok(SubmitOutcome::Advanced(self.render()))
    }

    pub fn back(&mut self) -> SopResult<Step> {
        self.steps.apply(StepAction::Back)
    }

    /// Hand the snapshot and its rendering to the export collaborator. The
    /// step does not change.
    pub fn generate_document(
        &self,
        exporter: &mut dyn DocumentExporter,
    ) -> SopResult<ExportArtifact> {
        self.steps.expect(Step::Preview, "generate a document")?;
        let document = self.render();
        let artifact = exporter.export(&self.record, &document)?;
        info!(
            file = %artifact.file_name,
            bytes = artifact.bytes.len(),
            "document generated"
        );
        Ok(artifact)
    }

    pub fn print(&self, printer: &mut dyn PrintSink) -> SopResult<()> {
        self.steps.expect(Step::Preview, "print")?;
        printer.print(&self.render())
    }

    /// Discard the record and return to the welcome step.
    pub fn restart(&mut self) {
        info!("flow restarted; record discarded");
        *self = Self::with_options(self.options.clone());
    }

    /// The view for the active step.
    pub fn view(&self) -> FlowView {
        let view = match self.steps.current() {
            Step::Welcome => StepView::Welcome(WelcomeView::default()),
            Step::Form => StepView::Form(self.form.render(&self.record)),
            Step::Preview => StepView::Preview(self.render()),
        };
        FlowView {
            progress: self.steps.progress(),
            view,
        }
    }

    fn render(&self) -> PreviewDocument {
        render_preview(&self.record, &self.options)
    }
}
