use clap::Args;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::debug;

use loan_sop_core::form::{render_form, validate_record, FormState};
use loan_sop_core::with_metadata;

use super::{elapsed_us, RecordInput};

/// Arguments for applying field edits
#[derive(Args)]
pub struct SetArgs {
    #[command(flatten)]
    pub record: RecordInput,

    /// Field edit as path=value (repeatable), e.g. loanInformation.loanType=FHA
    #[arg(long = "field", value_name = "PATH=VALUE", required = true)]
    pub fields: Vec<String>,
}

/// Arguments for validating a record
#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub record: RecordInput,
}

/// Arguments for rendering the form view
#[derive(Args)]
pub struct FormArgs {
    #[command(flatten)]
    pub record: RecordInput,
}

pub fn run_set(args: SetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mut record = args.record.load()?;
    let mut form = FormState::new();

    let mut applied = Vec::with_capacity(args.fields.len());
    for edit in &args.fields {
        let (path, value) = edit
            .split_once('=')
            .ok_or_else(|| format!("--field '{edit}' must be PATH=VALUE"))?;
        form.edit(&mut record, path.trim(), value)?;
        debug!(path = path.trim(), "edit applied");
        applied.push(path.trim().to_string());
    }

    let output = with_metadata(
        "Field edits applied to loan SOP record",
        &json!({ "fields": applied }),
        Vec::new(),
        elapsed_us(start),
        record,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let record = args.record.load()?;
    let report = validate_record(&record);

    let output = with_metadata(
        "Required-field and option-list validation",
        &json!({
            "required_fields": report.required_fields,
            "completed_required_fields": report.completed_required_fields,
        }),
        report.messages(),
        elapsed_us(start),
        report,
    );
    Ok(serde_json::to_value(output)?)
}

/// Whether `validate` output reports an invalid record; the process exits 1.
pub fn validation_failed(output: &Value) -> bool {
    output["result"]["is_valid"] == false
}

pub fn run_form(args: FormArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let record = args.record.load()?;
    let report = validate_record(&record);
    let view = render_form(&record, Some(&report));

    let output = with_metadata(
        "Loan SOP form view",
        &json!({ "sections": view.sections.len() }),
        report.messages(),
        elapsed_us(start),
        view,
    );
    Ok(serde_json::to_value(output)?)
}
