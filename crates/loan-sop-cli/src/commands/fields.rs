use clap::Args;
use serde_json::{json, Value};
use std::time::Instant;

use loan_sop_core::schema::{field_specs, fields_in, FieldDescriptor, FieldSpec, Section};
use loan_sop_core::with_metadata;

use super::elapsed_us;

/// Arguments for listing the form fields
#[derive(Args)]
pub struct FieldsArgs {
    /// Only list one section (key such as loanTerms, or title such as "Loan Terms")
    #[arg(long)]
    pub section: Option<String>,

    /// Only list required fields
    #[arg(long)]
    pub required: bool,
}

pub fn run_fields(args: FieldsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();

    let specs: Vec<&FieldSpec> = match args.section {
        Some(ref name) => fields_in(name.parse::<Section>()?).collect(),
        None => field_specs().iter().collect(),
    };
    let fields: Vec<FieldDescriptor> = specs
        .into_iter()
        .filter(|f| !args.required || f.required)
        .map(FieldSpec::descriptor)
        .collect();

    let output = with_metadata(
        "Loan SOP form field registry",
        &json!({ "section": args.section, "required_only": args.required }),
        Vec::new(),
        elapsed_us(start),
        fields,
    );
    Ok(serde_json::to_value(output)?)
}
