use napi::Result as NapiResult;
use napi_derive::napi;

use loan_sop_core::export::{DocumentExporter, TextExporter};
use loan_sop_core::form::{render_form as build_form_view, validate_record as check_record};
use loan_sop_core::preview::{render_preview as build_preview, RenderOptions};
use loan_sop_core::schema::{field_specs as registry, set_field as apply_edit, FieldSpec};
use loan_sop_core::LoanSopRecord;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_record(record_json: &str) -> NapiResult<LoanSopRecord> {
    LoanSopRecord::from_json(record_json).map_err(to_napi_error)
}

fn parse_options(options_json: Option<String>) -> NapiResult<RenderOptions> {
    match options_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error),
        None => Ok(RenderOptions::default()),
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

#[napi]
pub fn default_record() -> NapiResult<String> {
    serde_json::to_string(&LoanSopRecord::default()).map_err(to_napi_error)
}

#[napi]
pub fn field_specs() -> NapiResult<String> {
    let fields: Vec<_> = registry().iter().map(FieldSpec::descriptor).collect();
    serde_json::to_string(&fields).map_err(to_napi_error)
}

/// Apply one edit and return the updated record.
#[napi]
pub fn set_field(record_json: String, path: String, value: String) -> NapiResult<String> {
    let mut record = parse_record(&record_json)?;
    apply_edit(&mut record, &path, &value).map_err(to_napi_error)?;
    serde_json::to_string(&record).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_record(record_json: String) -> NapiResult<String> {
    let record = parse_record(&record_json)?;
    serde_json::to_string(&check_record(&record)).map_err(to_napi_error)
}

#[napi]
pub fn render_form(record_json: String) -> NapiResult<String> {
    let record = parse_record(&record_json)?;
    let report = check_record(&record);
    serde_json::to_string(&build_form_view(&record, Some(&report))).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

#[napi]
pub fn render_preview(record_json: String, options_json: Option<String>) -> NapiResult<String> {
    let record = parse_record(&record_json)?;
    let options = parse_options(options_json)?;
    serde_json::to_string(&build_preview(&record, &options)).map_err(to_napi_error)
}

/// The plain-text SOP document for a record.
#[napi]
pub fn export_text(record_json: String, options_json: Option<String>) -> NapiResult<String> {
    let record = parse_record(&record_json)?;
    let options = parse_options(options_json)?;
    let document = build_preview(&record, &options);
    let artifact = TextExporter
        .export(&record, &document)
        .map_err(to_napi_error)?;
    String::from_utf8(artifact.bytes).map_err(to_napi_error)
}
