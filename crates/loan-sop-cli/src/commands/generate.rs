use clap::{Args, ValueEnum};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::info;

use loan_sop_core::export::{DocumentExporter, JsonExporter, TextExporter};
use loan_sop_core::flow::{FlowSession, SubmitOutcome};
use loan_sop_core::preview::preview_warnings;
use loan_sop_core::with_metadata;

use super::{elapsed_us, RecordInput, RenderArgs};
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DocumentFormat {
    Text,
    Json,
}

/// Arguments for generating the SOP document
#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub record: RecordInput,

    #[command(flatten)]
    pub render: RenderArgs,

    /// Document format
    #[arg(long, default_value = "text")]
    pub format: DocumentFormat,

    /// Write the document here instead of embedding it in the output
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run_generate(args: GenerateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let record = args.record.load()?;
    let warnings = preview_warnings(&record);

    let mut session = FlowSession::with_record(record, args.render.options()?);
    session.start()?;
    match session.submit()? {
        SubmitOutcome::Advanced(_) => {}
        SubmitOutcome::Blocked(report) => {
            return Err(format!(
                "record is incomplete ({} of {} required fields): {}",
                report.completed_required_fields,
                report.required_fields,
                report.messages().join("; ")
            )
            .into());
        }
    }

    let mut exporter: Box<dyn DocumentExporter> = match args.format {
        DocumentFormat::Text => Box::new(TextExporter),
        DocumentFormat::Json => Box::new(JsonExporter),
    };
    let artifact = session.generate_document(exporter.as_mut())?;

    let result = match args.out {
        Some(ref path) => {
            let written = input::file::write_bytes(path, &artifact.bytes)?;
            info!(path = %written.display(), "document written");
            json!({
                "file_name": artifact.file_name,
                "media_type": artifact.media_type,
                "bytes": artifact.bytes.len(),
                "path": written.display().to_string(),
            })
        }
        None => json!({
            "file_name": artifact.file_name,
            "media_type": artifact.media_type,
            "bytes": artifact.bytes.len(),
            "content": String::from_utf8_lossy(&artifact.bytes),
        }),
    };

    let output = with_metadata(
        "Welcome, form submission and preview; document handed to exporter",
        &json!({ "format": format!("{:?}", args.format).to_lowercase() }),
        warnings,
        elapsed_us(start),
        result,
    );
    Ok(serde_json::to_value(output)?)
}
