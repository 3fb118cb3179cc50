use clap::Args;
use serde_json::Value;
use std::time::Instant;

use loan_sop_core::preview::{preview_warnings, render_preview};
use loan_sop_core::with_metadata;

use super::{elapsed_us, RecordInput, RenderArgs};

/// Arguments for rendering the preview document
#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub record: RecordInput,

    #[command(flatten)]
    pub render: RenderArgs,
}

pub fn run_preview(args: PreviewArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let record = args.record.load()?;
    let options = args.render.options()?;
    let document = render_preview(&record, &options);

    let output = with_metadata(
        "en-US currency and long-form dates; badge colours by rating and decision",
        &options,
        preview_warnings(&record),
        elapsed_us(start),
        document,
    );
    Ok(serde_json::to_value(output)?)
}
