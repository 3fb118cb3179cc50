pub mod fields;
pub mod generate;
pub mod preview;
pub mod record;
pub mod template;

use chrono::{Local, NaiveDateTime};
use clap::Args;
use loan_sop_core::preview::RenderOptions;
use loan_sop_core::LoanSopRecord;
use std::time::Instant;

use crate::input;

/// Where a command reads its record from
#[derive(Args)]
pub struct RecordInput {
    /// Path to a JSON or YAML record (otherwise read from stdin)
    #[arg(long)]
    pub input: Option<String>,
}

impl RecordInput {
    pub fn load(&self) -> Result<LoanSopRecord, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            input::file::read_record(path)
        } else if let Some(record) = input::stdin::read_stdin_record()? {
            Ok(record)
        } else {
            Err("--input is required (or pipe a record on stdin)".into())
        }
    }
}

/// Preview rendering flags
#[derive(Args)]
pub struct RenderArgs {
    /// Footer timestamp: "now" or YYYY-MM-DDTHH:MM:SS
    #[arg(long)]
    pub generated_at: Option<String>,

    /// Omit the confidentiality footer
    #[arg(long)]
    pub no_footer: bool,
}

impl RenderArgs {
    pub fn options(&self) -> Result<RenderOptions, Box<dyn std::error::Error>> {
        let generated_at = match self.generated_at.as_deref() {
            None => None,
            Some("now") => Some(Local::now().naive_local()),
            Some(raw) => Some(
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                    .map_err(|e| format!("--generated-at '{raw}': {e}"))?,
            ),
        };
        Ok(RenderOptions {
            generated_at,
            include_footer: !self.no_footer,
        })
    }
}

pub fn elapsed_us(start: Instant) -> u64 {
    start.elapsed().as_micros() as u64
}
