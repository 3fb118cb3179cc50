use serde_json::{json, Value};
use std::time::Instant;

use loan_sop_core::schema::Section;
use loan_sop_core::{with_metadata, LoanSopRecord};

use super::elapsed_us;

pub fn run_template() -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let record = LoanSopRecord::new();
    let sections: Vec<&str> = Section::ALL.iter().map(|s| s.key()).collect();

    let output = with_metadata(
        "Empty loan SOP record",
        &json!({ "sections": sections }),
        Vec::new(),
        elapsed_us(start),
        record,
    );
    Ok(serde_json::to_value(output)?)
}
