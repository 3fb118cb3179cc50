use loan_sop_core::LoanSopRecord;
use serde_json::Value;
use std::io::{self, Read};

use super::record_from_value;

/// Read a record from stdin if one is being piped.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin_record() -> Result<Option<LoanSopRecord>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

/// Piped JSON: a bare record or another command's output envelope.
pub fn parse_piped(buffer: &str) -> Result<Option<LoanSopRecord>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(trimmed)?;
    Ok(Some(record_from_value(value)?))
}
