pub mod file;
pub mod stdin;

use loan_sop_core::LoanSopRecord;
use serde_json::Value;

/// Build a record from parsed input. Output of another `sop` command arrives
/// wrapped in the `{result, methodology, ...}` envelope; its `result` is the
/// record.
pub fn record_from_value(value: Value) -> Result<LoanSopRecord, Box<dyn std::error::Error>> {
    let value = match value {
        Value::Object(mut map) if map.get("result").is_some_and(Value::is_object) => {
            map.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    };
    let record: LoanSopRecord = serde_json::from_value(value)
        .map_err(|e| format!("Not a loan SOP record: {}", e))?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_record_loads() {
        let r = record_from_value(json!({ "loanInformation": { "loanNumber": "LN-7" } })).unwrap();
        assert_eq!(r.loan_information.loan_number, "LN-7");
    }

    #[test]
    fn test_envelope_is_unwrapped() {
        let value = json!({
            "result": { "loanInformation": { "loanNumber": "LN-7" } },
            "methodology": "Field edits applied to loan SOP record",
            "assumptions": {},
            "warnings": [],
            "metadata": { "version": "0.1.0", "computation_time_us": 3, "precision": "rust_decimal_128bit" }
        });
        let r = record_from_value(value).unwrap();
        assert_eq!(r.loan_information.loan_number, "LN-7");
    }

    #[test]
    fn test_non_record_results_are_rejected() {
        // `validate` output: the result is a report, not a record.
        let value = json!({
            "result": { "is_valid": false, "errors": [] },
            "methodology": "Required-field and option-list validation"
        });
        assert!(record_from_value(value).is_err());

        let value = json!({ "result": [{ "path": "loanInformation.loanNumber" }] });
        assert!(record_from_value(value).is_err());
    }
}
