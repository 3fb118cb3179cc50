use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "is_valid",
        "path",
        "content",
        "file_name",
        "error_count",
        "header",
        "loanInformation",
    ];

    if let Value::Array(rows) = result_obj {
        for row in rows {
            match row.get("path") {
                Some(path) => println!("{}", format_minimal(path)),
                None => println!("{}", format_minimal(row)),
            }
        }
        return;
    }

    if let Value::Object(map) = result_obj {
        // Try priority keys first (skip null values)
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    // Not an object, just print directly
    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        // Preview header and record sections: the loan number identifies them
        Value::Object(map) if map.contains_key("loan_number") => format_minimal(&map["loan_number"]),
        Value::Object(map) if map.contains_key("loanNumber") => format_minimal(&map["loanNumber"]),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
