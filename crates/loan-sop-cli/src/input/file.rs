use loan_sop_core::LoanSopRecord;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::record_from_value;

/// Read a record from a JSON or YAML file (chosen by extension). The file may
/// hold a bare record or the output envelope of another command.
pub fn read_record(path: &str) -> Result<LoanSopRecord, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let value = read_value(&canonical)?;
    let record = record_from_value(value)
        .map_err(|e| format!("Failed to load '{}': {}", canonical.display(), e))?;
    Ok(record)
}

fn read_value(canonical: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let value: Value = if is_yaml(canonical) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    Ok(value)
}

/// Write bytes to `path`, creating parent directories as needed.
pub fn write_bytes(path: &str, bytes: &[u8]) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let target = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if target.is_dir() {
        return Err(format!("Output path is a directory: {}", target.display()).into());
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, bytes)
        .map_err(|e| format!("Failed to write '{}': {}", target.display(), e))?;
    Ok(target)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve the path and make sure it names an existing file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
