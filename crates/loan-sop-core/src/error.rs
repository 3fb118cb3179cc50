use thiserror::Error;

#[derive(Debug, Error)]
pub enum SopError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid transition: cannot {action} from the {from} step")]
    InvalidTransition { from: String, action: String },

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SopError {
    fn from(e: serde_json::Error) -> Self {
        SopError::SerializationError(e.to_string())
    }
}
