//! Seams to the collaborators that turn a finished preview into an artifact
//! (export) or hand it to the system print dialog (print).

use serde::{Deserialize, Serialize};

use crate::preview::PreviewDocument;
use crate::schema::LoanSopRecord;
use crate::{SopError, SopResult};

/// A produced document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub media_type: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Turns a record snapshot and its rendered preview into an artifact.
pub trait DocumentExporter {
    fn export(
        &mut self,
        record: &LoanSopRecord,
        document: &PreviewDocument,
    ) -> SopResult<ExportArtifact>;
}

/// Receives a rendered preview to print.
pub trait PrintSink {
    fn print(&mut self, document: &PreviewDocument) -> SopResult<()>;
}

/// Plain-text SOP document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl DocumentExporter for TextExporter {
    fn export(
        &mut self,
        record: &LoanSopRecord,
        document: &PreviewDocument,
    ) -> SopResult<ExportArtifact> {
        Ok(ExportArtifact {
            media_type: "text/plain; charset=utf-8".into(),
            file_name: file_name(record, "txt"),
            bytes: document.to_string().into_bytes(),
        })
    }
}

/// The record snapshot as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl DocumentExporter for JsonExporter {
    fn export(
        &mut self,
        record: &LoanSopRecord,
        _document: &PreviewDocument,
    ) -> SopResult<ExportArtifact> {
        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| SopError::ExportFailed(e.to_string()))?;
        Ok(ExportArtifact {
            media_type: "application/json".into(),
            file_name: file_name(record, "json"),
            bytes,
        })
    }
}

/// `sop-<loan number>.<ext>`, keeping only filename-safe characters.
pub fn file_name(record: &LoanSopRecord, extension: &str) -> String {
    let stem: String = record
        .loan_information
        .loan_number
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        format!("sop.{extension}")
    } else {
        format!("sop-{stem}.{extension}")
    }
}
