//! Read-only rendering of a record snapshot: formatted values, badges and
//! the SOP document layout.

pub mod badge;
pub mod document;
pub mod format;

pub use badge::{decision_badge, risk_badge, Badge, BadgeColor};
pub use document::{
    preview_warnings, render_preview, DocumentHeader, DocumentSummary, PreviewAction,
    PreviewDocument, PreviewItem, PreviewSection, RenderOptions,
};
pub use format::{format_currency, format_date, parse_date, INVALID_DATE};
