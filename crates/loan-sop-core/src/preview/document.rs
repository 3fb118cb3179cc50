use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::badge::{decision_badge, risk_badge, Badge, BadgeColor};
use super::format::{
    format_count, format_date, format_optional_currency, format_percent, format_timestamp,
    parse_date,
};
use crate::schema::{sequence_text, LoanSopRecord};

// ---------------------------------------------------------------------------
// Options & view types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Stamped into the footer when set. Rendering is otherwise clock-free.
    pub generated_at: Option<NaiveDateTime>,
    pub include_footer: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            generated_at: None,
            include_footer: true,
        }
    }
}

/// Buttons exposed by the preview. Back and export are handed to the caller;
/// print goes to the print collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewAction {
    BackToForm,
    Export,
    Print,
}

impl PreviewAction {
    pub fn label(self) -> &'static str {
        match self {
            PreviewAction::BackToForm => "Back to Form",
            PreviewAction::Export => "Export PDF",
            PreviewAction::Print => "Print",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHeader {
    pub loan_number: String,
    pub borrower_name: String,
    pub property_address: String,
    pub loan_amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub decision: Badge,
    pub risk: Badge,
    pub approval_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreviewItem {
    Field {
        label: String,
        value: String,
    },
    Badge {
        label: String,
        badge: Badge,
    },
    Paragraph {
        heading: String,
        text: String,
    },
    Signatory {
        role: String,
        name: String,
        signature: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        date: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSection {
    pub title: String,
    pub items: Vec<PreviewItem>,
}

/// The read-only SOP document rendered from a record snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewDocument {
    pub title: String,
    pub subtitle: String,
    pub header: DocumentHeader,
    pub summary: DocumentSummary,
    pub sections: Vec<PreviewSection>,
    pub footer: Vec<String>,
    pub actions: Vec<PreviewAction>,
}

impl PreviewDocument {
    pub fn section(&self, title: &str) -> Option<&PreviewSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// The displayed value of a labelled field or badge anywhere in the body.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter())
            .find_map(|item| match item {
                PreviewItem::Field { label: l, value } if l == label => Some(value.as_str()),
                PreviewItem::Badge { label: l, badge } if l == label => Some(badge.label.as_str()),
                PreviewItem::Paragraph { heading, text } if heading == label => Some(text.as_str()),
                _ => None,
            })
    }

    /// Every badge colour used in the document.
    pub fn badge_colors(&self) -> Vec<BadgeColor> {
        let mut colors = vec![self.summary.decision.color, self.summary.risk.color];
        colors.extend(
            self.sections
                .iter()
                .flat_map(|s| s.items.iter())
                .filter_map(|item| match item {
                    PreviewItem::Badge { badge, .. } => Some(badge.color),
                    _ => None,
                }),
        );
        colors
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a record snapshot. Pure: the same record and options always give
/// the same document, and the record is never modified.
pub fn render_preview(record: &LoanSopRecord, options: &RenderOptions) -> PreviewDocument {
    let loan = &record.loan_information;
    let property = &record.property_information;
    let market = &record.market_analysis;
    let financial = &record.financial_analysis;
    let risk = &record.risk_assessment;
    let compliance = &record.regulatory_compliance;
    let decision = &record.underwriting_decision;
    let terms = &record.loan_terms;
    let conditions = &record.approval_conditions;
    let signatures = &record.signatures;

    let risk_badge = risk_badge(risk.risk_rating.as_ref());
    let decision_badge = decision_badge(decision.decision.as_ref());
    let approval_date = format_date(&signatures.approval_date);

    let sections = vec![
        PreviewSection {
            title: "Loan Information".into(),
            items: vec![
                field("Loan Number", &loan.loan_number),
                field("Borrower Name", &loan.borrower_name),
                field("Property Address", &loan.property_address),
                field("Loan Amount", format_optional_currency(loan.loan_amount)),
                field("Loan Type", select_text(loan.loan_type.as_ref())),
            ],
        },
        PreviewSection {
            title: "Property Information".into(),
            items: vec![
                field("Property Type", select_text(property.property_type.as_ref())),
                field(
                    "Estimated Value",
                    format_optional_currency(property.estimated_value),
                ),
                field("Purchase Date", format_date(&property.purchase_date)),
                field(
                    "Square Footage",
                    format!("{} sq ft", format_count(property.square_footage)),
                ),
                field("Bedrooms", format_count(property.bedrooms)),
                field("Bathrooms", format_count(property.bathrooms)),
                field("Year Built", format_count(property.year_built)),
            ],
        },
        PreviewSection {
            title: "Market Analysis".into(),
            items: vec![
                paragraph("Market Trends", &market.market_trends),
                paragraph("Neighborhood Analysis", &market.neighborhood_analysis),
                sequence("Comparable Sales", &market.comparable_sales),
            ],
        },
        PreviewSection {
            title: "Financial Analysis".into(),
            items: vec![
                paragraph("Income Verification", &financial.income_verification),
                paragraph("Credit Analysis", &financial.credit_analysis),
                field(
                    "Debt-to-Income Ratio",
                    format_percent(financial.debt_to_income_ratio),
                ),
                paragraph("Cash Flow Analysis", &financial.cash_flow_analysis),
            ],
        },
        PreviewSection {
            title: "Risk Assessment".into(),
            items: vec![
                PreviewItem::Badge {
                    label: "Overall Risk Rating".into(),
                    badge: risk_badge.clone(),
                },
                sequence("Risk Factors", &risk.risk_factors),
                paragraph("Mitigation Strategies", &risk.mitigation_strategies),
            ],
        },
        PreviewSection {
            title: "Regulatory Compliance".into(),
            items: vec![
                sequence("Documentation", &compliance.documentation),
                sequence("Compliance Checklist", &compliance.compliance_checklist),
                paragraph("Regulatory Notes", &compliance.regulatory_notes),
            ],
        },
        PreviewSection {
            title: "Underwriting Decision".into(),
            items: vec![
                PreviewItem::Badge {
                    label: "Final Decision".into(),
                    badge: decision_badge.clone(),
                },
                paragraph("Decision Rationale", &decision.rationale),
                sequence("Decision Conditions", &decision.conditions),
            ],
        },
        PreviewSection {
            title: "Loan Terms".into(),
            items: vec![
                field("Interest Rate", format_percent(terms.interest_rate)),
                field(
                    "Loan Term",
                    format!("{} months", format_count(terms.loan_term)),
                ),
                field(
                    "Payment Schedule",
                    select_text(terms.payment_schedule.as_ref()),
                ),
                sequence("Fees", &terms.fees),
            ],
        },
        PreviewSection {
            title: "Approval Conditions".into(),
            items: vec![
                sequence("Pre-Closing Conditions", &conditions.pre_closing_conditions),
                sequence("Post-Closing Conditions", &conditions.post_closing_conditions),
                sequence("Monitoring Requirements", &conditions.monitoring_requirements),
            ],
        },
        PreviewSection {
            title: "Signatures & Approvals".into(),
            items: vec![
                PreviewItem::Signatory {
                    role: "Underwriter".into(),
                    name: signatures.underwriter_name.clone(),
                    signature: signatures.underwriter_signature.clone(),
                    date: Some(approval_date.clone()),
                },
                PreviewItem::Signatory {
                    role: "Manager".into(),
                    name: signatures.manager_name.clone(),
                    signature: signatures.manager_signature.clone(),
                    date: None,
                },
            ],
        },
    ];

    let mut footer = Vec::new();
    if options.include_footer {
        if let Some(at) = options.generated_at {
            footer.push(format!("Generated on {}", format_timestamp(at)));
        }
        footer.push("Standard Operating Procedure Document - Confidential".to_string());
    }

    debug!(loan_number = %loan.loan_number, "preview rendered");

    PreviewDocument {
        title: "Standard Operating Procedure".into(),
        subtitle: "Loan Documentation & Analysis Report".into(),
        header: DocumentHeader {
            loan_number: format!("Loan #{}", loan.loan_number),
            borrower_name: loan.borrower_name.clone(),
            property_address: loan.property_address.clone(),
            loan_amount: format_optional_currency(loan.loan_amount),
        },
        summary: DocumentSummary {
            decision: decision_badge,
            risk: risk_badge,
            approval_date,
        },
        sections,
        footer,
        actions: vec![
            PreviewAction::BackToForm,
            PreviewAction::Export,
            PreviewAction::Print,
        ],
    }
}

/// Non-fatal degradations the preview applies: unparseable dates shown as
/// "Invalid Date" and badge values outside the colour mapping.
pub fn preview_warnings(record: &LoanSopRecord) -> Vec<String> {
    let mut warnings = Vec::new();

    let dates = [
        ("Purchase Date", &record.property_information.purchase_date),
        ("Approval Date", &record.signatures.approval_date),
    ];
    for (label, raw) in dates {
        if parse_date(raw).is_none() {
            if raw.trim().is_empty() {
                warnings.push(format!("{label} is empty; rendered as Invalid Date."));
            } else {
                warnings.push(format!(
                    "{label} '{raw}' is not a recognised date; rendered as Invalid Date."
                ));
            }
        }
    }

    if let Some(rating) = &record.risk_assessment.risk_rating {
        if !rating.is_known() {
            warnings.push(format!(
                "Risk Rating '{rating}' has no badge colour; rendered neutral."
            ));
        }
    }
    if let Some(decision) = &record.underwriting_decision.decision {
        if !decision.is_known() {
            warnings.push(format!(
                "Decision '{decision}' has no badge colour; rendered neutral."
            ));
        }
    }

    warnings
}

// ---------------------------------------------------------------------------
// Plain-text rendering
// ---------------------------------------------------------------------------

impl fmt::Display for PreviewDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(72);
        writeln!(f, "{}", self.title.to_uppercase())?;
        writeln!(f, "{}", self.subtitle)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.header.loan_number)?;
        writeln!(f, "Borrower: {}", self.header.borrower_name)?;
        writeln!(f, "Property: {}", self.header.property_address)?;
        writeln!(f, "Amount:   {}", self.header.loan_amount)?;
        writeln!(f, "Decision: {}", self.summary.decision.label)?;
        writeln!(f, "Risk:     {}", self.summary.risk.label)?;
        writeln!(f, "Date:     {}", self.summary.approval_date)?;

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.title)?;
            writeln!(f, "{}", "-".repeat(section.title.len()))?;
            for item in &section.items {
                match item {
                    PreviewItem::Field { label, value } => writeln!(f, "{label}: {value}")?,
                    PreviewItem::Badge { label, badge } => {
                        writeln!(f, "{label}: [{}]", badge.label)?
                    }
                    PreviewItem::Paragraph { heading, text } => {
                        writeln!(f, "{heading}:")?;
                        for line in text.lines() {
                            writeln!(f, "  {line}")?;
                        }
                    }
                    PreviewItem::Signatory {
                        role,
                        name,
                        signature,
                        date,
                    } => {
                        writeln!(f, "{role}: {name}")?;
                        writeln!(f, "  Signature: {signature}")?;
                        if let Some(date) = date {
                            writeln!(f, "  Date: {date}")?;
                        }
                    }
                }
            }
        }

        if !self.footer.is_empty() {
            writeln!(f)?;
            writeln!(f, "{rule}")?;
            for line in &self.footer {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn field(label: &str, value: impl Into<String>) -> PreviewItem {
    PreviewItem::Field {
        label: label.to_string(),
        value: value.into(),
    }
}

fn paragraph(heading: &str, text: &str) -> PreviewItem {
    PreviewItem::Paragraph {
        heading: heading.to_string(),
        text: text.to_string(),
    }
}

fn sequence(heading: &str, entries: &[Value]) -> PreviewItem {
    PreviewItem::Paragraph {
        heading: heading.to_string(),
        text: sequence_text(entries),
    }
}

fn select_text<T: fmt::Display>(value: Option<&T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
