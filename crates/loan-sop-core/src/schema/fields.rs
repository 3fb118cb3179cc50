use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::enums::{Decision, LoanType, PaymentSchedule, PropertyType, RiskRating};
use super::record::LoanSopRecord;
use crate::{SopError, SopResult};

// ---------------------------------------------------------------------------
// Sections & controls
// ---------------------------------------------------------------------------

/// The ten named subdivisions of a [`LoanSopRecord`], in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    LoanInformation,
    PropertyInformation,
    MarketAnalysis,
    FinancialAnalysis,
    RiskAssessment,
    RegulatoryCompliance,
    UnderwritingDecision,
    LoanTerms,
    ApprovalConditions,
    Signatures,
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::LoanInformation,
        Section::PropertyInformation,
        Section::MarketAnalysis,
        Section::FinancialAnalysis,
        Section::RiskAssessment,
        Section::RegulatoryCompliance,
        Section::UnderwritingDecision,
        Section::LoanTerms,
        Section::ApprovalConditions,
        Section::Signatures,
    ];

    /// Path prefix used by field paths and JSON.
    pub fn key(self) -> &'static str {
        match self {
            Section::LoanInformation => "loanInformation",
            Section::PropertyInformation => "propertyInformation",
            Section::MarketAnalysis => "marketAnalysis",
            Section::FinancialAnalysis => "financialAnalysis",
            Section::RiskAssessment => "riskAssessment",
            Section::RegulatoryCompliance => "regulatoryCompliance",
            Section::UnderwritingDecision => "underwritingDecision",
            Section::LoanTerms => "loanTerms",
            Section::ApprovalConditions => "approvalConditions",
            Section::Signatures => "signatures",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::LoanInformation => "Loan Information",
            Section::PropertyInformation => "Property Information",
            Section::MarketAnalysis => "Market Analysis",
            Section::FinancialAnalysis => "Financial Analysis",
            Section::RiskAssessment => "Risk Assessment",
            Section::RegulatoryCompliance => "Regulatory Compliance",
            Section::UnderwritingDecision => "Underwriting Decision",
            Section::LoanTerms => "Loan Terms",
            Section::ApprovalConditions => "Approval Conditions",
            Section::Signatures => "Signatures",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Section {
    type Err = SopError;

    /// Accepts the path key (`loanTerms`) or the title (`Loan Terms`),
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Section::ALL
            .into_iter()
            .find(|sec| {
                sec.key().eq_ignore_ascii_case(wanted) || sec.title().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| SopError::InvalidInput {
                field: "section".into(),
                reason: format!("unknown section '{wanted}'"),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Number,
    Date,
}

/// The kind of control a field is edited with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Input(InputType),
    Select(&'static [&'static str]),
    TextArea,
}

impl Control {
    pub fn kind(&self) -> &'static str {
        match self {
            Control::Input(_) => "input",
            Control::Select(_) => "select",
            Control::TextArea => "textarea",
        }
    }
}

// ---------------------------------------------------------------------------
// Field specs
// ---------------------------------------------------------------------------

/// Registration of one leaf field: where it lives, how it is labelled and
/// edited, whether it is required, and how to read and write it.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub path: &'static str,
    pub label: &'static str,
    pub section: Section,
    pub control: Control,
    pub required: bool,
    pub placeholder: Option<&'static str>,
    /// Current value as the control would display it; empty when unset.
    pub get: fn(&LoanSopRecord) -> String,
    /// Parse a raw control value into the typed field.
    pub set: fn(&mut LoanSopRecord, &str) -> SopResult<()>,
}

impl FieldSpec {
    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    pub fn value(&self, record: &LoanSopRecord) -> String {
        (self.get)(record)
    }

    pub fn is_empty(&self, record: &LoanSopRecord) -> bool {
        self.value(record).trim().is_empty()
    }

    /// The select options, if this is a select field.
    pub fn options(&self) -> Option<&'static [&'static str]> {
        match self.control {
            Control::Select(options) => Some(options),
            _ => None,
        }
    }

    pub fn descriptor(&self) -> FieldDescriptor {
        FieldDescriptor {
            path: self.path.to_string(),
            label: self.label.to_string(),
            section: self.section,
            control: self.control.kind().to_string(),
            input_type: match self.control {
                Control::Input(t) => Some(t),
                _ => None,
            },
            options: self
                .options()
                .map(|o| o.iter().map(|s| s.to_string()).collect())
                .unwrap_or_default(),
            required: self.required,
            placeholder: self.placeholder.map(str::to_string),
        }
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("path", &self.path)
            .field("label", &self.label)
            .field("control", &self.control)
            .field("required", &self.required)
            .finish()
    }
}

/// Serialisable description of a [`FieldSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub path: String,
    pub label: String,
    pub section: Section,
    pub control: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    pub options: Vec<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

macro_rules! string_field {
    ($path:literal, $label:literal, $section:ident, $control:expr, $($f:ident).+) => {
        FieldSpec {
            path: $path,
            label: $label,
            section: Section::$section,
            control: $control,
            required: false,
            placeholder: None,
            get: |r| r.$($f).+.clone(),
            set: |r, raw| {
                r.$($f).+ = raw.to_string();
                Ok(())
            },
        }
    };
}

macro_rules! field {
    (text $path:literal, $label:literal, $section:ident, $($f:ident).+) => {
        string_field!($path, $label, $section, Control::Input(InputType::Text), $($f).+)
    };
    (date $path:literal, $label:literal, $section:ident, $($f:ident).+) => {
        string_field!($path, $label, $section, Control::Input(InputType::Date), $($f).+)
    };
    (textarea $path:literal, $label:literal, $section:ident, $($f:ident).+) => {
        string_field!($path, $label, $section, Control::TextArea, $($f).+)
    };
    (decimal $path:literal, $label:literal, $section:ident, $($f:ident).+) => {
        FieldSpec {
            path: $path,
            label: $label,
            section: Section::$section,
            control: Control::Input(InputType::Number),
            required: false,
            placeholder: None,
            get: |r| number_text(&r.$($f).+),
            set: |r, raw| {
                r.$($f).+ = parse_non_negative($path, raw)?;
                Ok(())
            },
        }
    };
    (number $path:literal, $label:literal, $section:ident, $($f:ident).+) => {
        FieldSpec {
            path: $path,
            label: $label,
            section: Section::$section,
            control: Control::Input(InputType::Number),
            required: false,
            placeholder: None,
            get: |r| number_text(&r.$($f).+),
            set: |r, raw| {
                r.$($f).+ = parse_number($path, raw)?;
                Ok(())
            },
        }
    };
    (select $ty:ident $path:literal, $label:literal, $section:ident, $($f:ident).+) => {
        FieldSpec {
            path: $path,
            label: $label,
            section: Section::$section,
            control: Control::Select($ty::OPTIONS),
            required: false,
            placeholder: None,
            get: |r| r.$($f).+.as_ref().map(|v| v.to_string()).unwrap_or_default(),
            set: |r, raw| {
                r.$($f).+ = parse_select::<$ty>($path, raw)?;
                Ok(())
            },
        }
    };
    (list $path:literal, $label:literal, $section:ident, $($f:ident).+) => {
        FieldSpec {
            path: $path,
            label: $label,
            section: Section::$section,
            control: Control::TextArea,
            required: false,
            placeholder: None,
            get: |r| sequence_text(&r.$($f).+),
            set: |r, raw| {
                r.$($f).+ = sequence_from_text(raw);
                Ok(())
            },
        }
    };
}

fn build_registry() -> Vec<FieldSpec> {
    vec![
        // Loan Information
        field!(text "loanInformation.loanNumber", "Loan Number", LoanInformation,
            loan_information.loan_number).required(),
        field!(text "loanInformation.borrowerName", "Borrower Name", LoanInformation,
            loan_information.borrower_name).required(),
        field!(text "loanInformation.propertyAddress", "Property Address", LoanInformation,
            loan_information.property_address).required(),
        field!(decimal "loanInformation.loanAmount", "Loan Amount", LoanInformation,
            loan_information.loan_amount).required(),
        field!(select LoanType "loanInformation.loanType", "Loan Type", LoanInformation,
            loan_information.loan_type).required(),
        // Property Information
        field!(select PropertyType "propertyInformation.propertyType", "Property Type",
            PropertyInformation, property_information.property_type).required(),
        field!(decimal "propertyInformation.estimatedValue", "Estimated Value", PropertyInformation,
            property_information.estimated_value).required(),
        field!(date "propertyInformation.purchaseDate", "Purchase Date", PropertyInformation,
            property_information.purchase_date).required(),
        field!(number "propertyInformation.squareFootage", "Square Footage", PropertyInformation,
            property_information.square_footage).required(),
        field!(number "propertyInformation.bedrooms", "Bedrooms", PropertyInformation,
            property_information.bedrooms),
        field!(number "propertyInformation.bathrooms", "Bathrooms", PropertyInformation,
            property_information.bathrooms),
        field!(number "propertyInformation.yearBuilt", "Year Built", PropertyInformation,
            property_information.year_built).required(),
        // Market Analysis
        field!(textarea "marketAnalysis.marketTrends", "Market Trends", MarketAnalysis,
            market_analysis.market_trends)
            .required()
            .placeholder("Describe current market conditions and trends..."),
        field!(textarea "marketAnalysis.neighborhoodAnalysis", "Neighborhood Analysis",
            MarketAnalysis, market_analysis.neighborhood_analysis)
            .required()
            .placeholder("Analyze the neighborhood characteristics..."),
        field!(list "marketAnalysis.comparableSales", "Comparable Sales", MarketAnalysis,
            market_analysis.comparable_sales)
            .placeholder("List comparable sales..."),
        // Financial Analysis
        field!(textarea "financialAnalysis.incomeVerification", "Income Verification",
            FinancialAnalysis, financial_analysis.income_verification)
            .required()
            .placeholder("Details about income verification..."),
        field!(textarea "financialAnalysis.creditAnalysis", "Credit Analysis", FinancialAnalysis,
            financial_analysis.credit_analysis)
            .required()
            .placeholder("Credit score and history analysis..."),
        field!(decimal "financialAnalysis.debtToIncomeRatio", "Debt-to-Income Ratio",
            FinancialAnalysis, financial_analysis.debt_to_income_ratio).required(),
        field!(textarea "financialAnalysis.cashFlowAnalysis", "Cash Flow Analysis",
            FinancialAnalysis, financial_analysis.cash_flow_analysis)
            .required()
            .placeholder("Cash flow projections and analysis..."),
        // Risk Assessment
        field!(list "riskAssessment.riskFactors", "Risk Factors", RiskAssessment,
            risk_assessment.risk_factors)
            .required()
            .placeholder("Identify and describe risk factors..."),
        field!(textarea "riskAssessment.mitigationStrategies", "Mitigation Strategies",
            RiskAssessment, risk_assessment.mitigation_strategies)
            .required()
            .placeholder("Describe risk mitigation strategies..."),
        field!(select RiskRating "riskAssessment.riskRating", "Risk Rating", RiskAssessment,
            risk_assessment.risk_rating).required(),
        // Regulatory Compliance
        field!(list "regulatoryCompliance.documentation", "Documentation", RegulatoryCompliance,
            regulatory_compliance.documentation)
            .placeholder("List supporting documentation..."),
        field!(list "regulatoryCompliance.complianceChecklist", "Compliance Checklist",
            RegulatoryCompliance, regulatory_compliance.compliance_checklist)
            .placeholder("List completed compliance checks..."),
        field!(textarea "regulatoryCompliance.regulatoryNotes", "Regulatory Notes",
            RegulatoryCompliance, regulatory_compliance.regulatory_notes)
            .required()
            .placeholder("Compliance notes and requirements..."),
        // Underwriting Decision
        field!(select Decision "underwritingDecision.decision", "Decision", UnderwritingDecision,
            underwriting_decision.decision).required(),
        field!(textarea "underwritingDecision.rationale", "Decision Rationale",
            UnderwritingDecision, underwriting_decision.rationale)
            .required()
            .placeholder("Provide detailed rationale for the decision..."),
        field!(list "underwritingDecision.conditions", "Decision Conditions",
            UnderwritingDecision, underwriting_decision.conditions)
            .placeholder("List any conditions attached to the decision..."),
        // Loan Terms
        field!(decimal "loanTerms.interestRate", "Interest Rate (%)", LoanTerms,
            loan_terms.interest_rate).required(),
        field!(number "loanTerms.loanTerm", "Loan Term (months)", LoanTerms,
            loan_terms.loan_term).required(),
        field!(select PaymentSchedule "loanTerms.paymentSchedule", "Payment Schedule", LoanTerms,
            loan_terms.payment_schedule).required(),
        field!(list "loanTerms.fees", "Fees", LoanTerms, loan_terms.fees)
            .placeholder("List origination and closing fees..."),
        // Approval Conditions
        field!(list "approvalConditions.preClosingConditions", "Pre-Closing Conditions",
            ApprovalConditions, approval_conditions.pre_closing_conditions)
            .placeholder("List all pre-closing conditions..."),
        field!(list "approvalConditions.postClosingConditions", "Post-Closing Conditions",
            ApprovalConditions, approval_conditions.post_closing_conditions)
            .placeholder("List all post-closing conditions..."),
        field!(list "approvalConditions.monitoringRequirements", "Monitoring Requirements",
            ApprovalConditions, approval_conditions.monitoring_requirements)
            .placeholder("Ongoing monitoring requirements..."),
        // Signatures
        field!(text "signatures.underwriterName", "Underwriter Name", Signatures,
            signatures.underwriter_name).required(),
        field!(text "signatures.underwriterSignature", "Underwriter Signature", Signatures,
            signatures.underwriter_signature).required(),
        field!(date "signatures.approvalDate", "Approval Date", Signatures,
            signatures.approval_date).required(),
        field!(text "signatures.managerName", "Manager Name", Signatures,
            signatures.manager_name).required(),
        field!(text "signatures.managerSignature", "Manager Signature", Signatures,
            signatures.manager_signature).required(),
    ]
}

/// Every registered field, grouped by section in form order.
pub fn field_specs() -> &'static [FieldSpec] {
    static REGISTRY: OnceLock<Vec<FieldSpec>> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

pub fn find_field(path: &str) -> SopResult<&'static FieldSpec> {
    field_specs()
        .iter()
        .find(|f| f.path == path)
        .ok_or_else(|| SopError::UnknownField(path.to_string()))
}

pub fn fields_in(section: Section) -> impl Iterator<Item = &'static FieldSpec> {
    field_specs().iter().filter(move |f| f.section == section)
}

pub fn get_field(record: &LoanSopRecord, path: &str) -> SopResult<String> {
    Ok(find_field(path)?.value(record))
}

/// Write a raw control value into the record. On error the record is left
/// untouched.
pub fn set_field(record: &mut LoanSopRecord, path: &str, raw: &str) -> SopResult<()> {
    let spec = find_field(path)?;
    (spec.set)(record, raw)?;
    debug!(field = path, "field updated");
    Ok(())
}

// ---------------------------------------------------------------------------
// Value conversions
// ---------------------------------------------------------------------------

fn number_text<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

fn parse_number<T>(path: &str, raw: &str) -> SopResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|e| SopError::InvalidInput {
            field: path.to_string(),
            reason: format!("'{trimmed}' is not a valid number ({e})"),
        })
}

fn parse_non_negative(path: &str, raw: &str) -> SopResult<Option<Decimal>> {
    let value: Option<Decimal> = parse_number(path, raw)?;
    if let Some(v) = value {
        if v.is_sign_negative() && !v.is_zero() {
            return Err(SopError::InvalidInput {
                field: path.to_string(),
                reason: "must not be negative".into(),
            });
        }
    }
    Ok(value)
}

fn parse_select<T>(path: &str, raw: &str) -> SopResult<Option<T>>
where
    T: From<String>,
{
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let options = find_field(path)?.options().unwrap_or_default();
    if !options.contains(&raw) {
        return Err(SopError::InvalidInput {
            field: path.to_string(),
            reason: format!("'{raw}' is not one of: {}", options.join(", ")),
        });
    }
    Ok(Some(T::from(raw.to_string())))
}

/// Text of one opaque sequence entry: strings verbatim, anything else as
/// compact JSON.
pub fn entry_text(entry: &Value) -> String {
    match entry {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A sequence as free text, one entry per line.
pub fn sequence_text(entries: &[Value]) -> String {
    entries.iter().map(entry_text).collect::<Vec<_>>().join("\n")
}

/// Free text from a textarea becomes a single opaque entry; blank text
/// clears the sequence.
pub fn sequence_from_text(raw: &str) -> Vec<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![Value::String(trimmed.to_string())]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    #[test]
    fn test_registry_covers_every_section() {
        for section in Section::ALL {
            assert!(
                fields_in(section).count() > 0,
                "section {section} has no fields"
            );
        }
        assert_eq!(field_specs().len(), 40);
    }

    #[test]
    fn test_paths_are_unique_and_prefixed_by_section() {
        let mut seen = HashSet::new();
        for f in field_specs() {
            assert!(seen.insert(f.path), "duplicate path {}", f.path);
            assert!(
                f.path.starts_with(&format!("{}.", f.section.key())),
                "{} not under {}",
                f.path,
                f.section.key()
            );
        }
    }

    #[test]
    fn test_registry_paths_match_json_shape() {
        let json = serde_json::to_value(LoanSopRecord::default()).unwrap();
        for f in field_specs() {
            let (section, field) = f.path.split_once('.').unwrap();
            assert!(
                json[section].get(field).is_some(),
                "{} missing from serialised record",
                f.path
            );
        }
    }

    #[test]
    fn test_set_and_get_text_field() {
        let mut r = LoanSopRecord::default();
        set_field(&mut r, "loanInformation.borrowerName", "Jane Doe").unwrap();
        assert_eq!(r.loan_information.borrower_name, "Jane Doe");
        assert_eq!(get_field(&r, "loanInformation.borrowerName").unwrap(), "Jane Doe");
    }

    #[test]
    fn test_set_money_field() {
        let mut r = LoanSopRecord::default();
        set_field(&mut r, "loanInformation.loanAmount", " 350000 ").unwrap();
        assert_eq!(r.loan_information.loan_amount, Some(dec!(350000)));
        set_field(&mut r, "loanInformation.loanAmount", "").unwrap();
        assert_eq!(r.loan_information.loan_amount, None);
    }

    #[test]
    fn test_negative_loan_amount_rejected() {
        let mut r = LoanSopRecord::default();
        let err = set_field(&mut r, "loanInformation.loanAmount", "-5").unwrap_err();
        match err {
            SopError::InvalidInput { field, .. } => assert_eq!(field, "loanInformation.loanAmount"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
        assert!(r.loan_information.loan_amount.is_none());
    }

    #[test]
    fn test_unparsable_number_rejected() {
        let mut r = LoanSopRecord::default();
        assert!(set_field(&mut r, "propertyInformation.bedrooms", "three").is_err());
        assert!(set_field(&mut r, "propertyInformation.bedrooms", "2.5").is_err());
        set_field(&mut r, "propertyInformation.bedrooms", "3").unwrap();
        assert_eq!(r.property_information.bedrooms, Some(3));
    }

    #[test]
    fn test_select_accepts_only_options() {
        let mut r = LoanSopRecord::default();
        set_field(&mut r, "riskAssessment.riskRating", "Very High").unwrap();
        assert_eq!(r.risk_assessment.risk_rating, Some(RiskRating::VeryHigh));

        let err = set_field(&mut r, "riskAssessment.riskRating", "Extreme").unwrap_err();
        assert!(matches!(err, SopError::InvalidInput { .. }));
        // Rejected edits leave the previous value in place.
        assert_eq!(r.risk_assessment.risk_rating, Some(RiskRating::VeryHigh));

        set_field(&mut r, "riskAssessment.riskRating", "").unwrap();
        assert_eq!(r.risk_assessment.risk_rating, None);
    }

    #[test]
    fn test_sequence_field_round_trips_as_text() {
        let mut r = LoanSopRecord::default();
        set_field(&mut r, "riskAssessment.riskFactors", "  Thin credit file  ").unwrap();
        assert_eq!(
            r.risk_assessment.risk_factors,
            vec![Value::String("Thin credit file".into())]
        );
        assert_eq!(get_field(&r, "riskAssessment.riskFactors").unwrap(), "Thin credit file");

        set_field(&mut r, "riskAssessment.riskFactors", "   ").unwrap();
        assert!(r.risk_assessment.risk_factors.is_empty());
    }

    #[test]
    fn test_opaque_entries_render_as_json_lines() {
        let entries = vec![
            Value::String("Comp A".into()),
            serde_json::json!({ "price": 300000 }),
        ];
        assert_eq!(sequence_text(&entries), "Comp A\n{\"price\":300000}");
    }

    #[test]
    fn test_unknown_path_rejected() {
        let mut r = LoanSopRecord::default();
        let err = set_field(&mut r, "loanInformation.nope", "x").unwrap_err();
        assert!(matches!(err, SopError::UnknownField(p) if p == "loanInformation.nope"));
    }

    #[test]
    fn test_section_parses_key_or_title() {
        assert_eq!("loanTerms".parse::<Section>().unwrap(), Section::LoanTerms);
        assert_eq!("risk assessment".parse::<Section>().unwrap(), Section::RiskAssessment);
        assert!("nonsense".parse::<Section>().is_err());
    }

    #[test]
    fn test_descriptor_lists_select_options() {
        let d = find_field("loanTerms.paymentSchedule").unwrap().descriptor();
        assert_eq!(d.control, "select");
        assert_eq!(d.options, vec!["Monthly", "Bi-weekly", "Weekly"]);
        assert!(d.required);
        assert!(d.input_type.is_none());
    }
}
