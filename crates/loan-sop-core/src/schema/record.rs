use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{Decision, LoanType, PaymentSchedule, PropertyType, RiskRating};
use super::lenient::{optional_number, optional_select};
use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One loan's complete SOP documentation.
///
/// `Default` is the empty form: every text field blank, every number and
/// selection unset, every sequence empty. A record never exists in a
/// partially constructed state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LoanSopRecord {
    pub loan_information: LoanInformation,
    pub property_information: PropertyInformation,
    pub market_analysis: MarketAnalysis,
    pub financial_analysis: FinancialAnalysis,
    pub risk_assessment: RiskAssessment,
    pub regulatory_compliance: RegulatoryCompliance,
    pub underwriting_decision: UnderwritingDecision,
    pub loan_terms: LoanTerms,
    pub approval_conditions: ApprovalConditions,
    pub signatures: Signatures,
}

impl LoanSopRecord {
    /// A fresh, empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> crate::SopResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LoanInformation {
    pub loan_number: String,
    pub borrower_name: String,
    pub property_address: String,
    #[serde(with = "optional_number")]
    pub loan_amount: Option<Money>,
    #[serde(with = "optional_select")]
    pub loan_type: Option<LoanType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PropertyInformation {
    #[serde(with = "optional_select")]
    pub property_type: Option<PropertyType>,
    #[serde(with = "optional_number")]
    pub estimated_value: Option<Money>,
    /// As entered, normally `YYYY-MM-DD`. Interpreted only when rendered.
    pub purchase_date: String,
    #[serde(with = "optional_number")]
    pub square_footage: Option<u32>,
    #[serde(with = "optional_number")]
    pub bedrooms: Option<u32>,
    #[serde(with = "optional_number")]
    pub bathrooms: Option<u32>,
    #[serde(with = "optional_number")]
    pub year_built: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub comparable_sales: Vec<Value>,
    pub market_trends: String,
    pub neighborhood_analysis: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct FinancialAnalysis {
    pub income_verification: String,
    pub credit_analysis: String,
    #[serde(with = "optional_number")]
    pub debt_to_income_ratio: Option<Percent>,
    pub cash_flow_analysis: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_factors: Vec<Value>,
    pub mitigation_strategies: String,
    #[serde(with = "optional_select")]
    pub risk_rating: Option<RiskRating>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct RegulatoryCompliance {
    pub documentation: Vec<Value>,
    pub compliance_checklist: Vec<Value>,
    pub regulatory_notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct UnderwritingDecision {
    #[serde(with = "optional_select")]
    pub decision: Option<Decision>,
    pub conditions: Vec<Value>,
    pub rationale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LoanTerms {
    #[serde(with = "optional_number")]
    pub interest_rate: Option<Percent>,
    /// Months.
    #[serde(with = "optional_number")]
    pub loan_term: Option<u32>,
    #[serde(with = "optional_select")]
    pub payment_schedule: Option<PaymentSchedule>,
    pub fees: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ApprovalConditions {
    pub pre_closing_conditions: Vec<Value>,
    pub post_closing_conditions: Vec<Value>,
    pub monitoring_requirements: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Signatures {
    pub underwriter_name: String,
    pub underwriter_signature: String,
    /// As entered, normally `YYYY-MM-DD`.
    pub approval_date: String,
    pub manager_name: String,
    pub manager_signature: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
