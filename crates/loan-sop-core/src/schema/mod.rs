//! The loan SOP record, its enum domains and the field registry.

pub mod enums;
pub mod fields;
pub mod lenient;
pub mod record;

pub use enums::{Decision, LoanType, PaymentSchedule, PropertyType, RiskRating};
pub use fields::{
    entry_text, field_specs, fields_in, find_field, get_field, sequence_text, set_field, Control,
    FieldDescriptor, FieldSpec, InputType, Section,
};
pub use record::{
    ApprovalConditions, FinancialAnalysis, LoanInformation, LoanSopRecord, LoanTerms,
    MarketAnalysis, PropertyInformation, RegulatoryCompliance, RiskAssessment, Signatures,
    UnderwritingDecision,
};
