use loan_sop_core::preview::{
    preview_warnings, render_preview, BadgeColor, PreviewItem, RenderOptions,
};
use loan_sop_core::schema::{Decision, LoanType, PaymentSchedule, PropertyType, RiskRating};
use loan_sop_core::LoanSopRecord;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn underwritten_loan() -> LoanSopRecord {
    let mut r = LoanSopRecord::default();

    let loan = &mut r.loan_information;
    loan.loan_number = "LN-2024-0417".into();
    loan.borrower_name = "Maria Alvarez".into();
    loan.property_address = "48 Orchard Lane, Springfield".into();
    loan.loan_amount = Some(dec!(350000));
    loan.loan_type = Some(LoanType::Fha);

    let property = &mut r.property_information;
    property.property_type = Some(PropertyType::SingleFamily);
    property.estimated_value = Some(dec!(412500.5));
    property.purchase_date = "2019-07-22".into();
    property.square_footage = Some(2140);
    property.bedrooms = Some(4);
    property.bathrooms = Some(2);
    property.year_built = Some(1987);

    r.financial_analysis.debt_to_income_ratio = Some(dec!(38.2));
    r.risk_assessment.risk_rating = Some(RiskRating::Medium);
    r.underwriting_decision.decision = Some(Decision::Approved);
    r.loan_terms.interest_rate = Some(dec!(6.125));
    r.loan_terms.loan_term = Some(360);
    r.loan_terms.payment_schedule = Some(PaymentSchedule::Monthly);
    r.signatures.underwriter_name = "Sam Okafor".into();
    r.signatures.underwriter_signature = "S. Okafor".into();
    r.signatures.approval_date = "2024-05-09".into();
    r.signatures.manager_name = "Lee Chen".into();
    r.signatures.manager_signature = "L. Chen".into();
    r
}

// ===========================================================================
// Formatting
// ===========================================================================

#[test]
fn test_loan_amount_and_type() {
    let doc = render_preview(&underwritten_loan(), &RenderOptions::default());
    assert_eq!(doc.value_of("Loan Amount"), Some("$350,000.00"));
    assert_eq!(doc.value_of("Loan Type"), Some("FHA"));
}

#[test]
fn test_property_section() {
    let doc = render_preview(&underwritten_loan(), &RenderOptions::default());
    let section = doc.section("Property Information").unwrap();
    let values: Vec<(&str, &str)> = section
        .items
        .iter()
        .filter_map(|item| match item {
            PreviewItem::Field { label, value } => Some((label.as_str(), value.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(
        values,
        vec![
            ("Property Type", "Single Family"),
            ("Estimated Value", "$412,500.50"),
            ("Purchase Date", "July 22, 2019"),
            ("Square Footage", "2140 sq ft"),
            ("Bedrooms", "4"),
            ("Bathrooms", "2"),
            ("Year Built", "1987"),
        ]
    );
}

#[test]
fn test_terms_and_ratios() {
    let doc = render_preview(&underwritten_loan(), &RenderOptions::default());
    assert_eq!(doc.value_of("Debt-to-Income Ratio"), Some("38.2%"));
    assert_eq!(doc.value_of("Interest Rate"), Some("6.125%"));
    assert_eq!(doc.value_of("Loan Term"), Some("360 months"));
    assert_eq!(doc.value_of("Payment Schedule"), Some("Monthly"));
}

#[test]
fn test_signatures_carry_approval_date() {
    let doc = render_preview(&underwritten_loan(), &RenderOptions::default());
    let section = doc.section("Signatures & Approvals").unwrap();
    match &section.items[0] {
        PreviewItem::Signatory {
            role,
            name,
            signature,
            date,
        } => {
            assert_eq!(role, "Underwriter");
            assert_eq!(name, "Sam Okafor");
            assert_eq!(signature, "S. Okafor");
            assert_eq!(date.as_deref(), Some("May 9, 2024"));
        }
        other => panic!("Expected signatory, got {other:?}"),
    }
}

#[test]
fn test_invalid_date_degrades_silently() {
    let mut r = underwritten_loan();
    r.property_information.purchase_date = "07/22/2019".into();
    let doc = render_preview(&r, &RenderOptions::default());
    assert_eq!(doc.value_of("Purchase Date"), Some("Invalid Date"));
    assert_eq!(preview_warnings(&r).len(), 1);
}

// ===========================================================================
// Badges
// ===========================================================================

#[test]
fn test_badges_only_use_mapped_colours() {
    let ratings = [
        Some(RiskRating::Low),
        Some(RiskRating::Medium),
        Some(RiskRating::High),
        Some(RiskRating::VeryHigh),
        Some(RiskRating::Other("Severe".into())),
        None,
    ];
    let decisions = [
        Some(Decision::Approved),
        Some(Decision::Denied),
        Some(Decision::Conditional),
        Some(Decision::CounterOffer),
        Some(Decision::Other("Suspended".into())),
        None,
    ];
    let allowed = [
        BadgeColor::Green,
        BadgeColor::Yellow,
        BadgeColor::Orange,
        BadgeColor::Red,
        BadgeColor::Blue,
        BadgeColor::Neutral,
    ];

    for rating in &ratings {
        for decision in &decisions {
            let mut r = underwritten_loan();
            r.risk_assessment.risk_rating = rating.clone();
            r.underwriting_decision.decision = decision.clone();
            let doc = render_preview(&r, &RenderOptions::default());
            for color in doc.badge_colors() {
                assert!(allowed.contains(&color));
            }
        }
    }
}

#[test]
fn test_very_high_risk_and_counter_offer() {
    let mut r = underwritten_loan();
    r.risk_assessment.risk_rating = Some(RiskRating::VeryHigh);
    r.underwriting_decision.decision = Some(Decision::CounterOffer);
    let doc = render_preview(&r, &RenderOptions::default());

    assert_eq!(doc.summary.risk.label, "Very High Risk");
    assert_eq!(doc.summary.risk.color, BadgeColor::Red);
    assert_eq!(doc.summary.risk.class_name, "bg-red-100 text-red-800");
    assert_eq!(doc.summary.decision.label, "Counter Offer");
    assert_eq!(doc.summary.decision.color, BadgeColor::Blue);
}

#[test]
fn test_unmapped_values_render_neutral() {
    let json = r#"{
        "riskAssessment": { "riskRating": "Catastrophic" },
        "underwritingDecision": { "decision": "On Hold" }
    }"#;
    let r = LoanSopRecord::from_json(json).unwrap();
    let doc = render_preview(&r, &RenderOptions::default());
    assert_eq!(doc.summary.risk.color, BadgeColor::Neutral);
    assert_eq!(doc.summary.risk.label, "Catastrophic Risk");
    assert_eq!(doc.summary.decision.color, BadgeColor::Neutral);
    assert_eq!(doc.summary.decision.label, "On Hold");
}

// ===========================================================================
// Purity
// ===========================================================================

#[test]
fn test_same_snapshot_renders_identically() {
    let r = underwritten_loan();
    let opts = RenderOptions::default();
    let first = serde_json::to_string(&render_preview(&r, &opts)).unwrap();
    let second = serde_json::to_string(&render_preview(&r, &opts)).unwrap();
    assert_eq!(first, second);
}
