//! End-to-end tests for the extraction boundary
//!
//! Drives raw extraction-service output through validation into a claim
//! and on through review overrides, the path a real session takes.

use rust_decimal_macros::dec;

use domain_claims::ClaimError;
use interface_extract::{ExtractedClaimRecord, ExtractionError};
use test_utils::{assert_conservation, assert_err_variant, assert_ok};

const FENCED_PAYLOAD: &str = r#"```json
{
    "policy_name": "Gold Health Plan",
    "copay_percentage": 20,
    "client_name": "R. Iyer",
    "policy_number": "GHP-2209",
    "client_address": "14 Lake Road, Pune",
    "exclusions": ["physiotherapy"],
    "bill_items": [
        {"description": "Paracetamol 500mg Tablet", "cost": 100},
        {"description": "Soap", "cost": 50},
        {"description": "Physiotherapy session", "cost": 400},
        {"description": "Blood test", "cost": 250, "quantity": 2}
    ]
}
```"#;

#[test]
fn test_fenced_payload_to_calculated_claim() {
    let record = assert_ok!(ExtractedClaimRecord::from_payload(FENCED_PAYLOAD));
    let claim = assert_ok!(record.into_claim());

    assert_eq!(claim.item_count(), 4);
    assert_eq!(claim.policy().client().policy_number.as_deref(), Some("GHP-2209"));

    // Soap is non-medical, physiotherapy is a policy exclusion.
    let result = claim.recalculate();
    assert_eq!(result.total_billed().amount(), dec!(800));
    assert_eq!(result.total_covered().amount(), dec!(350));
    assert_eq!(result.total_rejected().amount(), dec!(450));
    assert_eq!(result.approved_amount().amount(), dec!(280.00));
    assert_eq!(result.patient_responsibility().amount(), dec!(520.00));
    assert_conservation(&result);
}

#[test]
fn test_overrides_after_extraction_stay_consistent() {
    let mut claim = ExtractedClaimRecord::from_payload(FENCED_PAYLOAD)
        .unwrap()
        .into_claim()
        .unwrap();

    // Reviewer covers the physiotherapy line and drops the soap.
    let soap_index = claim
        .items()
        .iter()
        .position(|i| i.description() == "Soap")
        .unwrap();
    claim.remove_item(soap_index).unwrap();

    let physio_index = claim
        .items()
        .iter()
        .position(|i| i.description() == "Physiotherapy session")
        .unwrap();
    let mut physio = claim.items()[physio_index].clone();
    physio.mark_covered();
    let result = claim.replace_item(physio_index, physio).unwrap();

    assert_eq!(result.total_billed().amount(), dec!(750));
    assert_eq!(result.total_covered().amount(), dec!(750));
    assert_eq!(result.approved_amount().amount(), dec!(600.00));
    assert_conservation(&result);

    // Totals always equal a fresh aggregation of the current items.
    assert_eq!(result, claim.recalculate());
}

#[test]
fn test_invalid_records_never_reach_the_engine() {
    let no_copay = r#"{"policy_name": "Plan", "bill_items": []}"#;
    let record = ExtractedClaimRecord::from_payload(no_copay).unwrap();
    assert_err_variant!(record.into_claim(), ExtractionError::MissingField { .. });

    let bad_copay = r#"{"policy_name": "Plan", "copay_percentage": 150, "bill_items": []}"#;
    let record = ExtractedClaimRecord::from_payload(bad_copay).unwrap();
    assert_err_variant!(
        record.into_claim(),
        ExtractionError::InvalidField {
            field: "copay_percentage",
            ..
        }
    );

    let bad_item =
        r#"{"policy_name": "Plan", "copay_percentage": 10, "bill_items": [{"description": "Syringe", "cost": -1}]}"#;
    let record = ExtractedClaimRecord::from_payload(bad_item).unwrap();
    let err = record.into_claim().unwrap_err();
    match err {
        ExtractionError::InvalidItem { index, source } => {
            assert_eq!(index, 0);
            assert!(matches!(source, ClaimError::InvalidItemData { .. }));
        }
        other => panic!("Expected InvalidItem, got {other:?}"),
    }
}
