//! Tests for the coverage rule tables and matcher

use rust_decimal_macros::dec;

use domain_policy::{match_category, CopayRate, CoverageRules, PolicyContext, ServiceCategory};

// ============================================================================
// Category Matching Tests
// ============================================================================

mod category_matching_tests {
    use super::*;

    #[test]
    fn test_medical_categories_from_bill_descriptions() {
        let cases = [
            ("Paracetamol 500mg Tablet", ServiceCategory::Medication),
            ("Amoxicillin antibiotic course", ServiceCategory::Medication),
            ("Sterile gauze roll", ServiceCategory::Supply),
            ("Disposable syringe 5ml", ServiceCategory::Medication), // "ml" hits first
            ("Complete blood count", ServiceCategory::Diagnostic),
            ("MRI brain", ServiceCategory::Diagnostic),
            ("Appendectomy surgery", ServiceCategory::Procedure),
            ("Specialist consultation", ServiceCategory::Consultation),
        ];

        for (description, expected) in cases {
            assert_eq!(match_category(description), expected, "{description}");
        }
    }

    #[test]
    fn test_non_medical_categories_from_bill_descriptions() {
        let cases = [
            ("Bath soap", ServiceCategory::PersonalCare),
            ("Television charges", ServiceCategory::Entertainment),
            ("Skin whitening treatment", ServiceCategory::Cosmetic),
            ("Lunch tray", ServiceCategory::Comfort),
        ];

        for (description, expected) in cases {
            assert_eq!(match_category(description), expected, "{description}");
        }
    }

    #[test]
    fn test_non_medical_wins_over_medical() {
        // "Skin whitening treatment" also contains "treatment" (procedure);
        // the cosmetic table is checked first.
        assert_eq!(
            match_category("Skin whitening treatment"),
            ServiceCategory::Cosmetic
        );
    }

    #[test]
    fn test_unmatched_is_other() {
        assert_eq!(match_category("General ward rent"), ServiceCategory::Other);
        assert_eq!(match_category(""), ServiceCategory::Other);
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(ServiceCategory::PersonalCare.label(), "Personal care");
        assert_eq!(ServiceCategory::Comfort.label(), "Comfort/food");
        assert_eq!(ServiceCategory::ALL.len(), 10);
    }
}

// ============================================================================
// Rule Evaluation Tests
// ============================================================================

mod rule_evaluation_tests {
    use super::*;

    #[test]
    fn test_standard_rules_reject_each_non_medical_category() {
        let rules = CoverageRules::standard();

        for description in ["Soap bar", "WiFi access", "Botox session", "Coffee"] {
            let c = rules.evaluate(description);
            assert!(!c.ruling.is_covered(), "{description} should reject");
            assert!(c.ruling.reason().is_some());
        }
    }

    #[test]
    fn test_each_non_medical_category_has_distinct_reason() {
        let rules = CoverageRules::standard();
        let reasons: Vec<String> = ["Soap", "Television", "Cosmetic kit", "Tea"]
            .iter()
            .map(|d| rules.evaluate(d).ruling.reason().unwrap().to_string())
            .collect();

        let mut deduped = reasons.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), reasons.len());
    }

    #[test]
    fn test_policy_terms_extend_standard_rules() {
        let context = PolicyContext::new("Plan", CopayRate::new(dec!(20)).unwrap())
            .unwrap()
            .with_covered_services(vec!["ambulance".into()])
            .with_exclusions(vec!["dialysis".into()]);
        let rules = CoverageRules::from_policy(&context);

        assert!(rules.evaluate("Ambulance to hospital").ruling.is_covered());
        assert_eq!(
            rules.evaluate("Dialysis session").ruling.reason(),
            Some("Excluded service: dialysis")
        );
    }

    #[test]
    fn test_policy_exclusion_beats_policy_covered_service() {
        let context = PolicyContext::new("Plan", CopayRate::new(dec!(20)).unwrap())
            .unwrap()
            .with_covered_services(vec!["scan".into()])
            .with_exclusions(vec!["pet scan".into()]);
        let rules = CoverageRules::from_policy(&context);

        assert!(!rules.evaluate("PET scan whole body").ruling.is_covered());
        assert!(rules.evaluate("CT scan chest").ruling.is_covered());
    }

    #[test]
    fn test_standard_rules_are_value_comparable() {
        assert_eq!(CoverageRules::standard(), CoverageRules::default());
    }
}
