//! Unit tests for the Identifiers module
//!
//! Covers identifier creation, parsing, conversion, and display formatting.

use core_kernel::{ClaimId, DocumentId};
use uuid::Uuid;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ClaimId::new();
        let id2 = ClaimId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_generates_time_ordered_ids() {
        let id1 = ClaimId::new();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ClaimId::new();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_new_random_generates_unique_ids() {
        assert_ne!(ClaimId::new_random(), ClaimId::new_random());
    }

    #[test]
    fn test_prefix_and_display() {
        assert_eq!(ClaimId::prefix(), "CLM");
        assert!(ClaimId::new().to_string().starts_with("CLM-"));
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = ClaimId::new();
        let parsed: ClaimId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: ClaimId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("CLM-not-a-uuid".parse::<ClaimId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ClaimId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let back: ClaimId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}

mod document_id_tests {
    use super::*;

    #[test]
    fn test_prefix_and_display() {
        assert_eq!(DocumentId::prefix(), "DOC");
        assert!(DocumentId::new().to_string().starts_with("DOC-"));
    }

    #[test]
    fn test_uuid_conversion_round_trip() {
        let uuid = Uuid::new_v4();
        let id = DocumentId::from(uuid);
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
    }

    #[test]
    fn test_default_is_fresh() {
        assert_ne!(DocumentId::default(), DocumentId::default());
    }
}
