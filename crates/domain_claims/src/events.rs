//! Domain events for the claim aggregate
//!
//! Events capture each revision a reviewer makes to a claim so the
//! session history can be audited or fed to downstream consumers. They
//! never participate in calculation results.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;

/// Domain events emitted by the Claim aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClaimEvent {
    /// Claim created from classified bill items
    ClaimOpened {
        claim_id: ClaimId,
        item_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// An item was appended to the bill
    ItemAdded {
        claim_id: ClaimId,
        index: usize,
        description: String,
        cost: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// An item was removed from the bill
    ItemRemoved {
        claim_id: ClaimId,
        index: usize,
        description: String,
        timestamp: DateTime<Utc>,
    },

    /// An item was replaced in place
    ItemReplaced {
        claim_id: ClaimId,
        index: usize,
        description: String,
        timestamp: DateTime<Utc>,
    },

    /// The copay rate was changed
    CopayChanged {
        claim_id: ClaimId,
        previous: Decimal,
        current: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// The policy name was corrected
    PolicyRenamed {
        claim_id: ClaimId,
        previous: String,
        current: String,
        timestamp: DateTime<Utc>,
    },

    /// The client details block was replaced
    ClientDetailsUpdated {
        claim_id: ClaimId,
        timestamp: DateTime<Utc>,
    },

    /// Every item was overridden to covered
    AllItemsCovered {
        claim_id: ClaimId,
        item_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// Every item was overridden to rejected
    AllItemsRejected {
        claim_id: ClaimId,
        item_count: usize,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// Coverage rules were re-run over the items
    ItemsReclassified {
        claim_id: ClaimId,
        changed: usize,
        timestamp: DateTime<Utc>,
    },
}

impl ClaimEvent {
    /// Returns the claim ID associated with this event
    pub fn claim_id(&self) -> ClaimId {
        match self {
            ClaimEvent::ClaimOpened { claim_id, .. } => *claim_id,
            ClaimEvent::ItemAdded { claim_id, .. } => *claim_id,
            ClaimEvent::ItemRemoved { claim_id, .. } => *claim_id,
            ClaimEvent::ItemReplaced { claim_id, .. } => *claim_id,
            ClaimEvent::CopayChanged { claim_id, .. } => *claim_id,
            ClaimEvent::PolicyRenamed { claim_id, .. } => *claim_id,
            ClaimEvent::ClientDetailsUpdated { claim_id, .. } => *claim_id,
            ClaimEvent::AllItemsCovered { claim_id, .. } => *claim_id,
            ClaimEvent::AllItemsRejected { claim_id, .. } => *claim_id,
            ClaimEvent::ItemsReclassified { claim_id, .. } => *claim_id,
        }
    }

    /// Returns the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ClaimEvent::ClaimOpened { timestamp, .. } => *timestamp,
            ClaimEvent::ItemAdded { timestamp, .. } => *timestamp,
            ClaimEvent::ItemRemoved { timestamp, .. } => *timestamp,
            ClaimEvent::ItemReplaced { timestamp, .. } => *timestamp,
            ClaimEvent::CopayChanged { timestamp, .. } => *timestamp,
            ClaimEvent::PolicyRenamed { timestamp, .. } => *timestamp,
            ClaimEvent::ClientDetailsUpdated { timestamp, .. } => *timestamp,
            ClaimEvent::AllItemsCovered { timestamp, .. } => *timestamp,
            ClaimEvent::AllItemsRejected { timestamp, .. } => *timestamp,
            ClaimEvent::ItemsReclassified { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ClaimEvent::ClaimOpened { .. } => "ClaimOpened",
            ClaimEvent::ItemAdded { .. } => "ItemAdded",
            ClaimEvent::ItemRemoved { .. } => "ItemRemoved",
            ClaimEvent::ItemReplaced { .. } => "ItemReplaced",
            ClaimEvent::CopayChanged { .. } => "CopayChanged",
            ClaimEvent::PolicyRenamed { .. } => "PolicyRenamed",
            ClaimEvent::ClientDetailsUpdated { .. } => "ClientDetailsUpdated",
            ClaimEvent::AllItemsCovered { .. } => "AllItemsCovered",
            ClaimEvent::AllItemsRejected { .. } => "AllItemsRejected",
            ClaimEvent::ItemsReclassified { .. } => "ItemsReclassified",
        }
    }
}
