//! Policy context for claim calculation
//!
//! A `PolicyContext` is the slice of an insurance policy a claim needs:
//! the policy name, the copay rate, optional client details, and any
//! coverage terms the extraction service read out of the policy document.
//! It is built once per claim session and owned by the claim aggregate.

use serde::{Deserialize, Serialize};

use crate::copay::CopayRate;
use crate::error::PolicyError;

/// Optional client fields carried for display and export
///
/// Replaced as a whole value on edit, mirroring the whole-record rule for
/// bill items, so partially updated client blocks cannot occur.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDetails {
    pub name: Option<String>,
    pub policy_number: Option<String>,
    pub address: Option<String>,
}

impl ClientDetails {
    /// Returns true when no client field is present
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.policy_number.is_none() && self.address.is_none()
    }
}

/// The policy facts a claim is calculated against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyContext {
    policy_name: String,
    copay: CopayRate,
    #[serde(default)]
    client: ClientDetails,
    #[serde(default)]
    covered_services: Vec<String>,
    #[serde(default)]
    exclusions: Vec<String>,
}

impl PolicyContext {
    /// Creates a policy context
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::MissingRequiredField` when the policy name is
    /// blank after trimming.
    pub fn new(policy_name: impl Into<String>, copay: CopayRate) -> Result<Self, PolicyError> {
        let policy_name = policy_name.into().trim().to_string();
        if policy_name.is_empty() {
            return Err(PolicyError::missing_field("policy_name"));
        }
        Ok(Self {
            policy_name,
            copay,
            client: ClientDetails::default(),
            covered_services: Vec::new(),
            exclusions: Vec::new(),
        })
    }

    /// Attaches client details
    pub fn with_client_details(mut self, client: ClientDetails) -> Self {
        self.client = client;
        self
    }

    /// Attaches services the policy document explicitly covers
    pub fn with_covered_services(mut self, services: Vec<String>) -> Self {
        self.covered_services = normalize_terms(services);
        self
    }

    /// Attaches services the policy document explicitly excludes
    pub fn with_exclusions(mut self, exclusions: Vec<String>) -> Self {
        self.exclusions = normalize_terms(exclusions);
        self
    }

    pub fn policy_name(&self) -> &str {
        &self.policy_name
    }

    pub fn copay(&self) -> CopayRate {
        self.copay
    }

    pub fn client(&self) -> &ClientDetails {
        &self.client
    }

    /// Policy-specific covered-service terms, normalized lowercase
    pub fn covered_services(&self) -> &[String] {
        &self.covered_services
    }

    /// Policy-specific exclusion terms, normalized lowercase
    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    /// Renames the policy
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::MissingRequiredField` when the new name is blank.
    pub fn rename(&mut self, policy_name: impl Into<String>) -> Result<(), PolicyError> {
        let policy_name = policy_name.into().trim().to_string();
        if policy_name.is_empty() {
            return Err(PolicyError::missing_field("policy_name"));
        }
        self.policy_name = policy_name;
        Ok(())
    }

    /// Sets the copay rate
    pub fn set_copay(&mut self, copay: CopayRate) {
        self.copay = copay;
    }

    /// Replaces the client details as a whole value
    pub fn set_client_details(&mut self, client: ClientDetails) {
        self.client = client;
    }
}

/// Lowercases and trims rule terms, dropping blanks, so matching against
/// item descriptions is deterministic.
fn normalize_terms(terms: Vec<String>) -> Vec<String> {
    terms
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
