//! Coverage determination rules
//!
//! Line items are classified into an explicit category enumeration by a
//! deterministic keyword matcher, and a fixed category-to-ruling table
//! decides coverage. Non-medical categories are checked before medical
//! ones, so an ambiguous description rejects rather than approves.
//! Policy-specific terms extracted from the policy document (exclusions
//! and covered services) extend the built-in tables per claim.
//!
//! Keyword matching is case-insensitive substring matching against the
//! item description. Tables are scanned in declaration order; the first
//! hit wins. Descriptions that match nothing fall into `Other`, which is
//! covered by default.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::context::PolicyContext;

/// Service category of a billed line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Medication,
    Supply,
    Diagnostic,
    Procedure,
    Consultation,
    PersonalCare,
    Entertainment,
    Cosmetic,
    Comfort,
    Other,
}

impl ServiceCategory {
    /// All categories, in report ordering
    pub const ALL: [ServiceCategory; 10] = [
        ServiceCategory::Medication,
        ServiceCategory::Supply,
        ServiceCategory::Diagnostic,
        ServiceCategory::Procedure,
        ServiceCategory::Consultation,
        ServiceCategory::PersonalCare,
        ServiceCategory::Entertainment,
        ServiceCategory::Cosmetic,
        ServiceCategory::Comfort,
        ServiceCategory::Other,
    ];

    /// Human-readable label for tables and export
    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::Medication => "Medication",
            ServiceCategory::Supply => "Medical supply",
            ServiceCategory::Diagnostic => "Diagnostic test",
            ServiceCategory::Procedure => "Procedure",
            ServiceCategory::Consultation => "Consultation",
            ServiceCategory::PersonalCare => "Personal care",
            ServiceCategory::Entertainment => "Entertainment",
            ServiceCategory::Cosmetic => "Cosmetic",
            ServiceCategory::Comfort => "Comfort/food",
            ServiceCategory::Other => "Other",
        }
    }

    /// Returns true for the categories a policy does not pay toward
    pub fn is_non_medical(&self) -> bool {
        matches!(
            self,
            ServiceCategory::PersonalCare
                | ServiceCategory::Entertainment
                | ServiceCategory::Cosmetic
                | ServiceCategory::Comfort
        )
    }

    /// The built-in ruling for this category
    pub fn default_ruling(&self) -> CoverageRuling {
        match self {
            ServiceCategory::PersonalCare => {
                CoverageRuling::not_covered("Personal care item - not medical necessity")
            }
            ServiceCategory::Entertainment => {
                CoverageRuling::not_covered("Comfort/entertainment item - not covered by policy")
            }
            ServiceCategory::Cosmetic => {
                CoverageRuling::not_covered("Cosmetic procedure - excluded by policy")
            }
            ServiceCategory::Comfort => {
                CoverageRuling::not_covered("Food/beverage - not medical necessity")
            }
            // Unmatched descriptions are conservatively assumed covered;
            // the alternative (route to manual review) is recorded in
            // DESIGN.md as a deliberate product default.
            _ => CoverageRuling::Covered,
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outcome of coverage determination for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageRuling {
    Covered,
    NotCovered { reason: String },
}

impl CoverageRuling {
    /// Creates a not-covered ruling with the given reason
    pub fn not_covered(reason: impl Into<String>) -> Self {
        CoverageRuling::NotCovered {
            reason: reason.into(),
        }
    }

    /// Returns true when the ruling is covered
    pub fn is_covered(&self) -> bool {
        matches!(self, CoverageRuling::Covered)
    }

    /// Returns the rejection reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            CoverageRuling::Covered => None,
            CoverageRuling::NotCovered { reason } => Some(reason),
        }
    }
}

/// A category plus its ruling, as returned by rule evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: ServiceCategory,
    pub ruling: CoverageRuling,
}

struct KeywordRule {
    category: ServiceCategory,
    keywords: &'static [&'static str],
}

impl KeywordRule {
    fn matches(&self, lowercase_description: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowercase_description.contains(keyword))
    }
}

// Checked before the medical tables: a description that looks both
// non-medical and medical rejects.
const NON_MEDICAL_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: ServiceCategory::PersonalCare,
        keywords: &[
            "soap", "shampoo", "toothbrush", "toothpaste", "comb", "brush", "towel", "tissue",
            "napkin", "wipes", "lotion", "mirror",
        ],
    },
    KeywordRule {
        category: ServiceCategory::Entertainment,
        keywords: &[
            "tv", "television", "phone", "telephone", "newspaper", "magazine", "entertainment",
            "wifi", "internet", "cable",
        ],
    },
    KeywordRule {
        category: ServiceCategory::Cosmetic,
        keywords: &[
            "cosmetic", "beauty", "aesthetic", "whitening", "botox", "plastic surgery",
        ],
    },
    KeywordRule {
        category: ServiceCategory::Comfort,
        keywords: &[
            "food", "meal", "breakfast", "lunch", "dinner", "snack", "tea", "coffee", "juice",
            "beverage",
        ],
    },
];

const MEDICAL_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: ServiceCategory::Medication,
        keywords: &[
            "tablet", "tab", "injection", "inj", "syrup", "capsule", "cap", "mg", "ml", "drug",
            "medicine", "pharmaceutical", "antibiotic", "painkiller", "analgesic", "antacid",
            "vitamin", "paracetamol", "ibuprofen", "aspirin", "insulin",
        ],
    },
    KeywordRule {
        category: ServiceCategory::Supply,
        keywords: &[
            "syringe", "needle", "gauze", "bandage", "cotton", "swab", "catheter", "gloves",
            "mask", "dressing", "tape", "suture",
        ],
    },
    KeywordRule {
        category: ServiceCategory::Diagnostic,
        keywords: &[
            "test", "scan", "x-ray", "xray", "mri", "ct scan", "ultrasound", "echo", "blood",
            "urine", "culture", "biopsy", "pathology", "lab", "screening",
        ],
    },
    KeywordRule {
        category: ServiceCategory::Procedure,
        keywords: &[
            "surgery", "operation", "procedure", "treatment", "therapy", "intervention",
            "dialysis", "chemotherapy", "transfusion",
        ],
    },
    KeywordRule {
        category: ServiceCategory::Consultation,
        keywords: &[
            "consultation", "consult", "visit", "checkup", "check-up", "examination",
            "assessment", "doctor", "physician", "specialist", "opinion",
        ],
    },
];

// Treatments excluded regardless of category.
const BUILTIN_EXCLUSIONS: &[&str] = &["experimental", "investigational", "trial", "research"];
const BUILTIN_EXCLUSION_REASON: &str = "Experimental treatment - excluded by policy";

/// Returns the category of a description, non-medical tables first
pub fn match_category(description: &str) -> ServiceCategory {
    let description = description.to_lowercase();
    NON_MEDICAL_RULES
        .iter()
        .chain(MEDICAL_RULES.iter())
        .find(|rule| rule.matches(&description))
        .map(|rule| rule.category)
        .unwrap_or(ServiceCategory::Other)
}

/// Coverage rule set for one claim: built-in tables plus the terms the
/// extraction service read out of the policy document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRules {
    covered_services: Vec<String>,
    exclusions: Vec<String>,
}

impl CoverageRules {
    /// Built-in rules only
    pub fn standard() -> Self {
        Self::default()
    }

    /// Built-in rules extended with the policy's own coverage terms
    pub fn from_policy(context: &PolicyContext) -> Self {
        Self {
            covered_services: context.covered_services().to_vec(),
            exclusions: context.exclusions().to_vec(),
        }
    }

    /// Determines category and ruling for an item description.
    ///
    /// Precedence, first match wins: policy exclusions, built-in
    /// exclusions, built-in non-medical categories, policy covered
    /// services, built-in medical categories, default covered.
    pub fn evaluate(&self, description: &str) -> Classification {
        let lowered = description.to_lowercase();

        if let Some(term) = self
            .exclusions
            .iter()
            .find(|term| lowered.contains(term.as_str()))
        {
            return Classification {
                category: match_category(&lowered),
                ruling: CoverageRuling::not_covered(format!("Excluded service: {term}")),
            };
        }

        if BUILTIN_EXCLUSIONS.iter().any(|term| lowered.contains(term)) {
            return Classification {
                category: match_category(&lowered),
                ruling: CoverageRuling::not_covered(BUILTIN_EXCLUSION_REASON),
            };
        }

        if let Some(rule) = NON_MEDICAL_RULES.iter().find(|rule| rule.matches(&lowered)) {
            return Classification {
                category: rule.category,
                ruling: rule.category.default_ruling(),
            };
        }

        if self
            .covered_services
            .iter()
            .any(|term| lowered.contains(term.as_str()))
        {
            return Classification {
                category: match_category(&lowered),
                ruling: CoverageRuling::Covered,
            };
        }

        let category = MEDICAL_RULES
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.category)
            .unwrap_or(ServiceCategory::Other);

        Classification {
            category,
            ruling: CoverageRuling::Covered,
        }
    }
}
