use serde::{Deserialize, Serialize};

/// Federal filing statuses supported by the engine.
///
/// The equity planner models the two statuses that cover the advisor
/// client base; the bracket tables, standard deductions, and AMT
/// parameters in [`TaxYearConfig`](crate::TaxYearConfig) are keyed by
/// this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilingStatusCode {
    Single,
    MarriedFilingJointly,
}

impl FilingStatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "S" => Some(Self::Single),
            "MFJ" => Some(Self::MarriedFilingJointly),
            _ => None,
        }
    }

    /// Number of persons covered by the return (drives per-person
    /// amounts such as personal exemptions).
    pub fn person_count(&self) -> u32 {
        match self {
            Self::Single => 1,
            Self::MarriedFilingJointly => 2,
        }
    }
}
