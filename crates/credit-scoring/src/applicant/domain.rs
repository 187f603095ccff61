use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Financial snapshot of one applicant, already validated by intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub age: u8,
    /// Annual gross income.
    pub income: f64,
    pub credit_history_years: u32,
    pub existing_loans: u32,
    pub debt_to_income_ratio: f64,
    pub savings: f64,
    pub employment_status: EmploymentStatus,
    /// Tenure at the current employer (or in self-employment).
    pub employment_years: u32,
}

/// Closed set of employment situations accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Retired,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 4] = [
        EmploymentStatus::Employed,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::Unemployed,
        EmploymentStatus::Retired,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::SelfEmployed => "self_employed",
            EmploymentStatus::Unemployed => "unemployed",
            EmploymentStatus::Retired => "retired",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a status string names none of the known variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("employment_status must be one of: employed, self_employed, unemployed, retired (found '{0}')")]
pub struct UnknownEmploymentStatus(pub String);

impl FromStr for EmploymentStatus {
    type Err = UnknownEmploymentStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        EmploymentStatus::ALL
            .into_iter()
            .find(|status| status.label() == normalized)
            .ok_or_else(|| UnknownEmploymentStatus(raw.to_string()))
    }
}
