use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicantProfile, EmploymentStatus, UnknownEmploymentStatus};

pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 100;
pub const MAX_CREDIT_HISTORY_YEARS: i64 = 50;
pub const MAX_EXISTING_LOANS: i64 = 20;
pub const MAX_EMPLOYMENT_YEARS: i64 = 60;

/// Wire shape of `POST /score`. Numbers arrive loosely typed and are checked
/// by [`ScoreRequest::validate`] before anything is scored. Count fields also
/// accept whole-number floats such as `35.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(deserialize_with = "whole_number")]
    pub age: i64,
    pub income: f64,
    #[serde(deserialize_with = "whole_number")]
    pub credit_history_years: i64,
    #[serde(deserialize_with = "whole_number")]
    pub existing_loans: i64,
    pub debt_to_income_ratio: f64,
    pub savings: f64,
    pub employment_status: String,
    #[serde(deserialize_with = "whole_number")]
    pub employment_years: i64,
}

fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(WholeNumber)
}

struct WholeNumber;

impl<'de> Visitor<'de> for WholeNumber {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a whole number")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
        i64::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
        // i64::MAX is not exactly representable; stay strictly inside the range.
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e18 {
            Ok(value as i64)
        } else {
            Err(E::invalid_value(Unexpected::Float(value), &self))
        }
    }
}

/// One rejected field of a request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldViolation {
    #[error("{field} must be between {min} and {max} (found {found})")]
    IntegerOutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        found: i64,
    },
    #[error("{field} must be between {min} and {max} (found {found})")]
    RatioOutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        found: f64,
    },
    #[error("{field} must be non-negative (found {found})")]
    NegativeAmount { field: &'static str, found: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error(transparent)]
    EmploymentStatus(#[from] UnknownEmploymentStatus),
}

impl FieldViolation {
    pub fn field(&self) -> &'static str {
        match self {
            FieldViolation::IntegerOutOfRange { field, .. }
            | FieldViolation::RatioOutOfRange { field, .. }
            | FieldViolation::NegativeAmount { field, .. }
            | FieldViolation::NotFinite { field } => *field,
            FieldViolation::EmploymentStatus(_) => "employment_status",
        }
    }
}

/// Reasons a request never reaches the scoring engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("malformed request body: {0}")]
    Malformed(String),
    #[error("invalid applicant profile: {}", join_violations(.0))]
    Fields(Vec<FieldViolation>),
}

/// Serializable `{field, message}` pair used in 422 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationDetail {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn details(&self) -> Vec<ViolationDetail> {
        match self {
            ValidationError::Malformed(message) => vec![ViolationDetail {
                field: "body".to_string(),
                message: message.clone(),
            }],
            ValidationError::Fields(violations) => violations
                .iter()
                .map(|violation| ViolationDetail {
                    field: violation.field().to_string(),
                    message: violation.to_string(),
                })
                .collect(),
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ScoreRequest {
    /// Check every field and build the profile, reporting all failures at once.
    pub fn validate(&self) -> Result<ApplicantProfile, ValidationError> {
        let mut violations = Vec::new();

        let age = bounded_int("age", self.age, MIN_AGE, MAX_AGE, &mut violations);
        let income = amount("income", self.income, &mut violations);
        let credit_history_years = bounded_int(
            "credit_history_years",
            self.credit_history_years,
            0,
            MAX_CREDIT_HISTORY_YEARS,
            &mut violations,
        );
        let existing_loans = bounded_int(
            "existing_loans",
            self.existing_loans,
            0,
            MAX_EXISTING_LOANS,
            &mut violations,
        );
        let debt_to_income_ratio = ratio(
            "debt_to_income_ratio",
            self.debt_to_income_ratio,
            &mut violations,
        );
        let savings = amount("savings", self.savings, &mut violations);
        let employment_status = match self.employment_status.parse::<EmploymentStatus>() {
            Ok(status) => Some(status),
            Err(err) => {
                violations.push(err.into());
                None
            }
        };
        let employment_years = bounded_int(
            "employment_years",
            self.employment_years,
            0,
            MAX_EMPLOYMENT_YEARS,
            &mut violations,
        );

        match (
            age,
            income,
            credit_history_years,
            existing_loans,
            debt_to_income_ratio,
            savings,
            employment_status,
            employment_years,
        ) {
            (
                Some(age),
                Some(income),
                Some(credit_history_years),
                Some(existing_loans),
                Some(debt_to_income_ratio),
                Some(savings),
                Some(employment_status),
                Some(employment_years),
            ) if violations.is_empty() => Ok(ApplicantProfile {
                age: age as u8,
                income,
                credit_history_years: credit_history_years as u32,
                existing_loans: existing_loans as u32,
                debt_to_income_ratio,
                savings,
                employment_status,
                employment_years: employment_years as u32,
            }),
            _ => Err(ValidationError::Fields(violations)),
        }
    }
}

impl TryFrom<ScoreRequest> for ApplicantProfile {
    type Error = ValidationError;

    fn try_from(request: ScoreRequest) -> Result<Self, Self::Error> {
        request.validate()
    }
}

impl From<&ApplicantProfile> for ScoreRequest {
    fn from(profile: &ApplicantProfile) -> Self {
        Self {
            age: i64::from(profile.age),
            income: profile.income,
            credit_history_years: i64::from(profile.credit_history_years),
            existing_loans: i64::from(profile.existing_loans),
            debt_to_income_ratio: profile.debt_to_income_ratio,
            savings: profile.savings,
            employment_status: profile.employment_status.label().to_string(),
            employment_years: i64::from(profile.employment_years),
        }
    }
}

fn bounded_int(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
    violations: &mut Vec<FieldViolation>,
) -> Option<i64> {
    if (min..=max).contains(&value) {
        Some(value)
    } else {
        violations.push(FieldViolation::IntegerOutOfRange {
            field,
            min,
            max,
            found: value,
        });
        None
    }
}

fn amount(field: &'static str, value: f64, violations: &mut Vec<FieldViolation>) -> Option<f64> {
    if !value.is_finite() {
        violations.push(FieldViolation::NotFinite { field });
        None
    } else if value < 0.0 {
        violations.push(FieldViolation::NegativeAmount {
            field,
            found: value,
        });
        None
    } else {
        Some(value)
    }
}

fn ratio(field: &'static str, value: f64, violations: &mut Vec<FieldViolation>) -> Option<f64> {
    if !value.is_finite() {
        violations.push(FieldViolation::NotFinite { field });
        None
    } else if !(0.0..=1.0).contains(&value) {
        violations.push(FieldViolation::RatioOutOfRange {
            field,
            min: 0.0,
            max: 1.0,
            found: value,
        });
        None
    } else {
        Some(value)
    }
}
