use serde::{Deserialize, Serialize};

use crate::applicant::{ApplicantProfile, EmploymentStatus};

use super::config::ScoringConfig;

const AGE_FLOOR: u8 = 18;
const AGE_CEILING: u8 = 100;
const AGE_PRIME_MIN: u8 = 25;
const AGE_PRIME_MAX: u8 = 55;
const AGE_SENIOR_MAX: u8 = 75;
const AGE_PRIME_BONUS: i32 = 30;
const AGE_YOUNG_PENALTY: i32 = -20;
const AGE_SENIOR_BONUS: i32 = 10;

const INCOME_BANDS: [(f64, i32); 3] = [(100_000.0, 50), (60_000.0, 30), (40_000.0, 10)];
const INCOME_LOW_PENALTY: i32 = -30;

const CREDIT_BANDS: [(u32, i32); 3] = [(10, 50), (5, 30), (2, 10)];
const CREDIT_ONE_YEAR_PENALTY: i32 = -10;
const CREDIT_NONE_PENALTY: i32 = -30;

const DTI_BANDS: [(f64, i32); 3] = [(0.20, 40), (0.35, 20), (0.50, -10)];
const DTI_HIGH_PENALTY: i32 = -50;

const SAVINGS_BANDS: [(f64, i32); 3] = [(50_000.0, 30), (20_000.0, 20), (10_000.0, 10)];

const EMPLOYED_MIN_YEARS: u32 = 3;
const EMPLOYED_BONUS: i32 = 30;
const SELF_EMPLOYED_MIN_YEARS: u32 = 3;
const SELF_EMPLOYED_ESTABLISHED_YEARS: u32 = 5;
const SELF_EMPLOYED_BONUS: i32 = 10;
const SELF_EMPLOYED_ESTABLISHED_BONUS: i32 = 20;
const UNEMPLOYED_PENALTY: i32 = -40;
const RETIRED_BONUS: i32 = 5;

const LOAN_PENALTY_PER_LOAN: i32 = -10;
const MAX_LOAN_PENALTY: i32 = -40;

/// Profile attribute group that contributes points to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Age,
    Income,
    CreditHistory,
    DebtToIncome,
    Savings,
    Employment,
    ExistingLoans,
}

/// Discrete contribution to a score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: Factor,
    pub points: i32,
    pub notes: String,
}

/// Base score plus every factor contribution, before rounding and clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub base_score: f64,
    pub components: Vec<ScoreComponent>,
}

impl FactorBreakdown {
    pub fn points_for(&self, factor: Factor) -> i32 {
        self.components
            .iter()
            .filter(|component| component.factor == factor)
            .map(|component| component.points)
            .sum()
    }

    pub fn adjustment(&self) -> i32 {
        self.components.iter().map(|component| component.points).sum()
    }

    /// Unclamped total: base plus every adjustment.
    pub fn raw_score(&self) -> f64 {
        self.base_score + f64::from(self.adjustment())
    }
}

pub(crate) fn score_profile(profile: &ApplicantProfile, config: &ScoringConfig) -> FactorBreakdown {
    let age = profile.age.clamp(AGE_FLOOR, AGE_CEILING);
    let income = non_negative(profile.income);
    let ratio = debt_ratio(profile.debt_to_income_ratio);
    let savings = non_negative(profile.savings);

    let components = vec![
        ScoreComponent {
            factor: Factor::Age,
            points: age_points(age),
            notes: format!("age {age}"),
        },
        ScoreComponent {
            factor: Factor::Income,
            points: income_points(income),
            notes: format!("annual income {income:.0}"),
        },
        ScoreComponent {
            factor: Factor::CreditHistory,
            points: credit_history_points(profile.credit_history_years),
            notes: format!("{} year(s) of credit history", profile.credit_history_years),
        },
        ScoreComponent {
            factor: Factor::DebtToIncome,
            points: debt_to_income_points(ratio),
            notes: format!("debt-to-income ratio {ratio:.2}"),
        },
        ScoreComponent {
            factor: Factor::Savings,
            points: savings_points(savings),
            notes: format!("savings {savings:.0}"),
        },
        ScoreComponent {
            factor: Factor::Employment,
            points: employment_points(profile.employment_status, profile.employment_years),
            notes: format!(
                "{} for {} year(s)",
                profile.employment_status, profile.employment_years
            ),
        },
        ScoreComponent {
            factor: Factor::ExistingLoans,
            points: existing_loans_points(profile.existing_loans),
            notes: format!("{} existing loan(s)", profile.existing_loans),
        },
    ];

    FactorBreakdown {
        base_score: config.base_score(),
        components,
    }
}

/// NaN and negatives count as nothing at all.
fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

/// NaN counts as fully leveraged.
fn debt_ratio(value: f64) -> f64 {
    if value.is_nan() {
        1.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn band_points<T: PartialOrd + Copy>(value: T, bands: &[(T, i32)], fallback: i32) -> i32 {
    bands
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(fallback)
}

pub(crate) fn age_points(age: u8) -> i32 {
    match age.clamp(AGE_FLOOR, AGE_CEILING) {
        AGE_PRIME_MIN..=AGE_PRIME_MAX => AGE_PRIME_BONUS,
        age if age < AGE_PRIME_MIN => AGE_YOUNG_PENALTY,
        age if age <= AGE_SENIOR_MAX => AGE_SENIOR_BONUS,
        _ => 0,
    }
}

pub(crate) fn income_points(income: f64) -> i32 {
    band_points(non_negative(income), &INCOME_BANDS, INCOME_LOW_PENALTY)
}

pub(crate) fn credit_history_points(years: u32) -> i32 {
    match years {
        0 => CREDIT_NONE_PENALTY,
        1 => CREDIT_ONE_YEAR_PENALTY,
        years => band_points(years, &CREDIT_BANDS, 0),
    }
}

pub(crate) fn debt_to_income_points(ratio: f64) -> i32 {
    let ratio = debt_ratio(ratio);
    DTI_BANDS
        .iter()
        .find(|(ceiling, _)| ratio <= *ceiling)
        .map(|(_, points)| *points)
        .unwrap_or(DTI_HIGH_PENALTY)
}

pub(crate) fn savings_points(savings: f64) -> i32 {
    band_points(non_negative(savings), &SAVINGS_BANDS, 0)
}

pub(crate) fn employment_points(status: EmploymentStatus, years: u32) -> i32 {
    match status {
        EmploymentStatus::Employed if years >= EMPLOYED_MIN_YEARS => EMPLOYED_BONUS,
        EmploymentStatus::SelfEmployed if years >= SELF_EMPLOYED_ESTABLISHED_YEARS => {
            SELF_EMPLOYED_ESTABLISHED_BONUS
        }
        EmploymentStatus::SelfEmployed if years >= SELF_EMPLOYED_MIN_YEARS => SELF_EMPLOYED_BONUS,
        EmploymentStatus::Employed | EmploymentStatus::SelfEmployed => 0,
        EmploymentStatus::Unemployed => UNEMPLOYED_PENALTY,
        EmploymentStatus::Retired => RETIRED_BONUS,
    }
}

pub(crate) fn existing_loans_points(loans: u32) -> i32 {
    let loans = i32::try_from(loans).unwrap_or(i32::MAX);
    loans
        .saturating_mul(LOAN_PENALTY_PER_LOAN)
        .max(MAX_LOAN_PENALTY)
}
