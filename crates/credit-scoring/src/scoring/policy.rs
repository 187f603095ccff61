use std::fmt;

use serde::{Deserialize, Serialize};

use crate::applicant::{ApplicantProfile, EmploymentStatus};

use super::config::ScoringConfig;

const GOOD_INCOME: f64 = 60_000.0;
const HEALTHY_DTI: f64 = 0.35;
const HIGH_DTI: f64 = 0.5;
const SOLID_CREDIT_YEARS: u32 = 5;
const LIMITED_CREDIT_YEARS: u32 = 3;
const INSUFFICIENT_CREDIT_YEARS: u32 = 2;

/// Outcome bucket derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Review,
    Rejected,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Approved => "approved",
            Decision::Review => "review",
            Decision::Rejected => "rejected",
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        match self {
            Decision::Approved => RiskLevel::Low,
            Decision::Review => RiskLevel::Medium,
            Decision::Rejected => RiskLevel::High,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Boundaries are half-open; a tie lands in the better bucket.
pub fn decide(score: i32, config: &ScoringConfig) -> Decision {
    if score >= config.approval_threshold {
        Decision::Approved
    } else if score >= config.review_threshold {
        Decision::Review
    } else {
        Decision::Rejected
    }
}

/// Qualitative remark appended to the headline of a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Observation {
    GoodIncome,
    HealthyDebtToIncome,
    SolidCreditHistory,
    ReduceDebtToIncome,
    LimitedCreditHistory,
    HighDebtToIncome,
    Unemployment,
    InsufficientCreditHistory,
}

impl Observation {
    pub fn sentence(&self) -> &'static str {
        match self {
            Observation::GoodIncome => "Good income level.",
            Observation::HealthyDebtToIncome => "Healthy debt-to-income ratio.",
            Observation::SolidCreditHistory => "Solid credit history.",
            Observation::ReduceDebtToIncome => "Consider reducing debt-to-income ratio.",
            Observation::LimitedCreditHistory => "Limited credit history.",
            Observation::HighDebtToIncome => "High debt-to-income ratio.",
            Observation::Unemployment => "Unemployment concerns.",
            Observation::InsufficientCreditHistory => "Insufficient credit history.",
        }
    }

    fn applies_to(&self, profile: &ApplicantProfile) -> bool {
        match self {
            Observation::GoodIncome => profile.income >= GOOD_INCOME,
            Observation::HealthyDebtToIncome => profile.debt_to_income_ratio <= HEALTHY_DTI,
            Observation::SolidCreditHistory => profile.credit_history_years >= SOLID_CREDIT_YEARS,
            Observation::ReduceDebtToIncome => profile.debt_to_income_ratio > HEALTHY_DTI,
            Observation::LimitedCreditHistory => {
                profile.credit_history_years < LIMITED_CREDIT_YEARS
            }
            Observation::HighDebtToIncome => profile.debt_to_income_ratio > HIGH_DTI,
            Observation::Unemployment => {
                profile.employment_status == EmploymentStatus::Unemployed
            }
            Observation::InsufficientCreditHistory => {
                profile.credit_history_years < INSUFFICIENT_CREDIT_YEARS
            }
        }
    }
}

/// Candidate observations per bucket, in the order they are reported.
fn candidates(decision: Decision) -> &'static [Observation] {
    match decision {
        Decision::Approved => &[
            Observation::GoodIncome,
            Observation::HealthyDebtToIncome,
            Observation::SolidCreditHistory,
        ],
        Decision::Review => &[
            Observation::ReduceDebtToIncome,
            Observation::LimitedCreditHistory,
        ],
        Decision::Rejected => &[
            Observation::HighDebtToIncome,
            Observation::Unemployment,
            Observation::InsufficientCreditHistory,
        ],
    }
}

pub fn observations(decision: Decision, profile: &ApplicantProfile) -> Vec<Observation> {
    candidates(decision)
        .iter()
        .copied()
        .filter(|observation| observation.applies_to(profile))
        .collect()
}

fn headline(score: i32, decision: Decision) -> String {
    match decision {
        Decision::Approved => format!("Strong financial profile with score {score}."),
        Decision::Review => format!("Moderate score of {score} requires manual review."),
        Decision::Rejected => format!("Low score of {score}."),
    }
}

pub(crate) fn build_reason(score: i32, decision: Decision, profile: &ApplicantProfile) -> String {
    let mut sentences = vec![headline(score, decision)];
    sentences.extend(
        observations(decision, profile)
            .iter()
            .map(|observation| observation.sentence().to_string()),
    );
    sentences.join(" ")
}
