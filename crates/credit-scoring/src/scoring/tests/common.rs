use crate::applicant::{ApplicantProfile, EmploymentStatus};
use crate::scoring::{ScoringConfig, ScoringEngine};

pub(super) fn approved_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 35,
        income: 75_000.0,
        credit_history_years: 8,
        existing_loans: 2,
        debt_to_income_ratio: 0.25,
        savings: 25_000.0,
        employment_status: EmploymentStatus::Employed,
        employment_years: 5,
    }
}

pub(super) fn review_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 28,
        income: 45_000.0,
        credit_history_years: 2,
        existing_loans: 3,
        debt_to_income_ratio: 0.4,
        savings: 5_000.0,
        employment_status: EmploymentStatus::Employed,
        employment_years: 2,
    }
}

pub(super) fn rejected_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 22,
        income: 25_000.0,
        credit_history_years: 0,
        existing_loans: 5,
        debt_to_income_ratio: 0.75,
        savings: 500.0,
        employment_status: EmploymentStatus::Unemployed,
        employment_years: 0,
    }
}

pub(super) fn excellent_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 42,
        income: 120_000.0,
        credit_history_years: 12,
        existing_loans: 1,
        debt_to_income_ratio: 0.15,
        savings: 60_000.0,
        employment_status: EmploymentStatus::Employed,
        employment_years: 8,
    }
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::default())
}
