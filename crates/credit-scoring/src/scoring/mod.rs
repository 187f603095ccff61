//! Deterministic credit scoring.
//!
//! A profile starts at the midpoint of the configured score range and every
//! [`Factor`] adds or removes a fixed number of points. The rounded total is
//! clamped to the range and mapped to a [`Decision`] and [`RiskLevel`]; the
//! reason text is assembled from threshold tests on the raw profile fields.

mod config;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{
    ScoringConfig, ScoringConfigError, DEFAULT_APPROVAL_THRESHOLD, DEFAULT_MAX_SCORE,
    DEFAULT_MIN_SCORE, DEFAULT_REVIEW_THRESHOLD,
};
pub use policy::{decide, observations, Decision, Observation, RiskLevel};
pub use rules::{Factor, FactorBreakdown, ScoreComponent};

use crate::applicant::ApplicantProfile;
use serde::{Deserialize, Serialize};

/// Response body of a scoring call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub score: i32,
    pub decision: Decision,
    pub reason: String,
    pub risk_level: RiskLevel,
}

/// Score `profile` against `config`. Total over every profile value.
pub fn score(profile: &ApplicantProfile, config: &ScoringConfig) -> ScoringResult {
    let breakdown = rules::score_profile(profile, config);
    let score = clamp_score(breakdown.raw_score(), config);
    let decision = decide(score, config);

    ScoringResult {
        score,
        decision,
        reason: policy::build_reason(score, decision, profile),
        risk_level: decision.risk_level(),
    }
}

fn clamp_score(raw: f64, config: &ScoringConfig) -> i32 {
    // `i32::clamp` panics on an inverted range; this never does.
    (raw.round() as i32)
        .max(config.min_score)
        .min(config.max_score)
}

/// Stateless evaluator holding the process-wide configuration.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, profile: &ApplicantProfile) -> ScoringResult {
        score(profile, &self.config)
    }

    /// Per-factor points behind a score, for audits and the CLI.
    pub fn breakdown(&self, profile: &ApplicantProfile) -> FactorBreakdown {
        rules::score_profile(profile, &self.config)
    }
}
