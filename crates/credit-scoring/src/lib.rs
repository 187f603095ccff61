//! Rule-based credit scoring.
//!
//! The [`scoring`] module holds the pure engine that turns an
//! [`ApplicantProfile`] into a [`ScoringResult`]. Everything else in the crate
//! is the plumbing a service needs around it: request intake and validation,
//! the axum route, environment configuration and telemetry.

pub mod applicant;
pub mod config;
pub mod error;
pub mod router;
pub mod scoring;
pub mod telemetry;

pub use applicant::{ApplicantProfile, EmploymentStatus, ScoreRequest, ValidationError};
pub use scoring::{
    score, Decision, Factor, FactorBreakdown, RiskLevel, ScoringConfig, ScoringEngine,
    ScoringResult,
};
