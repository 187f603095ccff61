//! Applicant intake: the profile the engine consumes and the wire request it
//! is validated from.

pub mod domain;
pub mod intake;

pub use domain::{ApplicantProfile, EmploymentStatus};
pub use intake::{FieldViolation, ScoreRequest, ValidationError};
