use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_SCORE: i32 = 300;
pub const DEFAULT_MAX_SCORE: i32 = 850;
pub const DEFAULT_APPROVAL_THRESHOLD: i32 = 650;
pub const DEFAULT_REVIEW_THRESHOLD: i32 = 550;

/// Score bounds and decision boundaries, fixed for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub min_score: i32,
    pub max_score: i32,
    /// Scores at or above this are approved.
    pub approval_threshold: i32,
    /// Scores at or above this (and below approval) go to manual review.
    pub review_threshold: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            max_score: DEFAULT_MAX_SCORE,
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
        }
    }
}

impl ScoringConfig {
    /// Starting point for every applicant: the midpoint of the score range.
    pub fn base_score(&self) -> f64 {
        (f64::from(self.min_score) + f64::from(self.max_score)) / 2.0
    }

    pub fn check(&self) -> Result<(), ScoringConfigError> {
        if self.min_score >= self.max_score {
            return Err(ScoringConfigError::EmptyRange {
                min: self.min_score,
                max: self.max_score,
            });
        }

        let ordered = self.min_score <= self.review_threshold
            && self.review_threshold <= self.approval_threshold
            && self.approval_threshold <= self.max_score;
        if !ordered {
            return Err(ScoringConfigError::UnorderedThresholds {
                min: self.min_score,
                review: self.review_threshold,
                approval: self.approval_threshold,
                max: self.max_score,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("MIN_SCORE ({min}) must be lower than MAX_SCORE ({max})")]
    EmptyRange { min: i32, max: i32 },
    #[error(
        "thresholds must satisfy MIN_SCORE <= REVIEW_THRESHOLD <= APPROVAL_THRESHOLD <= MAX_SCORE \
         (found {min} / {review} / {approval} / {max})"
    )]
    UnorderedThresholds {
        min: i32,
        review: i32,
        approval: i32,
        max: i32,
    },
}
