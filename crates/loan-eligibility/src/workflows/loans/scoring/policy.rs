use serde::{Deserialize, Serialize};

pub const APPROVAL_THRESHOLD: f64 = 0.7;
pub const REVIEW_THRESHOLD: f64 = 0.5;

const APPROVED_CONFIDENCE: f64 = 0.85;
const REVIEW_CONFIDENCE: f64 = 0.70;
const REJECTED_CONFIDENCE: f64 = 0.60;

/// Categorical eligibility outcome derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    #[serde(rename = "Under Review")]
    UnderReview,
    Rejected,
}

impl Decision {
    pub const fn label(self) -> &'static str {
        match self {
            Decision::Approved => "Approved",
            Decision::UnderReview => "Under Review",
            Decision::Rejected => "Rejected",
        }
    }

    /// Confidence attached to each decision band.
    pub const fn confidence(self) -> f64 {
        match self {
            Decision::Approved => APPROVED_CONFIDENCE,
            Decision::UnderReview => REVIEW_CONFIDENCE,
            Decision::Rejected => REJECTED_CONFIDENCE,
        }
    }
}

pub fn decide(final_score: f64) -> Decision {
    if final_score >= APPROVAL_THRESHOLD {
        Decision::Approved
    } else if final_score >= REVIEW_THRESHOLD {
        Decision::UnderReview
    } else {
        Decision::Rejected
    }
}

pub fn confidence_for(final_score: f64) -> f64 {
    decide(final_score).confidence()
}
