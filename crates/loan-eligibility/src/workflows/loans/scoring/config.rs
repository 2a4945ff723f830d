use serde::{Deserialize, Serialize};

use super::ScoringError;

pub const DEFAULT_ANNUAL_INTEREST_RATE: f64 = 0.08;

/// Scoring constants that stay fixed for every applicant. The annual rate only feeds
/// the debt-to-income payment estimate and is unrelated to any rate offered on a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub annual_interest_rate: f64,
}

impl ScoringConfig {
    pub fn monthly_rate(&self) -> f64 {
        self.annual_interest_rate / 12.0
    }

    /// The annual rate must be a finite decimal in `[0, 1)`.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let rate = self.annual_interest_rate;
        if rate.is_finite() && (0.0..1.0).contains(&rate) {
            Ok(())
        } else {
            Err(ScoringError::invalid(
                "annualInterestRate",
                format!("must be a decimal rate in [0, 1), got {rate}"),
            ))
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            annual_interest_rate: DEFAULT_ANNUAL_INTEREST_RATE,
        }
    }
}
