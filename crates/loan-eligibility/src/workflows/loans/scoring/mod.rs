//! Deterministic eligibility scoring.
//!
//! Six independent factors are scored and weighted, then summed into a final score
//! in `[0, 1]`. The decision and confidence bands are derived from that score alone.

mod config;
mod policy;
mod rules;

pub use config::{ScoringConfig, DEFAULT_ANNUAL_INTEREST_RATE};
pub use policy::{confidence_for, decide, Decision, APPROVAL_THRESHOLD, REVIEW_THRESHOLD};
pub use rules::{
    debt_to_income_score, loan_to_value_score, monthly_payment, CREDIT_HISTORY_WEIGHT,
    DEBT_TO_INCOME_WEIGHT, EDUCATION_WEIGHT, EMPLOYMENT_WEIGHT, LOAN_TO_VALUE_WEIGHT,
    MARITAL_STATUS_WEIGHT,
};

use super::domain::{ApplicationInput, Education, EmploymentType, MaritalStatus};
use serde::{Deserialize, Serialize};

/// Stateless scorer holding the fixed rubric constants.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    /// Builds a scorer with `config` as given. An out-of-range rate is reported by
    /// every `score` call rather than replaced.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Builds a scorer only when the configured rate is usable.
    pub fn try_new(config: ScoringConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, input: &ApplicationInput) -> Result<ScoringResult, ScoringError> {
        self.config.validate()?;
        rules::validate(input)?;
        let breakdown = rules::score_factors(input, &self.config);
        Ok(ScoringResult::from_breakdown(breakdown))
    }
}

/// Scores `input` with the default rubric constants.
pub fn score(input: &ApplicationInput) -> Result<ScoringResult, ScoringError> {
    Scorer::default().score(input)
}

/// Rejection raised for malformed or degenerate numeric input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl ScoringError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ScoringError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            ScoringError::InvalidInput { field, .. } => field,
        }
    }
}

/// Scoring dimensions, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FactorName {
    CreditHistory,
    DebtToIncome,
    LoanToValue,
    Education,
    Employment,
    MaritalStatus,
}

impl FactorName {
    pub const ALL: [FactorName; 6] = [
        FactorName::CreditHistory,
        FactorName::DebtToIncome,
        FactorName::LoanToValue,
        FactorName::Education,
        FactorName::Employment,
        FactorName::MaritalStatus,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            FactorName::CreditHistory => "creditHistory",
            FactorName::DebtToIncome => "debtToIncome",
            FactorName::LoanToValue => "loanToValue",
            FactorName::Education => "education",
            FactorName::Employment => "employment",
            FactorName::MaritalStatus => "maritalStatus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditHistory {
    Good,
    Poor,
}

impl CreditHistory {
    pub const fn from_flag(good: bool) -> Self {
        if good {
            CreditHistory::Good
        } else {
            CreditHistory::Poor
        }
    }
}

/// Factor-specific context reported next to the score, e.g. the computed ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FactorDetail {
    #[serde(rename = "history")]
    History(CreditHistory),
    #[serde(rename = "ratio")]
    Ratio(f64),
    #[serde(rename = "level")]
    Level(Education),
    #[serde(rename = "type")]
    Type(EmploymentType),
    #[serde(rename = "status")]
    Status(MaritalStatus),
}

/// Weighted contribution of one factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorResult {
    #[serde(flatten)]
    detail: FactorDetail,
    score: f64,
    weight: f64,
    contribution: f64,
}

impl FactorResult {
    pub(crate) fn new(detail: FactorDetail, score: f64, weight: f64) -> Self {
        Self {
            detail,
            score,
            weight,
            contribution: score * weight,
        }
    }

    pub fn detail(&self) -> FactorDetail {
        self.detail
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn contribution(&self) -> f64 {
        self.contribution
    }
}

/// One entry per factor; serializes as a map keyed by factor name in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    credit_history: FactorResult,
    debt_to_income: FactorResult,
    loan_to_value: FactorResult,
    education: FactorResult,
    employment: FactorResult,
    marital_status: FactorResult,
}

impl Breakdown {
    pub fn get(&self, factor: FactorName) -> &FactorResult {
        match factor {
            FactorName::CreditHistory => &self.credit_history,
            FactorName::DebtToIncome => &self.debt_to_income,
            FactorName::LoanToValue => &self.loan_to_value,
            FactorName::Education => &self.education,
            FactorName::Employment => &self.employment,
            FactorName::MaritalStatus => &self.marital_status,
        }
    }

    pub fn entries(&self) -> [(FactorName, &FactorResult); 6] {
        FactorName::ALL.map(|factor| (factor, self.get(factor)))
    }

    pub fn total_contribution(&self) -> f64 {
        self.entries()
            .iter()
            .map(|(_, factor)| factor.contribution)
            .sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.entries().iter().map(|(_, factor)| factor.weight).sum()
    }
}

/// Final score, confidence, decision, and the per-factor trail that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    final_score: f64,
    confidence: f64,
    decision: Decision,
    breakdown: Breakdown,
}

impl ScoringResult {
    fn from_breakdown(breakdown: Breakdown) -> Self {
        let final_score = breakdown.total_contribution().clamp(0.0, 1.0);
        let decision = decide(final_score);

        Self {
            final_score,
            confidence: decision.confidence(),
            decision,
            breakdown,
        }
    }

    pub fn final_score(&self) -> f64 {
        self.final_score
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn breakdown(&self) -> &Breakdown {
        &self.breakdown
    }
}
