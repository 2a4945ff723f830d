pub mod applications;
pub mod domain;
pub mod scoring;

pub use domain::{ApplicationInput, Education, EmploymentType, MaritalStatus};
pub use scoring::{
    score, Breakdown, Decision, FactorDetail, FactorName, FactorResult, Scorer, ScoringConfig,
    ScoringError, ScoringResult,
};
