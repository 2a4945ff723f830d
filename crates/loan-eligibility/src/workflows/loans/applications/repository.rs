use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::ApplicationInput;
use super::super::scoring::{Breakdown, Decision, ScoringResult};
use super::domain::{ApplicantDetails, ApplicantId, ApplicationId, ApplicationStatus};

/// Rate shown to applicants on new records; independent of the scoring estimate.
pub const DEFAULT_OFFERED_INTEREST_RATE: f64 = 8.0;

/// Stored application: identity, scored input, full scoring result, and review state.
///
/// `decision` starts as the scorer's decision and is replaced when staff review the
/// application. `scoring` is always the scorer's untouched output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub applicant: ApplicantDetails,
    pub input: ApplicationInput,
    pub offered_interest_rate: f64,
    pub status: ApplicationStatus,
    pub scoring: ScoringResult,
    pub decision: Decision,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn score(&self) -> f64 {
        self.scoring.final_score()
    }

    pub fn decision_rationale(&self) -> String {
        if self.decision == self.scoring.decision() {
            format!(
                "scored {:.2}: {}",
                self.scoring.final_score(),
                self.decision.label()
            )
        } else {
            format!(
                "scored {:.2} ({}), staff decision: {}",
                self.scoring.final_score(),
                self.scoring.decision().label(),
                self.decision.label()
            )
        }
    }

    pub fn view(&self) -> ApplicationView {
        ApplicationView {
            application_id: self.application_id.clone(),
            applicant_id: self.applicant.applicant_id.clone(),
            full_name: self.applicant.full_name.clone(),
            status: self.status.label(),
            decision: self.decision,
            decision_rationale: self.decision_rationale(),
            score: self.scoring.final_score(),
            confidence: self.scoring.confidence(),
            breakdown: *self.scoring.breakdown(),
            offered_interest_rate: self.offered_interest_rate,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    /// Applications submitted by `applicant`, newest first.
    fn list_for_applicant(
        &self,
        applicant: &ApplicantId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    /// Pending applications scoring at least `min_score`, newest first.
    fn pending_review(&self, min_score: f64) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Orders records newest first, breaking timestamp ties by the later identifier.
pub fn newest_first(records: &mut [ApplicationRecord]) {
    records.sort_by(|left, right| {
        right
            .created_at
            .cmp(&left.created_at)
            .then_with(|| right.application_id.cmp(&left.application_id))
    });
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Public representation of a stored application.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub application_id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub full_name: String,
    pub status: &'static str,
    pub decision: Decision,
    pub decision_rationale: String,
    pub score: f64,
    pub confidence: f64,
    pub breakdown: Breakdown,
    pub offered_interest_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
