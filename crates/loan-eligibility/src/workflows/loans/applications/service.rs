use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::super::domain::ApplicationInput;
use super::super::scoring::{Scorer, ScoringConfig, ScoringError, ScoringResult};
use super::domain::{
    ApplicantId, ApplicationId, ApplicationStatus, FinancialProfile, LoanSubmission,
    ReviewAction, StatusPolicy,
};
use super::intake::{IntakeError, IntakeGuard};
use super::repository::{
    ApplicationRecord, ApplicationRepository, RepositoryError, DEFAULT_OFFERED_INTEREST_RATE,
};

/// Service composing intake decoding, the scorer, and the application store.
pub struct LoanApplicationService<R> {
    guard: IntakeGuard,
    scorer: Arc<Scorer>,
    repository: Arc<R>,
    policy: StatusPolicy,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("loan-{id:06}"))
}

impl<R> LoanApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig, policy: StatusPolicy) -> Self {
        Self::with_guard(IntakeGuard::default(), repository, config, policy)
    }

    pub fn with_guard(
        guard: IntakeGuard,
        repository: Arc<R>,
        config: ScoringConfig,
        policy: StatusPolicy,
    ) -> Self {
        Self {
            guard,
            scorer: Arc::new(Scorer::new(config)),
            repository,
            policy,
        }
    }

    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    /// Decode and score a profile without touching the store.
    pub fn score_only(
        &self,
        profile: &FinancialProfile,
    ) -> Result<ScoringResult, LoanServiceError> {
        let input = self.guard.input_from_profile(profile)?;
        self.score_input(&input, None)
    }

    /// Score a new submission and persist it together with its result.
    ///
    /// Nothing is written when decoding or scoring fails.
    pub fn submit(
        &self,
        submission: LoanSubmission,
    ) -> Result<ApplicationRecord, LoanServiceError> {
        let applicant = self.guard.applicant_from_submission(&submission)?;
        let input = self.guard.input_from_profile(&submission.profile)?;
        let application_id = next_application_id();
        let scoring = self.score_input(&input, Some(&application_id))?;

        let now = Utc::now();
        let record = ApplicationRecord {
            application_id,
            applicant,
            input,
            offered_interest_rate: DEFAULT_OFFERED_INTEREST_RATE,
            status: self.policy.status_for(scoring.decision()),
            scoring,
            decision: scoring.decision(),
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Recompute the result of a stored application that has not been reviewed yet.
    pub fn rescore(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, LoanServiceError> {
        let mut record = self.fetch_existing(application_id)?;
        if record.decision != record.scoring.decision()
            || !matches!(
                record.status,
                ApplicationStatus::Pending | ApplicationStatus::Rejected
            )
        {
            return Err(LoanServiceError::AlreadyReviewed {
                application_id: application_id.clone(),
                status: record.status,
            });
        }

        let scoring = self.score_input(&record.input, Some(application_id))?;
        record.status = self.policy.status_for(scoring.decision());
        record.decision = scoring.decision();
        record.scoring = scoring;
        record.updated_at = Utc::now();

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Fetch an application for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, LoanServiceError> {
        self.fetch_existing(application_id)
    }

    pub fn list_for_applicant(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<Vec<ApplicationRecord>, LoanServiceError> {
        Ok(self.repository.list_for_applicant(applicant_id)?)
    }

    /// Pending applications staff can act on under the configured status policy.
    pub fn review_queue(&self) -> Result<Vec<ApplicationRecord>, LoanServiceError> {
        Ok(self.repository.pending_review(self.policy.review_floor())?)
    }

    /// Record a staff verdict on a pending application.
    pub fn review(
        &self,
        application_id: &ApplicationId,
        action: ReviewAction,
    ) -> Result<ApplicationRecord, LoanServiceError> {
        let mut record = self.fetch_existing(application_id)?;
        if record.status != ApplicationStatus::Pending {
            return Err(LoanServiceError::InvalidTransition {
                application_id: application_id.clone(),
                current: record.status,
                requested: action.outcome().0,
            });
        }

        let (status, decision) = action.outcome();
        record.status = status;
        record.decision = decision;
        record.updated_at = Utc::now();
        self.repository.update(record.clone())?;

        info!(
            application_id = %application_id.0,
            status = status.label(),
            "application reviewed"
        );
        Ok(record)
    }

    /// Mark an approved application as paid out.
    pub fn disburse(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, LoanServiceError> {
        let mut record = self.fetch_existing(application_id)?;
        if record.status != ApplicationStatus::Approved {
            return Err(LoanServiceError::InvalidTransition {
                application_id: application_id.clone(),
                current: record.status,
                requested: ApplicationStatus::Disbursed,
            });
        }

        record.status = ApplicationStatus::Disbursed;
        record.updated_at = Utc::now();
        self.repository.update(record.clone())?;
        Ok(record)
    }

    fn fetch_existing(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, LoanServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn score_input(
        &self,
        input: &ApplicationInput,
        application_id: Option<&ApplicationId>,
    ) -> Result<ScoringResult, LoanServiceError> {
        let label = application_id.map(|id| id.0.as_str()).unwrap_or("unsaved");
        match self.scorer.score(input) {
            Ok(result) => {
                info!(
                    application_id = label,
                    score = result.final_score(),
                    decision = result.decision().label(),
                    "application scored"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(application_id = label, error = %err, "application rejected by scorer");
                Err(err.into())
            }
        }
    }
}

/// Error raised by the loan application service.
#[derive(Debug, thiserror::Error)]
pub enum LoanServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(
        "application {} cannot move from {} to {}",
        .application_id.0,
        .current.label(),
        .requested.label()
    )]
    InvalidTransition {
        application_id: ApplicationId,
        current: ApplicationStatus,
        requested: ApplicationStatus,
    },
    #[error("application {} was already reviewed ({})", .application_id.0, .status.label())]
    AlreadyReviewed {
        application_id: ApplicationId,
        status: ApplicationStatus,
    },
}
