//! Loan application intake, persistence seam, and staff review around the scorer.

pub mod domain;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantDetails, ApplicantId, ApplicationId, ApplicationStatus, FinancialProfile,
    LoanSubmission, ReviewAction, StatusPolicy,
};
pub use intake::{IntakeError, IntakeGuard, DEFAULT_MAX_TERM_MONTHS};
pub use repository::{
    newest_first, ApplicationRecord, ApplicationRepository, ApplicationView, RepositoryError,
    DEFAULT_OFFERED_INTEREST_RATE,
};
pub use router::{application_router, ReviewRequest, ScoreResponse, SubmissionResponse};
pub use service::{LoanApplicationService, LoanServiceError};
