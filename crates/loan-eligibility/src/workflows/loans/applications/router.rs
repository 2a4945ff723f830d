use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::super::scoring::{Breakdown, Decision, ScoringResult};
use super::domain::{ApplicantId, ApplicationId, FinancialProfile, LoanSubmission, ReviewAction};
use super::repository::{ApplicationRecord, ApplicationRepository, RepositoryError};
use super::service::{LoanApplicationService, LoanServiceError};

/// Wire shape returned for every successful scoring call.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    pub success: bool,
    pub score: f64,
    pub confidence: f64,
    pub decision: Decision,
    pub breakdown: Breakdown,
}

impl From<&ScoringResult> for ScoreResponse {
    fn from(result: &ScoringResult) -> Self {
        Self {
            success: true,
            score: result.final_score(),
            confidence: result.confidence(),
            decision: result.decision(),
            breakdown: *result.breakdown(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    pub application_id: ApplicationId,
    pub status: &'static str,
    #[serde(flatten)]
    pub result: ScoreResponse,
}

impl From<&ApplicationRecord> for SubmissionResponse {
    fn from(record: &ApplicationRecord) -> Self {
        Self {
            application_id: record.application_id.clone(),
            status: record.status.label(),
            result: ScoreResponse::from(&record.scoring),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub action: ReviewAction,
}

/// Router builder exposing HTTP endpoints for scoring, intake, and staff review.
pub fn application_router<R>(service: Arc<LoanApplicationService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/loans/score", post(score_handler::<R>))
        .route("/api/v1/loans/applications", post(submit_handler::<R>))
        .route(
            "/api/v1/loans/applications/:application_id",
            get(status_handler::<R>),
        )
        .route(
            "/api/v1/loans/applications/:application_id/rescore",
            post(rescore_handler::<R>),
        )
        .route(
            "/api/v1/loans/applications/:application_id/review",
            post(review_handler::<R>),
        )
        .route(
            "/api/v1/loans/applications/:application_id/disburse",
            post(disburse_handler::<R>),
        )
        .route(
            "/api/v1/loans/applicants/:applicant_id/applications",
            get(applicant_handler::<R>),
        )
        .route("/api/v1/loans/review-queue", get(review_queue_handler::<R>))
        .with_state(service)
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    axum::Json(profile): axum::Json<FinancialProfile>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.score_only(&profile) {
        Ok(result) => (StatusCode::OK, axum::Json(ScoreResponse::from(&result))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    axum::Json(submission): axum::Json<LoanSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => (
            StatusCode::CREATED,
            axum::Json(SubmissionResponse::from(&record)),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    record_response(service.get(&ApplicationId(application_id)))
}

pub(crate) async fn rescore_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    record_response(service.rescore(&ApplicationId(application_id)))
}

pub(crate) async fn review_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    record_response(service.review(&ApplicationId(application_id), request.action))
}

pub(crate) async fn disburse_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    record_response(service.disburse(&ApplicationId(application_id)))
}

pub(crate) async fn applicant_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    records_response(service.list_for_applicant(&ApplicantId(applicant_id)))
}

pub(crate) async fn review_queue_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    records_response(service.review_queue())
}

fn record_response(result: Result<ApplicationRecord, LoanServiceError>) -> Response {
    match result {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn records_response(result: Result<Vec<ApplicationRecord>, LoanServiceError>) -> Response {
    match result {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(ApplicationRecord::view).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: LoanServiceError) -> Response {
    let status = match &error {
        LoanServiceError::Intake(_) | LoanServiceError::Scoring(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        LoanServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        LoanServiceError::Repository(RepositoryError::Conflict)
        | LoanServiceError::InvalidTransition { .. }
        | LoanServiceError::AlreadyReviewed { .. } => StatusCode::CONFLICT,
        LoanServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
