use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::loans::applications::domain::{
    ApplicantId, ApplicationId, ApplicationStatus, FinancialProfile, LoanSubmission, StatusPolicy,
};
use crate::workflows::loans::applications::repository::{
    newest_first, ApplicationRecord, ApplicationRepository, RepositoryError,
};
use crate::workflows::loans::applications::{application_router, LoanApplicationService};
use crate::workflows::loans::scoring::ScoringConfig;

/// Salaried married graduate with good credit, low DTI, and 50% LTV.
pub(super) fn strong_profile() -> FinancialProfile {
    FinancialProfile {
        married: "Yes".to_string(),
        education: "Graduate".to_string(),
        employment_type: "Salaried".to_string(),
        applicant_income: 8_000.0,
        coapplicant_income: Some(2_000.0),
        loan_amount: 200_000.0,
        loan_term_months: 360,
        credit_history: 1,
        property_value: 400_000.0,
        other_monthly_debt: None,
    }
}

/// Every factor in its lowest tier; scores 0.29.
pub(super) fn weak_profile() -> FinancialProfile {
    FinancialProfile {
        married: "No".to_string(),
        education: "Not Graduate".to_string(),
        employment_type: "Contractor".to_string(),
        applicant_income: 2_000.0,
        coapplicant_income: None,
        loan_amount: 200_000.0,
        loan_term_months: 360,
        credit_history: 0,
        property_value: 200_000.0,
        other_monthly_debt: Some(150.0),
    }
}

/// Weak ratios with good credit; scores 0.54.
pub(super) fn borderline_profile() -> FinancialProfile {
    FinancialProfile {
        credit_history: 1,
        ..weak_profile()
    }
}

pub(super) fn submission_for(applicant: &str, profile: FinancialProfile) -> LoanSubmission {
    LoanSubmission {
        applicant_id: applicant.to_string(),
        full_name: "Priya Raman".to_string(),
        gender: Some("Female".to_string()),
        profile,
    }
}

pub(super) fn submission() -> LoanSubmission {
    submission_for("user-1", strong_profile())
}

pub(super) fn build_service() -> (LoanApplicationService<MemoryRepository>, Arc<MemoryRepository>) {
    build_service_with_policy(StatusPolicy::Source)
}

pub(super) fn build_service_with_policy(
    policy: StatusPolicy,
) -> (LoanApplicationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LoanApplicationService::new(repository.clone(), ScoringConfig::default(), policy);
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.application_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_for_applicant(
        &self,
        applicant: &ApplicantId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard
            .values()
            .filter(|record| &record.applicant.applicant_id == applicant)
            .cloned()
            .collect();
        newest_first(&mut records);
        Ok(records)
    }

    fn pending_review(&self, min_score: f64) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard
            .values()
            .filter(|record| record.status == ApplicationStatus::Pending)
            .filter(|record| record.score() >= min_score)
            .cloned()
            .collect();
        newest_first(&mut records);
        Ok(records)
    }
}

pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn list_for_applicant(
        &self,
        _applicant: &ApplicantId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn pending_review(&self, _min_score: f64) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_for_applicant(
        &self,
        _applicant: &ApplicantId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending_review(&self, _min_score: f64) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn application_router_with_service(
    service: LoanApplicationService<MemoryRepository>,
) -> axum::Router {
    application_router(Arc::new(service))
}
