use loan_eligibility::config::LendingConfig;
use loan_eligibility::workflows::loans::applications::{
    newest_first, ApplicantId, ApplicationId, ApplicationRecord, ApplicationRepository,
    ApplicationStatus, LoanApplicationService, RepositoryError, StatusPolicy,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
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
        if guard.contains_key(&record.application_id) {
            guard.insert(record.application_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
            .filter(|record| record.status == ApplicationStatus::Pending && record.score() >= min_score)
            .cloned()
            .collect();
        newest_first(&mut records);
        Ok(records)
    }
}

pub(crate) fn build_service(
    lending: &LendingConfig,
) -> LoanApplicationService<InMemoryApplicationRepository> {
    LoanApplicationService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        lending.scoring,
        lending.status_policy,
    )
}

pub(crate) fn parse_status_policy(raw: &str) -> Result<StatusPolicy, String> {
    StatusPolicy::parse(raw)
        .ok_or_else(|| format!("unknown status policy '{raw}' (expected source or preserve_review)"))
}
