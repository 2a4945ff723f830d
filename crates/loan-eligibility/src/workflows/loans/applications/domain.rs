use serde::{Deserialize, Serialize};

use super::super::scoring::{Decision, APPROVAL_THRESHOLD, REVIEW_THRESHOLD};

/// Identifier wrapper for stored loan applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier of the account that submitted an application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Identity fields captured alongside the financial profile. Never read by the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantDetails {
    pub applicant_id: ApplicantId,
    pub full_name: String,
    pub gender: Option<String>,
}

/// Lifecycle status stored on an application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Disbursed,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Disbursed => "disbursed",
        }
    }
}

/// Maps a scoring decision onto the stored status.
///
/// `Source` keeps only approval-eligible applications pending for staff, so both
/// `UnderReview` and `Rejected` land as `rejected`. `PreserveReview` also queues
/// borderline applications for staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    #[default]
    Source,
    PreserveReview,
}

impl StatusPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "source" | "coarse" => Some(Self::Source),
            "preserve_review" | "preserve-review" | "three_way" => Some(Self::PreserveReview),
            _ => None,
        }
    }

    pub const fn status_for(self, decision: Decision) -> ApplicationStatus {
        match (self, decision) {
            (_, Decision::Approved) => ApplicationStatus::Pending,
            (StatusPolicy::PreserveReview, Decision::UnderReview) => ApplicationStatus::Pending,
            _ => ApplicationStatus::Rejected,
        }
    }

    /// Lowest score that can sit in the staff review queue.
    pub const fn review_floor(self) -> f64 {
        match self {
            StatusPolicy::Source => APPROVAL_THRESHOLD,
            StatusPolicy::PreserveReview => REVIEW_THRESHOLD,
        }
    }
}

/// Staff verdict on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub const fn outcome(self) -> (ApplicationStatus, Decision) {
        match self {
            ReviewAction::Approve => (ApplicationStatus::Approved, Decision::Approved),
            ReviewAction::Reject => (ApplicationStatus::Rejected, Decision::Rejected),
        }
    }
}

/// Financial fields as submitted by the intake form, before enum decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub married: String,
    pub education: String,
    pub employment_type: String,
    pub applicant_income: f64,
    #[serde(default)]
    pub coapplicant_income: Option<f64>,
    pub loan_amount: f64,
    pub loan_term_months: i64,
    #[serde(default = "default_credit_history")]
    pub credit_history: i64,
    pub property_value: f64,
    #[serde(default)]
    pub other_monthly_debt: Option<f64>,
}

fn default_credit_history() -> i64 {
    1
}

/// Full intake payload: applicant identity plus the financial profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSubmission {
    pub applicant_id: String,
    pub full_name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(flatten)]
    pub profile: FinancialProfile,
}
