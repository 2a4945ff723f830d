use super::super::domain::{ApplicationInput, Education, EmploymentType, MaritalStatus};
use super::domain::{ApplicantDetails, ApplicantId, FinancialProfile, LoanSubmission};

/// Decoding errors raised before a submission reaches the scorer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("applicant id is required")]
    MissingApplicantId,
    #[error("applicant full name is required")]
    MissingFullName,
    #[error("unrecognized marital status '{0}' (expected Yes or No)")]
    UnknownMaritalStatus(String),
    #[error("unrecognized education level '{0}' (expected Graduate or Not Graduate)")]
    UnknownEducation(String),
    #[error("credit history must be 0 or 1, found {0}")]
    InvalidCreditHistory(i64),
    #[error("loan term must be between 1 and {max} months, found {found}")]
    InvalidLoanTerm { max: u32, found: i64 },
}

pub const DEFAULT_MAX_TERM_MONTHS: u32 = 600;

/// Maps raw form encodings onto the typed scoring input.
///
/// Numeric plausibility (finite, non-negative, non-zero denominators) is left to the
/// scorer so both the stateless scoring route and intake report the same error.
#[derive(Debug, Clone)]
pub struct IntakeGuard {
    max_term_months: u32,
}

impl Default for IntakeGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TERM_MONTHS)
    }
}

impl IntakeGuard {
    pub fn new(max_term_months: u32) -> Self {
        Self {
            max_term_months: max_term_months.max(1),
        }
    }

    pub fn max_term_months(&self) -> u32 {
        self.max_term_months
    }

    pub fn applicant_from_submission(
        &self,
        submission: &LoanSubmission,
    ) -> Result<ApplicantDetails, IntakeError> {
        let applicant_id = submission.applicant_id.trim();
        if applicant_id.is_empty() {
            return Err(IntakeError::MissingApplicantId);
        }

        let full_name = submission.full_name.trim();
        if full_name.is_empty() {
            return Err(IntakeError::MissingFullName);
        }

        let gender = submission
            .gender
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(ApplicantDetails {
            applicant_id: ApplicantId(applicant_id.to_string()),
            full_name: full_name.to_string(),
            gender,
        })
    }

    pub fn input_from_profile(
        &self,
        profile: &FinancialProfile,
    ) -> Result<ApplicationInput, IntakeError> {
        let credit_history_good = match profile.credit_history {
            1 => true,
            0 => false,
            other => return Err(IntakeError::InvalidCreditHistory(other)),
        };

        let loan_term_months = u32::try_from(profile.loan_term_months)
            .ok()
            .filter(|term| (1..=self.max_term_months).contains(term))
            .ok_or(IntakeError::InvalidLoanTerm {
                max: self.max_term_months,
                found: profile.loan_term_months,
            })?;

        Ok(ApplicationInput {
            applicant_income: profile.applicant_income,
            coapplicant_income: profile.coapplicant_income.unwrap_or(0.0),
            loan_amount: profile.loan_amount,
            loan_term_months,
            credit_history_good,
            property_value: profile.property_value,
            other_monthly_debt: profile.other_monthly_debt.unwrap_or(0.0),
            education: parse_education(&profile.education)?,
            employment_type: parse_employment(&profile.employment_type),
            marital_status: parse_marital_status(&profile.married)?,
        })
    }
}

fn normalized(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn parse_marital_status(raw: &str) -> Result<MaritalStatus, IntakeError> {
    match normalized(raw).as_str() {
        "yes" | "married" => Ok(MaritalStatus::Married),
        "no" | "single" => Ok(MaritalStatus::Single),
        _ => Err(IntakeError::UnknownMaritalStatus(raw.to_string())),
    }
}

fn parse_education(raw: &str) -> Result<Education, IntakeError> {
    match normalized(raw).as_str() {
        "graduate" => Ok(Education::Graduate),
        "notgraduate" => Ok(Education::NotGraduate),
        _ => Err(IntakeError::UnknownEducation(raw.to_string())),
    }
}

// Unlisted employment types score as Other.
fn parse_employment(raw: &str) -> EmploymentType {
    match normalized(raw).as_str() {
        "salaried" => EmploymentType::Salaried,
        "selfemployed" => EmploymentType::SelfEmployed,
        _ => EmploymentType::Other,
    }
}
