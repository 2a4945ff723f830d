use super::super::domain::{ApplicationInput, Education, EmploymentType, MaritalStatus};
use super::config::ScoringConfig;
use super::{Breakdown, CreditHistory, FactorDetail, FactorResult, ScoringError};

pub const CREDIT_HISTORY_WEIGHT: f64 = 0.25;
pub const DEBT_TO_INCOME_WEIGHT: f64 = 0.30;
pub const LOAN_TO_VALUE_WEIGHT: f64 = 0.20;
pub const EDUCATION_WEIGHT: f64 = 0.10;
pub const EMPLOYMENT_WEIGHT: f64 = 0.10;
pub const MARITAL_STATUS_WEIGHT: f64 = 0.05;

/// Upper bounds (inclusive) paired with the score awarded inside each band.
const DEBT_TO_INCOME_BANDS: [(f64, f64); 4] = [(0.28, 1.0), (0.36, 0.8), (0.43, 0.6), (0.50, 0.4)];
const DEBT_TO_INCOME_FLOOR: f64 = 0.2;

const LOAN_TO_VALUE_BANDS: [(f64, f64); 3] = [(0.80, 1.0), (0.90, 0.7), (0.95, 0.5)];
const LOAN_TO_VALUE_FLOOR: f64 = 0.3;

pub(crate) fn validate(input: &ApplicationInput) -> Result<(), ScoringError> {
    non_negative("applicantIncome", input.applicant_income)?;
    non_negative("coapplicantIncome", input.coapplicant_income)?;
    non_negative("otherMonthlyDebt", input.other_monthly_debt)?;
    positive("loanAmount", input.loan_amount)?;
    positive("propertyValue", input.property_value)?;

    let total_income = input.total_income();
    if !total_income.is_finite() || total_income <= 0.0 {
        return Err(ScoringError::invalid(
            "totalIncome",
            "applicant and co-applicant income must sum to more than zero",
        ));
    }

    if input.loan_term_months == 0 {
        return Err(ScoringError::invalid(
            "loanTermMonths",
            "must be at least one month",
        ));
    }

    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ScoringError> {
    if !value.is_finite() {
        return Err(ScoringError::invalid(field, format!("must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(ScoringError::invalid(field, format!("must not be negative, got {value}")));
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ScoringError> {
    non_negative(field, value)?;
    if value == 0.0 {
        return Err(ScoringError::invalid(field, "must be greater than zero"));
    }
    Ok(())
}

/// Level payment for a fixed-rate amortizing loan.
pub fn monthly_payment(principal: f64, monthly_rate: f64, term_months: u32) -> f64 {
    let periods = f64::from(term_months);
    if monthly_rate == 0.0 {
        return principal / periods;
    }

    // (1 + r)^n - 1 without the cancellation that rounds tiny rates down to zero.
    let growth_minus_one = (periods * monthly_rate.ln_1p()).exp_m1();
    if growth_minus_one == 0.0 {
        return principal / periods;
    }
    if !growth_minus_one.is_finite() {
        // Interest-only limit for terms long enough to overflow the growth factor.
        return principal * monthly_rate;
    }

    principal * monthly_rate * (1.0 + 1.0 / growth_minus_one)
}

pub(crate) fn debt_to_income_ratio(input: &ApplicationInput, config: &ScoringConfig) -> f64 {
    let payment = monthly_payment(
        input.loan_amount,
        config.monthly_rate(),
        input.loan_term_months,
    );
    (payment + input.other_monthly_debt) / input.total_income()
}

pub(crate) fn loan_to_value_ratio(input: &ApplicationInput) -> f64 {
    input.loan_amount / input.property_value
}

fn banded(ratio: f64, bands: &[(f64, f64)], floor: f64) -> f64 {
    bands
        .iter()
        .find(|(upper, _)| ratio <= *upper)
        .map(|(_, score)| *score)
        .unwrap_or(floor)
}

pub fn debt_to_income_score(ratio: f64) -> f64 {
    banded(ratio, &DEBT_TO_INCOME_BANDS, DEBT_TO_INCOME_FLOOR)
}

pub fn loan_to_value_score(ratio: f64) -> f64 {
    banded(ratio, &LOAN_TO_VALUE_BANDS, LOAN_TO_VALUE_FLOOR)
}

pub fn credit_history_score(history: CreditHistory) -> f64 {
    match history {
        CreditHistory::Good => 1.0,
        CreditHistory::Poor => 0.0,
    }
}

pub fn education_score(education: Education) -> f64 {
    match education {
        Education::Graduate => 1.0,
        Education::NotGraduate => 0.7,
    }
}

pub fn employment_score(employment: EmploymentType) -> f64 {
    match employment {
        EmploymentType::Salaried => 1.0,
        EmploymentType::SelfEmployed => 0.8,
        EmploymentType::Other => 0.6,
    }
}

pub fn marital_status_score(status: MaritalStatus) -> f64 {
    match status {
        MaritalStatus::Married => 1.0,
        MaritalStatus::Single => 0.8,
    }
}

/// Evaluates the six factors independently. Callers validate the input first.
pub(crate) fn score_factors(input: &ApplicationInput, config: &ScoringConfig) -> Breakdown {
    let history = CreditHistory::from_flag(input.credit_history_good);
    let dti = debt_to_income_ratio(input, config);
    let ltv = loan_to_value_ratio(input);

    Breakdown {
        credit_history: FactorResult::new(
            FactorDetail::History(history),
            credit_history_score(history),
            CREDIT_HISTORY_WEIGHT,
        ),
        debt_to_income: FactorResult::new(
            FactorDetail::Ratio(dti),
            debt_to_income_score(dti),
            DEBT_TO_INCOME_WEIGHT,
        ),
        loan_to_value: FactorResult::new(
            FactorDetail::Ratio(ltv),
            loan_to_value_score(ltv),
            LOAN_TO_VALUE_WEIGHT,
        ),
        education: FactorResult::new(
            FactorDetail::Level(input.education),
            education_score(input.education),
            EDUCATION_WEIGHT,
        ),
        employment: FactorResult::new(
            FactorDetail::Type(input.employment_type),
            employment_score(input.employment_type),
            EMPLOYMENT_WEIGHT,
        ),
        marital_status: FactorResult::new(
            FactorDetail::Status(input.marital_status),
            marital_status_score(input.marital_status),
            MARITAL_STATUS_WEIGHT,
        ),
    }
}
