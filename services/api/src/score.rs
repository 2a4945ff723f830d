use crate::infra::build_service;
use clap::Args;
use loan_eligibility::config::{parse_annual_rate, AppConfig, LendingConfig};
use loan_eligibility::error::AppError;
use loan_eligibility::workflows::loans::applications::{FinancialProfile, ScoreResponse};
use loan_eligibility::workflows::loans::scoring::CreditHistory;
use loan_eligibility::workflows::loans::{FactorDetail, ScoringResult};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the financial profile. Cannot be combined with the inline
    /// profile flags.
    #[arg(
        long,
        conflicts_with_all = [
            "applicant_income",
            "coapplicant_income",
            "loan_amount",
            "loan_term_months",
            "credit_history",
            "property_value",
            "other_monthly_debt",
            "married",
            "education",
            "employment_type",
        ]
    )]
    pub(crate) file: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    /// Annual rate used for the payment estimate, a decimal in [0, 1) (e.g. 0.065)
    #[arg(long, value_parser = parse_annual_rate)]
    pub(crate) annual_rate: Option<f64>,
    /// Print the JSON response body instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProfileArgs {
    /// Applicant monthly income
    #[arg(long, required_unless_present = "file")]
    pub(crate) applicant_income: Option<f64>,
    /// Co-applicant monthly income
    #[arg(long)]
    pub(crate) coapplicant_income: Option<f64>,
    /// Requested principal
    #[arg(long, required_unless_present = "file")]
    pub(crate) loan_amount: Option<f64>,
    /// Loan term in months
    #[arg(long, required_unless_present = "file")]
    pub(crate) loan_term_months: Option<i64>,
    /// 1 for a good credit history, 0 otherwise
    #[arg(long, default_value_t = 1)]
    pub(crate) credit_history: i64,
    /// Appraised property value
    #[arg(long, required_unless_present = "file")]
    pub(crate) property_value: Option<f64>,
    /// Existing monthly debt payments
    #[arg(long)]
    pub(crate) other_monthly_debt: Option<f64>,
    /// Yes/No or Married/Single
    #[arg(long, required_unless_present = "file")]
    pub(crate) married: Option<String>,
    /// Graduate or Not Graduate
    #[arg(long, required_unless_present = "file")]
    pub(crate) education: Option<String>,
    /// Salaried, Self-Employed, or any other label
    #[arg(long, required_unless_present = "file")]
    pub(crate) employment_type: Option<String>,
}

impl ProfileArgs {
    fn into_profile(self) -> Result<FinancialProfile, AppError> {
        Ok(FinancialProfile {
            married: required(self.married, "married")?,
            education: required(self.education, "education")?,
            employment_type: required(self.employment_type, "employment-type")?,
            applicant_income: required(self.applicant_income, "applicant-income")?,
            coapplicant_income: self.coapplicant_income,
            loan_amount: required(self.loan_amount, "loan-amount")?,
            loan_term_months: required(self.loan_term_months, "loan-term-months")?,
            credit_history: self.credit_history,
            property_value: required(self.property_value, "property-value")?,
            other_monthly_debt: self.other_monthly_debt,
        })
    }
}

fn required<T>(value: Option<T>, flag: &str) -> Result<T, AppError> {
    value.ok_or_else(|| {
        AppError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("--{flag} is required unless --file is given"),
        ))
    })
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        file,
        profile,
        annual_rate,
        json,
    } = args;

    let profile = match file {
        Some(path) => read_profile(&path)?,
        None => profile.into_profile()?,
    };

    let mut lending = AppConfig::load()?.lending;
    if let Some(rate) = annual_rate {
        lending.scoring.annual_interest_rate = rate;
    }

    let result = score_profile(&profile, &lending)?;
    if json {
        let body = serde_json::to_string_pretty(&ScoreResponse::from(&result))?;
        println!("{body}");
    } else {
        render_result(&result);
    }
    Ok(())
}

fn read_profile(path: &Path) -> Result<FinancialProfile, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn score_profile(
    profile: &FinancialProfile,
    lending: &LendingConfig,
) -> Result<ScoringResult, AppError> {
    let service = build_service(lending);
    Ok(service.score_only(profile)?)
}

pub(crate) fn render_result(result: &ScoringResult) {
    println!(
        "Decision: {} (score {:.4}, confidence {:.2})",
        result.decision().label(),
        result.final_score(),
        result.confidence()
    );
    println!("Factor breakdown");
    for (factor, entry) in result.breakdown().entries() {
        println!(
            "- {:<14} {:.2} x {:.2} = {:.4} ({})",
            factor.key(),
            entry.score(),
            entry.weight(),
            entry.contribution(),
            describe(entry.detail())
        );
    }
}

pub(crate) fn describe(detail: FactorDetail) -> String {
    match detail {
        FactorDetail::History(CreditHistory::Good) => "good history".to_string(),
        FactorDetail::History(CreditHistory::Poor) => "poor history".to_string(),
        FactorDetail::Ratio(ratio) => format!("ratio {ratio:.3}"),
        FactorDetail::Level(level) => level.label().to_string(),
        FactorDetail::Type(kind) => kind.label().to_string(),
        FactorDetail::Status(status) => status.label().to_string(),
    }
}
