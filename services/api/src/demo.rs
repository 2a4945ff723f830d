use crate::infra::{build_service, parse_status_policy};
use crate::score::describe;
use chrono::SecondsFormat;
use clap::Args;
use loan_eligibility::config::{parse_annual_rate, LendingConfig};
use loan_eligibility::error::AppError;
use loan_eligibility::workflows::loans::applications::{
    ApplicationRecord, FinancialProfile, LoanSubmission, ReviewAction, StatusPolicy,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Decision-to-status mapping: source or preserve_review
    #[arg(long, value_parser = parse_status_policy, default_value = "source")]
    pub(crate) policy: StatusPolicy,
    /// Annual rate used for the payment estimate, a decimal in [0, 1) (defaults to 0.08)
    #[arg(long, value_parser = parse_annual_rate)]
    pub(crate) annual_rate: Option<f64>,
    /// Stop after scoring; skip the staff review and disbursement steps.
    #[arg(long)]
    pub(crate) skip_review: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        policy,
        annual_rate,
        skip_review,
    } = args;

    let mut lending = LendingConfig {
        status_policy: policy,
        ..LendingConfig::default()
    };
    if let Some(rate) = annual_rate {
        lending.scoring.annual_interest_rate = rate;
    }
    let service = build_service(&lending);

    println!("Loan eligibility demo");
    println!(
        "Status policy: {:?} | payment estimate at {:.2}% annual",
        lending.status_policy,
        lending.scoring.annual_interest_rate * 100.0
    );

    println!("\nSubmissions");
    for submission in demo_submissions() {
        let name = submission.full_name.clone();
        match service.submit(submission) {
            Ok(record) => render_record(&record),
            Err(err) => println!("- {name}: submission rejected ({err}); nothing stored"),
        }
    }

    let queue = service.review_queue()?;
    if queue.is_empty() {
        println!("\nReview queue: empty");
        return Ok(());
    }
    println!(
        "\nReview queue (score >= {:.2})",
        lending.status_policy.review_floor()
    );
    for record in &queue {
        println!(
            "- {} {} | score {:.2}",
            record.application_id.0,
            record.applicant.full_name,
            record.score()
        );
    }

    if skip_review {
        return Ok(());
    }

    println!("\nStaff review");
    for (index, record) in queue.iter().enumerate() {
        let action = if index == 0 {
            ReviewAction::Approve
        } else {
            ReviewAction::Reject
        };
        let reviewed = service.review(&record.application_id, action)?;
        println!(
            "- {} -> {} ({})",
            reviewed.application_id.0,
            reviewed.status.label(),
            reviewed.decision_rationale()
        );
    }

    let approved = &queue[0].application_id;
    let disbursed = service.disburse(approved)?;
    println!(
        "- {} -> {}",
        disbursed.application_id.0,
        disbursed.status.label()
    );

    match serde_json::to_string_pretty(&disbursed.view()) {
        Ok(json) => println!("\nStored application payload:\n{json}"),
        Err(err) => println!("\nStored application payload unavailable: {err}"),
    }

    Ok(())
}

fn render_record(record: &ApplicationRecord) {
    println!(
        "- {} {} at {} -> status {} | {}",
        record.application_id.0,
        record.applicant.full_name,
        record.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        record.status.label(),
        record.decision_rationale()
    );
    for (factor, entry) in record.scoring.breakdown().entries() {
        println!(
            "    {:<14} {:.2} x {:.2} ({})",
            factor.key(),
            entry.score(),
            entry.weight(),
            describe(entry.detail())
        );
    }
}

fn demo_submissions() -> Vec<LoanSubmission> {
    let salaried = FinancialProfile {
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
    };
    let stretched = FinancialProfile {
        married: "No".to_string(),
        education: "Not Graduate".to_string(),
        employment_type: "Contractor".to_string(),
        applicant_income: 2_000.0,
        coapplicant_income: None,
        loan_amount: 200_000.0,
        loan_term_months: 360,
        credit_history: 1,
        property_value: 200_000.0,
        other_monthly_debt: Some(150.0),
    };
    let self_employed = FinancialProfile {
        married: "No".to_string(),
        employment_type: "Self-Employed".to_string(),
        applicant_income: 6_000.0,
        coapplicant_income: None,
        loan_amount: 150_000.0,
        loan_term_months: 240,
        property_value: 180_000.0,
        other_monthly_debt: Some(300.0),
        ..salaried.clone()
    };
    let unappraised = FinancialProfile {
        property_value: 0.0,
        ..salaried.clone()
    };

    vec![
        submission("applicant-001", "Amara Okafor", salaried),
        submission("applicant-002", "Diego Fernandes", stretched),
        submission("applicant-003", "Hana Kobayashi", self_employed),
        submission("applicant-004", "Lukas Becker", unappraised),
    ]
}

fn submission(applicant_id: &str, full_name: &str, profile: FinancialProfile) -> LoanSubmission {
    LoanSubmission {
        applicant_id: applicant_id.to_string(),
        full_name: full_name.to_string(),
        gender: None,
        profile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_runs_under_both_policies() {
        for policy in [StatusPolicy::Source, StatusPolicy::PreserveReview] {
            let args = DemoArgs {
                policy,
                annual_rate: None,
                skip_review: false,
            };
            run_demo(args).expect("demo completes");
        }
    }

    #[test]
    fn demo_includes_an_invalid_submission() {
        let invalid = demo_submissions()
            .into_iter()
            .filter(|submission| submission.profile.property_value <= 0.0)
            .count();
        assert_eq!(invalid, 1);
    }
}
