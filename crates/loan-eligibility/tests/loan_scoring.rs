use loan_eligibility::workflows::loans::scoring::{monthly_payment, ScoringConfig};
use loan_eligibility::workflows::loans::{
    score, ApplicationInput, Decision, Education, EmploymentType, FactorDetail, FactorName,
    MaritalStatus, Scorer, ScoringError,
};

fn prime_applicant() -> ApplicationInput {
    ApplicationInput {
        applicant_income: 8_000.0,
        coapplicant_income: 2_000.0,
        loan_amount: 200_000.0,
        loan_term_months: 360,
        credit_history_good: true,
        property_value: 400_000.0,
        other_monthly_debt: 0.0,
        education: Education::Graduate,
        employment_type: EmploymentType::Salaried,
        marital_status: MaritalStatus::Married,
    }
}

fn lowest_tier_applicant() -> ApplicationInput {
    ApplicationInput {
        applicant_income: 2_000.0,
        coapplicant_income: 0.0,
        loan_amount: 200_000.0,
        loan_term_months: 360,
        credit_history_good: false,
        property_value: 200_000.0,
        other_monthly_debt: 150.0,
        education: Education::NotGraduate,
        employment_type: EmploymentType::Other,
        marital_status: MaritalStatus::Single,
    }
}

#[test]
fn prime_applicant_is_approved_with_full_marks() {
    let result = score(&prime_applicant()).expect("valid input scores");

    assert_eq!(result.final_score(), 1.0);
    assert_eq!(result.confidence(), 0.85);
    assert_eq!(result.decision(), Decision::Approved);
    for (factor, entry) in result.breakdown().entries() {
        assert_eq!(entry.score(), 1.0, "{} should be in its top tier", factor.key());
    }
}

#[test]
fn lowest_tier_applicant_is_rejected() {
    let result = score(&lowest_tier_applicant()).expect("valid input scores");

    assert!((result.final_score() - 0.29).abs() < 1e-9);
    assert_eq!(result.confidence(), 0.60);
    assert_eq!(result.decision(), Decision::Rejected);

    let breakdown = result.breakdown();
    assert_eq!(breakdown.get(FactorName::CreditHistory).score(), 0.0);
    assert_eq!(breakdown.get(FactorName::DebtToIncome).score(), 0.2);
    assert_eq!(breakdown.get(FactorName::LoanToValue).score(), 0.3);
    assert_eq!(breakdown.get(FactorName::Education).score(), 0.7);
    assert_eq!(breakdown.get(FactorName::Employment).score(), 0.6);
    assert_eq!(breakdown.get(FactorName::MaritalStatus).score(), 0.8);
}

#[test]
fn good_credit_alone_lifts_lowest_tier_into_review() {
    let input = ApplicationInput {
        credit_history_good: true,
        ..lowest_tier_applicant()
    };

    let result = score(&input).expect("valid input scores");

    assert_eq!(result.decision(), Decision::UnderReview);
    assert_eq!(result.confidence(), 0.70);
}

#[test]
fn breakdown_reports_factor_details() {
    let result = score(&lowest_tier_applicant()).expect("valid input scores");
    let breakdown = result.breakdown();

    let payment = monthly_payment(200_000.0, 0.08 / 12.0, 360);
    match breakdown.get(FactorName::DebtToIncome).detail() {
        FactorDetail::Ratio(ratio) => assert!((ratio - (payment + 150.0) / 2_000.0).abs() < 1e-9),
        other => panic!("expected ratio detail, got {other:?}"),
    }
    match breakdown.get(FactorName::LoanToValue).detail() {
        FactorDetail::Ratio(ratio) => assert_eq!(ratio, 1.0),
        other => panic!("expected ratio detail, got {other:?}"),
    }
    assert!(matches!(
        breakdown.get(FactorName::Employment).detail(),
        FactorDetail::Type(EmploymentType::Other)
    ));
}

#[test]
fn higher_configured_rate_lowers_debt_to_income_tier() {
    let input = ApplicationInput {
        applicant_income: 4_000.0,
        coapplicant_income: 0.0,
        ..prime_applicant()
    };

    let standard = Scorer::default().score(&input).expect("scores");
    let expensive = Scorer::new(ScoringConfig {
        annual_interest_rate: 0.20,
    })
    .score(&input)
    .expect("scores");

    assert!(
        expensive.breakdown().get(FactorName::DebtToIncome).score()
            < standard.breakdown().get(FactorName::DebtToIncome).score()
    );
    assert!(expensive.final_score() < standard.final_score());
}

#[test]
fn degenerate_denominators_are_rejected() {
    let zero_income = ApplicationInput {
        applicant_income: 0.0,
        coapplicant_income: 0.0,
        ..prime_applicant()
    };
    let zero_property = ApplicationInput {
        property_value: 0.0,
        ..prime_applicant()
    };

    assert_eq!(
        score(&zero_income).map_err(|err| err.field()),
        Err("totalIncome")
    );
    assert!(matches!(
        score(&zero_property),
        Err(ScoringError::InvalidInput {
            field: "propertyValue",
            ..
        })
    ));
}

#[test]
fn non_finite_amounts_are_rejected() {
    let input = ApplicationInput {
        other_monthly_debt: f64::INFINITY,
        ..prime_applicant()
    };

    assert_eq!(score(&input).map_err(|err| err.field()), Err("otherMonthlyDebt"));
}
