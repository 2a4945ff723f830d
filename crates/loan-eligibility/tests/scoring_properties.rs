use loan_eligibility::workflows::loans::scoring::{APPROVAL_THRESHOLD, REVIEW_THRESHOLD};
use loan_eligibility::workflows::loans::{
    score, ApplicationInput, Decision, Education, EmploymentType, MaritalStatus,
};
use proptest::prelude::*;

fn education() -> impl Strategy<Value = Education> {
    prop_oneof![Just(Education::Graduate), Just(Education::NotGraduate)]
}

fn employment() -> impl Strategy<Value = EmploymentType> {
    prop_oneof![
        Just(EmploymentType::Salaried),
        Just(EmploymentType::SelfEmployed),
        Just(EmploymentType::Other),
    ]
}

fn marital_status() -> impl Strategy<Value = MaritalStatus> {
    prop_oneof![Just(MaritalStatus::Married), Just(MaritalStatus::Single)]
}

prop_compose! {
    fn valid_input()(
        applicant_income in 1.0f64..50_000.0,
        coapplicant_income in 0.0f64..20_000.0,
        loan_amount in 1_000.0f64..2_000_000.0,
        loan_term_months in 1u32..=600,
        credit_history_good in any::<bool>(),
        property_value in 1_000.0f64..3_000_000.0,
        other_monthly_debt in 0.0f64..10_000.0,
        education in education(),
        employment_type in employment(),
        marital_status in marital_status(),
    ) -> ApplicationInput {
        ApplicationInput {
            applicant_income,
            coapplicant_income,
            loan_amount,
            loan_term_months,
            credit_history_good,
            property_value,
            other_monthly_debt,
            education,
            employment_type,
            marital_status,
        }
    }
}

proptest! {
    #[test]
    fn final_score_is_bounded_and_sums_contributions(input in valid_input()) {
        let result = score(&input).expect("generated input is valid");

        prop_assert!((0.0..=1.0).contains(&result.final_score()));
        prop_assert!((result.final_score() - result.breakdown().total_contribution()).abs() < 1e-9);
        prop_assert!((result.breakdown().total_weight() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn decision_and_confidence_follow_score_bands(input in valid_input()) {
        let result = score(&input).expect("generated input is valid");
        let final_score = result.final_score();

        let expected = if final_score >= APPROVAL_THRESHOLD {
            Decision::Approved
        } else if final_score >= REVIEW_THRESHOLD {
            Decision::UnderReview
        } else {
            Decision::Rejected
        };
        prop_assert_eq!(result.decision(), expected);
        prop_assert_eq!(result.confidence(), expected.confidence());
    }

    #[test]
    fn scoring_is_idempotent(input in valid_input()) {
        let first = score(&input).expect("generated input is valid");
        let second = score(&input).expect("generated input is valid");

        prop_assert_eq!(first, second);
    }

    #[test]
    fn contributions_are_score_times_weight(input in valid_input()) {
        let result = score(&input).expect("generated input is valid");

        for (_, entry) in result.breakdown().entries() {
            prop_assert!((0.0..=1.0).contains(&entry.score()));
            prop_assert!((entry.contribution() - entry.score() * entry.weight()).abs() < 1e-12);
        }
    }
}
