use serde::{Deserialize, Serialize};

/// Financial profile consumed by the scorer. Amounts are monthly figures except
/// `loan_amount` and `property_value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInput {
    pub applicant_income: f64,
    #[serde(default)]
    pub coapplicant_income: f64,
    pub loan_amount: f64,
    pub loan_term_months: u32,
    pub credit_history_good: bool,
    pub property_value: f64,
    #[serde(default)]
    pub other_monthly_debt: f64,
    pub education: Education,
    pub employment_type: EmploymentType,
    pub marital_status: MaritalStatus,
}

impl ApplicationInput {
    pub fn total_income(&self) -> f64 {
        self.applicant_income + self.coapplicant_income
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Education {
    Graduate,
    #[serde(rename = "Not Graduate")]
    NotGraduate,
}

impl Education {
    pub const fn label(self) -> &'static str {
        match self {
            Education::Graduate => "Graduate",
            Education::NotGraduate => "Not Graduate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    Salaried,
    #[serde(rename = "Self-Employed")]
    SelfEmployed,
    Other,
}

impl EmploymentType {
    pub const fn label(self) -> &'static str {
        match self {
            EmploymentType::Salaried => "Salaried",
            EmploymentType::SelfEmployed => "Self-Employed",
            EmploymentType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaritalStatus {
    Married,
    Single,
}

impl MaritalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MaritalStatus::Married => "Married",
            MaritalStatus::Single => "Single",
        }
    }
}
