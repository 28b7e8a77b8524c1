//! Per-city contribution and benefit parameters

use serde::{Deserialize, Serialize};

/// Contribution rates, interest and base bounds for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPolicy {
    /// Lookup key
    pub city: String,

    /// Average-salary base of the pooled pension formula
    pub avg_salary: f64,

    /// Personal-account annual interest rate
    pub pension_interest_rate: f64,

    /// Lowest allowed monthly contribution base
    pub base_min: f64,

    /// Highest allowed monthly contribution base
    pub base_max: f64,

    /// Employer contribution rate
    pub company_rate: f64,

    /// Employee contribution rate, credited to the personal account
    pub personal_rate: f64,

    /// Monthly unemployment benefit
    pub unemployment_benefit: f64,

    /// Longest period unemployment benefit is paid, in months
    pub unemployment_cutoff_month: u32,

    /// Means-tested monthly contribution subsidy
    pub subsidy_amount: f64,
}

impl CityPolicy {
    /// Beijing 2025 reference parameters
    pub fn beijing() -> Self {
        Self {
            city: "Beijing".to_string(),
            avg_salary: 12049.0,
            pension_interest_rate: 0.04,
            base_min: 7162.0,
            base_max: 35811.0,
            company_rate: 0.16,
            personal_rate: 0.08,
            unemployment_benefit: 2286.0,
            unemployment_cutoff_month: 24,
            subsidy_amount: 669.58,
        }
    }

    /// Same parameters under a different key
    pub fn renamed(&self, city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..self.clone()
        }
    }

    /// Clamp a declared base into the city's allowed range
    pub fn clamp_base(&self, base: f64) -> f64 {
        base.max(self.base_min).min(self.base_max)
    }
}
