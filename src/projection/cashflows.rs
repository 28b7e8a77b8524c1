//! Output structures for contribution projections

use serde::{Deserialize, Serialize};

use crate::profile::{NormalizedProfile, YearMonth};

/// A single month of projection output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRow {
    /// Projection month (1-indexed)
    pub month: u32,
    pub calendar_month: Option<YearMonth>,

    // Cashflows
    pub personal_payment: f64,
    pub account_contribution: f64,
    pub interest_credited: f64,

    // Running totals after the month
    pub account_balance: f64,
    pub total_years: f64,
    pub total_personal_payment: f64,
}

/// Result of projecting one candidate retirement age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutcome {
    pub retire_age: u32,

    /// Out-of-pocket payments accumulated until retirement
    pub total_personal_payment: f64,

    /// Personal-account balance at retirement
    pub account_balance: f64,

    /// Contribution years at retirement
    pub total_years: f64,

    pub months_simulated: u32,

    /// The month cap stopped the projection before the retirement date
    pub truncated: bool,

    /// Monthly rows, only when detailed output is enabled
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<ContributionRow>,
}

impl SimulationOutcome {
    /// Outcome for an age already reached: current totals, no payment
    pub fn unchanged(profile: &NormalizedProfile, retire_age: u32) -> Self {
        Self {
            retire_age,
            total_personal_payment: 0.0,
            account_balance: profile.account_balance,
            total_years: profile.paid_years,
            months_simulated: 0,
            truncated: false,
            rows: Vec::new(),
        }
    }

    /// Total interest credited, when rows were recorded
    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest_credited).sum()
    }

    /// Number of months with a positive account contribution, when rows were recorded
    pub fn contributing_months(&self) -> usize {
        self.rows.iter().filter(|r| r.account_contribution > 0.0).count()
    }
}
