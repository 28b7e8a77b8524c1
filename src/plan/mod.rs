//! Pension plans derived from projections, and their ranking
//!
//! - [`PlanBuilder`] turns a
//!   [`SimulationOutcome`](crate::projection::SimulationOutcome) into a [`Plan`]
//! - [`rank_plans`] picks the recommended plan against the baseline
//! - [`advantage_report`] summarises how the recommendation beats the baseline

mod builder;
mod ranking;
mod advantage;

pub use builder::{PlanBuilder, POOLED_ACCRUAL_RATE, REPORTING_UNIT};
pub use ranking::{rank_plans, score_against_baseline, RankedPlans};
pub use advantage::{advantage_report, AdvantageReport};

use serde::{Deserialize, Serialize};

/// Projected pension for one candidate retirement age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Display label
    pub name: String,

    pub age: u32,

    /// Set on exactly one plan by the ranker
    pub recommended: bool,

    /// Pooled plus account component
    pub monthly_pension: f64,

    /// Pooled component
    pub base_pension: f64,

    /// Account component
    pub account_pension: f64,

    /// Personal payment until retirement, in units of [`REPORTING_UNIT`]
    pub total_payment: f64,

    pub break_even_months: u32,

    /// Personal-account balance at retirement
    pub account_at_retire: f64,

    /// Contribution years at retirement
    pub total_years: f64,

    /// Payout divisor used for the account component
    #[serde(rename = "N")]
    pub payout_divisor: u32,

    pub summary: String,
}

impl Plan {
    /// Copy with the recommendation flag set to `recommended`
    pub fn marked(&self, recommended: bool) -> Plan {
        Plan {
            recommended,
            ..self.clone()
        }
    }
}
