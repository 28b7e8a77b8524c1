//! Running totals tracked while stepping one projection

use crate::assumptions::CityPolicy;
use crate::profile::{EmploymentStatus, NormalizedProfile, YearMonth};

/// State of an applicant at a point in time during projection
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Months simulated so far
    pub month: u32,

    /// Calendar position, for calendar timelines
    pub calendar_month: Option<YearMonth>,

    /// Personal-account balance
    pub account_balance: f64,

    /// Contribution years accrued, including the starting years
    pub total_years: f64,

    /// Out-of-pocket payments made since the projection started
    pub total_personal_payment: f64,

    /// Remaining months of unemployment benefit
    pub unemployment_months_left: u32,
}

impl SimulationState {
    /// Initialize state from a profile at projection start
    pub fn from_profile(profile: &NormalizedProfile, city: &CityPolicy) -> Self {
        let unemployment_months_left = match profile.employment_status {
            EmploymentStatus::UnemployedSubsidized => city.unemployment_cutoff_month,
            _ => 0,
        };

        Self {
            month: 0,
            calendar_month: profile.timeline.calendar_month(0),
            account_balance: profile.account_balance,
            total_years: profile.paid_years,
            total_personal_payment: 0.0,
            unemployment_months_left,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self, profile: &NormalizedProfile) {
        self.month += 1;
        self.calendar_month = profile.timeline.calendar_month(self.month);
    }

    /// Book one month of payment and account contribution
    pub fn record_contribution(&mut self, personal_payment: f64, account_contribution: f64) {
        self.total_personal_payment += personal_payment;
        self.account_balance += account_contribution;
        if account_contribution > 0.0 {
            self.total_years += 1.0 / 12.0;
        }
    }

    /// Compound the account balance once; returns the interest credited
    pub fn credit_interest(&mut self, annual_rate: f64) -> f64 {
        let before = self.account_balance;
        self.account_balance *= 1.0 + annual_rate;
        self.account_balance - before
    }

    /// Consume one month of unemployment benefit if any remains
    pub fn use_unemployment_month(&mut self) -> bool {
        if self.unemployment_months_left > 0 {
            self.unemployment_months_left -= 1;
            true
        } else {
            false
        }
    }
}
