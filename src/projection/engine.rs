//! Month-by-month contribution projection to a candidate retirement age

use serde::{Deserialize, Serialize};

use super::cashflows::{ContributionRow, SimulationOutcome};
use super::state::SimulationState;
use crate::assumptions::CityPolicy;
use crate::error::PensionError;
use crate::profile::{EmploymentStatus, NormalizedProfile};

/// Default limit on simulated months (50 years)
pub const DEFAULT_MAX_MONTHS: u32 = 600;

/// Share of the adjusted base a flexibly employed worker pays out of pocket
pub const FLEXIBLE_EMPLOYMENT_RATE: f64 = 0.20;

/// What to do when the horizon is longer than `max_months`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizonOverflow {
    /// Stop at the limit and mark the outcome truncated
    Truncate,
    /// Fail with [`PensionError::HorizonExceeded`]
    Reject,
}

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Maximum number of months to project
    pub max_months: u32,

    /// Behaviour when the retirement date lies beyond `max_months`
    pub horizon_overflow: HorizonOverflow,

    /// Whether to record a row per simulated month
    pub detailed_output: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            horizon_overflow: HorizonOverflow::Truncate,
            detailed_output: false,
        }
    }
}

/// Payment and account credit for one month
#[derive(Debug, Clone, Copy, PartialEq)]
struct MonthlyAmounts {
    personal_payment: f64,
    account_contribution: f64,
}

impl MonthlyAmounts {
    const NONE: MonthlyAmounts = MonthlyAmounts {
        personal_payment: 0.0,
        account_contribution: 0.0,
    };
}

/// Projects contributions and account growth until retirement
#[derive(Debug, Clone, Default)]
pub struct ContributionSimulator {
    config: SimulationConfig,
}

impl ContributionSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run projection for a single candidate retirement age
    pub fn simulate(
        &self,
        profile: &NormalizedProfile,
        retire_age: u32,
        city: &CityPolicy,
    ) -> Result<SimulationOutcome, PensionError> {
        let horizon = profile.timeline.months_until_retirement(retire_age);
        if horizon <= 0 {
            return Ok(SimulationOutcome::unchanged(profile, retire_age));
        }

        let requested = u32::try_from(horizon).unwrap_or(u32::MAX);
        let months = self.bounded_horizon(requested, retire_age)?;

        // Fixed for the whole projection
        let adjusted_base = city.clamp_base(profile.payment_base * profile.level.multiplier());

        let mut state = SimulationState::from_profile(profile, city);
        let mut rows = Vec::new();

        for _month in 1..=months {
            state.advance_month(profile);

            let amounts = self.monthly_amounts(profile, &mut state, city, adjusted_base);
            state.record_contribution(amounts.personal_payment, amounts.account_contribution);

            let interest = if profile.timeline.credits_interest_after(state.month) {
                state.credit_interest(city.pension_interest_rate)
            } else {
                0.0
            };

            if self.config.detailed_output {
                rows.push(ContributionRow {
                    month: state.month,
                    calendar_month: state.calendar_month,
                    personal_payment: amounts.personal_payment,
                    account_contribution: amounts.account_contribution,
                    interest_credited: interest,
                    account_balance: state.account_balance,
                    total_years: state.total_years,
                    total_personal_payment: state.total_personal_payment,
                });
            }
        }

        log::debug!(
            "Projected {} months to age {}: paid {:.2}, balance {:.2}, years {:.2}",
            state.month,
            retire_age,
            state.total_personal_payment,
            state.account_balance,
            state.total_years
        );

        Ok(SimulationOutcome {
            retire_age,
            total_personal_payment: state.total_personal_payment,
            account_balance: state.account_balance,
            total_years: state.total_years,
            months_simulated: state.month,
            truncated: months < requested,
            rows,
        })
    }

    /// Apply the month limit to a requested horizon
    fn bounded_horizon(&self, requested: u32, retire_age: u32) -> Result<u32, PensionError> {
        let limit = self.config.max_months;
        if requested <= limit {
            return Ok(requested);
        }

        match self.config.horizon_overflow {
            HorizonOverflow::Truncate => {
                log::warn!(
                    "Horizon to age {} is {} months; truncating at {} months",
                    retire_age,
                    requested,
                    limit
                );
                Ok(limit)
            }
            HorizonOverflow::Reject => Err(PensionError::HorizonExceeded { requested, limit }),
        }
    }

    /// Payment and account credit for the current month
    fn monthly_amounts(
        &self,
        profile: &NormalizedProfile,
        state: &mut SimulationState,
        city: &CityPolicy,
        adjusted_base: f64,
    ) -> MonthlyAmounts {
        let mut amounts = match profile.employment_status {
            EmploymentStatus::Employed => {
                let personal = adjusted_base * city.personal_rate;
                MonthlyAmounts {
                    personal_payment: personal,
                    account_contribution: personal,
                }
            }
            // Worker pays the full flexible rate; only the personal share reaches the account
            EmploymentStatus::FlexibleEmployment => MonthlyAmounts {
                personal_payment: adjusted_base * FLEXIBLE_EMPLOYMENT_RATE,
                account_contribution: adjusted_base * city.personal_rate,
            },
            EmploymentStatus::UnemployedSubsidized => {
                // Paused while benefit lasts, then same as unsubsidized
                state.use_unemployment_month();
                MonthlyAmounts::NONE
            }
            EmploymentStatus::UnemployedUnsubsidized => MonthlyAmounts::NONE,
        };

        if profile.subsidy_eligible && amounts.personal_payment > 0.0 {
            amounts.personal_payment = (amounts.personal_payment - city.subsidy_amount).max(0.0);
        }

        amounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ContributionLevel, Timeline, YearMonth};
    use approx::assert_relative_eq;

    fn test_profile() -> NormalizedProfile {
        NormalizedProfile {
            current_age: 50,
            statutory_age: 60,
            timeline: Timeline::AgeWindow { current_age: 50 },
            city: "Beijing".to_string(),
            employment_status: EmploymentStatus::Employed,
            payment_base: 8500.0,
            paid_years: 13.2,
            account_balance: 82300.0,
            level: ContributionLevel::Level100,
            subsidy_eligible: false,
        }
    }

    fn detailed() -> ContributionSimulator {
        ContributionSimulator::new(SimulationConfig {
            detailed_output: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_employed_ten_years() {
        let city = CityPolicy::beijing();
        let outcome = ContributionSimulator::default()
            .simulate(&test_profile(), 60, &city)
            .unwrap();

        assert_eq!(outcome.months_simulated, 120);
        assert!(!outcome.truncated);
        assert_relative_eq!(outcome.total_personal_payment, 81600.0, epsilon = 1e-6);
        assert_relative_eq!(outcome.account_balance, 223712.7321370557, epsilon = 1e-6);
        assert_relative_eq!(outcome.total_years, 23.2, epsilon = 1e-9);
    }

    #[test]
    fn test_interest_every_twelve_months() {
        let city = CityPolicy::beijing();
        let outcome = detailed().simulate(&test_profile(), 52, &city).unwrap();

        assert_eq!(outcome.rows.len(), 24);
        let credited: Vec<u32> = outcome
            .rows
            .iter()
            .filter(|r| r.interest_credited > 0.0)
            .map(|r| r.month)
            .collect();
        assert_eq!(credited, vec![12, 24]);
        assert_eq!(outcome.contributing_months(), 24);
        // 4% of 90460 after year one, 4% of 102238.4 after year two
        assert_relative_eq!(outcome.total_interest(), 3618.4 + 4089.536, epsilon = 1e-6);
        assert_relative_eq!(
            outcome.rows.last().unwrap().account_balance,
            outcome.account_balance
        );
    }

    #[test]
    fn test_flexible_employment_with_subsidy() {
        let city = CityPolicy::beijing();
        let profile = NormalizedProfile {
            employment_status: EmploymentStatus::FlexibleEmployment,
            subsidy_eligible: true,
            ..test_profile()
        };
        let outcome = detailed().simulate(&profile, 51, &city).unwrap();

        let first = &outcome.rows[0];
        assert_relative_eq!(first.personal_payment, 8500.0 * 0.2 - 669.58, epsilon = 1e-9);
        assert_relative_eq!(first.account_contribution, 680.0, epsilon = 1e-9);
    }

    #[test]
    fn test_subsidy_never_negative() {
        let city = CityPolicy {
            subsidy_amount: 10_000.0,
            ..CityPolicy::beijing()
        };
        let profile = NormalizedProfile {
            subsidy_eligible: true,
            ..test_profile()
        };
        let outcome = ContributionSimulator::default()
            .simulate(&profile, 55, &city)
            .unwrap();
        assert_eq!(outcome.total_personal_payment, 0.0);
        assert_relative_eq!(outcome.total_years, 18.2, epsilon = 1e-9);
    }

    #[test]
    fn test_unemployed_accrues_interest_only() {
        let city = CityPolicy::beijing();
        for status in [
            EmploymentStatus::UnemployedSubsidized,
            EmploymentStatus::UnemployedUnsubsidized,
        ] {
            let profile = NormalizedProfile {
                employment_status: status,
                ..test_profile()
            };
            let outcome = ContributionSimulator::default().simulate(&profile, 53, &city).unwrap();
            assert_eq!(outcome.total_personal_payment, 0.0);
            assert_relative_eq!(outcome.total_years, 13.2);
            assert_relative_eq!(outcome.account_balance, 82300.0 * 1.04f64.powi(3), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_adjusted_base_is_clamped() {
        let city = CityPolicy::beijing();
        let profile = NormalizedProfile {
            level: ContributionLevel::Level60,
            payment_base: 8000.0,
            ..test_profile()
        };
        let outcome = detailed().simulate(&profile, 51, &city).unwrap();
        // 8000 * 0.6 = 4800 is raised to the 7162 floor
        assert_relative_eq!(outcome.rows[0].personal_payment, 7162.0 * 0.08, epsilon = 1e-9);

        let high = NormalizedProfile {
            level: ContributionLevel::Level300,
            payment_base: 20000.0,
            ..test_profile()
        };
        let outcome = detailed().simulate(&high, 51, &city).unwrap();
        assert_relative_eq!(outcome.rows[0].personal_payment, 35811.0 * 0.08, epsilon = 1e-9);
    }

    #[test]
    fn test_age_already_reached() {
        let city = CityPolicy::beijing();
        let outcome = ContributionSimulator::default()
            .simulate(&test_profile(), 50, &city)
            .unwrap();
        assert_eq!(outcome, SimulationOutcome::unchanged(&test_profile(), 50));
        assert_eq!(outcome.total_personal_payment, 0.0);
        assert_eq!(outcome.account_balance, 82300.0);
        assert_eq!(outcome.total_years, 13.2);
    }

    #[test]
    fn test_horizon_truncated() {
        let city = CityPolicy::beijing();
        let simulator = ContributionSimulator::new(SimulationConfig {
            max_months: 36,
            ..Default::default()
        });
        let outcome = simulator.simulate(&test_profile(), 60, &city).unwrap();
        assert_eq!(outcome.months_simulated, 36);
        assert!(outcome.truncated);
    }

    #[test]
    fn test_default_cap_stops_at_600_months() {
        let city = CityPolicy::beijing();
        let profile = NormalizedProfile {
            current_age: 16,
            timeline: Timeline::AgeWindow { current_age: 16 },
            ..test_profile()
        };
        // 54 years to age 70
        let outcome = ContributionSimulator::default()
            .simulate(&profile, 70, &city)
            .unwrap();
        assert_eq!(outcome.months_simulated, DEFAULT_MAX_MONTHS);
        assert!(outcome.truncated);
        assert_relative_eq!(outcome.total_years, 13.2 + 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_largest_age_on_calendar_timeline_is_truncated() {
        let city = CityPolicy::beijing();
        let profile = NormalizedProfile {
            timeline: Timeline::Calendar {
                birth: YearMonth::new(1985, 7),
                as_of: YearMonth::new(2026, 10),
            },
            current_age: 41,
            ..test_profile()
        };
        let outcome = ContributionSimulator::default()
            .simulate(&profile, u32::MAX, &city)
            .unwrap();
        assert_eq!(outcome.months_simulated, DEFAULT_MAX_MONTHS);
        assert!(outcome.truncated);

        let rejecting = ContributionSimulator::new(SimulationConfig {
            horizon_overflow: HorizonOverflow::Reject,
            ..Default::default()
        });
        assert!(matches!(
            rejecting.simulate(&profile, u32::MAX, &city),
            Err(PensionError::HorizonExceeded { requested: u32::MAX, limit: 600 })
        ));
    }

    #[test]
    fn test_horizon_rejected() {
        let city = CityPolicy::beijing();
        let simulator = ContributionSimulator::new(SimulationConfig {
            max_months: 36,
            horizon_overflow: HorizonOverflow::Reject,
            ..Default::default()
        });
        assert_eq!(
            simulator.simulate(&test_profile(), 60, &city),
            Err(PensionError::HorizonExceeded {
                requested: 120,
                limit: 36
            })
        );
    }

    #[test]
    fn test_calendar_interest_on_january() {
        let city = CityPolicy::beijing();
        let profile = NormalizedProfile {
            timeline: Timeline::Calendar {
                birth: YearMonth::new(1966, 3),
                as_of: YearMonth::new(2026, 10),
            },
            current_age: 60,
            ..test_profile()
        };
        // Age 61 reached in 2027-03: five months, one January rollover
        let outcome = detailed().simulate(&profile, 61, &city).unwrap();
        assert_eq!(outcome.months_simulated, 5);
        let credited: Vec<u32> = outcome
            .rows
            .iter()
            .filter(|r| r.interest_credited > 0.0)
            .map(|r| r.month)
            .collect();
        assert_eq!(credited, vec![3]);
        assert_eq!(outcome.rows[2].calendar_month, Some(YearMonth::new(2027, 1)));
        let expected = ((82300.0 + 3.0 * 680.0) * 1.04) + 2.0 * 680.0;
        assert_relative_eq!(outcome.account_balance, expected, epsilon = 1e-6);
    }
}
