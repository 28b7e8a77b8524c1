//! Conversion of a simulation outcome into a plan

use super::Plan;
use crate::assumptions::{CityPolicy, PayoutDivisorTable};
use crate::error::PensionError;
use crate::projection::SimulationOutcome;
use crate::rounding::{round_to, round_whole};

/// Share of the average salary paid per contribution year
pub const POOLED_ACCRUAL_RATE: f64 = 0.01;

/// Total payment is reported in units of 10 000
pub const REPORTING_UNIT: f64 = 10_000.0;

/// Builds plans for one city and divisor table
#[derive(Debug, Clone, Copy)]
pub struct PlanBuilder<'a> {
    city: &'a CityPolicy,
    divisors: &'a PayoutDivisorTable,
}

impl<'a> PlanBuilder<'a> {
    pub fn new(city: &'a CityPolicy, divisors: &'a PayoutDivisorTable) -> Self {
        Self { city, divisors }
    }

    /// Build the plan for `outcome`
    ///
    /// `statutory_age` is the applicant's normal retirement age and only
    /// affects the plan name.
    pub fn build(
        &self,
        outcome: &SimulationOutcome,
        statutory_age: u32,
    ) -> Result<Plan, PensionError> {
        let age = outcome.retire_age;
        let divisor = self.divisors.require(age)?;

        let base_pension = self.city.avg_salary * POOLED_ACCRUAL_RATE * outcome.total_years;
        let account_pension = outcome.account_balance / divisor as f64;
        let monthly_pension = base_pension + account_pension;

        let break_even_months = if outcome.total_personal_payment > 0.0 && monthly_pension > 0.0 {
            round_whole(outcome.total_personal_payment / monthly_pension) as u32
        } else {
            0
        };

        log::debug!(
            "Age {}: pension {:.2} (pooled {:.2}, account {:.2}), break-even {} months",
            age,
            monthly_pension,
            base_pension,
            account_pension,
            break_even_months
        );

        Ok(Plan {
            name: plan_name(statutory_age, age),
            age,
            recommended: false,
            monthly_pension: round_to(monthly_pension, 2),
            base_pension: round_to(base_pension, 2),
            account_pension: round_to(account_pension, 2),
            total_payment: round_to(outcome.total_personal_payment / REPORTING_UNIT, 2),
            break_even_months,
            account_at_retire: round_to(outcome.account_balance, 2),
            total_years: round_to(outcome.total_years, 1),
            payout_divisor: divisor,
            summary: plan_summary(age, monthly_pension, break_even_months),
        })
    }
}

/// Label relating `age` to the statutory age
pub fn plan_name(statutory_age: u32, age: u32) -> String {
    if age == statutory_age {
        format!("Plan A (normal retirement at {})", age)
    } else if age > statutory_age {
        format!("Plan (retire {} years later at {})", age - statutory_age, age)
    } else {
        format!("Plan (retire at {})", age)
    }
}

/// One-line summary of a plan
pub fn plan_summary(age: u32, monthly_pension: f64, break_even_months: u32) -> String {
    let years_to_break_even = round_to(break_even_months as f64 / 12.0, 1);
    format!(
        "Retire at {}, {} per month, break even in {} years",
        age,
        round_whole(monthly_pension),
        years_to_break_even
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(age: u32, paid: f64, balance: f64, years: f64) -> SimulationOutcome {
        SimulationOutcome {
            retire_age: age,
            total_personal_payment: paid,
            account_balance: balance,
            total_years: years,
            months_simulated: 0,
            truncated: false,
            rows: Vec::new(),
        }
    }

    #[test]
    fn test_build_reference_plan() {
        let city = CityPolicy::beijing();
        let divisors = PayoutDivisorTable::standard();
        let builder = PlanBuilder::new(&city, &divisors);

        let plan = builder
            .build(&outcome(60, 81600.0, 223712.7321370557, 23.199999999999918), 60)
            .unwrap();

        assert_eq!(plan.name, "Plan A (normal retirement at 60)");
        assert_eq!(plan.monthly_pension, 5200.88);
        assert_eq!(plan.base_pension, 2795.37);
        assert_eq!(plan.account_pension, 2405.51);
        assert_eq!(plan.total_payment, 8.16);
        assert_eq!(plan.break_even_months, 16);
        assert_eq!(plan.account_at_retire, 223712.73);
        assert_eq!(plan.total_years, 23.2);
        assert_eq!(plan.payout_divisor, 93);
        assert!(!plan.recommended);
        assert_eq!(plan.summary, "Retire at 60, 5201 per month, break even in 1.3 years");
    }

    #[test]
    fn test_no_payment_means_no_break_even() {
        let city = CityPolicy::beijing();
        let divisors = PayoutDivisorTable::standard();
        let plan = PlanBuilder::new(&city, &divisors)
            .build(&outcome(55, 0.0, 50000.0, 20.0), 55)
            .unwrap();
        assert_eq!(plan.break_even_months, 0);
        assert_eq!(plan.total_payment, 0.0);
    }

    #[test]
    fn test_missing_divisor() {
        let city = CityPolicy::beijing();
        let divisors = PayoutDivisorTable::standard();
        let err = PlanBuilder::new(&city, &divisors)
            .build(&outcome(64, 1000.0, 50000.0, 20.0), 60)
            .unwrap_err();
        assert_eq!(err, PensionError::MissingDivisor(64));
    }

    #[test]
    fn test_plan_names() {
        assert_eq!(plan_name(60, 60), "Plan A (normal retirement at 60)");
        assert_eq!(plan_name(60, 63), "Plan (retire 3 years later at 63)");
        assert_eq!(plan_name(60, 58), "Plan (retire at 58)");
    }
}
