//! Comparison of the recommended plan with the baseline plan

use serde::{Deserialize, Serialize};

use super::Plan;
use crate::rounding::{round_to, round_whole};

/// Improvement of the recommended plan over the baseline
///
/// All deltas and percentages are reported as magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvantageReport {
    pub pension_increase: f64,
    pub pension_increase_percent: f64,
    pub break_even_improve: f64,
    pub break_even_improve_percent: f64,
    pub cost_decrease: f64,
    pub cost_decrease_percent: f64,
    pub account_increase: f64,
    pub account_increase_percent: f64,

    /// Composite score in [0, 100]
    pub total_score: f64,
}

/// Percentage with two decimals; 0 when the base is 0
fn percent_of(delta: f64, base: f64) -> f64 {
    if base == 0.0 {
        return 0.0;
    }
    round_whole(delta / base * 10_000.0) / 100.0
}

/// Advantage of `recommended` over `plans[0]`
///
/// `None` when there is nothing to compare: the list is empty or the
/// recommendation is the baseline age.
pub fn advantage_report(plans: &[Plan], recommended: &Plan) -> Option<AdvantageReport> {
    let baseline = plans.first()?;
    if recommended.age == baseline.age {
        return None;
    }

    let pension_increase = round_to(recommended.monthly_pension - baseline.monthly_pension, 2);
    let pension_increase_percent = percent_of(pension_increase, baseline.monthly_pension);

    let baseline_break_even = baseline.break_even_months as f64;
    let break_even_improve = baseline_break_even - recommended.break_even_months as f64;
    let break_even_improve_percent = percent_of(break_even_improve, baseline_break_even);

    let cost_decrease = round_to(baseline.total_payment - recommended.total_payment, 2);
    let cost_decrease_percent = percent_of(cost_decrease, baseline.total_payment);

    let account_increase = round_to(recommended.account_at_retire - baseline.account_at_retire, 2);
    let account_increase_percent = percent_of(account_increase, baseline.account_at_retire);

    let mut total_score = 0.0;
    if pension_increase_percent > 0.0 {
        total_score += (pension_increase_percent * 5.0).min(50.0);
    }
    if break_even_improve_percent > 0.0 {
        total_score += (break_even_improve_percent * 3.0).min(30.0);
    }
    if cost_decrease_percent > 0.0 {
        total_score += (cost_decrease_percent * 2.0).min(20.0);
    }

    Some(AdvantageReport {
        pension_increase: pension_increase.abs(),
        pension_increase_percent: pension_increase_percent.abs(),
        break_even_improve: break_even_improve.abs(),
        break_even_improve_percent: break_even_improve_percent.abs(),
        cost_decrease: cost_decrease.abs(),
        cost_decrease_percent: cost_decrease_percent.abs(),
        account_increase: account_increase.abs(),
        account_increase_percent: account_increase_percent.abs(),
        total_score: round_to(total_score, 1),
    })
}
