//! Weighted scoring of candidate plans against the baseline

use super::Plan;
use crate::error::PensionError;

const PENSION_WEIGHT: f64 = 0.5;
const BREAK_EVEN_WEIGHT: f64 = 0.3;
const COST_WEIGHT: f64 = 0.2;

/// Plans in scenario order with exactly one marked recommended
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlans {
    pub plans: Vec<Plan>,
    pub best_index: usize,
}

impl RankedPlans {
    pub fn best(&self) -> &Plan {
        &self.plans[self.best_index]
    }

    pub fn baseline(&self) -> &Plan {
        &self.plans[0]
    }
}

/// Score of `plan` relative to `baseline`; the baseline itself scores 0
///
/// Each ratio is 0 when its baseline denominator is 0. Break-even and cost
/// ratios are inverted so that an improvement is positive.
pub fn score_against_baseline(baseline: &Plan, plan: &Plan) -> f64 {
    let pension_growth = ratio(
        plan.monthly_pension - baseline.monthly_pension,
        baseline.monthly_pension,
    );
    let break_even_improvement = ratio(
        baseline.break_even_months as f64 - plan.break_even_months as f64,
        baseline.break_even_months as f64,
    );
    let cost_reduction = ratio(baseline.total_payment - plan.total_payment, baseline.total_payment);

    pension_growth * PENSION_WEIGHT
        + break_even_improvement * BREAK_EVEN_WEIGHT
        + cost_reduction * COST_WEIGHT
}

fn ratio(delta: f64, base: f64) -> f64 {
    if base > 0.0 {
        delta / base
    } else {
        0.0
    }
}

/// Pick the best plan; the first plan is the baseline
///
/// Returns a rebuilt list; ties go to the earliest plan.
pub fn rank_plans(plans: &[Plan]) -> Result<RankedPlans, PensionError> {
    let baseline = plans.first().ok_or(PensionError::NoPlans)?;

    let mut best_index = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (idx, plan) in plans.iter().enumerate() {
        let score = score_against_baseline(baseline, plan);
        if score > best_score {
            best_score = score;
            best_index = idx;
        }
    }

    log::debug!(
        "Recommended age {} with score {:.4}",
        plans[best_index].age,
        best_score
    );

    let plans = plans
        .iter()
        .enumerate()
        .map(|(idx, plan)| plan.marked(idx == best_index))
        .collect();

    Ok(RankedPlans { plans, best_index })
}
