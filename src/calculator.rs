//! Pension calculator: the full validate → simulate → rank pipeline
//!
//! Holds the reference tables once and evaluates any number of profiles
//! against them without shared mutable state.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::PolicyTable;
use crate::error::PensionError;
use crate::plan::{advantage_report, rank_plans, AdvantageReport, Plan, PlanBuilder};
use crate::profile::{ApplicantProfile, NormalizedProfile, YearMonth};
use crate::projection::{ContributionSimulator, SimulationConfig, SimulationOutcome};
use crate::scenario::ScenarioPolicy;
use crate::validation::{validate_profile, PaymentBaseRule};

/// Configuration for a calculator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub simulation: SimulationConfig,

    /// Override of the schema's default payment-base rule
    pub payment_base_rule: Option<PaymentBaseRule>,

    /// Evaluation month; `None` uses the current local month
    pub as_of: Option<YearMonth>,
}

/// Output of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// The recommended plan, equal to its entry in `plans`
    pub best_plan: Plan,

    /// Plans in scenario order; the first is the baseline
    pub plans: Vec<Plan>,

    /// `None` when the baseline is recommended
    pub advantages: Option<AdvantageReport>,
}

/// Pre-loaded calculator for single and batch evaluations
///
/// # Example
/// ```ignore
/// let calculator = PensionCalculator::new(PolicyTable::reference(), CalculatorConfig::default());
/// let result = calculator.calculate(&profile)?;
/// println!("Retire at {}", result.best_plan.age);
/// ```
#[derive(Debug, Clone)]
pub struct PensionCalculator {
    table: PolicyTable,
    config: CalculatorConfig,
}

impl PensionCalculator {
    pub fn new(table: PolicyTable, config: CalculatorConfig) -> Self {
        Self { table, config }
    }

    /// Calculator over the built-in reference tables
    pub fn with_reference_tables() -> Self {
        Self::new(PolicyTable::reference(), CalculatorConfig::default())
    }

    pub fn table(&self) -> &PolicyTable {
        &self.table
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    fn as_of(&self) -> YearMonth {
        self.config.as_of.unwrap_or_else(YearMonth::current)
    }

    /// Validate, resolve the city and normalize
    fn prepare(&self, profile: &ApplicantProfile) -> Result<NormalizedProfile, PensionError> {
        let as_of = self.as_of();
        let rule = self
            .config
            .payment_base_rule
            .unwrap_or_else(|| PaymentBaseRule::default_for(profile));

        validate_profile(profile, self.table.city(profile.city()), rule, as_of)?;
        self.table.require_city(profile.city())?;
        profile.normalize(as_of)
    }

    /// Run the whole pipeline for one profile
    pub fn calculate(&self, profile: &ApplicantProfile) -> Result<CalculationResult, PensionError> {
        let normalized = self.prepare(profile)?;
        let city = self.table.require_city(&normalized.city)?;

        let ages = ScenarioPolicy::for_profile(profile).candidate_ages(&self.table.divisors)?;

        let simulator = ContributionSimulator::new(self.config.simulation.clone());
        let builder = PlanBuilder::new(city, &self.table.divisors);

        let plans = ages
            .iter()
            .map(|&age| {
                let outcome = simulator.simulate(&normalized, age, city)?;
                builder.build(&outcome, normalized.statutory_age)
            })
            .collect::<Result<Vec<Plan>, PensionError>>()?;

        let ranked = rank_plans(&plans)?;
        let best_plan = ranked.best().clone();
        let advantages = advantage_report(&ranked.plans, &best_plan);

        log::info!(
            "Evaluated {} retirement ages in {}; recommended age {} ({:.2} per month)",
            ranked.plans.len(),
            city.city,
            best_plan.age,
            best_plan.monthly_pension
        );

        Ok(CalculationResult {
            best_plan,
            plans: ranked.plans,
            advantages,
        })
    }

    /// Run many independent profiles in parallel; order is preserved
    pub fn calculate_batch(
        &self,
        profiles: &[ApplicantProfile],
    ) -> Vec<Result<CalculationResult, PensionError>> {
        profiles.par_iter().map(|p| self.calculate(p)).collect()
    }

    /// Unranked plan for a single retirement age
    pub fn evaluate_age(
        &self,
        profile: &ApplicantProfile,
        retire_age: u32,
    ) -> Result<Plan, PensionError> {
        let normalized = self.prepare(profile)?;
        let city = self.table.require_city(&normalized.city)?;
        let outcome = ContributionSimulator::new(self.config.simulation.clone())
            .simulate(&normalized, retire_age, city)?;
        PlanBuilder::new(city, &self.table.divisors).build(&outcome, normalized.statutory_age)
    }

    /// Projection for a single age with one row per simulated month
    pub fn trace(
        &self,
        profile: &ApplicantProfile,
        retire_age: u32,
    ) -> Result<SimulationOutcome, PensionError> {
        let normalized = self.prepare(profile)?;
        let city = self.table.require_city(&normalized.city)?;
        let config = SimulationConfig {
            detailed_output: true,
            ..self.config.simulation.clone()
        };
        ContributionSimulator::new(config).simulate(&normalized, retire_age, city)
    }
}

impl Default for PensionCalculator {
    fn default() -> Self {
        Self::with_reference_tables()
    }
}
