//! Candidate retirement age generation
//!
//! A [`ScenarioPolicy`] decides which retirement ages are evaluated for a
//! profile. The first age produced is the baseline every other plan is
//! compared against.

use crate::assumptions::PayoutDivisorTable;
use crate::error::PensionError;
use crate::profile::{ApplicantProfile, WorkerCategory};

/// Source of candidate retirement ages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioPolicy {
    /// Every age in the window that has a payout divisor
    AgeWindow {
        normal_retire_age: u32,
        max_retire_age: u32,
    },
    /// Fixed ages of the worker category
    CategoryTable(WorkerCategory),
}

impl ScenarioPolicy {
    /// Policy matching the shape of the profile
    pub fn for_profile(profile: &ApplicantProfile) -> Self {
        match profile {
            ApplicantProfile::AgeWindow(p) => ScenarioPolicy::AgeWindow {
                normal_retire_age: p.normal_retire_age,
                max_retire_age: p.max_retire_age,
            },
            ApplicantProfile::Category(p) => ScenarioPolicy::CategoryTable(p.worker_category),
        }
    }

    /// Ordered, deduplicated candidate ages; baseline first
    ///
    /// The category table is not filtered by the divisor table; an age without
    /// a divisor fails later when its plan is built.
    pub fn candidate_ages(&self, divisors: &PayoutDivisorTable) -> Result<Vec<u32>, PensionError> {
        let ages: Vec<u32> = match self {
            ScenarioPolicy::AgeWindow {
                normal_retire_age,
                max_retire_age,
            } => divisors
                .ages_in(*normal_retire_age..=*max_retire_age)
                .collect(),
            ScenarioPolicy::CategoryTable(category) => category.retirement_ages().to_vec(),
        };

        if ages.is_empty() {
            return Err(PensionError::NoScenario);
        }

        log::debug!("Candidate retirement ages: {:?}", ages);
        Ok(ages)
    }
}
