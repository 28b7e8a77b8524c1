//! Contribution projection from today to a candidate retirement age

mod state;
mod engine;
mod cashflows;

pub use state::SimulationState;
pub use engine::{
    ContributionSimulator, HorizonOverflow, SimulationConfig, DEFAULT_MAX_MONTHS,
    FLEXIBLE_EMPLOYMENT_RATE,
};
pub use cashflows::{ContributionRow, SimulationOutcome};
