//! Pension Planner - monthly pension projection and retirement-age recommendation
//!
//! This library provides:
//! - Validation of applicant profiles in two input shapes (age window or worker category)
//! - Month-by-month projection of contributions and personal-account growth
//! - Conversion of projections into pension plans (monthly benefit, break-even, totals)
//! - Ranking of candidate plans and advantage reporting against the baseline
//! - Reference policy tables, loadable from CSV

pub mod error;
pub mod rounding;
pub mod profile;
pub mod assumptions;
pub mod validation;
pub mod scenario;
pub mod projection;
pub mod plan;
pub mod calculator;

// Re-export commonly used types
pub use error::{LoadError, PensionError};
pub use profile::{ApplicantProfile, EmploymentStatus, WorkerCategory, YearMonth};
pub use assumptions::{CityPolicy, PayoutDivisorTable, PolicyTable};
pub use projection::{ContributionSimulator, HorizonOverflow, SimulationConfig, SimulationOutcome};
pub use plan::{AdvantageReport, Plan};
pub use calculator::{CalculationResult, CalculatorConfig, PensionCalculator};
