//! Reference data: per-city policy parameters and the payout divisor table
//!
//! The tables are supplied, never computed. A [`PolicyTable`] is injected into
//! the calculator so alternate data can be substituted without global state.

mod city;
mod payout;
pub mod loader;

pub use city::CityPolicy;
pub use payout::PayoutDivisorTable;

use std::collections::HashMap;
use std::path::Path;

use crate::error::{LoadError, PensionError};

/// Container for all reference data used by a calculation
#[derive(Debug, Clone)]
pub struct PolicyTable {
    cities: HashMap<String, CityPolicy>,
    pub divisors: PayoutDivisorTable,
}

impl PolicyTable {
    /// Build from explicit city parameters and divisors
    pub fn new(cities: Vec<CityPolicy>, divisors: PayoutDivisorTable) -> Self {
        Self {
            cities: cities.into_iter().map(|c| (c.city.clone(), c)).collect(),
            divisors,
        }
    }

    /// Built-in snapshot matching data/policy/
    pub fn reference() -> Self {
        Self::new(vec![CityPolicy::beijing()], PayoutDivisorTable::standard())
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        let cities = loader::load_city_policies(path)?;
        let divisors = loader::load_payout_divisors(path)?;
        log::info!(
            "Loaded {} cities and {} payout divisors from {}",
            cities.len(),
            divisors.len(),
            path.display()
        );

        Ok(Self::new(cities, PayoutDivisorTable::from_pairs(divisors)))
    }

    /// Add or replace a city
    pub fn with_city(mut self, city: CityPolicy) -> Self {
        self.cities.insert(city.city.clone(), city);
        self
    }

    /// Replace the divisor table
    pub fn with_divisors(mut self, divisors: PayoutDivisorTable) -> Self {
        self.divisors = divisors;
        self
    }

    pub fn city(&self, name: &str) -> Option<&CityPolicy> {
        self.cities.get(name)
    }

    /// City parameters, or [`PensionError::UnknownCity`]
    pub fn require_city(&self, name: &str) -> Result<&CityPolicy, PensionError> {
        self.city(name)
            .ok_or_else(|| PensionError::UnknownCity(name.to_string()))
    }

    /// City names, sorted
    pub fn city_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table() {
        let table = PolicyTable::reference();
        assert_eq!(table.city_names(), vec!["Beijing"]);
        assert_eq!(table.require_city("Beijing").unwrap().base_min, 7162.0);
        assert_eq!(table.divisors.get(63), Some(73));
    }

    #[test]
    fn test_unknown_city() {
        let table = PolicyTable::reference();
        assert_eq!(
            table.require_city("Shanghai").unwrap_err(),
            PensionError::UnknownCity("Shanghai".to_string())
        );
    }

    #[test]
    fn test_substitute_city() {
        let table = PolicyTable::reference().with_city(CityPolicy::beijing().renamed("CityA"));
        assert_eq!(table.city_names(), vec!["Beijing", "CityA"]);
    }

    #[test]
    fn test_csv_matches_reference() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(loader::DEFAULT_POLICY_PATH);
        let loaded = PolicyTable::from_csv_path(&dir).unwrap();
        let reference = PolicyTable::reference();
        assert_eq!(loaded.city("Beijing"), reference.city("Beijing"));
        assert_eq!(loaded.divisors, reference.divisors);
    }
}
