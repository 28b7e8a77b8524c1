//! CSV-based policy table loader
//!
//! Loads city parameters and payout divisors from CSV files in data/policy/

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::CityPolicy;
use crate::error::LoadError;

/// Default path to the policy table directory
pub const DEFAULT_POLICY_PATH: &str = "data/policy";

/// File holding one row per city
pub const CITY_POLICIES_FILE: &str = "city_policies.csv";

/// File holding one row per retirement age
pub const PAYOUT_DIVISORS_FILE: &str = "payout_divisors.csv";

/// Raw CSV row of city_policies.csv
#[derive(Debug, serde::Deserialize)]
struct CityRow {
    city: String,
    avg_salary: f64,
    pension_interest_rate: f64,
    base_min: f64,
    base_max: f64,
    company_rate: f64,
    personal_rate: f64,
    unemployment_benefit: f64,
    unemployment_cutoff_month: u32,
    subsidy_amount: f64,
}

impl CityRow {
    fn to_policy(self) -> Result<CityPolicy, LoadError> {
        if self.base_min > self.base_max {
            return Err(LoadError::Parse {
                file: CITY_POLICIES_FILE.to_string(),
                message: format!(
                    "{}: base_min {} is above base_max {}",
                    self.city, self.base_min, self.base_max
                ),
            });
        }

        Ok(CityPolicy {
            city: self.city,
            avg_salary: self.avg_salary,
            pension_interest_rate: self.pension_interest_rate,
            base_min: self.base_min,
            base_max: self.base_max,
            company_rate: self.company_rate,
            personal_rate: self.personal_rate,
            unemployment_benefit: self.unemployment_benefit,
            unemployment_cutoff_month: self.unemployment_cutoff_month,
            subsidy_amount: self.subsidy_amount,
        })
    }
}

/// Load city parameters from a directory
pub fn load_city_policies(path: &Path) -> Result<Vec<CityPolicy>, LoadError> {
    let file = File::open(path.join(CITY_POLICIES_FILE))?;
    load_city_policies_from_reader(file)
}

/// Load city parameters from any CSV reader
pub fn load_city_policies_from_reader<R: Read>(reader: R) -> Result<Vec<CityPolicy>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut cities = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CityRow = result?;
        cities.push(row.to_policy()?);
    }

    if cities.is_empty() {
        return Err(LoadError::MissingTable(CITY_POLICIES_FILE.to_string()));
    }

    Ok(cities)
}

/// Load payout divisors from a directory
/// Returns Vec<(age, divisor)>
pub fn load_payout_divisors(path: &Path) -> Result<Vec<(u32, u32)>, LoadError> {
    let file = File::open(path.join(PAYOUT_DIVISORS_FILE))?;
    load_payout_divisors_from_reader(file)
}

/// Load payout divisors from any CSV reader
pub fn load_payout_divisors_from_reader<R: Read>(reader: R) -> Result<Vec<(u32, u32)>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut divisors = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let age: u32 = parse_field(&record, 0, "age")?;
        let divisor: u32 = parse_field(&record, 1, "divisor")?;

        if divisor == 0 {
            return Err(LoadError::Parse {
                file: PAYOUT_DIVISORS_FILE.to_string(),
                message: format!("divisor for age {} must be positive", age),
            });
        }
        divisors.push((age, divisor));
    }

    if divisors.is_empty() {
        return Err(LoadError::MissingTable(PAYOUT_DIVISORS_FILE.to_string()));
    }

    Ok(divisors)
}

fn parse_field(record: &csv::StringRecord, idx: usize, name: &str) -> Result<u32, LoadError> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse().map_err(|_| LoadError::Parse {
        file: PAYOUT_DIVISORS_FILE.to_string(),
        message: format!("invalid {} value '{}'", name, raw),
    })
}
