//! Load applicant profiles from JSON documents and batch CSV files

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::Reader;
use serde_json::Value;

use super::{
    AgeWindowProfile, ApplicantProfile, CategoryProfile, ContributionProfile, EmploymentStatus,
};
use crate::error::LoadError;

/// Raw CSV row of an age-window batch file
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "CurrentAge")]
    current_age: u32,
    #[serde(rename = "NormalRetireAge")]
    normal_retire_age: u32,
    #[serde(rename = "MaxRetireAge")]
    max_retire_age: u32,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "EmploymentStatus")]
    employment_status: EmploymentStatus,
    #[serde(rename = "PaymentBase")]
    payment_base: f64,
    #[serde(rename = "PaidYears")]
    paid_years: f64,
    #[serde(rename = "AccountBalance")]
    account_balance: f64,
    #[serde(rename = "Level")]
    level: u32,
    #[serde(rename = "SubsidyEligible", default)]
    subsidy_eligible: bool,
}

impl CsvRow {
    fn into_profile(self) -> ApplicantProfile {
        ApplicantProfile::AgeWindow(AgeWindowProfile {
            current_age: self.current_age,
            normal_retire_age: self.normal_retire_age,
            max_retire_age: self.max_retire_age,
            contribution: ContributionProfile {
                city: self.city,
                employment_status: self.employment_status,
                payment_base: self.payment_base,
                paid_years: self.paid_years,
                account_balance: self.account_balance,
                contribution_level: self.level,
                subsidy_eligible: self.subsidy_eligible,
            },
        })
    }
}

/// Load one profile from a JSON file
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<ApplicantProfile, LoadError> {
    let file = File::open(path)?;
    load_profile_from_reader(file)
}

/// Load one profile from any JSON reader
///
/// The shape is chosen by the presence of a worker category, so a missing
/// field is reported against the intended shape rather than as an untagged
/// mismatch.
pub fn load_profile_from_reader<R: Read>(reader: R) -> Result<ApplicantProfile, LoadError> {
    let value: Value = serde_json::from_reader(reader)?;
    profile_from_value(value)
}

fn profile_from_value(value: Value) -> Result<ApplicantProfile, LoadError> {
    let is_category = value
        .as_object()
        .map(|fields| fields.contains_key("workerCategory") || fields.contains_key("personType"))
        .unwrap_or(false);

    if is_category {
        let profile: CategoryProfile = serde_json::from_value(value)?;
        Ok(ApplicantProfile::Category(profile))
    } else {
        let profile: AgeWindowProfile = serde_json::from_value(value)?;
        Ok(ApplicantProfile::AgeWindow(profile))
    }
}

/// Load age-window profiles from a batch CSV file
pub fn load_age_window_profiles<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ApplicantProfile>, LoadError> {
    let file = File::open(path)?;
    load_age_window_profiles_from_reader(file)
}

/// Load age-window profiles from any CSV reader
pub fn load_age_window_profiles_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<ApplicantProfile>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut profiles = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        profiles.push(row.into_profile());
    }

    Ok(profiles)
}
