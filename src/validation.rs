//! Input validation run before any simulation
//!
//! Checks stop at the first violation, which is reported as
//! [`PensionError::Validation`] naming the offending field.

use serde::{Deserialize, Serialize};

use crate::assumptions::CityPolicy;
use crate::error::PensionError;
use crate::profile::{
    AgeWindowProfile, ApplicantProfile, CategoryProfile, ContributionLevel, ContributionProfile,
    YearMonth,
};

/// Earliest accepted birth year for the category schema
pub const MIN_BIRTH_YEAR: i32 = 1950;

/// Upper bound on already-accrued contribution years
pub const MAX_PAID_YEARS: f64 = 50.0;

/// How `paymentBase` is checked
///
/// The two input schemas historically check the base differently; both rules
/// are kept and the calculator may override the schema default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentBaseRule {
    /// Base must lie within the city's `[base_min, base_max]` when the city is known
    WithinCityBounds,
    /// Base must only be non-negative
    NonNegative,
}

impl PaymentBaseRule {
    /// Rule applied to a profile shape unless overridden
    pub fn default_for(profile: &ApplicantProfile) -> Self {
        match profile {
            ApplicantProfile::AgeWindow(_) => PaymentBaseRule::WithinCityBounds,
            ApplicantProfile::Category(_) => PaymentBaseRule::NonNegative,
        }
    }
}

/// Validate a profile against its schema rules and the resolved city
pub fn validate_profile(
    profile: &ApplicantProfile,
    city: Option<&CityPolicy>,
    rule: PaymentBaseRule,
    as_of: YearMonth,
) -> Result<(), PensionError> {
    match profile {
        ApplicantProfile::AgeWindow(p) => validate_age_window(p)?,
        ApplicantProfile::Category(p) => validate_category(p, as_of)?,
    }
    validate_contribution(profile.contribution(), city, rule)
}

fn validate_age_window(profile: &AgeWindowProfile) -> Result<(), PensionError> {
    if !(16..=65).contains(&profile.current_age) {
        return Err(PensionError::validation("currentAge", "must be between 16 and 65"));
    }
    if !(50..=65).contains(&profile.normal_retire_age) {
        return Err(PensionError::validation("normalRetireAge", "must be between 50 and 65"));
    }
    if profile.max_retire_age < profile.normal_retire_age {
        return Err(PensionError::validation(
            "maxRetireAge",
            "must not be below the normal retirement age",
        ));
    }
    if profile.current_age >= profile.max_retire_age {
        return Err(PensionError::validation(
            "currentAge",
            "has already reached the latest retirement age",
        ));
    }
    Ok(())
}

fn validate_category(profile: &CategoryProfile, as_of: YearMonth) -> Result<(), PensionError> {
    if profile.birth_year < MIN_BIRTH_YEAR || profile.birth_year > as_of.year {
        return Err(PensionError::validation(
            "birthYear",
            format!("must be between {} and {}", MIN_BIRTH_YEAR, as_of.year),
        ));
    }
    if !(1..=12).contains(&profile.birth_month) {
        return Err(PensionError::validation("birthMonth", "must be between 1 and 12"));
    }
    Ok(())
}

fn validate_contribution(
    contribution: &ContributionProfile,
    city: Option<&CityPolicy>,
    rule: PaymentBaseRule,
) -> Result<(), PensionError> {
    if contribution.city.trim().is_empty() {
        return Err(PensionError::validation("city", "is required"));
    }

    for (field, value) in [
        ("paymentBase", contribution.payment_base),
        ("paidYears", contribution.paid_years),
        ("accountBalance", contribution.account_balance),
    ] {
        if !value.is_finite() {
            return Err(PensionError::validation(field, "must be a finite number"));
        }
    }

    match (rule, city) {
        (PaymentBaseRule::WithinCityBounds, Some(city)) => {
            let base = contribution.payment_base;
            if base < city.base_min || base > city.base_max {
                return Err(PensionError::validation(
                    "paymentBase",
                    format!("must be between {} and {}", city.base_min, city.base_max),
                ));
            }
        }
        // Unknown city: bounds cannot be checked here, city resolution reports it
        (PaymentBaseRule::WithinCityBounds, None) => {}
        (PaymentBaseRule::NonNegative, _) => {
            if contribution.payment_base < 0.0 {
                return Err(PensionError::validation("paymentBase", "must not be negative"));
            }
        }
    }

    if contribution.paid_years < 0.0 || contribution.paid_years > MAX_PAID_YEARS {
        return Err(PensionError::validation("paidYears", "must be between 0 and 50"));
    }
    if contribution.account_balance < 0.0 {
        return Err(PensionError::validation("accountBalance", "must not be negative"));
    }
    if ContributionLevel::from_percent(contribution.contribution_level).is_none() {
        return Err(PensionError::validation(
            "contributionLevel",
            "must be 60, 100, 200 or 300",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{EmploymentStatus, WorkerCategory};

    const AS_OF: YearMonth = YearMonth { year: 2026, month: 10 };

    fn contribution() -> ContributionProfile {
        ContributionProfile {
            city: "Beijing".to_string(),
            employment_status: EmploymentStatus::Employed,
            payment_base: 8500.0,
            paid_years: 13.2,
            account_balance: 82300.0,
            contribution_level: 100,
            subsidy_eligible: false,
        }
    }

    fn age_window(current: u32, normal: u32, max: u32) -> ApplicantProfile {
        ApplicantProfile::AgeWindow(AgeWindowProfile {
            current_age: current,
            normal_retire_age: normal,
            max_retire_age: max,
            contribution: contribution(),
        })
    }

    fn category(birth_year: i32, birth_month: u32) -> ApplicantProfile {
        ApplicantProfile::Category(CategoryProfile {
            worker_category: WorkerCategory::MaleWorker,
            birth_year,
            birth_month,
            contribution: contribution(),
        })
    }

    fn field_of(result: Result<(), PensionError>) -> &'static str {
        match result {
            Err(PensionError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn check(profile: &ApplicantProfile) -> Result<(), PensionError> {
        let city = CityPolicy::beijing();
        validate_profile(profile, Some(&city), PaymentBaseRule::default_for(profile), AS_OF)
    }

    #[test]
    fn test_valid_profiles_pass() {
        assert!(check(&age_window(50, 60, 63)).is_ok());
        assert!(check(&category(1985, 7)).is_ok());
    }

    #[test]
    fn test_age_window_bounds() {
        assert_eq!(field_of(check(&age_window(15, 60, 63))), "currentAge");
        assert_eq!(field_of(check(&age_window(66, 60, 63))), "currentAge");
        assert_eq!(field_of(check(&age_window(40, 49, 63))), "normalRetireAge");
        assert_eq!(field_of(check(&age_window(40, 60, 59))), "maxRetireAge");
        assert_eq!(field_of(check(&age_window(60, 60, 60))), "currentAge");
    }

    #[test]
    fn test_category_bounds() {
        assert_eq!(field_of(check(&category(1949, 7))), "birthYear");
        assert_eq!(field_of(check(&category(2027, 7))), "birthYear");
        assert_eq!(field_of(check(&category(1985, 0))), "birthMonth");
        assert_eq!(field_of(check(&category(1985, 13))), "birthMonth");
    }

    #[test]
    fn test_payment_base_rules_differ_by_schema() {
        let mut low = age_window(50, 60, 63);
        if let ApplicantProfile::AgeWindow(p) = &mut low {
            p.contribution.payment_base = 5000.0;
        }
        assert_eq!(field_of(check(&low)), "paymentBase");

        let mut low_category = category(1985, 7);
        if let ApplicantProfile::Category(p) = &mut low_category {
            p.contribution.payment_base = 5000.0;
        }
        assert!(check(&low_category).is_ok());

        if let ApplicantProfile::Category(p) = &mut low_category {
            p.contribution.payment_base = -1.0;
        }
        assert_eq!(field_of(check(&low_category)), "paymentBase");
    }

    #[test]
    fn test_rule_override() {
        let mut low = age_window(50, 60, 63);
        if let ApplicantProfile::AgeWindow(p) = &mut low {
            p.contribution.payment_base = 5000.0;
        }
        let city = CityPolicy::beijing();
        assert!(validate_profile(&low, Some(&city), PaymentBaseRule::NonNegative, AS_OF).is_ok());
    }

    #[test]
    fn test_unknown_city_skips_bounds() {
        let profile = age_window(50, 60, 63);
        assert!(validate_profile(&profile, None, PaymentBaseRule::WithinCityBounds, AS_OF).is_ok());
    }

    #[test]
    fn test_contribution_fields() {
        let cases: [(fn(&mut ContributionProfile), &str); 6] = [
            (|c| c.paid_years = -0.5, "paidYears"),
            (|c| c.paid_years = 50.5, "paidYears"),
            (|c| c.account_balance = -1.0, "accountBalance"),
            (|c| c.contribution_level = 150, "contributionLevel"),
            (|c| c.account_balance = f64::NAN, "accountBalance"),
            (|c| c.city = String::new(), "city"),
        ];

        for (mutate, expected) in cases {
            let mut profile = age_window(50, 60, 63);
            if let ApplicantProfile::AgeWindow(p) = &mut profile {
                mutate(&mut p.contribution);
            }
            assert_eq!(field_of(check(&profile)), expected);
        }
    }
}
