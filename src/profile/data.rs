//! Applicant profile structures for both accepted input shapes

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::PensionError;

/// A calendar month, used as the clock of the category schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Current month on the local clock
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Months from `self` to `later` (negative when `later` is earlier)
    pub fn months_until(&self, later: YearMonth) -> i64 {
        (later.year as i64 - self.year as i64) * 12 + later.month as i64 - self.month as i64
    }

    /// The month `months` after this one
    pub fn plus_months(&self, months: u32) -> YearMonth {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + months as i64;
        YearMonth {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = chrono::ParseError;

    /// Parse `YYYY-MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")?;
        Ok(Self::from_date(date))
    }
}

/// Employment situation driving who pays the monthly contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    /// Employer withholds the personal share
    Employed,
    /// Receiving unemployment benefit; contributions paused
    UnemployedSubsidized,
    /// Unemployed without benefit; no contributions
    UnemployedUnsubsidized,
    /// Self-employed, pays the whole flexible-employment rate
    FlexibleEmployment,
}

/// Worker category determining the statutory retirement ages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkerCategory {
    MaleWorker,
    FemaleCadre,
    FemaleLaborer,
}

impl WorkerCategory {
    /// Candidate retirement ages for the category, earliest (statutory) first
    pub fn retirement_ages(&self) -> &'static [u32] {
        match self {
            WorkerCategory::MaleWorker => &[60, 61, 62, 63],
            WorkerCategory::FemaleCadre => &[55, 56, 57, 58],
            WorkerCategory::FemaleLaborer => &[50, 51, 52, 53, 55],
        }
    }

    /// Statutory retirement age
    pub fn statutory_age(&self) -> u32 {
        self.retirement_ages()[0]
    }
}

/// Declared contribution level as a percentage of the payment base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionLevel {
    Level60,
    Level100,
    Level200,
    Level300,
}

impl ContributionLevel {
    pub const ALLOWED_PERCENTS: [u32; 4] = [60, 100, 200, 300];

    pub fn from_percent(percent: u32) -> Option<Self> {
        match percent {
            60 => Some(ContributionLevel::Level60),
            100 => Some(ContributionLevel::Level100),
            200 => Some(ContributionLevel::Level200),
            300 => Some(ContributionLevel::Level300),
            _ => None,
        }
    }

    pub fn percent(&self) -> u32 {
        match self {
            ContributionLevel::Level60 => 60,
            ContributionLevel::Level100 => 100,
            ContributionLevel::Level200 => 200,
            ContributionLevel::Level300 => 300,
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.percent() as f64 / 100.0
    }
}

/// Contribution fields shared by both profile shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionProfile {
    /// Key into the policy table
    pub city: String,

    pub employment_status: EmploymentStatus,

    /// Monthly contribution base before the level multiplier
    pub payment_base: f64,

    /// Contribution years already accrued
    #[serde(alias = "paymentYears")]
    pub paid_years: f64,

    /// Current personal-account balance
    #[serde(alias = "currentAccount")]
    pub account_balance: f64,

    /// Percentage multiplier; validated against [`ContributionLevel::ALLOWED_PERCENTS`]
    #[serde(alias = "level")]
    pub contribution_level: u32,

    /// Means-tested contribution subsidy
    #[serde(default, alias = "eligible4050", alias = "is4050")]
    pub subsidy_eligible: bool,
}

/// Profile described by current age and a retirement-age window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeWindowProfile {
    pub current_age: u32,
    pub normal_retire_age: u32,
    pub max_retire_age: u32,

    #[serde(flatten)]
    pub contribution: ContributionProfile,
}

/// Profile described by worker category and birth month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProfile {
    #[serde(alias = "personType")]
    pub worker_category: WorkerCategory,
    pub birth_year: i32,
    pub birth_month: u32,

    #[serde(flatten)]
    pub contribution: ContributionProfile,
}

/// Input to one calculation, in either accepted shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApplicantProfile {
    AgeWindow(AgeWindowProfile),
    Category(CategoryProfile),
}

impl ApplicantProfile {
    pub fn contribution(&self) -> &ContributionProfile {
        match self {
            ApplicantProfile::AgeWindow(p) => &p.contribution,
            ApplicantProfile::Category(p) => &p.contribution,
        }
    }

    pub fn city(&self) -> &str {
        &self.contribution().city
    }

    /// Reduce either shape to the form the engine works on
    pub fn normalize(&self, as_of: YearMonth) -> Result<NormalizedProfile, PensionError> {
        let contribution = self.contribution();
        let level = ContributionLevel::from_percent(contribution.contribution_level).ok_or_else(|| {
            PensionError::validation("contributionLevel", "must be 60, 100, 200 or 300")
        })?;

        let (current_age, statutory_age, timeline) = match self {
            ApplicantProfile::AgeWindow(p) => (
                p.current_age,
                p.normal_retire_age,
                Timeline::AgeWindow {
                    current_age: p.current_age,
                },
            ),
            ApplicantProfile::Category(p) => {
                let birth = YearMonth::new(p.birth_year, p.birth_month);
                let timeline = Timeline::Calendar { birth, as_of };
                (timeline.current_age(), p.worker_category.statutory_age(), timeline)
            }
        };

        Ok(NormalizedProfile {
            current_age,
            statutory_age,
            timeline,
            city: contribution.city.clone(),
            employment_status: contribution.employment_status,
            payment_base: contribution.payment_base,
            paid_years: contribution.paid_years,
            account_balance: contribution.account_balance,
            level,
            subsidy_eligible: contribution.subsidy_eligible,
        })
    }
}

/// How elapsed time is measured for a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeline {
    /// Whole years; interest credited every 12 simulated months
    AgeWindow { current_age: u32 },
    /// Calendar months from `as_of`; interest credited on each January
    Calendar { birth: YearMonth, as_of: YearMonth },
}

impl Timeline {
    /// Completed years of age at the start of the projection
    pub fn current_age(&self) -> u32 {
        match self {
            Timeline::AgeWindow { current_age } => *current_age,
            Timeline::Calendar { birth, as_of } => {
                (birth.months_until(*as_of).div_euclid(12)).max(0) as u32
            }
        }
    }

    /// Months from now until retirement at `retire_age`; non-positive when already reached
    ///
    /// Computed in `i64`, so any `u32` age is representable.
    pub fn months_until_retirement(&self, retire_age: u32) -> i64 {
        let retire_months = retire_age as i64 * 12;
        match self {
            Timeline::AgeWindow { current_age } => retire_months - *current_age as i64 * 12,
            Timeline::Calendar { birth, as_of } => as_of.months_until(*birth) + retire_months,
        }
    }

    /// Whether interest is credited after the given simulated month (1-indexed)
    pub fn credits_interest_after(&self, elapsed_months: u32) -> bool {
        match self {
            Timeline::AgeWindow { .. } => elapsed_months % 12 == 0,
            Timeline::Calendar { as_of, .. } => as_of.plus_months(elapsed_months).month == 1,
        }
    }

    /// Calendar month reached after `elapsed_months`, when the timeline has one
    pub fn calendar_month(&self, elapsed_months: u32) -> Option<YearMonth> {
        match self {
            Timeline::AgeWindow { .. } => None,
            Timeline::Calendar { as_of, .. } => Some(as_of.plus_months(elapsed_months)),
        }
    }
}

/// Validated, schema-independent view of an applicant
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProfile {
    pub current_age: u32,

    /// Age treated as "normal retirement" when naming plans
    pub statutory_age: u32,

    pub timeline: Timeline,
    pub city: String,
    pub employment_status: EmploymentStatus,
    pub payment_base: f64,
    pub paid_years: f64,
    pub account_balance: f64,
    pub level: ContributionLevel,
    pub subsidy_eligible: bool,
}
