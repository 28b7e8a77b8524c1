//! Applicant profiles and profile loading

mod data;
pub mod loader;

pub use data::{
    AgeWindowProfile, ApplicantProfile, CategoryProfile, ContributionLevel, ContributionProfile,
    EmploymentStatus, NormalizedProfile, Timeline, WorkerCategory, YearMonth,
};
pub use loader::{
    load_age_window_profiles, load_age_window_profiles_from_reader, load_profile,
    load_profile_from_reader,
};
