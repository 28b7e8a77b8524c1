//! Error types surfaced by the calculation pipeline and the data loaders

use thiserror::Error;

/// Failure of a single pension calculation
///
/// Every variant aborts the whole pipeline; no partial result is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PensionError {
    /// Malformed or out-of-range applicant input
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// City is not present in the policy table
    #[error("unsupported city: {0}")]
    UnknownCity(String),

    /// No candidate retirement age survived scenario generation
    #[error("no valid retirement age scenario")]
    NoScenario,

    /// Candidate retirement age has no payout divisor
    #[error("no payout divisor for retirement age {0}")]
    MissingDivisor(u32),

    /// Ranking was asked to pick from an empty plan list
    #[error("no retirement plans available to rank")]
    NoPlans,

    /// Projection horizon is longer than the configured month limit
    #[error("projection horizon of {requested} months exceeds the limit of {limit} months")]
    HorizonExceeded { requested: u32, limit: u32 },
}

impl PensionError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        PensionError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors the applicant can fix by correcting their input
    pub fn is_input_error(&self) -> bool {
        matches!(self, PensionError::Validation { .. } | PensionError::UnknownCity(_))
    }
}

/// Failure while loading reference tables or applicant profiles
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{file}: {message}")]
    Parse { file: String, message: String },

    #[error("table {0} contains no rows")]
    MissingTable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = PensionError::validation("contributionLevel", "must be 60, 100, 200 or 300");
        assert_eq!(
            err.to_string(),
            "invalid contributionLevel: must be 60, 100, 200 or 300"
        );
        assert!(err.is_input_error());
    }

    #[test]
    fn test_data_errors_are_not_input_errors() {
        assert!(!PensionError::MissingDivisor(64).is_input_error());
        assert!(!PensionError::NoPlans.is_input_error());
        assert!(PensionError::UnknownCity("Atlantis".into()).is_input_error());
    }
}
