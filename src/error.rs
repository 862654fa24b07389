//! Error types raised by the analysis pipeline.

use thiserror::Error;

/// Input-validation failures, raised by the first stage that detects them.
///
/// None of these are transient: inputs are static configuration, so the
/// pipeline fails fast instead of retrying or defaulting a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid appliance record `{name}`: {reason}")]
    InvalidRecord { name: String, reason: String },

    #[error("negative load at hour {hour}: {load_kw} kW")]
    NegativeLoad { hour: usize, load_kw: f64 },

    #[error("incomplete 24-hour schedule: {0}")]
    IncompleteSchedule(String),

    #[error("profile length mismatch: {load_len} load points, {availability_len} availability flags")]
    ProfileLengthMismatch {
        load_len: usize,
        availability_len: usize,
    },

    #[error("invalid efficiency curve: {0}")]
    InvalidEfficiencyCurve(String),

    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: String, reason: String },
}

impl EngineError {
    pub(crate) fn parameter(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = EngineError::NegativeLoad {
            hour: 7,
            load_kw: -0.5,
        };
        assert_eq!(err.to_string(), "negative load at hour 7: -0.5 kW");

        let err = EngineError::parameter("generator.rated_kw", "must be > 0");
        assert!(err.to_string().contains("generator.rated_kw"));
    }

    #[test]
    fn length_mismatch_reports_both_lengths() {
        let err = EngineError::ProfileLengthMismatch {
            load_len: 24,
            availability_len: 23,
        };
        let msg = err.to_string();
        assert!(msg.contains("24 load points"));
        assert!(msg.contains("23 availability flags"));
    }
}
