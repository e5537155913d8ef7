//! Error types
//!
//! Every fallible assembly step returns a [`ModelError`]. Loading a
//! calibration file returns a [`ConfigError`]; exports have their own
//! error type in [`crate::output::export`].

use thiserror::Error;

/// Errors raised while assembling units, flow sheets and processes
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// A per-species array does not have one entry per species
    #[error("Parameter '{parameter}' expects {expected} entries, got {actual}")]
    ShapeMismatch {
        parameter: String,
        expected: usize,
        actual: usize,
    },

    /// A scalar or array value is outside its physical range
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    #[error("Unit '{0}' is already part of the flow sheet")]
    DuplicateUnit(String),

    #[error("Unit '{0}' is not part of the flow sheet")]
    UnknownUnit(String),

    /// A builder needs a unit the flow sheet does not have
    #[error("Flow sheet has no {0}")]
    MissingUnit(&'static str),

    #[error("Cannot connect '{origin}' to '{destination}': {reason}")]
    InvalidConnection {
        origin: String,
        destination: String,
        reason: String,
    },

    #[error("Invalid parameter path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Event '{0}' already exists")]
    DuplicateEvent(String),

    #[error("Event '{name}' at t = {time} s: {reason}")]
    EventTime {
        name: String,
        time: f64,
        reason: String,
    },
}

impl ModelError {
    pub(crate) fn shape(parameter: &str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            parameter: parameter.to_string(),
            expected,
            actual,
        }
    }

    pub(crate) fn invalid(parameter: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading a calibration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("Invalid calibration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_message() {
        let err = ModelError::shape("film_diffusion", 3, 2);
        assert_eq!(
            err.to_string(),
            "Parameter 'film_diffusion' expects 3 entries, got 2"
        );
    }

    #[test]
    fn test_missing_unit_message() {
        assert_eq!(
            ModelError::MissingUnit("column").to_string(),
            "Flow sheet has no column"
        );
    }
}
