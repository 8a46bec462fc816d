//! Core error types for the preprocessing pipeline.
//!
//! This module defines the error enum shared by every fallible operation in
//! the crate: sample lookups, the elementwise numeric primitives, and
//! transform construction from configuration. Nothing is caught or recovered
//! internally; errors propagate to the pipeline caller unmodified.

use thiserror::Error;

/// Errors raised while building or applying preprocessing transforms.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A transform asked the sample for an entry it does not contain.
    #[error("sample has no entry '{key}'")]
    MissingKey {
        /// The key that was looked up.
        key: String,
    },

    /// A sample entry holds a different kind of value than the caller asked for.
    #[error("entry '{key}' holds {actual}, expected {expected}")]
    TypeMismatch {
        /// The key whose entry was accessed.
        key: String,
        /// The kind of value the caller asked for.
        expected: &'static str,
        /// The kind of value actually stored.
        actual: &'static str,
    },

    /// Input data violated a numeric primitive's contract (e.g. channel count
    /// not matching the mean/std length).
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// A transform configuration could not be interpreted.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Shape error from the underlying array library.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),
}

impl PrepError {
    /// Creates a [`PrepError::MissingKey`] for the given key.
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Creates a [`PrepError::InvalidInput`] from a message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a configuration error with context and details.
    ///
    /// # Arguments
    ///
    /// * `context` - High-level description of what was being configured
    /// * `details` - Specific details about what went wrong
    pub fn config_error_detailed(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ConfigError {
            message: format!("{}: {}", context.into(), details.into()),
        }
    }

    /// Creates a configuration error for a transform name the registry does
    /// not know.
    pub fn unknown_transform(name: impl Into<String>) -> Self {
        Self::ConfigError {
            message: format!("unknown transform '{}'", name.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_offending_key() {
        let err = PrepError::missing_key("img");
        assert_eq!(err.to_string(), "sample has no entry 'img'");

        let err = PrepError::TypeMismatch {
            key: "img".to_string(),
            expected: "an image buffer",
            actual: "normalization metadata",
        };
        assert_eq!(
            err.to_string(),
            "entry 'img' holds normalization metadata, expected an image buffer"
        );
    }

    #[test]
    fn config_helpers_compose_messages() {
        let err = PrepError::config_error_detailed("Normalize", "missing field `std`");
        assert_eq!(
            err.to_string(),
            "configuration: Normalize: missing field `std`"
        );

        let err = PrepError::unknown_transform("Resize");
        assert_eq!(err.to_string(), "configuration: unknown transform 'Resize'");
    }
}
