//! Unified error handling for `visual-recognition`.
//!
//! This module exposes a single top-level error type [`VisualRecognitionError`]
//! for the whole library, and groups config-time errors in [`ConfigError`].
//! Small helpers for reading/validating environment variables and builder
//! arguments are provided and return the unified [`Result<T>`] alias.
//!
//! All messages include the prefix `[Visual Recognition]` to simplify attribution in logs.

use std::path::PathBuf;

use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, VisualRecognitionError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `visual-recognition` crate.
///
/// Builder failures are raised synchronously by the offending setter and are
/// never retried. Config and transport errors come from the request-mapping
/// layer.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum VisualRecognitionError {
    /// A required builder argument was `None`.
    #[error("[Visual Recognition] invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The image file could not be opened for reading.
    #[error("[Visual Recognition] file not found: {}: {}", .path.display(), .source)]
    FileNotFound {
        /// Path that was passed to the builder.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The attached image stream failed while being drained.
    #[error("[Visual Recognition] failed to read image data: {0}")]
    ImageRead(#[source] std::io::Error),

    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying HTTP client error (client construction, invalid MIME type).
    #[error("[Visual Recognition] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[Visual Recognition] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (timeouts).
    #[error("[Visual Recognition] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `VISUAL_RECOGNITION_TIMEOUT_SECS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL or version date).
    #[error("[Visual Recognition] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `VISUAL_RECOGNITION_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`VisualRecognitionError::Config`] with [`ConfigError::MissingVar`]
/// if the variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Reads an optional, non-empty environment variable.
pub fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match env_opt(name) {
        Some(v) => v.trim().parse::<u64>().map(Some).map_err(|_| {
            VisualRecognitionError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers (return unified `Result<T>`)                           */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start with
/// a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates an API version date of the form `YYYY-MM-DD`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] if the value is not a calendar date.
pub fn validate_version_date(var: &'static str, value: &str) -> Result<()> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            ConfigError::InvalidFormat {
                var,
                reason: "expected a date like 2018-03-19",
            }
            .into()
        })
}

/// Unwraps a builder argument that must be present.
///
/// Any present value passes, including an empty string.
///
/// # Errors
/// Returns [`VisualRecognitionError::InvalidArgument`] with `message` if
/// `value` is `None`.
pub fn require_present<T>(value: Option<T>, message: &'static str) -> Result<T> {
    value.ok_or(VisualRecognitionError::InvalidArgument(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_scheme_is_checked() {
        assert!(validate_http_endpoint("URL", "https://example.com").is_ok());
        assert!(validate_http_endpoint("URL", "http://localhost:8080").is_ok());
        let err = validate_http_endpoint("URL", "ftp://example.com").unwrap_err();
        assert!(matches!(
            err,
            VisualRecognitionError::Config(ConfigError::InvalidFormat { var: "URL", .. })
        ));
    }

    #[test]
    fn version_date_must_be_a_real_date() {
        assert!(validate_version_date("V", "2018-03-19").is_ok());
        assert!(validate_version_date("V", "2018-13-40").is_err());
        assert!(validate_version_date("V", "yesterday").is_err());
    }

    #[test]
    fn only_absent_arguments_are_rejected() {
        assert_eq!(require_present(Some("IBM"), "owner cannot be null").unwrap(), "IBM");
        assert_eq!(require_present(Some("  "), "owner cannot be null").unwrap(), "  ");
        assert_eq!(require_present(Some(""), "owner cannot be null").unwrap(), "");
        let err = require_present(None::<&str>, "owner cannot be null").unwrap_err();
        assert!(matches!(
            err,
            VisualRecognitionError::InvalidArgument("owner cannot be null")
        ));
    }

    #[test]
    fn missing_env_var_is_reported_by_name() {
        let err = must_env("VISUAL_RECOGNITION_TEST_SURELY_UNSET_VAR").unwrap_err();
        assert!(err.to_string().contains("VISUAL_RECOGNITION_TEST_SURELY_UNSET_VAR"));
        assert!(
            env_opt_u64("VISUAL_RECOGNITION_TEST_SURELY_UNSET_VAR")
                .unwrap()
                .is_none()
        );
    }
}
