use std::time::Duration;

use crate::error_handler::{Result, validate_http_endpoint, validate_version_date};

/// Path of the classify operation, relative to the service endpoint.
pub const CLASSIFY_PATH: &str = "/v3/classify";

/// Where and how to reach the Visual Recognition service.
///
/// # Fields
///
/// - `endpoint`: Base URL of the service instance (no trailing `/v3`).
/// - `version`: API version date sent as the `version` query parameter.
/// - `timeout_secs`: Optional request timeout in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL of the service (e.g. `https://gateway.watsonplatform.net/visual-recognition/api`).
    pub endpoint: String,

    /// API version date, `YYYY-MM-DD`.
    pub version: String,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl ServiceConfig {
    /// Creates a validated config without a timeout.
    ///
    /// # Errors
    /// [`ConfigError::InvalidFormat`](crate::error_handler::ConfigError::InvalidFormat)
    /// if the endpoint is not http(s) or the version is not a date.
    pub fn new(endpoint: impl Into<String>, version: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into().trim().to_string();
        let version = version.into().trim().to_string();
        validate_http_endpoint("endpoint", &endpoint)?;
        validate_version_date("version", &version)?;

        Ok(Self {
            endpoint,
            version,
            timeout_secs: None,
        })
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Full URL of the classify operation, without query string.
    pub fn classify_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), CLASSIFY_PATH)
    }

    /// Builds an HTTP client honoring `timeout_secs` (default 60s).
    ///
    /// # Errors
    /// [`VisualRecognitionError::HttpTransport`](crate::error_handler::VisualRecognitionError::HttpTransport)
    /// if the client cannot be built.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let timeout = self
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        Ok(reqwest::Client::builder().timeout(timeout).build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_url_joins_without_double_slash() {
        let cfg = ServiceConfig::new("https://example.com/api/", "2018-03-19").unwrap();
        assert_eq!(cfg.classify_url(), "https://example.com/api/v3/classify");
    }

    #[test]
    fn rejects_bad_endpoint_and_version() {
        assert!(ServiceConfig::new("example.com", "2018-03-19").is_err());
        assert!(ServiceConfig::new("https://example.com", "v3").is_err());
    }

    #[test]
    fn timeout_is_optional() {
        let cfg = ServiceConfig::new("http://localhost:9000", "2018-03-19").unwrap();
        assert_eq!(cfg.timeout_secs, None);
        assert_eq!(cfg.with_timeout_secs(5).timeout_secs, Some(5));
    }
}
