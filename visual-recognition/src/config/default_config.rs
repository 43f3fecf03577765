//! Service config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `VISUAL_RECOGNITION_URL`          = service endpoint (optional, defaults to [`DEFAULT_ENDPOINT`])
//! - `VISUAL_RECOGNITION_VERSION`      = API version date, `YYYY-MM-DD` (mandatory)
//! - `VISUAL_RECOGNITION_TIMEOUT_SECS` = request timeout in seconds (optional, u64)

use tracing::debug;

use crate::{
    config::service_config::ServiceConfig,
    error_handler::{Result, env_opt, env_opt_u64, must_env},
};

/// Public endpoint of the hosted service.
pub const DEFAULT_ENDPOINT: &str = "https://gateway.watsonplatform.net/visual-recognition/api";

/// Constructs a [`ServiceConfig`] from the environment.
///
/// # Errors
///
/// - [`ConfigError::MissingVar`](crate::error_handler::ConfigError::MissingVar) if `VISUAL_RECOGNITION_VERSION` is unset
/// - [`ConfigError::InvalidFormat`](crate::error_handler::ConfigError::InvalidFormat) for a bad URL or version
/// - [`ConfigError::InvalidNumber`](crate::error_handler::ConfigError::InvalidNumber) for a bad timeout
pub fn config_from_env() -> Result<ServiceConfig> {
    let endpoint = env_opt("VISUAL_RECOGNITION_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let version = must_env("VISUAL_RECOGNITION_VERSION")?;
    let timeout_secs = env_opt_u64("VISUAL_RECOGNITION_TIMEOUT_SECS")?;

    let mut cfg = ServiceConfig::new(endpoint, version)?;
    if let Some(secs) = timeout_secs {
        cfg = cfg.with_timeout_secs(secs);
    }

    debug!(
        endpoint = %cfg.endpoint,
        version = %cfg.version,
        timeout_secs = ?cfg.timeout_secs,
        "service config loaded from env"
    );
    Ok(cfg)
}
