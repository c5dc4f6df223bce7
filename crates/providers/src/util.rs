//! Shared utility functions for provider adapters.

use ct_domain::error::{Error, Result};

/// Convert a [`reqwest::Error`] into the domain [`Error`] type.
///
/// Timeout errors map to [`Error::Timeout`]; everything else maps to
/// [`Error::Http`].
pub(crate) fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

/// Build the shared HTTP client with the configured per-request timeout.
pub(crate) fn http_client(timeout_ms: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(timeout_ms))
        .build()
        .map_err(from_reqwest)
}

/// Resolve an optional bearer key from the named environment variable.
///
/// No variable configured means no key. A configured but unset variable is
/// an error so a missing secret is caught at startup, not on the first turn.
pub(crate) fn resolve_api_key(env: Option<&str>) -> Result<Option<String>> {
    let Some(env_var) = env else {
        return Ok(None);
    };
    match std::env::var(env_var) {
        Ok(v) if !v.is_empty() => Ok(Some(v)),
        _ => Err(Error::Config(format!(
            "environment variable '{env_var}' not set or empty"
        ))),
    }
}

/// Turn a non-2xx response into a provider error carrying status and body.
pub(crate) fn status_error(provider: &str, status: reqwest::StatusCode, body: &str) -> Error {
    Error::Provider {
        provider: provider.to_owned(),
        message: format!("HTTP {} - {}", status.as_u16(), body),
    }
}
