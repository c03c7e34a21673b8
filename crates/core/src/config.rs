//! Client runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the gateway and the session store. Nothing below reads environment variables
//! itself; the binary collects the raw values and hands them to
//! [`ClientConfig::from_env_values`].

use crate::constants::{CONSULTATION_FEE, DEFAULT_API_URL, DEFAULT_SESSION_FILE};
use crate::{ClientError, ClientResult};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Client configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_base_url: Url,
    session_file: PathBuf,
    request_timeout: Option<Duration>,
    consultation_fee: u32,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidInput` if the base URL is not http(s) or cannot carry a path.
    pub fn new(
        api_base_url: Url,
        session_file: PathBuf,
        request_timeout: Option<Duration>,
    ) -> ClientResult<Self> {
        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidInput(format!(
                "API base URL must use http or https, got {}",
                api_base_url.scheme()
            )));
        }
        if api_base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidInput(
                "API base URL cannot be used as a base".into(),
            ));
        }
        if request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ClientError::InvalidInput(
                "request timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            api_base_url,
            session_file,
            request_timeout,
            consultation_fee: CONSULTATION_FEE,
        })
    }

    /// Build a config from raw environment values; `None` or blank means "use the default".
    ///
    /// # Arguments
    ///
    /// * `api_url` - value of `MEDITRACK_API_URL`
    /// * `session_file` - value of `MEDITRACK_SESSION_FILE`
    /// * `timeout_secs` - value of `MEDITRACK_TIMEOUT_SECS`
    pub fn from_env_values(
        api_url: Option<String>,
        session_file: Option<String>,
        timeout_secs: Option<String>,
    ) -> ClientResult<Self> {
        let api_url = non_blank(api_url).unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let api_base_url = Url::parse(&api_url)
            .map_err(|e| ClientError::InvalidInput(format!("invalid API URL {api_url:?}: {e}")))?;

        let session_file =
            PathBuf::from(non_blank(session_file).unwrap_or_else(|| DEFAULT_SESSION_FILE.into()));

        let request_timeout = non_blank(timeout_secs)
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                    ClientError::InvalidInput(format!(
                        "MEDITRACK_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
                    ))
                })
            })
            .transpose()?;

        Self::new(api_base_url, session_file, request_timeout)
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    pub fn session_file(&self) -> &Path {
        &self.session_file
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn consultation_fee(&self) -> u32 {
        self.consultation_fee
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_for_missing_values() {
        let cfg = ClientConfig::from_env_values(None, Some("  ".into()), None).unwrap();
        assert_eq!(cfg.api_base_url().as_str(), "http://localhost:6969/");
        assert_eq!(cfg.session_file(), Path::new(DEFAULT_SESSION_FILE));
        assert_eq!(cfg.request_timeout(), None);
        assert_eq!(cfg.consultation_fee(), CONSULTATION_FEE);
    }

    #[test]
    fn test_timeout_is_parsed_in_seconds() {
        let cfg = ClientConfig::from_env_values(None, None, Some("15".into())).unwrap();
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_rejects_zero_or_garbage_timeout() {
        assert!(ClientConfig::from_env_values(None, None, Some("0".into())).is_err());
        assert!(ClientConfig::from_env_values(None, None, Some("soon".into())).is_err());
    }

    #[test]
    fn test_rejects_non_http_urls() {
        let err = ClientConfig::from_env_values(Some("ftp://example.com".into()), None, None)
            .expect_err("ftp should be rejected");
        assert!(matches!(err, ClientError::InvalidInput(_)));
        assert!(ClientConfig::from_env_values(Some("not a url".into()), None, None).is_err());
    }
}
