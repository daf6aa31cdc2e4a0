//! Client settings.
//!
//! Layered with figment: built-in defaults, then an optional YAML file, then
//! `REGRWS_*` environment variables.

use crate::error::RegrwsError;
use crate::secret::ApiKey;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use regrws_http::{HttpClientConfig, TransportSecurity};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Operational test environment; production is `https://reg.arin.net/`
pub const DEFAULT_BASE_URL: &str = "https://reg.ote.arin.net/";

pub const ENV_PREFIX: &str = "REGRWS_";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct Defaults {
    base_url: &'static str,
    timeout_secs: u64,
    allow_insecure_http: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            allow_insecure_http: false,
        }
    }
}

/// Connection settings for [`RegrwsClient`](crate::RegrwsClient).
#[derive(Debug, Clone, Deserialize)]
pub struct RegrwsConfig {
    /// Registry root; `rest/<endpoint>` is appended to it
    pub base_url: Url,

    #[serde(default)]
    pub api_key: ApiKey,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub user_agent: Option<String>,

    /// Permit `http://` base URLs (mock servers only)
    #[serde(default)]
    pub allow_insecure_http: bool,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl RegrwsConfig {
    /// # Errors
    ///
    /// Returns [`RegrwsError::Url`] when `base_url` does not parse.
    pub fn new(base_url: &str, api_key: impl Into<ApiKey>) -> Result<Self, RegrwsError> {
        let base_url = Url::parse(base_url).map_err(|e| RegrwsError::Url {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            allow_insecure_http: false,
        })
    }

    /// Defaults overridden by `REGRWS_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns [`RegrwsError::Config`] when extraction or validation fails.
    pub fn from_env() -> Result<Self, RegrwsError> {
        Self::load(None)
    }

    /// Defaults, then `path` (YAML) when given, then the environment
    ///
    /// # Errors
    ///
    /// Returns [`RegrwsError::Config`] when extraction or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, RegrwsError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Defaults::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`RegrwsError::Config`] for an unsupported scheme, plain HTTP
    /// without `allow_insecure_http`, a missing host, or an empty API key.
    pub fn validate(&self) -> Result<(), RegrwsError> {
        let scheme_allowed = match self.base_url.scheme() {
            "https" => true,
            "http" => self.allow_insecure_http,
            other => {
                return Err(RegrwsError::Config(format!(
                    "base_url scheme '{other}' is not supported"
                )));
            }
        };
        if !scheme_allowed {
            return Err(RegrwsError::Config(
                "base_url uses http but allow_insecure_http is not set".to_owned(),
            ));
        }
        if self.base_url.host_str().is_none() {
            return Err(RegrwsError::Config("base_url has no host".to_owned()));
        }
        if self.api_key.is_empty() {
            return Err(RegrwsError::Config("api_key is required".to_owned()));
        }
        Ok(())
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Transport settings derived from this configuration
    #[must_use]
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut http = HttpClientConfig {
            request_timeout: self.timeout(),
            ..HttpClientConfig::default()
        };
        if let Some(user_agent) = &self.user_agent {
            http.user_agent.clone_from(user_agent);
        }
        if self.allow_insecure_http {
            http.transport = TransportSecurity::AllowInsecureHttp;
        }
        http
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::io::Write;

    const VARS: [&str; 5] = [
        "REGRWS_BASE_URL",
        "REGRWS_API_KEY",
        "REGRWS_TIMEOUT_SECS",
        "REGRWS_USER_AGENT",
        "REGRWS_ALLOW_INSECURE_HTTP",
    ];

    fn cleared<F: FnOnce()>(overrides: &[(&str, &str)], f: F) {
        let vars: Vec<(&str, Option<&str>)> = VARS
            .iter()
            .map(|name| {
                let value = overrides.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
                (*name, value)
            })
            .collect();
        temp_env::with_vars(vars, f);
    }

    #[test]
    fn test_from_env_reads_prefixed_vars() {
        cleared(
            &[
                ("REGRWS_BASE_URL", "https://reg.arin.net/"),
                ("REGRWS_API_KEY", "API-1234"),
                ("REGRWS_TIMEOUT_SECS", "12"),
            ],
            || {
                let config = RegrwsConfig::from_env().unwrap();
                assert_eq!(config.base_url.as_str(), "https://reg.arin.net/");
                assert_eq!(config.api_key.expose(), "API-1234");
                assert_eq!(config.timeout(), Duration::from_secs(12));
            },
        );
    }

    #[test]
    fn test_defaults_apply() {
        cleared(&[("REGRWS_API_KEY", "APIKEY")], || {
            let config = RegrwsConfig::from_env().unwrap();
            assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
            assert_eq!(config.timeout_secs, 30);
            assert!(!config.allow_insecure_http);
        });
    }

    #[test]
    fn test_numeric_api_key() {
        cleared(&[("REGRWS_API_KEY", "12345")], || {
            let config = RegrwsConfig::from_env().unwrap();
            assert_eq!(config.api_key.expose(), "12345");
        });
    }

    #[test]
    fn test_missing_api_key_rejected() {
        cleared(&[], || {
            let err = RegrwsConfig::from_env().unwrap_err();
            assert!(matches!(err, RegrwsError::Config(msg) if msg.contains("api_key")));
        });
    }

    #[test]
    fn test_yaml_file_then_env() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "base_url: https://reg.arin.net/\napi_key: FROM-FILE\ntimeout_secs: 7").unwrap();

        cleared(&[("REGRWS_API_KEY", "FROM-ENV")], || {
            let config = RegrwsConfig::load(Some(file.path())).unwrap();
            assert_eq!(config.base_url.as_str(), "https://reg.arin.net/");
            assert_eq!(config.api_key.expose(), "FROM-ENV");
            assert_eq!(config.timeout_secs, 7);
        });
    }

    #[test]
    fn test_plain_http_needs_opt_in() {
        let mut config = RegrwsConfig::new("http://127.0.0.1:8080/", "APIKEY").unwrap();
        assert!(matches!(config.validate(), Err(RegrwsError::Config(_))));
        config.allow_insecure_http = true;
        assert!(config.validate().is_ok());
        assert_eq!(
            config.http_client_config().transport,
            TransportSecurity::AllowInsecureHttp
        );
    }

    #[test]
    fn test_unsupported_scheme() {
        let config = RegrwsConfig::new("ftp://reg.arin.net/", "APIKEY").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let config = RegrwsConfig::new(DEFAULT_BASE_URL, "SECRET-KEY").unwrap();
        assert!(!format!("{config:?}").contains("SECRET-KEY"));
    }
}
