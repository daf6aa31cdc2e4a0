use super::manager::Manager;
use super::session::Session;
use crate::config::RegrwsConfig;
use crate::error::RegrwsError;
use crate::models::{Customer, Net, Org, Poc};
use regrws_http::{HttpClient, HttpClientBuilder};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Entry point: one manager per resource kind over a shared session.
///
/// `Clone + Send + Sync`. Calls are independent round trips; issue the
/// calls of one workflow one at a time, since concurrent calls carry no
/// ordering guarantee.
///
/// ```ignore
/// let client = RegrwsClient::from_env()?;
/// let net = client.net().from_handle("NET-10-0-0-0-1").await?.into_result()?;
/// let ticket = net.reassign(&recipient).await?;
/// ```
#[derive(Clone)]
pub struct RegrwsClient {
    session: Arc<Session>,
}

impl RegrwsClient {
    /// # Errors
    ///
    /// Returns [`RegrwsError::Config`] for an invalid configuration and
    /// [`RegrwsError::Http`] when the transport cannot be built.
    pub fn new(config: RegrwsConfig) -> Result<Self, RegrwsError> {
        config.validate()?;
        let http = HttpClientBuilder::with_config(config.http_client_config()).build()?;
        Self::with_http_client(config, http)
    }

    /// Configuration from `REGRWS_*` environment variables
    ///
    /// # Errors
    ///
    /// Same as [`RegrwsConfig::from_env`] and [`RegrwsClient::new`].
    pub fn from_env() -> Result<Self, RegrwsError> {
        Self::new(RegrwsConfig::from_env()?)
    }

    /// Use a caller-built transport
    ///
    /// # Errors
    ///
    /// Returns [`RegrwsError::Config`] for an invalid configuration.
    pub fn with_http_client(config: RegrwsConfig, http: HttpClient) -> Result<Self, RegrwsError> {
        config.validate()?;
        tracing::debug!(base_url = %config.base_url, "registry client ready");
        let RegrwsConfig {
            base_url, api_key, ..
        } = config;
        Ok(Self {
            session: Arc::new(Session::new(http, base_url, api_key)),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.session.base_url()
    }

    #[must_use]
    pub fn org(&self) -> Manager<Org> {
        Manager::new(Arc::clone(&self.session))
    }

    #[must_use]
    pub fn customer(&self) -> Manager<Customer> {
        Manager::new(Arc::clone(&self.session))
    }

    #[must_use]
    pub fn poc(&self) -> Manager<Poc> {
        Manager::new(Arc::clone(&self.session))
    }

    #[must_use]
    pub fn net(&self) -> Manager<Net> {
        Manager::new(Arc::clone(&self.session))
    }
}

impl fmt::Debug for RegrwsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegrwsClient")
            .field("base_url", &self.base_url().as_str())
            .finish_non_exhaustive()
    }
}
