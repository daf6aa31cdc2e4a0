use std::time::Duration;

/// Default User-Agent string for registry requests
pub const DEFAULT_USER_AGENT: &str = concat!("regrws-http/", env!("CARGO_PKG_VERSION"));

/// Media type used for request bodies and the default `Accept` header
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// TLS root certificate strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsRootConfig {
    /// Use Mozilla's root certificates (webpki-roots, no OS dependency)
    #[default]
    WebPki,
    /// Use OS native root certificate store
    Native,
}

/// Transport security configuration
///
/// Controls whether the client enforces TLS or allows insecure HTTP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportSecurity {
    /// Require TLS for all connections (HTTPS only)
    #[default]
    TlsOnly,
    /// Allow plain HTTP, for mock servers in tests
    AllowInsecureHttp,
}

/// Overall HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Budget for the response headers and, separately, for reading the
    /// body (default: 30 seconds)
    pub request_timeout: Duration,

    /// Maximum response body size in bytes (default: 10 MB)
    pub max_body_size: usize,

    /// User-Agent header value
    pub user_agent: String,

    /// `Accept` header sent when the caller does not set one
    pub accept: String,

    /// Transport security mode (default: `TlsOnly`)
    pub transport: TransportSecurity,

    /// TLS root certificate strategy (default: `WebPki`)
    pub tls_roots: TlsRootConfig,

    /// Idle connection timeout for the pool (default: 90 seconds)
    ///
    /// `None` keeps idle connections indefinitely.
    pub pool_idle_timeout: Option<Duration>,

    /// Maximum idle connections kept per host (default: 8)
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_body_size: 10 * 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            accept: XML_CONTENT_TYPE.to_owned(),
            transport: TransportSecurity::TlsOnly,
            tls_roots: TlsRootConfig::WebPki,
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: 8,
        }
    }
}

impl HttpClientConfig {
    /// Configuration for talking to a local mock server over plain HTTP
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            transport: TransportSecurity::AllowInsecureHttp,
            pool_idle_timeout: None,
            ..Self::default()
        }
    }
}
