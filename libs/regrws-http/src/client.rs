use crate::builder::HttpClientBuilder;
use crate::config::TransportSecurity;
use crate::error::HttpError;
use crate::request::RequestBuilder;
use crate::response::BodyLimits;
use bytes::Bytes;
use http::{Method, Request, Response};
use http_body_util::Full;
use hyper::body::Incoming;
use tower::util::BoxCloneSyncService;

/// Type-erased service stack behind [`HttpClient`]
pub type InnerService =
    BoxCloneSyncService<Request<Full<Bytes>>, Response<Incoming>, HttpError>;

/// HTTP client over a tower middleware stack (timeout, default headers, hyper pool)
///
/// `HttpClient` is `Clone + Send + Sync`; clones share the connection pool.
///
/// # Example
///
/// ```ignore
/// let client = HttpClient::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let resp = client
///     .put("https://reg.ote.arin.net/rest/net/NET-10-0-0-0-1/reassign?apikey=KEY")
///     .xml(body)
///     .send()
///     .await?;
/// ```
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) service: InnerService,
    pub(crate) body_limits: BodyLimits,
    pub(crate) transport_security: TransportSecurity,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails
    pub fn new() -> Result<Self, HttpError> {
        HttpClientBuilder::new().build()
    }

    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Start a request with an arbitrary method
    ///
    /// The URL must be absolute. Query parameters are encoded by the caller
    /// (e.g. via `url::Url`).
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        RequestBuilder::new(
            self.service.clone(),
            self.body_limits,
            method,
            url.to_owned(),
            self.transport_security,
        )
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    pub fn put(&self, url: &str) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("max_body_size", &self.body_limits.max_size)
            .field("timeout", &self.body_limits.read_timeout)
            .field("transport_security", &self.transport_security)
            .finish_non_exhaustive()
    }
}
