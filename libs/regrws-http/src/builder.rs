use crate::client::{HttpClient, InnerService};
use crate::config::{HttpClientConfig, TransportSecurity};
use crate::error::HttpError;
use crate::layers::DefaultHeadersLayer;
use crate::response::BodyLimits;
use crate::tls::build_https_connector;
use bytes::Bytes;
use http_body_util::Full;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use std::time::Duration;
use tower::timeout::TimeoutLayer;
use tower::util::BoxCloneSyncService;
use tower::{ServiceBuilder, ServiceExt};

type PooledClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Builder for an [`HttpClient`].
///
/// Only the knobs the registry client turns have setters; anything else
/// (TLS roots, pool sizing, `Accept`) goes through [`HttpClientConfig`] and
/// [`with_config`](Self::with_config).
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: HttpClientConfig) -> Self {
        Self { config }
    }

    /// Time allowed for the response headers, and again for the body read
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.config.max_body_size = size;
        self
    }

    /// `TransportSecurity::AllowInsecureHttp` is for mock servers only
    #[must_use]
    pub fn transport(mut self, transport: TransportSecurity) -> Self {
        self.config.transport = transport;
        self
    }

    /// Build the HTTP client
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails or a default header is invalid
    pub fn build(self) -> Result<HttpClient, HttpError> {
        let config = self.config;
        if config.transport == TransportSecurity::AllowInsecureHttp {
            tracing::warn!(
                "insecure HTTP enabled (TransportSecurity::AllowInsecureHttp); \
                 use only for testing with mock servers"
            );
        }

        let pool = pooled_client(&config)?;
        let timeout = config.request_timeout;
        let headers = DefaultHeadersLayer::try_new(&config.accept, &config.user_agent)?;

        // Timeout -> DefaultHeaders -> hyper. Nothing retries or follows
        // redirects; 3xx reaches the caller like any other status.
        let service: InnerService = BoxCloneSyncService::new(
            ServiceBuilder::new()
                .layer(TimeoutLayer::new(timeout))
                .layer(headers)
                .service(pool)
                .map_err(move |e: tower::BoxError| map_tower_error(e, timeout)),
        );

        Ok(HttpClient {
            service,
            body_limits: BodyLimits {
                max_size: config.max_body_size,
                read_timeout: timeout,
            },
            transport_security: config.transport,
        })
    }
}

fn pooled_client(config: &HttpClientConfig) -> Result<PooledClient, HttpError> {
    let connector = build_https_connector(config.tls_roots, config.transport)?;
    let mut builder = Client::builder(TokioExecutor::new());
    // the idle timeout is driven by the pool timer
    builder
        .pool_timer(TokioTimer::new())
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(config.pool_idle_timeout);
    Ok(builder.build(connector))
}

fn map_tower_error(err: tower::BoxError, timeout: Duration) -> HttpError {
    if err.is::<tower::timeout::error::Elapsed>() {
        return HttpError::Timeout(timeout);
    }
    err.downcast::<HttpError>()
        .map_or_else(HttpError::Transport, |http_err| *http_err)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;

    #[test]
    fn test_builder_default() {
        let builder = HttpClientBuilder::new();
        assert_eq!(builder.config.request_timeout, Duration::from_secs(30));
        assert_eq!(builder.config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(builder.config.accept, "application/xml");
    }

    #[test]
    fn test_builder_setters() {
        let builder = HttpClientBuilder::new()
            .timeout(Duration::from_secs(3))
            .user_agent("regrws-cli/0.1")
            .max_body_size(1024)
            .transport(TransportSecurity::AllowInsecureHttp);
        assert_eq!(builder.config.request_timeout, Duration::from_secs(3));
        assert_eq!(builder.config.user_agent, "regrws-cli/0.1");
        assert_eq!(builder.config.max_body_size, 1024);
        assert_eq!(
            builder.config.transport,
            TransportSecurity::AllowInsecureHttp
        );
    }

    #[test]
    fn test_build_rejects_invalid_user_agent() {
        let result = HttpClientBuilder::new().user_agent("bad\nagent").build();
        assert!(matches!(result, Err(HttpError::InvalidHeaderValue(_))));
    }

    #[tokio::test]
    async fn test_insecure_http_warning_emitted() {
        use std::sync::{Arc, Mutex};
        use tracing_subscriber::layer::SubscriberExt;

        #[derive(Clone, Default)]
        struct WarningCapture {
            warnings: Arc<Mutex<Vec<String>>>,
        }

        impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarningCapture {
            fn on_event(
                &self,
                event: &tracing::Event<'_>,
                _ctx: tracing_subscriber::layer::Context<'_, S>,
            ) {
                if *event.metadata().level() == tracing::Level::WARN {
                    let mut visitor = MessageVisitor(String::new());
                    event.record(&mut visitor);
                    self.warnings.lock().unwrap().push(visitor.0);
                }
            }
        }

        struct MessageVisitor(String);
        impl tracing::field::Visit for MessageVisitor {
            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.0 = format!("{value:?}");
                }
            }
        }

        let capture = WarningCapture::default();
        let warnings = capture.warnings.clone();
        let subscriber = tracing_subscriber::registry().with(capture);

        tracing::subscriber::with_default(subscriber, || {
            HttpClientBuilder::new()
                .transport(TransportSecurity::AllowInsecureHttp)
                .build()
                .unwrap();
            HttpClientBuilder::new().build().unwrap();
        });

        let warnings = warnings.lock().unwrap();
        assert_eq!(warnings.len(), 1, "only the insecure client warns");
        assert!(warnings[0].contains("insecure HTTP enabled"));
    }

    #[test]
    fn test_map_tower_error_transport() {
        let err: tower::BoxError = "connection reset".into();
        assert!(matches!(
            map_tower_error(err, Duration::from_secs(1)),
            HttpError::Transport(_)
        ));
    }
}
