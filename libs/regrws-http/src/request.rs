use crate::client::InnerService;
use crate::config::{TransportSecurity, XML_CONTENT_TYPE};
use crate::error::{HttpError, InvalidUriKind};
use crate::response::{BodyLimits, HttpResponse};
use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::{Method, Request};
use http_body_util::Full;
use tower::ServiceExt;

#[derive(Clone, Debug)]
enum BodyKind {
    Empty,
    Bytes(Bytes),
    Xml(Bytes),
}

/// HTTP request builder
///
/// Header errors are deferred and returned from [`send`](Self::send).
#[must_use = "RequestBuilder does nothing until .send() is called"]
pub struct RequestBuilder {
    service: InnerService,
    body_limits: BodyLimits,
    method: Method,
    url: String,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: BodyKind,
    error: Option<HttpError>,
    transport_security: TransportSecurity,
}

impl RequestBuilder {
    pub(crate) fn new(
        service: InnerService,
        body_limits: BodyLimits,
        method: Method,
        url: String,
        transport_security: TransportSecurity,
    ) -> Self {
        Self {
            service,
            body_limits,
            method,
            url,
            headers: Vec::new(),
            body: BodyKind::Empty,
            error: None,
            transport_security,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => self.headers.push((name, value)),
            (Err(e), _) => self.error = Some(HttpError::InvalidHeaderName(e)),
            (_, Err(e)) => self.error = Some(HttpError::InvalidHeaderValue(e)),
        }
        self
    }

    /// Set an XML document as the body
    ///
    /// Adds `Content-Type: application/xml` unless the caller set one.
    pub fn xml(mut self, body: impl Into<Bytes>) -> Self {
        self.body = BodyKind::Xml(body.into());
        self
    }

    /// Set a raw body without a content type
    pub fn body_bytes(mut self, body: Bytes) -> Self {
        self.body = BodyKind::Bytes(body);
        self
    }

    fn validate_url(&self) -> Result<http::Uri, HttpError> {
        let uri: http::Uri =
            self.url
                .parse()
                .map_err(|e: http::uri::InvalidUri| HttpError::InvalidUri {
                    url: self.url.clone(),
                    kind: InvalidUriKind::ParseError,
                    reason: e.to_string(),
                })?;

        if uri.authority().is_none() {
            return Err(HttpError::InvalidUri {
                url: self.url.clone(),
                kind: InvalidUriKind::MissingAuthority,
                reason: "missing host/authority".to_owned(),
            });
        }

        match uri.scheme_str() {
            Some("https") => Ok(uri),
            Some("http") => match self.transport_security {
                TransportSecurity::AllowInsecureHttp => Ok(uri),
                TransportSecurity::TlsOnly => Err(HttpError::InvalidScheme {
                    scheme: "http".to_owned(),
                    reason: "HTTPS required (transport security is TlsOnly)".to_owned(),
                }),
            },
            Some(scheme) => Err(HttpError::InvalidScheme {
                scheme: scheme.to_owned(),
                reason: "only http:// and https:// schemes are supported".to_owned(),
            }),
            None => Err(HttpError::InvalidUri {
                url: self.url.clone(),
                kind: InvalidUriKind::MissingScheme,
                reason: "missing scheme".to_owned(),
            }),
        }
    }

    /// Send the request
    ///
    /// Every HTTP status is `Ok`; status interpretation belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns `HttpError` for invalid headers or URL, timeouts, TLS and
    /// transport failures.
    pub async fn send(mut self) -> Result<HttpResponse, HttpError> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }

        let uri = self.validate_url()?;
        let mut builder = Request::builder().method(self.method).uri(uri);

        let has_content_type = self.headers.iter().any(|(name, _)| name == CONTENT_TYPE);
        if !has_content_type && matches!(self.body, BodyKind::Xml(_)) {
            builder = builder.header(CONTENT_TYPE, XML_CONTENT_TYPE);
        }
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        let body = match self.body {
            BodyKind::Empty => Bytes::new(),
            BodyKind::Bytes(b) | BodyKind::Xml(b) => b,
        };
        let request = builder.body(Full::new(body))?;

        let inner = self.service.oneshot(request).await?;

        Ok(HttpResponse {
            inner,
            limits: self.body_limits,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{HttpClient, HttpClientBuilder, HttpClientConfig, HttpError, InvalidUriKind};
    use httpmock::prelude::*;

    fn test_client() -> HttpClient {
        HttpClientBuilder::with_config(HttpClientConfig::for_testing())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_relative_url_rejected() {
        let err = test_client().get("/rest/org/ARIN").send().await.unwrap_err();
        assert!(matches!(
            err,
            HttpError::InvalidUri {
                kind: InvalidUriKind::MissingAuthority,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_unsupported_scheme_rejected() {
        let err = test_client()
            .get("ftp://reg.ote.arin.net/rest")
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::InvalidScheme { scheme, .. } if scheme == "ftp"));
    }

    #[tokio::test]
    async fn test_invalid_header_deferred_to_send() {
        let err = test_client()
            .get("https://reg.ote.arin.net/rest")
            .header("bad header", "value")
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::InvalidHeaderName(_)));
    }

    #[tokio::test]
    async fn test_caller_content_type_kept() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/org/")
                .header("content-type", "text/xml");
            then.status(200);
        });

        test_client()
            .post(&server.url("/rest/org/"))
            .header("content-type", "text/xml")
            .xml("<org/>")
            .send()
            .await
            .unwrap();
        mock.assert();
    }
}
