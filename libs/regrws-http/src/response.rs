use crate::error::HttpError;
use bytes::Bytes;
use http::{HeaderMap, Response, StatusCode};
use http_body_util::{BodyExt, Limited};
use hyper::body::Incoming;
use std::time::Duration;

/// Maximum body preview carried in [`HttpError::HttpStatus`] (8KB)
pub const ERROR_BODY_PREVIEW_LIMIT: usize = 8 * 1024;

/// Bounds applied when a response body is read
#[derive(Debug, Clone, Copy)]
pub(super) struct BodyLimits {
    pub(super) max_size: usize,
    /// Separate from the header wait covered by the tower timeout layer
    pub(super) read_timeout: Duration,
}

impl BodyLimits {
    async fn read(self, body: Incoming, max_size: usize) -> Result<Bytes, HttpError> {
        tokio::time::timeout(self.read_timeout, read_limited(body, max_size))
            .await
            .map_err(|_| HttpError::Timeout(self.read_timeout))?
    }
}

/// HTTP response with size- and time-limited body reading
#[derive(Debug)]
pub struct HttpResponse {
    pub(crate) inner: Response<Incoming>,
    pub(crate) limits: BodyLimits,
}

impl HttpResponse {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// `Content-Type` header, if present and valid UTF-8
    #[must_use]
    pub fn content_type(&self) -> Option<String> {
        self.inner
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned)
    }

    /// Read the whole body, bounded by the configured maximum
    ///
    /// # Errors
    ///
    /// Returns `HttpError::BodyTooLarge` past the limit, `HttpError::Timeout`
    /// if the body does not arrive within the request timeout, and
    /// `HttpError::Transport` if the connection fails mid-body.
    pub async fn bytes(self) -> Result<Bytes, HttpError> {
        let limits = self.limits;
        limits.read(self.inner.into_body(), limits.max_size).await
    }

    /// Consume the response into an `HttpError::HttpStatus` with a body preview
    ///
    /// Used for statuses the caller has no mapping for.
    pub async fn into_status_error(self) -> HttpError {
        let status = self.status();
        let content_type = self.content_type();
        let body_preview = match self
            .limits
            .read(self.inner.into_body(), ERROR_BODY_PREVIEW_LIMIT)
            .await
        {
            Ok(body) => String::from_utf8_lossy(&body).into_owned(),
            Err(HttpError::BodyTooLarge { .. }) => "<body exceeds preview limit>".to_owned(),
            Err(_) => String::new(),
        };
        HttpError::HttpStatus {
            status,
            body_preview,
            content_type,
        }
    }
}

async fn read_limited(body: Incoming, limit: usize) -> Result<Bytes, HttpError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.is::<http_body_util::LengthLimitError>() => {
            Err(HttpError::BodyTooLarge { limit })
        }
        Err(err) => Err(HttpError::Transport(err)),
    }
}
