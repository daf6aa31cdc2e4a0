use crate::error::HttpError;
use http::header::{ACCEPT, USER_AGENT};
use http::{HeaderValue, Request};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower layer that fills in `Accept` and `User-Agent` on every request
#[derive(Clone)]
pub struct DefaultHeadersLayer {
    accept: HeaderValue,
    user_agent: HeaderValue,
}

impl DefaultHeadersLayer {
    /// # Errors
    /// Returns `HttpError::InvalidHeaderValue` if either value is not a valid header value
    pub fn try_new(accept: &str, user_agent: &str) -> Result<Self, HttpError> {
        Ok(Self {
            accept: HeaderValue::from_str(accept)?,
            user_agent: HeaderValue::from_str(user_agent)?,
        })
    }
}

impl<S> Layer<S> for DefaultHeadersLayer {
    type Service = DefaultHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DefaultHeadersService {
            inner,
            accept: self.accept.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Service produced by [`DefaultHeadersLayer`]
#[derive(Clone)]
pub struct DefaultHeadersService<S> {
    inner: S,
    accept: HeaderValue,
    user_agent: HeaderValue,
}

impl<S, ReqBody> Service<Request<ReqBody>> for DefaultHeadersService<S>
where
    S: Service<Request<ReqBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let headers = req.headers_mut();
        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, self.accept.clone());
        }
        if !headers.contains_key(USER_AGENT) {
            headers.insert(USER_AGENT, self.user_agent.clone());
        }
        self.inner.call(req)
    }
}
