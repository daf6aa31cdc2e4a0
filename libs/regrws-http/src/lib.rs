#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! HTTP transport for the Reg-RWS client
//!
//! A hyper-based client with:
//! - TLS via rustls (HTTPS only unless insecure HTTP is enabled for tests)
//! - Connection pooling
//! - A request timeout, applied to the header wait and again to the body read
//! - Default `Accept: application/xml` and `User-Agent` headers
//! - Size-limited body reads
//!
//! There are no retries and redirects are not followed: every status is
//! handed back to the caller, which owns status interpretation.
//!
//! # Example
//!
//! ```ignore
//! use regrws_http::HttpClient;
//! use std::time::Duration;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! let resp = client
//!     .get("https://reg.ote.arin.net/rest/org/ARIN?apikey=KEY")
//!     .send()
//!     .await?;
//! let body = resp.bytes().await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod layers;
mod request;
mod response;
mod tls;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{
    DEFAULT_USER_AGENT, HttpClientConfig, TlsRootConfig, TransportSecurity, XML_CONTENT_TYPE,
};
pub use error::{HttpError, InvalidUriKind};
pub use layers::{DefaultHeadersLayer, DefaultHeadersService};
pub use request::RequestBuilder;
pub use response::{ERROR_BODY_PREVIEW_LIMIT, HttpResponse};

pub use http::{Method, StatusCode};
