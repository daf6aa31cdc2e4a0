#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Typed client for the ARIN Reg-RWS REST/XML API
//!
//! Payloads are plain structs that encode to and decode from the registry's
//! XML (`http://www.arin.net/regrws/core/v1`). A [`RegrwsClient`] hands out
//! one [`Manager`] per resource kind; managers issue the HTTP calls and
//! return an [`Outcome`]:
//!
//! - `200` decodes into the expected payload
//! - `400`/`401`/`403`/`404`/`405`/`406`/`409` decode into an
//!   [`ErrorPayload`](models::ErrorPayload) returned as data
//! - any other status is a [`RegrwsError::Http`]
//!
//! Resources fetched through a manager come back as [`Bound`] values that
//! remember their manager, so `save`, `delete` and the net verbs need no
//! further wiring.
//!
//! ```ignore
//! use regrws::{RegrwsClient, RegrwsConfig};
//!
//! let client = RegrwsClient::new(RegrwsConfig::new("https://reg.ote.arin.net/", "API-KEY")?)?;
//! match client.org().from_handle("arin").await? {
//!     regrws::Outcome::Success(org) => println!("{}", org.org_name),
//!     regrws::Outcome::Rejected { error, .. } => eprintln!("{}: {}", error.code, error.message),
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod secret;
pub mod types;
pub mod xml;

pub use api::{Bound, Manager, Outcome, RegrwsClient, Resource, ResourceKind};
pub use config::RegrwsConfig;
pub use error::{DecodeError, EncodeError, RegrwsError, ValidationError};
pub use secret::ApiKey;
pub use xml::XmlModel;
