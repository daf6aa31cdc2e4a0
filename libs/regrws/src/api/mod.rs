//! Managers, status decoding and the client entry point.

mod bound;
mod client;
mod manager;
mod outcome;
mod resource;
mod session;

pub use bound::Bound;
pub use client::RegrwsClient;
pub use manager::Manager;
pub use outcome::Outcome;
pub use resource::{Resource, ResourceKind};
pub use session::{Handlers, REGISTRY_ERROR_STATUSES, StatusHandler};
