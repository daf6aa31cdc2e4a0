//! Registry payloads.
//!
//! Every payload implements [`XmlModel`](crate::xml::XmlModel). Models with
//! invariants check them in their constructors or builders, when decoded, and
//! again before a manager serializes them into a request.

mod common;
mod customer;
mod error;
mod net;
mod org;
mod poc;
mod ticket;

pub use common::{
    Address, Attachment, IpVersion, Iso31661, MultiLineElement, OriginAs, Phone, PhoneType,
    PhoneTypeCode,
};
pub use customer::Customer;
pub use error::{ErrorCode, ErrorComponent, ErrorPayload};
pub use net::{Net, NetBlock, NetBlockType, NetBuilder};
pub use org::Org;
pub use poc::{ContactType, Poc, PocBuilder, PocFunction, PocLinkDescription, PocLinkRef};
pub use ticket::{
    Ticket, TicketMessage, TicketRequest, WebTicketResolution, WebTicketStatus, WebTicketType,
};
