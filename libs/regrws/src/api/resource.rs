use crate::models::{Customer, Net, Org, Poc, Ticket, TicketRequest};
use crate::xml::XmlModel;
use std::fmt;

/// Resource kinds served under `{base}/rest/{endpoint}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Org,
    Customer,
    Poc,
    Net,
}

impl ResourceKind {
    pub const ALL: [Self; 4] = [Self::Org, Self::Customer, Self::Poc, Self::Net];

    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Org => "org",
            Self::Customer => "customer",
            Self::Poc => "poc",
            Self::Net => "net",
        }
    }

    /// Whether a direct POST to the collection is allowed.
    ///
    /// Customers are only created under a net and nets only by reassignment
    /// or reallocation.
    #[must_use]
    pub const fn supports_create(self) -> bool {
        matches!(self, Self::Org | Self::Poc)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// A payload that lives at its own endpoint.
pub trait Resource: XmlModel + Send + Sync + 'static {
    const KIND: ResourceKind;

    /// Payload the registry answers a create with
    type Created: XmlModel;

    /// Payload the registry answers a delete with
    type Deleted: XmlModel;

    fn handle(&self) -> Option<&str>;
}

impl Resource for Org {
    const KIND: ResourceKind = ResourceKind::Org;
    // Org creation is reviewed by staff, so POST answers with a ticket.
    type Created = Ticket;
    type Deleted = Self;

    fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }
}

impl Resource for Customer {
    const KIND: ResourceKind = ResourceKind::Customer;
    type Created = Self;
    type Deleted = Self;

    fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }
}

impl Resource for Poc {
    const KIND: ResourceKind = ResourceKind::Poc;
    type Created = Self;
    type Deleted = Self;

    fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }
}

impl Resource for Net {
    const KIND: ResourceKind = ResourceKind::Net;
    type Created = Self;
    // Deleting a net is itself a ticketed request.
    type Deleted = TicketRequest;

    fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }
}
