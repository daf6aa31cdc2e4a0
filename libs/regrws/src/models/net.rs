use super::common::{IpVersion, MultiLineElement, OriginAs, decode_lines, decode_list, encode_list};
use super::poc::PocLinkRef;
use crate::error::{DecodeError, ValidationError};
use crate::types::{CidrLength, parse_ip_address, wire_enum};
use crate::xml::{Element, XmlModel};
use std::net::IpAddr;

wire_enum! {
    /// Registration type of a net block, named after its wire code
    pub enum NetBlockType("net block type") {
        /// Reallocated
        A => "A",
        Af => "AF",
        Ap => "AP",
        Ar => "AR",
        Av => "AV",
        /// Direct allocation
        Da => "DA",
        Fx => "FX",
        Ir => "IR",
        Iu => "IU",
        Ln => "LN",
        Lx => "LX",
        Pv => "PV",
        Px => "PX",
        Rd => "RD",
        Rn => "RN",
        Rv => "RV",
        Rx => "RX",
        /// Reassigned
        S => "S",
    }
}

/// IP range of a net: a start address plus an end address, a prefix length,
/// or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetBlock {
    pub block_type: NetBlockType,
    pub description: Option<String>,
    pub start_address: IpAddr,
    pub end_address: Option<IpAddr>,
    pub cidr_length: Option<CidrLength>,
}

impl NetBlock {
    /// # Errors
    ///
    /// Returns [`ValidationError::NetBlockRangeMissing`] when neither
    /// `end_address` nor `cidr_length` is given.
    pub fn new(
        block_type: NetBlockType,
        start_address: IpAddr,
        end_address: Option<IpAddr>,
        cidr_length: Option<CidrLength>,
    ) -> Result<Self, ValidationError> {
        let block = Self {
            block_type,
            description: None,
            start_address,
            end_address,
            cidr_length,
        };
        block.validate()?;
        Ok(block)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

fn parse_address(element: &Element) -> Result<IpAddr, DecodeError> {
    parse_ip_address(element.text()).map_err(DecodeError::from)
}

impl XmlModel for NetBlock {
    const TAG: &'static str = "netBlock";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        let end_address = match element.child("endAddress") {
            Some(end) if !end.text().is_empty() => Some(parse_address(end)?),
            _ => None,
        };
        Ok(Self {
            block_type: element.parse_required("type")?,
            description: element.optional_text("description"),
            start_address: parse_address(element.required("startAddress")?)?,
            end_address,
            cidr_length: element.parse_optional("cidrLength")?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .leaf("type", &self.block_type)
            .leaf_opt("description", self.description.as_ref())
            .leaf("startAddress", &self.start_address)
            .leaf_opt("endAddress", self.end_address.as_ref())
            .leaf_opt("cidrLength", self.cidr_length.as_ref())
    }

    // Both present is accepted, even when they disagree.
    fn validate(&self) -> Result<(), ValidationError> {
        if self.end_address.is_none() && self.cidr_length.is_none() {
            return Err(ValidationError::NetBlockRangeMissing);
        }
        Ok(())
    }
}

/// Network registration. Exactly one of `org_handle` and `customer_handle`
/// is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Net {
    pub version: IpVersion,
    pub comment: Vec<MultiLineElement>,
    pub org_handle: Option<String>,
    pub customer_handle: Option<String>,
    pub handle: Option<String>,
    pub registration_date: Option<String>,
    pub net_name: Option<String>,
    pub net_blocks: Vec<NetBlock>,
    pub parent_net_handle: Option<String>,
    pub origin_ases: Vec<OriginAs>,
    pub poc_links: Vec<PocLinkRef>,
}

impl Net {
    #[must_use]
    pub fn builder(version: IpVersion) -> NetBuilder {
        NetBuilder {
            net: Self {
                version,
                comment: Vec::new(),
                org_handle: None,
                customer_handle: None,
                handle: None,
                registration_date: None,
                net_name: None,
                net_blocks: Vec::new(),
                parent_net_handle: None,
                origin_ases: Vec::new(),
                poc_links: Vec::new(),
            },
        }
    }
}

impl XmlModel for Net {
    const TAG: &'static str = "net";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            version: element.parse_required("version")?,
            comment: decode_lines(element, "comment")?,
            org_handle: element.optional_text("orgHandle"),
            customer_handle: element.optional_text("customerHandle"),
            handle: element.optional_text("handle"),
            registration_date: element.optional_text("registrationDate"),
            net_name: element.optional_text("netName"),
            net_blocks: decode_list(element, "netBlocks")?,
            parent_net_handle: element.optional_text("parentNetHandle"),
            origin_ases: decode_list(element, "originASes")?,
            poc_links: decode_list(element, "pocLinks")?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .leaf("version", &self.version)
            .wrapped("comment", encode_list(&self.comment))
            .leaf_opt("orgHandle", self.org_handle.as_ref())
            .leaf_opt("customerHandle", self.customer_handle.as_ref())
            .leaf_opt("handle", self.handle.as_ref())
            .leaf_opt("registrationDate", self.registration_date.as_ref())
            .leaf_opt("netName", self.net_name.as_ref())
            .wrapped("netBlocks", encode_list(&self.net_blocks))
            .leaf_opt("parentNetHandle", self.parent_net_handle.as_ref())
            .wrapped("originASes", encode_list(&self.origin_ases))
            .wrapped("pocLinks", encode_list(&self.poc_links))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match (&self.org_handle, &self.customer_handle) {
            (None, None) => Err(ValidationError::NetHolderMissing),
            (Some(_), Some(_)) => Err(ValidationError::NetHolderConflict),
            _ => self.net_blocks.iter().try_for_each(NetBlock::validate),
        }
    }
}

/// Assembles a [`Net`] and validates it on [`NetBuilder::build`]
#[derive(Debug, Clone)]
pub struct NetBuilder {
    net: Net,
}

impl NetBuilder {
    #[must_use]
    pub fn org_handle(mut self, handle: impl Into<String>) -> Self {
        self.net.org_handle = Some(handle.into());
        self
    }

    #[must_use]
    pub fn customer_handle(mut self, handle: impl Into<String>) -> Self {
        self.net.customer_handle = Some(handle.into());
        self
    }

    #[must_use]
    pub fn handle(mut self, handle: impl Into<String>) -> Self {
        self.net.handle = Some(handle.into());
        self
    }

    #[must_use]
    pub fn net_name(mut self, name: impl Into<String>) -> Self {
        self.net.net_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn net_block(mut self, block: NetBlock) -> Self {
        self.net.net_blocks.push(block);
        self
    }

    #[must_use]
    pub fn parent_net_handle(mut self, handle: impl Into<String>) -> Self {
        self.net.parent_net_handle = Some(handle.into());
        self
    }

    #[must_use]
    pub fn origin_as(mut self, asn: impl Into<String>) -> Self {
        self.net.origin_ases.push(OriginAs(asn.into()));
        self
    }

    #[must_use]
    pub fn poc_link(mut self, link: PocLinkRef) -> Self {
        self.net.poc_links.push(link);
        self
    }

    #[must_use]
    pub fn comment<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.net.comment = MultiLineElement::numbered(lines);
        self
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::NetHolderMissing`] or
    /// [`ValidationError::NetHolderConflict`] when the holder handles are not
    /// exactly one.
    pub fn build(self) -> Result<Net, ValidationError> {
        self.net.validate()?;
        Ok(self.net)
    }
}
