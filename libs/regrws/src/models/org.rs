use super::common::{Address, MultiLineElement, decode_lines, decode_list, encode_list};
use super::poc::PocLinkRef;
use crate::error::{DecodeError, ValidationError};
use crate::xml::{Element, XmlModel};
use url::Url;

/// Organization record.
///
/// The registry assigns `handle` and `registration_date`; creating an org
/// answers with a ticket rather than the org itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Org {
    pub address: Address,
    pub comment: Vec<MultiLineElement>,
    pub handle: Option<String>,
    pub registration_date: Option<String>,
    pub org_name: String,
    pub dba_name: Option<String>,
    pub tax_id: Option<String>,
    pub org_url: Option<Url>,
    pub poc_links: Vec<PocLinkRef>,
}

impl Org {
    #[must_use]
    pub fn new(org_name: impl Into<String>, address: Address) -> Self {
        Self {
            address,
            comment: Vec::new(),
            handle: None,
            registration_date: None,
            org_name: org_name.into(),
            dba_name: None,
            tax_id: None,
            org_url: None,
            poc_links: Vec::new(),
        }
    }
}

impl XmlModel for Org {
    const TAG: &'static str = "org";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            address: Address::decode(element)?,
            comment: decode_lines(element, "comment")?,
            handle: element.optional_text("handle"),
            registration_date: element.optional_text("registrationDate"),
            org_name: element.required_text("orgName")?,
            dba_name: element.optional_text("dbaName"),
            tax_id: element.optional_text("taxId"),
            org_url: element.parse_optional("orgUrl")?,
            poc_links: decode_list(element, "pocLinks")?,
        })
    }

    fn to_element(&self) -> Element {
        self.address
            .encode_into(Element::new(Self::TAG))
            .wrapped("comment", encode_list(&self.comment))
            .leaf_opt("handle", self.handle.as_ref())
            .leaf_opt("registrationDate", self.registration_date.as_ref())
            .leaf("orgName", &self.org_name)
            .leaf_opt("dbaName", self.dba_name.as_ref())
            .leaf_opt("taxId", self.tax_id.as_ref())
            .leaf_opt("orgUrl", self.org_url.as_ref())
            .wrapped("pocLinks", encode_list(&self.poc_links))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.address.validate()
    }
}
