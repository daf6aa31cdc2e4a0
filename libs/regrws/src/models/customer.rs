use super::common::{Address, MultiLineElement, decode_lines, encode_list};
use crate::error::{DecodeError, ValidationError};
use crate::xml::{Element, XmlModel};

/// Customer record, created as the recipient of a simple reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub customer_name: String,
    pub address: Address,
    pub comment: Vec<MultiLineElement>,
    pub handle: Option<String>,
    pub parent_org_handle: Option<String>,
    pub registration_date: Option<String>,
    pub private_customer: Option<bool>,
}

impl Customer {
    #[must_use]
    pub fn new(customer_name: impl Into<String>, address: Address) -> Self {
        Self {
            customer_name: customer_name.into(),
            address,
            comment: Vec::new(),
            handle: None,
            parent_org_handle: None,
            registration_date: None,
            private_customer: None,
        }
    }
}

impl XmlModel for Customer {
    const TAG: &'static str = "customer";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            customer_name: element.required_text("customerName")?,
            address: Address::decode(element)?,
            comment: decode_lines(element, "comment")?,
            handle: element.optional_text("handle"),
            parent_org_handle: element.optional_text("parentOrgHandle"),
            registration_date: element.optional_text("registrationDate"),
            private_customer: element.parse_optional("privateCustomer")?,
        })
    }

    fn to_element(&self) -> Element {
        let root = Element::new(Self::TAG).leaf("customerName", &self.customer_name);
        self.address
            .encode_into(root)
            .wrapped("comment", encode_list(&self.comment))
            .leaf_opt("handle", self.handle.as_ref())
            .leaf_opt("parentOrgHandle", self.parent_org_handle.as_ref())
            .leaf_opt("registrationDate", self.registration_date.as_ref())
            .leaf_opt("privateCustomer", self.private_customer.as_ref())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.address.validate()
    }
}
