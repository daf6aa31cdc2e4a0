use super::common::{Address, MultiLineElement, Phone, decode_lines, decode_list, encode_list};
use crate::error::{DecodeError, ValidationError};
use crate::types::wire_enum;
use crate::xml::{Element, XmlModel};

wire_enum! {
    pub enum ContactType("contact type") {
        Person => "PERSON",
        Role => "ROLE",
    }
}

wire_enum! {
    pub enum PocLinkDescription("POC link description") {
        Abuse => "Abuse",
        Admin => "Admin",
        Noc => "NOC",
        Routing => "Routing",
        Tech => "Tech",
    }
}

wire_enum! {
    pub enum PocFunction("POC function") {
        Abuse => "AB",
        Admin => "AD",
        Noc => "N",
        Routing => "R",
        Tech => "T",
    }
}

/// Link from a resource to a point of contact.
///
/// Carried entirely in attributes:
/// `<pocLinkRef description="Tech" function="T" handle="EXAMPLETECH-ARIN"/>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PocLinkRef {
    pub description: PocLinkDescription,
    pub function: PocFunction,
    pub handle: String,
}

impl PocLinkRef {
    #[must_use]
    pub fn new(function: PocFunction, handle: impl Into<String>) -> Self {
        let description = match function {
            PocFunction::Abuse => PocLinkDescription::Abuse,
            PocFunction::Admin => PocLinkDescription::Admin,
            PocFunction::Noc => PocLinkDescription::Noc,
            PocFunction::Routing => PocLinkDescription::Routing,
            PocFunction::Tech => PocLinkDescription::Tech,
        };
        Self {
            description,
            function,
            handle: handle.into(),
        }
    }
}

impl XmlModel for PocLinkRef {
    const TAG: &'static str = "pocLinkRef";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            description: element.required_attr("description")?.parse()?,
            function: element.required_attr("function")?.parse()?,
            handle: element.required_attr("handle")?.trim().to_owned(),
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .with_attr("description", self.description.as_str())
            .with_attr("function", self.function.as_str())
            .with_attr("handle", self.handle.as_str())
    }
}

/// Point of contact, either a person or a role.
///
/// A ROLE POC carries the role name in `last_name`, requires `company_name`
/// and must leave `first_name` empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poc {
    pub address: Address,
    pub comment: Vec<MultiLineElement>,
    pub handle: Option<String>,
    pub registration_date: Option<String>,
    pub contact_type: ContactType,
    pub company_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub phones: Vec<Phone>,
}

impl Poc {
    #[must_use]
    pub fn builder(contact_type: ContactType, address: Address) -> PocBuilder {
        PocBuilder {
            poc: Self {
                address,
                comment: Vec::new(),
                handle: None,
                registration_date: None,
                contact_type,
                company_name: None,
                first_name: None,
                middle_name: None,
                last_name: None,
                phones: Vec::new(),
            },
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

impl XmlModel for Poc {
    const TAG: &'static str = "poc";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            address: Address::decode(element)?,
            comment: decode_lines(element, "comment")?,
            handle: element.optional_text("handle"),
            registration_date: element.optional_text("registrationDate"),
            contact_type: element.parse_required("contactType")?,
            company_name: element.optional_text("companyName"),
            first_name: element.optional_text("firstName"),
            middle_name: element.optional_text("middleName"),
            last_name: element.optional_text("lastName"),
            phones: decode_list(element, "phones")?,
        })
    }

    fn to_element(&self) -> Element {
        self.address
            .encode_into(Element::new(Self::TAG))
            .wrapped("comment", encode_list(&self.comment))
            .leaf_opt("handle", self.handle.as_ref())
            .leaf_opt("registrationDate", self.registration_date.as_ref())
            .leaf("contactType", &self.contact_type)
            .leaf_opt("companyName", self.company_name.as_ref())
            .leaf_opt("firstName", self.first_name.as_ref())
            .leaf_opt("middleName", self.middle_name.as_ref())
            .leaf_opt("lastName", self.last_name.as_ref())
            .wrapped("phones", encode_list(&self.phones))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.address.validate()?;
        if self.contact_type == ContactType::Role {
            if is_blank(self.company_name.as_deref()) {
                return Err(ValidationError::RoleCompanyNameMissing);
            }
            if is_blank(self.last_name.as_deref()) {
                return Err(ValidationError::RoleLastNameMissing);
            }
            if !is_blank(self.first_name.as_deref()) {
                return Err(ValidationError::RoleFirstNamePresent);
            }
        }
        Ok(())
    }
}

/// Assembles a [`Poc`] and validates it on [`PocBuilder::build`]
#[derive(Debug, Clone)]
pub struct PocBuilder {
    poc: Poc,
}

impl PocBuilder {
    #[must_use]
    pub fn company_name(mut self, name: impl Into<String>) -> Self {
        self.poc.company_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn first_name(mut self, name: impl Into<String>) -> Self {
        self.poc.first_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn middle_name(mut self, name: impl Into<String>) -> Self {
        self.poc.middle_name = Some(name.into());
        self
    }

    /// Family name, or the role name for a ROLE POC
    #[must_use]
    pub fn last_name(mut self, name: impl Into<String>) -> Self {
        self.poc.last_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: Phone) -> Self {
        self.poc.phones.push(phone);
        self
    }

    #[must_use]
    pub fn comment<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.poc.comment = MultiLineElement::numbered(lines);
        self
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the ROLE rules or the country rule fail.
    pub fn build(self) -> Result<Poc, ValidationError> {
        self.poc.validate()?;
        Ok(self.poc)
    }
}
