//! Nested records shared by several payloads.

use crate::error::{DecodeError, ValidationError};
use crate::types::{CountryCode2, CountryCode3, RegionCode, wire_enum};
use crate::xml::{Element, XmlModel};

wire_enum! {
    /// IP protocol version of a net
    pub enum IpVersion("ip version") {
        V4 => "4",
        V6 => "6",
    }
}

wire_enum! {
    pub enum PhoneTypeCode("phone type code") {
        Office => "O",
        Mobile => "M",
        Fax => "F",
    }
}

/// `<iso3166-1>` country record. At least one of the codes is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iso31661 {
    pub name: Option<String>,
    pub code2: Option<CountryCode2>,
    pub code3: Option<CountryCode3>,
    pub e164: Option<u32>,
}

impl Iso31661 {
    /// # Errors
    ///
    /// Returns [`ValidationError::CountryCodeMissing`] when both codes are absent.
    pub fn new(
        name: Option<String>,
        code2: Option<CountryCode2>,
        code3: Option<CountryCode3>,
        e164: Option<u32>,
    ) -> Result<Self, ValidationError> {
        let country = Self {
            name,
            code2,
            code3,
            e164,
        };
        country.validate()?;
        Ok(country)
    }

    /// Country known only by its alpha-2 code
    #[must_use]
    pub fn from_code2(code2: CountryCode2) -> Self {
        Self {
            name: None,
            code2: Some(code2),
            code3: None,
            e164: None,
        }
    }
}

impl XmlModel for Iso31661 {
    const TAG: &'static str = "iso3166-1";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            name: element.optional_text("name"),
            code2: element.parse_optional("code2")?,
            code3: element.parse_optional("code3")?,
            e164: element.parse_optional("e164")?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .leaf_opt("name", self.name.as_ref())
            .leaf_opt("code2", self.code2.as_ref())
            .leaf_opt("code3", self.code3.as_ref())
            .leaf_opt("e164", self.e164.as_ref())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.code2.is_none() && self.code3.is_none() {
            return Err(ValidationError::CountryCodeMissing);
        }
        Ok(())
    }
}

/// One numbered line of a multi-line field (`<line number="1">...</line>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiLineElement {
    pub number: u32,
    pub line: String,
}

impl MultiLineElement {
    /// Number lines from 1 in iteration order
    #[must_use]
    pub fn numbered<I, S>(lines: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        (1..)
            .zip(lines)
            .map(|(number, line)| Self {
                number,
                line: line.into(),
            })
            .collect()
    }
}

impl XmlModel for MultiLineElement {
    const TAG: &'static str = "line";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        let number = element.required_attr("number")?;
        let number = number
            .trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| DecodeError::InvalidValue {
                element: Self::TAG.to_owned(),
                value: number.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            number,
            line: element.text().to_owned(),
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .with_attr("number", self.number.to_string())
            .with_text(self.line.clone())
    }
}

/// Decode `<wrapper><line number="N">..</line>...</wrapper>`
pub(super) fn decode_lines(
    parent: &Element,
    wrapper: &str,
) -> Result<Vec<MultiLineElement>, DecodeError> {
    parent
        .wrapped_items(wrapper, MultiLineElement::TAG)
        .map(MultiLineElement::decode)
        .collect()
}

/// Decode every `<item>` inside `<wrapper>` as `T`
pub(super) fn decode_list<T: XmlModel>(
    parent: &Element,
    wrapper: &str,
) -> Result<Vec<T>, DecodeError> {
    parent
        .wrapped_items(wrapper, T::TAG)
        .map(T::decode)
        .collect()
}

pub(super) fn encode_list<T: XmlModel>(items: &[T]) -> impl Iterator<Item = Element> + '_ {
    items.iter().map(XmlModel::to_element)
}

/// Postal address shared by orgs, customers and POCs.
///
/// Flattened into the parent payload: `iso3166-1`, `streetAddress`, `city`,
/// `iso3166-2` and `postalCode` are siblings of the other fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub iso3166_1: Iso31661,
    pub street_address: Vec<MultiLineElement>,
    pub city: String,
    pub iso3166_2: Option<RegionCode>,
    pub postal_code: Option<String>,
}

impl Address {
    #[must_use]
    pub fn new<I, S>(iso3166_1: Iso31661, street: I, city: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            iso3166_1,
            street_address: MultiLineElement::numbered(street),
            city: city.into(),
            iso3166_2: None,
            postal_code: None,
        }
    }

    #[must_use]
    pub fn with_region(mut self, region: RegionCode) -> Self {
        self.iso3166_2 = Some(region);
        self
    }

    #[must_use]
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub(super) fn decode(parent: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            iso3166_1: Iso31661::decode(parent.required(Iso31661::TAG)?)?,
            street_address: decode_lines(parent, "streetAddress")?,
            city: parent.required_text("city")?,
            iso3166_2: parent.parse_optional("iso3166-2")?,
            postal_code: parent.optional_text("postalCode"),
        })
    }

    pub(super) fn encode_into(&self, parent: Element) -> Element {
        parent
            .with_child(self.iso3166_1.to_element())
            .wrapped("streetAddress", encode_list(&self.street_address))
            .leaf("city", &self.city)
            .leaf_opt("iso3166-2", self.iso3166_2.as_ref())
            .leaf_opt("postalCode", self.postal_code.as_ref())
    }

    pub(super) fn validate(&self) -> Result<(), ValidationError> {
        self.iso3166_1.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneType {
    pub description: String,
    pub code: PhoneTypeCode,
}

impl XmlModel for PhoneType {
    const TAG: &'static str = "type";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            description: element.optional_text("description").unwrap_or_default(),
            code: element.parse_required("code")?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .leaf("description", &self.description)
            .leaf("code", &self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    pub phone_type: PhoneType,
    pub number: String,
    pub extension: Option<String>,
}

impl Phone {
    #[must_use]
    pub fn new(code: PhoneTypeCode, number: impl Into<String>) -> Self {
        let description = match code {
            PhoneTypeCode::Office => "Office",
            PhoneTypeCode::Mobile => "Mobile",
            PhoneTypeCode::Fax => "Fax",
        };
        Self {
            phone_type: PhoneType {
                description: description.to_owned(),
                code,
            },
            number: number.into(),
            extension: None,
        }
    }
}

impl XmlModel for Phone {
    const TAG: &'static str = "phone";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            phone_type: PhoneType::decode(element.required(PhoneType::TAG)?)?,
            number: element.required_text("number")?,
            extension: element.optional_text("extension"),
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .with_child(self.phone_type.to_element())
            .leaf("number", &self.number)
            .leaf_opt("extension", self.extension.as_ref())
    }
}

/// Origin AS number, e.g. `AS102`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OriginAs(pub String);

impl XmlModel for OriginAs {
    const TAG: &'static str = "originAS";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self(element.text().to_owned()))
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG).with_text(self.0.clone())
    }
}

/// File attached to a ticket message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub data: String,
    pub filename: String,
}

impl XmlModel for Attachment {
    const TAG: &'static str = "attachment";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            data: element.required_text("data")?,
            filename: element.required_text("filename")?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .leaf("data", &self.data)
            .leaf("filename", &self.filename)
    }
}
