use crate::error::DecodeError;
use crate::types::wire_enum;
use crate::xml::{Element, XmlModel};

wire_enum! {
    /// Error code reported by the registry
    pub enum ErrorCode("error code") {
        SchemaValidation => "E_SCHEMA_VALIDATION",
        EntityValidation => "E_ENTITY_VALIDATION",
        ObjectNotFound => "E_OBJECT_NOT_FOUND",
        Authentication => "E_AUTHENTICATION",
        NotRemoveable => "E_NOT_REMOVEABLE",
        BadRequest => "E_BAD_REQUEST",
        Outage => "E_OUTAGE",
        Unspecified => "E_UNSPECIFIED",
    }
}

/// Field-level detail of a registry error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorComponent {
    pub name: String,
    pub message: String,
}

impl XmlModel for ErrorComponent {
    const TAG: &'static str = "component";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            name: element.required_text("name")?,
            message: element.required_text("message")?,
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .leaf("name", &self.name)
            .leaf("message", &self.message)
    }
}

/// `<error>` payload returned with 4xx statuses.
///
/// Handed back as data inside [`Outcome::Rejected`](crate::Outcome::Rejected).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    pub message: String,
    pub code: ErrorCode,
    pub components: Vec<ErrorComponent>,
    pub additional_info: Vec<String>,
}

impl XmlModel for ErrorPayload {
    const TAG: &'static str = "error";

    fn from_element(element: &Element) -> Result<Self, DecodeError> {
        Ok(Self {
            message: element.required_text("message")?,
            code: element.parse_required("code")?,
            components: element
                .wrapped_items("components", ErrorComponent::TAG)
                .map(ErrorComponent::decode)
                .collect::<Result<_, _>>()?,
            additional_info: element
                .wrapped_items("additionalInfo", "message")
                .map(|m| m.text().to_owned())
                .collect(),
        })
    }

    fn to_element(&self) -> Element {
        Element::new(Self::TAG)
            .leaf("message", &self.message)
            .leaf("code", &self.code)
            .wrapped(
                "components",
                self.components.iter().map(XmlModel::to_element),
            )
            .wrapped(
                "additionalInfo",
                self.additional_info
                    .iter()
                    .map(|m| Element::new("message").with_text(m.clone())),
            )
    }
}
