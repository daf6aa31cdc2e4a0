//! XML encoding and decoding for registry payloads.
//!
//! Models convert to and from an [`Element`] tree; the reader and writer move
//! that tree across the wire with quick-xml.

mod element;
mod reader;
mod writer;

pub use element::Element;

use crate::error::{DecodeError, EncodeError, ValidationError};
use std::borrow::Cow;

/// Default namespace of every registry payload
pub const CORE_NAMESPACE: &str = "http://www.arin.net/regrws/core/v1";

/// Namespace bound to the `msg` prefix inside ticket messages
pub const MESSAGES_NAMESPACE: &str = "http://www.arin.net/regrws/messages/v1";

/// A scalar that renders as element text.
pub trait XmlScalar {
    fn to_xml_text(&self) -> Cow<'_, str>;
}

impl XmlScalar for str {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl XmlScalar for String {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

// Always the literal `true`/`false`.
impl XmlScalar for bool {
    fn to_xml_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }
}

macro_rules! display_scalar {
    ($($ty:ty),+) => {
        $(
            impl XmlScalar for $ty {
                fn to_xml_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )+
    };
}

display_scalar!(u8, u16, u32, u64, url::Url);

/// A payload with a fixed root element.
pub trait XmlModel: Sized {
    /// Root element name
    const TAG: &'static str;

    /// Build the model from an element whose name is [`Self::TAG`]
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when a required field is missing or invalid.
    fn from_element(element: &Element) -> Result<Self, DecodeError>;

    /// Build the element tree, omitting empty values
    fn to_element(&self) -> Element;

    /// Check the model's invariants
    ///
    /// # Errors
    ///
    /// Returns the first violated [`ValidationError`].
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Decode and validate a nested element
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when decoding or validation fails.
    fn decode(element: &Element) -> Result<Self, DecodeError> {
        let model = Self::from_element(element)?;
        model.validate()?;
        Ok(model)
    }

    /// # Errors
    ///
    /// Returns a [`DecodeError`] for malformed XML, a root element other than
    /// [`Self::TAG`], or a payload that fails decoding or validation.
    fn from_xml(xml: &str) -> Result<Self, DecodeError> {
        let root = reader::parse_document(xml)?;
        if root.local_name() != Self::TAG {
            return Err(DecodeError::UnexpectedRoot {
                expected: Self::TAG,
                found: root.local_name().to_owned(),
            });
        }
        Self::decode(&root)
    }

    /// # Errors
    ///
    /// Same as [`XmlModel::from_xml`], plus invalid UTF-8.
    fn from_xml_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let xml = std::str::from_utf8(bytes).map_err(|e| DecodeError::Syntax(e.to_string()))?;
        Self::from_xml(xml)
    }

    /// Serialize as a UTF-8 document in the core namespace
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] if the writer fails.
    fn to_xml(&self) -> Result<String, EncodeError> {
        writer::write_document(&self.to_element().with_namespace(CORE_NAMESPACE))
    }
}
