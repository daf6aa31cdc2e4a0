use crate::error::DecodeError;
use crate::xml::XmlScalar;
use std::fmt::Display;
use std::str::FromStr;

/// In-memory XML element.
///
/// Parsed elements store local names only, so lookups ignore namespace
/// prefixes. Elements built for output keep their name verbatim
/// (`msg:messageId`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without a namespace prefix
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given local name
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.local_name() == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.local_name() == name)
    }

    pub(super) fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub(super) fn push_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    pub(super) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    // ---- building ----

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attr(name, value);
        self
    }

    /// Declare a default namespace as the first attribute
    #[must_use]
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.attributes
            .insert(0, ("xmlns".to_owned(), namespace.to_owned()));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append `<name>value</name>`
    #[must_use]
    pub fn leaf<T: XmlScalar + ?Sized>(self, name: &str, value: &T) -> Self {
        let text = value.to_xml_text().into_owned();
        self.with_child(Element::new(name).with_text(text))
    }

    /// Append `<name>value</name>` when there is a value
    #[must_use]
    pub fn leaf_opt<T: XmlScalar + ?Sized>(self, name: &str, value: Option<&T>) -> Self {
        match value {
            Some(value) => self.leaf(name, value),
            None => self,
        }
    }

    /// Append `<wrapper>items...</wrapper>`, or nothing when there are no items
    #[must_use]
    pub fn wrapped(self, wrapper: &str, items: impl IntoIterator<Item = Element>) -> Self {
        let mut outer = Element::new(wrapper);
        outer.children.extend(items);
        if outer.children.is_empty() {
            self
        } else {
            self.with_child(outer)
        }
    }

    // ---- decoding ----

    /// # Errors
    ///
    /// Returns [`DecodeError::MissingElement`] when absent.
    pub fn required(&self, name: &'static str) -> Result<&Element, DecodeError> {
        self.child(name).ok_or_else(|| DecodeError::MissingElement {
            parent: self.local_name().to_owned(),
            element: name,
        })
    }

    /// Text of a required child element
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingElement`] when absent.
    pub fn required_text(&self, name: &'static str) -> Result<String, DecodeError> {
        self.required(name).map(|el| el.text.clone())
    }

    /// Text of an optional child; an empty element counts as absent
    #[must_use]
    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.child(name)
            .map(|el| el.text.as_str())
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned)
    }

    /// Parse the text of a required child element
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingElement`] when absent and
    /// [`DecodeError::InvalidValue`] when parsing fails.
    pub fn parse_required<T>(&self, name: &'static str) -> Result<T, DecodeError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.required(name)?.parse_text()
    }

    /// Parse the text of an optional child element
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidValue`] when a present value fails to parse.
    pub fn parse_optional<T>(&self, name: &str) -> Result<Option<T>, DecodeError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.child(name) {
            Some(el) if !el.text.is_empty() => el.parse_text().map(Some),
            _ => Ok(None),
        }
    }

    /// Parse this element's own text
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidValue`] when parsing fails.
    pub fn parse_text<T>(&self) -> Result<T, DecodeError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.text.parse().map_err(|e: T::Err| DecodeError::InvalidValue {
            element: self.local_name().to_owned(),
            value: self.text.clone(),
            reason: e.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns [`DecodeError::MissingAttribute`] when absent.
    pub fn required_attr(&self, name: &'static str) -> Result<&str, DecodeError> {
        self.attr(name).ok_or_else(|| DecodeError::MissingAttribute {
            element: self.local_name().to_owned(),
            attribute: name,
        })
    }

    /// Items of a wrapped list (`<wrapper><item/>...</wrapper>`)
    ///
    /// A missing or empty wrapper yields no items.
    pub fn wrapped_items<'a>(
        &'a self,
        wrapper: &'a str,
        item: &'a str,
    ) -> impl Iterator<Item = &'a Element> {
        self.child(wrapper)
            .into_iter()
            .flat_map(move |w| w.children_named(item))
    }
}
