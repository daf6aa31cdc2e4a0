use super::Element;
use crate::error::DecodeError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

fn syntax(err: &impl std::fmt::Display) -> DecodeError {
    DecodeError::Syntax(err.to_string())
}

/// Parse a document into its root element.
///
/// Names are reduced to their local part and namespace declarations are
/// dropped, so `<ns2:net>` and `<net xmlns="...">` read the same.
pub(super) fn parse_document(xml: &str) -> Result<Element, DecodeError> {
    let mut reader = Reader::from_str(xml);
    let config = reader.config_mut();
    config.trim_text(true);
    config.expand_empty_elements = true;

    let mut stack: Vec<Element> = Vec::new();
    loop {
        match reader.read_event().map_err(|e| syntax(&e))? {
            Event::Start(start) => stack.push(open_element(&start)?),
            Event::End(_) => {
                let Some(done) = stack.pop() else {
                    return Err(DecodeError::Syntax("unbalanced end tag".to_owned()));
                };
                match stack.last_mut() {
                    Some(parent) => parent.push_child(done),
                    None => return Ok(done),
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&text.unescape().map_err(|e| syntax(&e))?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => {
                return Err(if stack.is_empty() {
                    DecodeError::EmptyDocument
                } else {
                    DecodeError::Syntax("unexpected end of document".to_owned())
                });
            }
            _ => {}
        }
    }
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, DecodeError> {
    let name = std::str::from_utf8(start.local_name().as_ref())
        .map_err(|e| syntax(&e))?
        .to_owned();
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| syntax(&e))?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let local = std::str::from_utf8(attr.key.local_name().as_ref())
            .map_err(|e| syntax(&e))?
            .to_owned();
        let value = attr.unescape_value().map_err(|e| syntax(&e))?;
        element.push_attr(local, value);
    }
    Ok(element)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_and_namespaces_ignored() {
        let root = parse_document(
            r#"<?xml version="1.0"?>
            <ns2:ticket xmlns:ns2="http://www.arin.net/regrws/core/v1"
                        xmlns:msg="http://www.arin.net/regrws/messages/v1">
                <msg:messageId>MID</msg:messageId>
            </ns2:ticket>"#,
        )
        .unwrap();
        assert_eq!(root.name(), "ticket");
        assert_eq!(root.attributes().count(), 0);
        assert_eq!(root.required_text("messageId").unwrap(), "MID");
    }

    #[test]
    fn test_spaced_attributes_and_entities() {
        let root =
            parse_document(r#"<comment><line number = "1">A &amp; B</line></comment>"#).unwrap();
        let line = root.required("line").unwrap();
        assert_eq!(line.attr("number"), Some("1"));
        assert_eq!(line.text(), "A & B");
    }

    #[test]
    fn test_empty_elements_expand() {
        let root = parse_document(r#"<net><pocLinks/></net>"#).unwrap();
        assert!(root.required("pocLinks").unwrap().children().is_empty());
    }

    #[test]
    fn test_empty_and_malformed_documents() {
        assert_eq!(parse_document("   "), Err(DecodeError::EmptyDocument));
        assert!(matches!(
            parse_document("<org><city>x</org>"),
            Err(DecodeError::Syntax(_))
        ));
        assert!(matches!(parse_document("<org>"), Err(DecodeError::Syntax(_))));
    }
}
