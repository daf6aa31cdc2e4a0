use super::Element;
use crate::error::EncodeError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

fn encode_err(err: &impl std::fmt::Display) -> EncodeError {
    EncodeError(err.to_string())
}

pub(super) fn write_document(root: &Element) -> Result<String, EncodeError> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| encode_err(&e))?;
    write_element(&mut writer, root)?;
    String::from_utf8(writer.into_inner()).map_err(|e| encode_err(&e))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), EncodeError> {
    let mut start = BytesStart::new(element.name());
    for attr in element.attributes() {
        start.push_attribute(attr);
    }

    if element.text().is_empty() && element.children().is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| encode_err(&e));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| encode_err(&e))?;
    if !element.text().is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(element.text())))
            .map_err(|e| encode_err(&e))?;
    }
    for child in element.children() {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name())))
        .map_err(|e| encode_err(&e))
}
