//! Conversion between XML text and the nested-mapping tree.
//!
//! The tree is a `serde_json::Value` that follows the usual XML-to-object
//! conventions:
//!
//! - the document is an object with a single key, the root element name;
//! - attributes are collected under a `"$"` object;
//! - an element with only text (or nothing) becomes a string;
//! - text next to attributes or children is stored under `"_"`;
//! - repeated child elements become an array, in document order.
//!
//! Nothing here knows about sitemaps; see the `tree` module for the mapping
//! between this shape and URL entries.

use log::trace;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::{Map, Value};
use std::fmt::Display;
use std::io::Cursor;

use crate::error::{Error, Result};

/// Key holding an element's attributes.
pub const ATTRIBUTES_KEY: &str = "$";
/// Key holding an element's text when it also has attributes or children.
pub const TEXT_KEY: &str = "_";

const INDENT: usize = 2;

/// An element being read: its name, attributes, children and text so far.
struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>, position: u64) -> Result<Self> {
        let mut attributes = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| parse_error(position, e))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| parse_error(position, e))?;
            attributes.insert(key, Value::String(value.into_owned()));
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).to_string(),
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn close(self) -> (String, Value) {
        if self.attributes.is_empty() && self.children.is_empty() {
            return (self.name, Value::String(self.text));
        }
        let mut object = Map::new();
        if !self.attributes.is_empty() {
            object.insert(ATTRIBUTES_KEY.to_string(), Value::Object(self.attributes));
        }
        object.extend(self.children);
        if !self.text.is_empty() {
            object.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        (self.name, Value::Object(object))
    }
}

fn parse_error(position: u64, err: impl Display) -> Error {
    Error::XmlParse {
        position,
        message: err.to_string(),
    }
}

/// Parse XML text into a tree.
///
/// Whitespace around text is trimmed. Declarations, comments, processing
/// instructions and doctypes are skipped.
///
/// # Errors
///
/// Returns `Error::XmlParse` for malformed XML, mismatched or unclosed tags,
/// and documents without exactly one root element.
pub fn parse(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader.read_event().map_err(|e| parse_error(position, e))?;
        let closed = match event {
            Event::Start(ref e) => {
                stack.push(Frame::open(e, position)?);
                None
            }
            Event::Empty(ref e) => Some(Frame::open(e, position)?.close()),
            Event::End(_) => stack.pop().map(Frame::close),
            Event::Text(ref e) => {
                let text = e.unescape().map_err(|e| parse_error(position, e))?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
                None
            }
            Event::CData(e) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
                None
            }
            Event::Eof => break,
            _ => None,
        };

        if let Some((name, value)) = closed {
            match stack.last_mut() {
                Some(parent) => parent.add_child(name, value),
                None if root.is_none() => root = Some((name, value)),
                None => {
                    return Err(parse_error(position, "document has more than one root element"))
                }
            }
        }
    }

    if let Some(frame) = stack.last() {
        return Err(parse_error(
            reader.buffer_position() as u64,
            format!("element <{}> is never closed", frame.name),
        ));
    }
    let (name, value) = root.ok_or_else(|| parse_error(0, "document has no root element"))?;
    trace!("Parsed XML document with root <{}>", name);

    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

/// Serialize a tree into XML text.
///
/// The output starts with an XML 1.0 / UTF-8 declaration, is indented by two
/// spaces per level, and has no trailing newline. Elements without text or
/// children are written self-closing.
///
/// # Errors
///
/// Returns `Error::Tree` if the tree is not an object with exactly one key,
/// or if attributes are not an object of scalars.
/// Writer failures surface as `Error::Io`.
pub fn serialize(tree: &Value) -> Result<String> {
    let (name, root) = match tree.as_object() {
        Some(document) if document.len() == 1 => document
            .iter()
            .next()
            .ok_or_else(|| tree_error("document is empty"))?,
        _ => return Err(tree_error("document must be an object with a single root key")),
    };

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', INDENT);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, name, root)?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(tree_error)
}

fn tree_error(message: impl Display) -> Error {
    Error::Tree {
        message: message.to_string(),
    }
}

/// The text of a string, number or boolean value.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn write_element(writer: &mut Writer<Cursor<Vec<u8>>>, name: &str, value: &Value) -> Result<()> {
    let mut start = BytesStart::new(name);
    let mut text = None;
    let mut children = Vec::new();

    match value {
        Value::Array(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
            return Ok(());
        }
        Value::Object(object) => {
            for (key, child) in object {
                match key.as_str() {
                    ATTRIBUTES_KEY => {
                        let attributes = child.as_object().ok_or_else(|| {
                            tree_error(format!("attributes of <{}> must be an object", name))
                        })?;
                        for (attr, attr_value) in attributes {
                            let attr_value = scalar_text(attr_value).ok_or_else(|| {
                                tree_error(format!("attribute '{}' of <{}> must be text", attr, name))
                            })?;
                            start.push_attribute((attr.as_str(), attr_value.as_str()));
                        }
                    }
                    TEXT_KEY => text = scalar_text(child),
                    _ => children.push((key, child)),
                }
            }
        }
        Value::Null => {}
        scalar => text = scalar_text(scalar),
    }

    let text = text.filter(|t| !t.is_empty());
    if text.is_none() && children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for (key, child) in children {
        write_element(writer, key, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
