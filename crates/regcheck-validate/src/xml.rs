//! Minimal XML document model for assessment files.
//!
//! Only what the assessment checks need is kept: the root element name and
//! the direct text of each root child.

use quick_xml::Reader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use thiserror::Error;

/// Reasons an XML document is not well formed.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("{source} (at byte {position})")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("no element found")]
    NoRoot,

    #[error("undefined entity &{name}; (at byte {position})")]
    UndefinedEntity { name: String, position: u64 },

    #[error("unclosed element <{name}>")]
    Unclosed { name: String },

    #[error("junk after document element")]
    TrailingContent,
}

/// A parsed document, reduced to the root and its direct children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub root: String,
    children: Vec<(String, String)>,
}

impl XmlDocument {
    /// Direct text of the first root child named `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.children
            .iter()
            .find(|(child, _)| child == name)
            .map(|(_, text)| text.as_str())
    }

    /// Whether a root child named `name` exists with non-blank text.
    pub fn has_text_child(&self, name: &str) -> bool {
        self.child_text(name)
            .is_some_and(|text| !text.trim().is_empty())
    }
}

/// Parse a document and check that it is well formed.
pub fn parse_document(text: &str) -> Result<XmlDocument, XmlError> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<String> = Vec::new();
    let mut root: Option<String> = None;
    let mut children: Vec<(String, String)> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|source| syntax(&reader, source))?;

        match event {
            Event::Start(element) => {
                let name = element_name(&element);
                check_attributes(&element).map_err(|source| syntax(&reader, source))?;
                open_element(&mut root, &stack, &mut children, &name)?;
                stack.push(name);
            }
            Event::Empty(element) => {
                let name = element_name(&element);
                check_attributes(&element).map_err(|source| syntax(&reader, source))?;
                open_element(&mut root, &stack, &mut children, &name)?;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(content) => {
                let content = String::from_utf8_lossy(&content);
                push_text(&stack, &mut children, &content)?;
            }
            Event::CData(content) => {
                let content = String::from_utf8_lossy(&content);
                push_text(&stack, &mut children, &content)?;
            }
            Event::GeneralRef(reference) => {
                let position = reader.buffer_position() as u64;
                let resolved = resolve_reference(&reference, position)?;
                push_text(&stack, &mut children, &resolved)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(name) = stack.pop() {
        return Err(XmlError::Unclosed { name });
    }

    let root = root.ok_or(XmlError::NoRoot)?;
    Ok(XmlDocument { root, children })
}

fn open_element(
    root: &mut Option<String>,
    stack: &[String],
    children: &mut Vec<(String, String)>,
    name: &str,
) -> Result<(), XmlError> {
    match stack.len() {
        0 if root.is_some() => return Err(XmlError::TrailingContent),
        0 => *root = Some(name.to_string()),
        1 => children.push((name.to_string(), String::new())),
        _ => {}
    }
    Ok(())
}

/// Attach text to the root child currently open, if any.
fn push_text(
    stack: &[String],
    children: &mut [(String, String)],
    content: &str,
) -> Result<(), XmlError> {
    match stack.len() {
        0 if !content.trim().is_empty() => Err(XmlError::TrailingContent),
        2 => {
            if let Some((_, text)) = children.last_mut() {
                text.push_str(content);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn syntax<R>(reader: &Reader<R>, source: impl Into<quick_xml::Error>) -> XmlError {
    XmlError::Syntax {
        position: reader.buffer_position() as u64,
        source: source.into(),
    }
}

fn element_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

/// Walk every attribute so malformed, duplicated or badly escaped ones are
/// reported.
fn check_attributes(element: &BytesStart<'_>) -> Result<(), quick_xml::Error> {
    for attribute in element.attributes().with_checks(true) {
        attribute?.unescape_value()?;
    }
    Ok(())
}

/// Resolve a character reference or one of the predefined XML entities.
fn resolve_reference(reference: &BytesRef<'_>, position: u64) -> Result<String, XmlError> {
    let invalid = |source: quick_xml::Error| XmlError::Syntax { position, source };
    if let Some(ch) = reference.resolve_char_ref().map_err(invalid)? {
        return Ok(ch.to_string());
    }
    let name = reference
        .decode()
        .map_err(|source| invalid(source.into()))?;
    resolve_xml_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| XmlError::UndefinedEntity {
            name: name.into_owned(),
            position,
        })
}
