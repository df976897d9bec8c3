//! Navigable element tree over a parsed XML document.
//!
//! The compiler walks schema declarations in document order and looks
//! children up by name, so the streaming events from `quick_xml` are
//! collected into a small owned tree first.

use crate::error::CompileError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// One XML element: local name, attributes, children and text content.
#[derive(Debug, Clone)]
pub struct Element {
    /// Local element name, namespace prefix stripped ("xs:element" reads
    /// as "element").
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// Concatenated text content.
    pub text: String,
}

impl Element {
    /// Creates an element with the given local name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Looks up an attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first child element with the given local name.
    #[must_use]
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Iterates over child elements with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Collects all descendant elements with the given local name, in
    /// document order.
    #[must_use]
    pub fn descendants_named(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            found.extend(child.descendants_named(name));
        }
        found
    }
}

/// Parses an XML document into its root element.
///
/// # Errors
/// Returns `CompileError` if the XML is malformed or has no root
/// element.
pub fn parse_document(xml: &str) -> Result<Element, CompileError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(element_from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| CompileError::invalid_document("unmatched closing tag"))?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Text(ref t)) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(std::str::from_utf8(t.as_ref())?);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(CompileError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| CompileError::invalid_document("no root element found"))
}

fn element_from_start(e: &BytesStart<'_>) -> Result<Element, CompileError> {
    let name_bytes = e.name().as_ref().to_vec();
    let name = std::str::from_utf8(&name_bytes)?;
    let mut element = Element::new(local_name(name));

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        element
            .attributes
            .push((key.to_string(), value.to_string()));
    }

    Ok(element)
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            // Keep the first root; anything after it is junk we ignore.
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}
