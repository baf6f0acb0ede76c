//! Structured markup documents
//!
//! Fragments are built as an [`Element`] tree and serialized by a single
//! writer, so every document is well formed and reserved characters in names
//! and text are escaped. Tests can inspect the tree directly instead of
//! matching whitespace.

use std::fmt::Display;
use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{WorldError, WorldResult};

/// Spaces per nesting level in written documents
const INDENT: usize = 2;

/// A child of an element
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data
    Text(String),
}

/// A markup element with attributes and children
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element holding a single text value, e.g. `<radius>1</radius>`
    pub fn leaf(name: impl Into<String>, value: impl Display) -> Self {
        Self::new(name).text(value)
    }

    /// Add an attribute
    pub fn attr(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    /// Append character data
    pub fn text(mut self, value: impl Display) -> Self {
        self.children.push(Node::Text(value.to_string()));
        self
    }

    /// Append a child element
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append several child elements in order
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children.into_iter().map(Node::Element));
        self
    }

    /// Append a child element in place
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an attribute value
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All child nodes
    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First direct child with the given name
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// All direct children with the given name
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |e| e.name == name)
    }

    /// Follow a `/`-separated path of child names
    pub fn find_path(&self, path: &str) -> Option<&Element> {
        path.split('/').try_fold(self, |current, name| current.find(name))
    }

    /// Concatenated direct text content
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Serialize this element alone, without an XML declaration
    pub fn to_xml_string(&self) -> WorldResult<String> {
        let mut buffer = Vec::new();
        let mut writer = Writer::new_with_indent(&mut buffer, b' ', INDENT);
        write_element(&mut writer, self)?;
        String::from_utf8(buffer).map_err(WorldError::document)
    }
}

/// A complete document: XML declaration plus one root element
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// The root element
    pub root: Element,
}

impl Document {
    /// Wrap a root element
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Serialize with declaration and trailing newline
    pub fn to_xml_string(&self) -> WorldResult<String> {
        let mut buffer = Vec::new();
        let mut writer = Writer::new_with_indent(&mut buffer, b' ', INDENT);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
            .map_err(WorldError::document)?;
        write_element(&mut writer, &self.root)?;
        let mut xml = String::from_utf8(buffer).map_err(WorldError::document)?;
        xml.push('\n');
        Ok(xml)
    }
}

/// Write an element and its subtree
pub fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> WorldResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(WorldError::document);
    }

    writer
        .write_event(Event::Start(start))
        .map_err(WorldError::document)?;
    for node in &element.children {
        match node {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(WorldError::document)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(WorldError::document)
}
