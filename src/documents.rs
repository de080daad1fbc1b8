//! XML element tree
//!
//! The intermediate form between typed resources and text: projection builds
//! an [`Element`] tree which is then written with `quick-xml`, and parsing
//! reads text into a [`Document`] before resources are extracted from it.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::{NamespaceContext, QName, SEP_NAMESPACE};
use crate::projection::ProjectionConfig;
use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::path::Path;

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element qualified name
    pub qname: QName,
    /// Element attributes in document order, keyed by their written name
    pub attributes: IndexMap<String, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
    /// Namespace context in scope for this element
    pub namespaces: NamespaceContext,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
            namespaces: NamespaceContext::new(),
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.qname.namespace.as_deref()
    }

    /// Get an attribute value by name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set text content
    pub fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }

    /// Discard text that is only indentation between child elements.
    ///
    /// Leaf text is a field value and stays verbatim, whitespace included.
    fn drop_layout_whitespace(&mut self) {
        let layout_only = self
            .text
            .as_deref()
            .is_some_and(|text| text.trim().is_empty());
        if layout_only && !self.children.is_empty() {
            self.text = None;
        }
    }

    /// First child element with the given local name.
    ///
    /// Children in a foreign namespace are skipped; unqualified children
    /// still match.
    pub fn find_child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|e| e.is_sep_named(local_name))
    }

    /// Find child elements by local name, skipping foreign namespaces
    pub fn find_children(&self, local_name: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter(|e| e.is_sep_named(local_name))
            .collect()
    }

    fn is_sep_named(&self, local_name: &str) -> bool {
        self.local_name() == local_name
            && self.namespace().map_or(true, |ns| ns == SEP_NAMESPACE)
    }

    /// Render this element (and its subtree) as a document
    pub fn to_xml(&self, config: &ProjectionConfig) -> Result<String> {
        let mut writer = if config.indent > 0 {
            Writer::new_with_indent(Vec::new(), b' ', config.indent)
        } else {
            Writer::new(Vec::new())
        };

        if config.declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(write_error)?;
        }
        self.write(&mut writer, None)?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| Error::Xml(format!("Writer produced invalid UTF-8: {}", e)))
    }

    fn write(&self, writer: &mut Writer<Vec<u8>>, parent_ns: Option<&str>) -> Result<()> {
        let name = self.local_name();
        let mut start = BytesStart::new(name);

        let default_ns = self.namespaces.get_default_namespace();
        if let Some(ns) = default_ns {
            if Some(ns) != parent_ns {
                start.push_attribute(("xmlns", ns));
            }
        }
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.text.is_none() && self.children.is_empty() {
            writer.write_event(Event::Empty(start)).map_err(write_error)?;
            return Ok(());
        }

        writer.write_event(Event::Start(start)).map_err(write_error)?;
        if let Some(ref text) = self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_error)?;
        }
        let scope = default_ns.or(parent_ns);
        for child in &self.children {
            child.write(writer, scope)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(write_error)?;
        Ok(())
    }
}

fn write_error(e: quick_xml::Error) -> Error {
    Error::Xml(format!("Failed to write XML: {}", e))
}

/// XML Document representation
#[derive(Debug, Default)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Read and parse an XML document from a file
    pub fn from_file(path: impl AsRef<Path>, limits: &Limits) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        limits.check_size(usize::try_from(metadata.len()).unwrap_or(usize::MAX))?;
        let content = std::fs::read(path)?;
        Self::parse_with_limits(&content, limits)
    }

    /// Parse an XML document from bytes with default limits
    pub fn parse(xml: &[u8]) -> Result<Self> {
        Self::parse_with_limits(xml, &Limits::default())
    }

    /// Parse an XML document from bytes
    pub fn parse_with_limits(xml: &[u8], limits: &Limits) -> Result<Self> {
        limits.check_size(xml.len())?;

        let mut reader = Reader::from_reader(xml);
        reader.trim_text(false);

        let mut doc = Document::new();
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    limits.check_depth(element_stack.len() + 1)?;
                    let element = Self::parse_element(&e, element_stack.last(), limits)?;
                    element_stack.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(mut current) = element_stack.pop() {
                        current.drop_layout_whitespace();
                        if let Some(parent) = element_stack.last_mut() {
                            limits.check_children(parent.children.len() + 1)?;
                            parent.add_child(current);
                        } else {
                            // This is the root element
                            doc.root = Some(current);
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    limits.check_depth(element_stack.len() + 1)?;
                    let element = Self::parse_element(&e, element_stack.last(), limits)?;
                    if let Some(parent) = element_stack.last_mut() {
                        limits.check_children(parent.children.len() + 1)?;
                        parent.add_child(element);
                    } else {
                        // Empty root element
                        doc.root = Some(element);
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = element_stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::Xml(format!("Failed to unescape text: {}", e)))?
                            .to_string();
                        current.text.get_or_insert_with(String::new).push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = element_stack.last_mut() {
                        let text = std::str::from_utf8(&e)
                            .map_err(|e| Error::Xml(format!("Invalid CDATA: {}", e)))?;
                        current.text.get_or_insert_with(String::new).push_str(text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // Ignore other events (comments, processing instructions, etc.)
            }
            buf.clear();
        }

        if !element_stack.is_empty() {
            return Err(Error::Xml(format!(
                "Unclosed element '{}' at end of input",
                element_stack[element_stack.len() - 1].local_name()
            )));
        }

        Ok(doc)
    }

    /// Parse element from BytesStart event, resolving its name against the
    /// namespaces in scope
    fn parse_element(
        start: &BytesStart,
        parent: Option<&Element>,
        limits: &Limits,
    ) -> Result<Element> {
        let name_bytes = start.name();
        let name = std::str::from_utf8(name_bytes.as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?
            .to_string();

        let mut namespaces = parent
            .map(|p| p.namespaces.clone())
            .unwrap_or_default();
        let mut attributes = IndexMap::new();

        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| Error::Xml(format!("Failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("Invalid attribute name: {}", e)))?;

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("Failed to unescape attribute value: {}", e)))?
                .to_string();

            // Handle namespace declarations
            if attr_name == "xmlns" {
                namespaces.set_default_namespace(&attr_value);
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                namespaces.add_prefix(prefix, &attr_value);
            } else {
                // Prefixed attributes keep their prefix so they never shadow
                // the unqualified attributes of the SEP schema
                attributes.insert(attr_name.to_string(), attr_value);
            }
        }
        limits.check_attributes(attributes.len())?;

        let mut element = Element::new(namespaces.resolve(&name)?);
        element.attributes = attributes;
        element.namespaces = namespaces;
        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Take ownership of the root element
    pub fn into_root(self) -> Option<Element> {
        self.root
    }
}
