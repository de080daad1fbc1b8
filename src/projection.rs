//! XML projection engine
//!
//! Each resource type carries a declarative field table ([`Fields::FIELDS`])
//! naming, in schema sequence order, every attribute and child element it
//! contributes, and whether the field is a flattened base type. The same
//! declaration (see `sep_type!`) generates the code that writes the fields
//! into an [`Element`] and reads them back, so the table and the behaviour
//! cannot drift apart.

use crate::documents::{Document, Element};
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::{NamespaceContext, QName, SEP_NAMESPACE};
use crate::primitives::XmlScalar;
use serde::{Deserialize, Serialize};

/// Where a field lands in the projected element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// XML attribute of the element
    Attribute,
    /// Child element holding text
    SimpleElement,
    /// Child element with its own fields
    ComplexElement(&'static [FieldSpec]),
    /// Base type merged into the same element, no wrapper
    Flatten(&'static [FieldSpec]),
}

/// How often a field occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurs {
    /// Exactly once
    Required,
    /// Zero or one time
    Optional,
    /// Zero or more times
    Repeated,
}

/// One row of a field table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Schema name of the attribute or element; the base type name for `Flatten`
    pub name: &'static str,
    /// Attribute, element or flattened base
    pub placement: Placement,
    /// Cardinality
    pub occurs: Occurs,
}

impl FieldSpec {
    /// True for attribute rows
    pub fn is_attribute(&self) -> bool {
        matches!(self.placement, Placement::Attribute)
    }

    /// True for child element rows
    pub fn is_element(&self) -> bool {
        matches!(
            self.placement,
            Placement::SimpleElement | Placement::ComplexElement(_)
        )
    }
}

/// A type whose fields project into an element
pub trait Fields: Sized {
    /// Field table in schema order
    const FIELDS: &'static [FieldSpec];

    /// Append this value's attributes and children to `element`
    fn write_fields(&self, element: &mut Element);

    /// Read this value from `element`'s attributes and children
    fn read_fields(element: &Element) -> Result<Self>;
}

/// A type that can be the root element of a document
pub trait SepResource: Fields {
    /// Schema type name, used as the root element name
    const ELEMENT: &'static str;
}

/// Flatten a field table: base rows are replaced by their own rows, recursively
pub fn flattened(fields: &'static [FieldSpec]) -> Vec<&'static FieldSpec> {
    let mut out = Vec::new();
    for spec in fields {
        match spec.placement {
            Placement::Flatten(base) => out.extend(flattened(base)),
            _ => out.push(spec),
        }
    }
    out
}

/// Attribute names of a table, base attributes included
pub fn attribute_names(fields: &'static [FieldSpec]) -> Vec<&'static str> {
    flattened(fields)
        .into_iter()
        .filter(|f| f.is_attribute())
        .map(|f| f.name)
        .collect()
}

/// Child element names in schema sequence order, base elements first
pub fn element_sequence(fields: &'static [FieldSpec]) -> Vec<&'static str> {
    flattened(fields)
        .into_iter()
        .filter(|f| f.is_element())
        .map(|f| f.name)
        .collect()
}

// =============================================================================
// Output configuration
// =============================================================================

/// Options for rendering a projected element as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>`
    pub declaration: bool,
    /// Spaces per nesting level; 0 renders compactly on one line
    pub indent: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            declaration: true,
            indent: 2,
        }
    }
}

impl ProjectionConfig {
    /// Single-line output without a declaration
    pub fn compact() -> Self {
        Self {
            declaration: false,
            indent: 0,
        }
    }

    /// Set whether to emit the XML declaration
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    /// Set the indentation width
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Project a resource into its root element
pub fn to_element<T: SepResource>(resource: &T) -> Element {
    let mut root = Element::new(QName::namespaced(SEP_NAMESPACE, T::ELEMENT));
    root.namespaces = NamespaceContext::sep();
    resource.write_fields(&mut root);
    log::debug!(
        "projected {} with {} attributes and {} children",
        T::ELEMENT,
        root.attributes.len(),
        root.children.len()
    );
    root
}

/// Project a resource into an XML string using the default configuration
pub fn to_xml<T: SepResource>(resource: &T) -> Result<String> {
    to_xml_with(resource, &ProjectionConfig::default())
}

/// Project a resource into an XML string
pub fn to_xml_with<T: SepResource>(resource: &T, config: &ProjectionConfig) -> Result<String> {
    to_element(resource).to_xml(config)
}

/// Parse a resource from its root element
pub fn from_element<T: SepResource>(root: &Element) -> Result<T> {
    if root.local_name() != T::ELEMENT {
        return Err(Error::UnexpectedElement {
            expected: T::ELEMENT.to_string(),
            found: root.local_name().to_string(),
        });
    }
    if let Some(ns) = root.namespace() {
        if ns != SEP_NAMESPACE {
            return Err(Error::Namespace(format!(
                "{} is in namespace '{}', expected '{}'",
                T::ELEMENT,
                ns,
                SEP_NAMESPACE
            )));
        }
    }
    log_unknown(root, T::FIELDS);
    log::debug!("parsing {}", T::ELEMENT);
    T::read_fields(root).map_err(|e| e.within(T::ELEMENT))
}

/// Parse a resource from an XML string with default limits
pub fn from_xml<T: SepResource>(xml: &str) -> Result<T> {
    from_xml_with(xml, &Limits::default())
}

/// Parse a resource from an XML string
pub fn from_xml_with<T: SepResource>(xml: &str, limits: &Limits) -> Result<T> {
    let doc = Document::parse_with_limits(xml.as_bytes(), limits)?;
    let root = doc
        .root()
        .ok_or_else(|| Error::Xml("document has no root element".to_string()))?;
    from_element(root)
}

fn log_unknown(element: &Element, fields: &'static [FieldSpec]) {
    if !log::log_enabled!(log::Level::Trace) {
        return;
    }
    let rows = flattened(fields);
    for name in element.attributes.keys() {
        if !rows.iter().any(|f| f.is_attribute() && f.name == name.as_str()) {
            log::trace!("ignoring unknown attribute '{}' on {}", name, element.local_name());
        }
    }
    for child in &element.children {
        let row = rows
            .iter()
            .find(|f| f.is_element() && f.name == child.local_name())
            .map(|f| f.placement);
        match row {
            Some(Placement::ComplexElement(nested)) => log_unknown(child, nested),
            Some(_) => {}
            None => log::trace!(
                "ignoring unknown element '{}' in {}",
                child.local_name(),
                element.local_name()
            ),
        }
    }
}

// =============================================================================
// Field writers
// =============================================================================

/// Write a required attribute
pub fn write_attr<T: XmlScalar>(element: &mut Element, name: &str, value: &T) {
    element.set_attribute(name, value.to_xml());
}

/// Write an optional attribute; nothing when unset
pub fn write_opt_attr<T: XmlScalar>(element: &mut Element, name: &str, value: &Option<T>) {
    if let Some(value) = value {
        write_attr(element, name, value);
    }
}

/// Write a required simple element
pub fn write_text<T: XmlScalar>(element: &mut Element, name: &str, value: &T) {
    let mut child = Element::new(QName::local(name));
    child.set_text(value.to_xml());
    element.add_child(child);
}

/// Write an optional simple element; nothing when unset
pub fn write_opt_text<T: XmlScalar>(element: &mut Element, name: &str, value: &Option<T>) {
    if let Some(value) = value {
        write_text(element, name, value);
    }
}

/// Write a required complex element
pub fn write_child<T: Fields>(element: &mut Element, name: &str, value: &T) {
    let mut child = Element::new(QName::local(name));
    value.write_fields(&mut child);
    element.add_child(child);
}

/// Write an optional complex element; nothing when unset
pub fn write_opt_child<T: Fields>(element: &mut Element, name: &str, value: &Option<T>) {
    if let Some(value) = value {
        write_child(element, name, value);
    }
}

/// Write one complex element per item, in order
pub fn write_children<T: Fields>(element: &mut Element, name: &str, values: &[T]) {
    for value in values {
        write_child(element, name, value);
    }
}

// =============================================================================
// Field readers
// =============================================================================

/// Read an optional attribute
pub fn read_opt_attr<T: XmlScalar>(element: &Element, name: &'static str) -> Result<Option<T>> {
    element
        .get_attribute(name)
        .map(|text| T::from_xml(text).map_err(|e| e.within(&format!("@{}", name))))
        .transpose()
}

/// Read a required attribute
pub fn read_attr<T: XmlScalar>(element: &Element, name: &'static str) -> Result<T> {
    read_opt_attr(element, name)?.ok_or(Error::MissingRequiredField {
        field: name,
        path: String::new(),
    })
}

/// Read an optional simple element
pub fn read_opt_text<T: XmlScalar>(element: &Element, name: &'static str) -> Result<Option<T>> {
    element
        .find_child(name)
        .map(|child| T::from_xml(child.text.as_deref().unwrap_or("")).map_err(|e| e.within(name)))
        .transpose()
}

/// Read a required simple element
pub fn read_text<T: XmlScalar>(element: &Element, name: &'static str) -> Result<T> {
    read_opt_text(element, name)?.ok_or(Error::MissingRequiredField {
        field: name,
        path: String::new(),
    })
}

/// Read an optional complex element
pub fn read_opt_child<T: Fields>(element: &Element, name: &'static str) -> Result<Option<T>> {
    element
        .find_child(name)
        .map(|child| T::read_fields(child).map_err(|e| e.within(name)))
        .transpose()
}

/// Read a required complex element
pub fn read_child<T: Fields>(element: &Element, name: &'static str) -> Result<T> {
    read_opt_child(element, name)?.ok_or(Error::MissingRequiredField {
        field: name,
        path: String::new(),
    })
}

/// Read every complex element called `name`, in document order
pub fn read_children<T: Fields>(element: &Element, name: &'static str) -> Result<Vec<T>> {
    element
        .find_children(name)
        .into_iter()
        .enumerate()
        .map(|(i, child)| T::read_fields(child).map_err(|e| e.within(&format!("{}[{}]", name, i))))
        .collect()
}

// =============================================================================
// Declaration macro
// =============================================================================

/// Declare a resource struct together with its field table.
///
/// Field kinds: `base` (flattened), `attr`/`opt_attr`, `default_attr`
/// (always written, schema default when absent on input), `text`/`opt_text`
/// (simple elements), `child`/`opt_child` (complex elements) and `children`.
/// Fields must be listed in schema sequence order with `base` first.
macro_rules! sep_type {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(as $element:literal)? {
            $(
                $(#[$fmeta:meta])*
                $kind:ident $(($($xml:tt)*))? $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $crate::projection::sep_field_type!($kind $ty),
            )*
        }

        impl $crate::projection::Fields for $name {
            const FIELDS: &'static [$crate::projection::FieldSpec] = &[
                $( $crate::projection::sep_field_spec!($kind $(($($xml)*))? $ty), )*
            ];

            fn write_fields(&self, element: &mut $crate::documents::Element) {
                $( $crate::projection::sep_field_write!($kind $(($($xml)*))? element, &self.$field); )*
            }

            fn read_fields(element: &$crate::documents::Element) -> $crate::error::Result<Self> {
                Ok(Self {
                    $( $field: $crate::projection::sep_field_read!($kind $(($($xml)*))? element)?, )*
                })
            }
        }

        $(
            impl $crate::projection::SepResource for $name {
                const ELEMENT: &'static str = $element;
            }
        )?
    };
}

macro_rules! sep_field_type {
    (base $ty:ty) => { $ty };
    (attr $ty:ty) => { $ty };
    (opt_attr $ty:ty) => { Option<$ty> };
    (default_attr $ty:ty) => { $ty };
    (text $ty:ty) => { $ty };
    (opt_text $ty:ty) => { Option<$ty> };
    (child $ty:ty) => { $ty };
    (opt_child $ty:ty) => { Option<$ty> };
    (children $ty:ty) => { Vec<$ty> };
}

macro_rules! sep_field_spec {
    (@row $xml:expr, $placement:expr, $occurs:ident) => {
        $crate::projection::FieldSpec {
            name: $xml,
            placement: $placement,
            occurs: $crate::projection::Occurs::$occurs,
        }
    };
    (base $ty:ty) => {
        $crate::projection::sep_field_spec!(@row
            stringify!($ty),
            $crate::projection::Placement::Flatten(<$ty as $crate::projection::Fields>::FIELDS),
            Required)
    };
    (attr($xml:expr) $ty:ty) => {
        $crate::projection::sep_field_spec!(@row $xml, $crate::projection::Placement::Attribute, Required)
    };
    (opt_attr($xml:expr) $ty:ty) => {
        $crate::projection::sep_field_spec!(@row $xml, $crate::projection::Placement::Attribute, Optional)
    };
    (default_attr($xml:expr, $default:expr) $ty:ty) => {
        $crate::projection::sep_field_spec!(@row $xml, $crate::projection::Placement::Attribute, Optional)
    };
    (text($xml:expr) $ty:ty) => {
        $crate::projection::sep_field_spec!(@row $xml, $crate::projection::Placement::SimpleElement, Required)
    };
    (opt_text($xml:expr) $ty:ty) => {
        $crate::projection::sep_field_spec!(@row $xml, $crate::projection::Placement::SimpleElement, Optional)
    };
    (child($xml:expr) $ty:ty) => {
        $crate::projection::sep_field_spec!(@row
            $xml,
            $crate::projection::Placement::ComplexElement(<$ty as $crate::projection::Fields>::FIELDS),
            Required)
    };
    (opt_child($xml:expr) $ty:ty) => {
        $crate::projection::sep_field_spec!(@row
            $xml,
            $crate::projection::Placement::ComplexElement(<$ty as $crate::projection::Fields>::FIELDS),
            Optional)
    };
    (children($xml:expr) $ty:ty) => {
        $crate::projection::sep_field_spec!(@row
            $xml,
            $crate::projection::Placement::ComplexElement(<$ty as $crate::projection::Fields>::FIELDS),
            Repeated)
    };
}

macro_rules! sep_field_write {
    (base $element:ident, $value:expr) => {
        $crate::projection::Fields::write_fields($value, $element)
    };
    (attr($xml:expr) $element:ident, $value:expr) => {
        $crate::projection::write_attr($element, $xml, $value)
    };
    (opt_attr($xml:expr) $element:ident, $value:expr) => {
        $crate::projection::write_opt_attr($element, $xml, $value)
    };
    (default_attr($xml:expr, $default:expr) $element:ident, $value:expr) => {
        $crate::projection::write_attr($element, $xml, $value)
    };
    (text($xml:expr) $element:ident, $value:expr) => {
        $crate::projection::write_text($element, $xml, $value)
    };
    (opt_text($xml:expr) $element:ident, $value:expr) => {
        $crate::projection::write_opt_text($element, $xml, $value)
    };
    (child($xml:expr) $element:ident, $value:expr) => {
        $crate::projection::write_child($element, $xml, $value)
    };
    (opt_child($xml:expr) $element:ident, $value:expr) => {
        $crate::projection::write_opt_child($element, $xml, $value)
    };
    (children($xml:expr) $element:ident, $value:expr) => {
        $crate::projection::write_children($element, $xml, $value)
    };
}

macro_rules! sep_field_read {
    (base $element:ident) => {
        $crate::projection::Fields::read_fields($element)
    };
    (attr($xml:expr) $element:ident) => {
        $crate::projection::read_attr($element, $xml)
    };
    (opt_attr($xml:expr) $element:ident) => {
        $crate::projection::read_opt_attr($element, $xml)
    };
    (default_attr($xml:expr, $default:expr) $element:ident) => {
        $crate::projection::read_opt_attr($element, $xml).map(|v| v.unwrap_or($default))
    };
    (text($xml:expr) $element:ident) => {
        $crate::projection::read_text($element, $xml)
    };
    (opt_text($xml:expr) $element:ident) => {
        $crate::projection::read_opt_text($element, $xml)
    };
    (child($xml:expr) $element:ident) => {
        $crate::projection::read_child($element, $xml)
    };
    (opt_child($xml:expr) $element:ident) => {
        $crate::projection::read_opt_child($element, $xml)
    };
    (children($xml:expr) $element:ident) => {
        $crate::projection::read_children($element, $xml)
    };
}

pub(crate) use sep_field_read;
pub(crate) use sep_field_spec;
pub(crate) use sep_field_type;
pub(crate) use sep_field_write;
pub(crate) use sep_type;
