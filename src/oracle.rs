//! Schema oracle interface
//!
//! Validation against the normative XSD is delegated to an external
//! validator. [`SchemaOracle`] is the seam: `compile` acquires a compiled
//! schema handle, `validate` checks a document against it. Handles release
//! whatever they hold when dropped, so every exit path releases them.
//!
//! [`StructuralOracle`] is a built-in stand-in that checks documents against
//! the crate's own field tables: known root, namespace, required fields,
//! element order and cardinality. It does not check primitive lexical forms.

use crate::any;
use crate::documents::{Document, Element};
use crate::error::{Result, SchemaViolation};
use crate::namespaces::SEP_NAMESPACE;
use crate::projection::{flattened, to_xml, FieldSpec, Occurs, Placement, SepResource};

/// An external validator for SEP2 documents
pub trait SchemaOracle {
    /// A compiled schema; released on drop
    type Handle;

    /// Compile the schema found at `location`
    fn compile(&self, location: &str) -> Result<Self::Handle>;

    /// Validate a serialized document
    fn validate(&self, schema: &Self::Handle, document: &[u8]) -> std::result::Result<(), SchemaViolation>;
}

/// Project `resource` and validate the result with `oracle`
pub fn check_conformance<O, T>(oracle: &O, schema: &O::Handle, resource: &T) -> Result<()>
where
    O: SchemaOracle,
    T: SepResource,
{
    let xml = to_xml(resource)?;
    oracle.validate(schema, xml.as_bytes())?;
    Ok(())
}

/// Field-table driven stand-in for an XSD validator
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralOracle;

/// Schema handle of the [`StructuralOracle`]
#[derive(Debug, Clone)]
pub struct StructuralSchema {
    location: String,
}

impl StructuralSchema {
    /// Location the schema was compiled from
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl SchemaOracle for StructuralOracle {
    type Handle = StructuralSchema;

    fn compile(&self, location: &str) -> Result<StructuralSchema> {
        // The tables are compiled into the crate; the location is only recorded.
        log::debug!("structural oracle standing in for schema at '{}'", location);
        Ok(StructuralSchema {
            location: location.to_string(),
        })
    }

    fn validate(&self, _schema: &StructuralSchema, document: &[u8]) -> std::result::Result<(), SchemaViolation> {
        let doc = Document::parse(document).map_err(|e| SchemaViolation::new(0, e.to_string()))?;
        let root = doc
            .root()
            .ok_or_else(|| SchemaViolation::new(0, "document has no root element"))?;
        check_document(root)
    }
}

/// Check a root element against the field table of its type
pub fn check_document(root: &Element) -> std::result::Result<(), SchemaViolation> {
    let name = root.local_name();
    if root.namespace() != Some(SEP_NAMESPACE) {
        return Err(violation(
            name,
            format!("root element '{}' is not in namespace '{}'", name, SEP_NAMESPACE),
        ));
    }
    let fields = any::root_fields(name)
        .ok_or_else(|| violation(name, format!("no global element '{}'", name)))?;
    check_element(root, fields, name)
}

fn violation(path: &str, message: String) -> SchemaViolation {
    SchemaViolation::new(0, message).with_path(path)
}

fn check_element(
    element: &Element,
    fields: &'static [FieldSpec],
    path: &str,
) -> std::result::Result<(), SchemaViolation> {
    let rows = flattened(fields);

    for row in rows.iter().filter(|r| r.is_attribute()) {
        if row.occurs == Occurs::Required && element.get_attribute(row.name).is_none() {
            return Err(violation(path, format!("missing required attribute '{}'", row.name)));
        }
    }
    for name in element.attributes.keys() {
        if !name.contains(':') && !rows.iter().any(|r| r.is_attribute() && r.name == name.as_str()) {
            return Err(violation(path, format!("attribute '{}' is not allowed", name)));
        }
    }

    let sequence: Vec<&FieldSpec> = rows.into_iter().filter(|r| r.is_element()).collect();
    // Index in `sequence` of the row matched by the previous child
    let mut current: Option<usize> = None;

    for child in &element.children {
        let name = child.local_name();
        let child_path = format!("{}/{}", path, name);

        if let Some(ns) = child.namespace() {
            if ns != SEP_NAMESPACE {
                return Err(violation(&child_path, format!("element '{}' is in foreign namespace '{}'", name, ns)));
            }
        }

        let index = sequence
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| violation(&child_path, format!("element '{}' is not expected here", name)))?;

        match current {
            Some(previous) if index < previous => {
                return Err(violation(
                    &child_path,
                    format!("element '{}' must come before '{}'", name, sequence[previous].name),
                ));
            }
            Some(previous) if index == previous => {
                if sequence[index].occurs != Occurs::Repeated {
                    return Err(violation(&child_path, format!("element '{}' occurs more than once", name)));
                }
            }
            _ => {
                let from = current.map_or(0, |previous| previous + 1);
                if let Some(missing) = sequence[from..index].iter().find(|r| r.occurs == Occurs::Required) {
                    return Err(violation(
                        path,
                        format!("missing required element '{}' before '{}'", missing.name, name),
                    ));
                }
                current = Some(index);
            }
        }

        match sequence[index].placement {
            Placement::ComplexElement(nested) => check_element(child, nested, &child_path)?,
            _ => {
                if !child.children.is_empty() {
                    return Err(violation(&child_path, format!("simple element '{}' has child elements", name)));
                }
            }
        }
    }

    let from = current.map_or(0, |previous| previous + 1);
    if let Some(missing) = sequence[from..].iter().find(|r| r.occurs == Occurs::Required) {
        return Err(violation(path, format!("missing required element '{}'", missing.name)));
    }
    Ok(())
}
