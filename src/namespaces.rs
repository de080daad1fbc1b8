//! XML namespace handling
//!
//! SEP2 resources live in a single default namespace, [`SEP_NAMESPACE`].
//! Prefixed declarations are still tracked so that a document written with
//! `sep:` prefixes, or one carrying foreign extension elements, resolves to
//! the right names.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// Target namespace of the IEEE 2030.5 schema
pub const SEP_NAMESPACE: &str = "urn:ieee:std:2030.5:ns";

/// Element name split into namespace and local part
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// Namespace URI, `None` for an unqualified name
    pub namespace: Option<String>,
    /// Local name as written in the schema
    pub local_name: String,
}

impl QName {
    /// Unqualified name; child elements of a resource are written this way
    /// and inherit the default namespace of their root
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Name in an explicit namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }

    /// True when this name is in the SEP2 namespace
    pub fn is_sep(&self) -> bool {
        self.namespace.as_deref() == Some(SEP_NAMESPACE)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

/// Namespace declarations in scope at one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    prefixes: HashMap<String, String>,
    default_namespace: Option<String>,
}

impl NamespaceContext {
    /// Empty context: no default namespace, no prefixes
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose default namespace is [`SEP_NAMESPACE`], as on every
    /// projected root
    pub fn sep() -> Self {
        Self {
            prefixes: HashMap::new(),
            default_namespace: Some(SEP_NAMESPACE.to_string()),
        }
    }

    /// Record an `xmlns:prefix` declaration
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Record an `xmlns` declaration
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        self.default_namespace = Some(namespace.into());
    }

    /// Namespace bound to `prefix`
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Default namespace in scope
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Resolve a name as written in the document.
    ///
    /// An unprefixed name takes the default namespace; a prefix that was
    /// never declared is a [`Error::Namespace`].
    pub fn resolve(&self, written: &str) -> Result<QName> {
        match written.split_once(':') {
            Some((prefix, local)) => {
                let namespace = self
                    .get_namespace(prefix)
                    .ok_or_else(|| Error::Namespace(format!("undeclared prefix '{}' in '{}'", prefix, written)))?;
                Ok(QName::namespaced(namespace, local))
            }
            None => Ok(QName {
                namespace: self.default_namespace.clone(),
                local_name: written.to_string(),
            }),
        }
    }
}
