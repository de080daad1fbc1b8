//! Limits and constraints for document parsing
//!
//! SEP2 documents arrive from the network, so the parser refuses input that
//! is larger, deeper or wider than any legitimate resource before the typed
//! layer ever sees it. The deepest resource in the model (a PowerStatus
//! carrying PEVInfo quantities) nests four levels; the widest is a list page.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parser limits configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum element nesting depth, root included
    pub max_depth: usize,

    /// Maximum document size in bytes
    pub max_size: usize,

    /// Maximum number of attributes per element
    pub max_attributes: usize,

    /// Maximum number of child elements per element, which bounds the
    /// entries on one list page
    pub max_children: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_size: 16 * 1024 * 1024,
            max_attributes: 64,
            max_children: 65_536,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits for constrained devices that only ever see small pages
    pub fn strict() -> Self {
        Self {
            max_depth: 16,
            max_size: 256 * 1024,
            max_attributes: 16,
            max_children: 1024,
        }
    }

    /// Limits for offline tooling over trusted dumps
    pub fn permissive() -> Self {
        Self {
            max_depth: 1024,
            max_size: 1024 * 1024 * 1024,
            max_attributes: 1024,
            max_children: usize::MAX,
        }
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the maximum document size
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Set the maximum attributes per element
    pub fn with_max_attributes(mut self, count: usize) -> Self {
        self.max_attributes = count;
        self
    }

    /// Set the maximum children per element
    pub fn with_max_children(mut self, count: usize) -> Self {
        self.max_children = count;
        self
    }

    /// Check a nesting depth
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        check("element depth", depth, self.max_depth)
    }

    /// Check a document size in bytes
    pub fn check_size(&self, size: usize) -> Result<()> {
        check("document size in bytes", size, self.max_size)
    }

    /// Check the attribute count of one element
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        check("attribute count", count, self.max_attributes)
    }

    /// Check the child count of one element
    pub fn check_children(&self, count: usize) -> Result<()> {
        check("child element count", count, self.max_children)
    }
}

fn check(what: &str, value: usize, max: usize) -> Result<()> {
    if value > max {
        Err(Error::LimitExceeded(format!(
            "{} {} exceeds maximum {}",
            what, value, max
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_fit_every_resource() {
        let limits = Limits::default();
        assert!(limits.check_depth(4).is_ok());
        assert!(limits.check_depth(65).is_err());
        assert!(limits.check_children(1000).is_ok());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_depth < Limits::default().max_depth);
        assert!(limits.check_size(512 * 1024).is_err());
        assert!(limits.check_children(1025).is_err());
    }

    #[test]
    fn test_permissive_limits() {
        let limits = Limits::permissive();
        assert!(limits.check_depth(500).is_ok());
        assert!(limits.check_children(1_000_000).is_ok());
    }

    #[test]
    fn test_limit_message_names_the_quantity() {
        let err = Limits::new().with_max_attributes(2).check_attributes(3).unwrap_err();
        assert_eq!(err.to_string(), "limit exceeded: attribute count 3 exceeds maximum 2");
    }

    #[test]
    fn test_limits_from_partial_json() {
        let limits: Limits = serde_json::from_str(r#"{"max_size": 1024}"#).unwrap();
        assert_eq!(limits.max_size, 1024);
        assert_eq!(limits.max_depth, Limits::default().max_depth);
    }
}
