//! # sep2
//!
//! Typed resource model for IEEE 2030.5 (Smart Energy Profile 2.0) with its
//! canonical XML projection.
//!
//! ## Features
//!
//! - Every resource is a plain Rust struct; schema inheritance is expressed
//!   by composition and flattened into a single element on the wire
//! - Fixed-width hex binaries, bounded integers and power-of-ten quantities
//!   that reject malformed input instead of truncating it
//! - Typed links: a `TimeLink` can only point at a `Time`
//! - Explicit, overridable constructor defaults
//! - Parse errors that name the missing or malformed field and its path
//! - A pluggable schema oracle seam for external XSD validation
//!
//! ## Example
//!
//! ```rust
//! use sep2::defaults::Defaults;
//! use sep2::links::{EndDeviceListLink, SelfDeviceLink, TimeLink};
//! use sep2::resources::DeviceCapability;
//!
//! let dcap = DeviceCapability::new("/dcap", &Defaults::default())
//!     .with_time_link(TimeLink::new("/tm"))
//!     .with_self_device_link(SelfDeviceLink::new("/sdev"))
//!     .with_end_device_list_link(EndDeviceListLink::new("/edev", 1));
//!
//! let xml = sep2::to_xml(&dcap)?;
//! let back: DeviceCapability = sep2::from_xml(&xml)?;
//! assert_eq!(back, dcap);
//! # Ok::<(), sep2::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;
pub mod namespaces;

// Wire representation
pub mod documents;
pub mod primitives;
pub mod projection;

// Resource model
pub mod defaults;
pub mod links;
pub mod resources;

// Tooling
pub mod any;
pub mod oracle;

// Re-exports for convenience
pub use defaults::Defaults;
pub use error::{Error, Result, SchemaViolation};
pub use projection::{from_xml, from_xml_with, to_xml, to_xml_with, ProjectionConfig, SepResource};

/// Version of the sep2 library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use namespaces::SEP_NAMESPACE;
