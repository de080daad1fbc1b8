//! Resource base hierarchy
//!
//! The schema's abstract base types. Each derived type holds its base in a
//! `base` field, and the projection merges the base's attributes and elements
//! into the derived type's own element.

use crate::defaults::Defaults;
use crate::primitives::{HexBinary8, Mrid, String32, SubscribableType, VersionType};
use crate::projection::sep_type;

sep_type! {
    /// Root of every addressable resource
    pub struct Resource {
        /// URI of this resource; absent for resources embedded in another
        opt_attr("href") href: String,
    }
}

impl Resource {
    /// Resource addressed at `href`; an empty `href` leaves it unaddressed
    pub fn new(href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            href: (!href.is_empty()).then_some(href),
        }
    }

    /// Resource without an address
    pub fn embedded() -> Self {
        Self { href: None }
    }
}

sep_type! {
    /// Resource a client may subscribe to
    pub struct SubscribableResource {
        base base: Resource,
        default_attr("subscribable", SubscribableType::NonSubscribable) subscribable: SubscribableType,
    }
}

impl SubscribableResource {
    /// Subscribable resource at `href` with the configured subscribable code
    pub fn new(href: impl Into<String>, defaults: &Defaults) -> Self {
        Self {
            base: Resource::new(href),
            subscribable: defaults.subscribable,
        }
    }
}

sep_type! {
    /// Resource that can ask the client for a response
    pub struct RespondableResource {
        base base: Resource,
        opt_attr("replyTo") reply_to: String,
        default_attr("responseRequired", HexBinary8::default()) response_required: HexBinary8,
    }
}

impl RespondableResource {
    /// Respondable resource at `href` with the configured response code
    pub fn new(href: impl Into<String>, defaults: &Defaults) -> Self {
        Self {
            base: Resource::new(href),
            reply_to: None,
            response_required: defaults.response_required,
        }
    }
}

sep_type! {
    /// Paged container of resources
    pub struct List {
        base base: Resource,
        /// Total members of the list, not just this page
        attr("all") all: u32,
        /// Members carried in this page
        attr("results") results: u32,
    }
}

impl List {
    /// List page at `href`
    pub fn new(href: impl Into<String>, all: u32, results: u32) -> Self {
        Self {
            base: Resource::new(href),
            all,
            results,
        }
    }
}

sep_type! {
    /// Paged container a client may subscribe to
    pub struct SubscribableList {
        base base: SubscribableResource,
        attr("all") all: u32,
        attr("results") results: u32,
    }
}

impl SubscribableList {
    /// Subscribable list page at `href`
    pub fn new(href: impl Into<String>, all: u32, results: u32, defaults: &Defaults) -> Self {
        Self {
            base: SubscribableResource::new(href, defaults),
            all,
            results,
        }
    }
}

sep_type! {
    /// Resource with a globally unique identity
    pub struct IdentifiedObject {
        base base: Resource,
        text("mRID") mrid: Mrid,
        opt_text("description") description: String32,
        opt_text("version") version: VersionType,
    }
}

impl IdentifiedObject {
    /// Identified resource at `href`
    pub fn new(href: impl Into<String>, mrid: Mrid) -> Self {
        Self {
            base: Resource::new(href),
            mrid,
            description: None,
            version: None,
        }
    }
}

sep_type! {
    /// Identified resource that can ask for a response
    pub struct RespondableIdentifiedObject {
        base base: RespondableResource,
        text("mRID") mrid: Mrid,
        opt_text("description") description: String32,
        opt_text("version") version: VersionType,
    }
}

impl RespondableIdentifiedObject {
    /// Respondable identified resource at `href`
    pub fn new(href: impl Into<String>, mrid: Mrid, defaults: &Defaults) -> Self {
        Self {
            base: RespondableResource::new(href, defaults),
            mrid,
            description: None,
            version: None,
        }
    }
}

sep_type! {
    /// Identified resource that can ask for a response and be subscribed to
    pub struct RespondableSubscribableIdentifiedObject {
        base base: RespondableResource,
        default_attr("subscribable", SubscribableType::NonSubscribable) subscribable: SubscribableType,
        text("mRID") mrid: Mrid,
        opt_text("description") description: String32,
        opt_text("version") version: VersionType,
    }
}

impl RespondableSubscribableIdentifiedObject {
    /// Respondable, subscribable identified resource at `href`
    pub fn new(href: impl Into<String>, mrid: Mrid, defaults: &Defaults) -> Self {
        Self {
            base: RespondableResource::new(href, defaults),
            subscribable: defaults.subscribable,
            mrid,
            description: None,
            version: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Element;
    use crate::namespaces::QName;
    use crate::projection::{attribute_names, element_sequence, Fields};

    fn write<T: Fields>(value: &T) -> Element {
        let mut element = Element::new(QName::local("Test"));
        value.write_fields(&mut element);
        element
    }

    #[test]
    fn test_embedded_resource_has_no_href() {
        let element = write(&Resource::embedded());
        assert!(element.attributes.is_empty());
        assert_eq!(Resource::read_fields(&element).unwrap(), Resource::embedded());
    }

    #[test]
    fn test_empty_href_is_omitted() {
        assert_eq!(Resource::new(""), Resource::embedded());
        let element = write(&SubscribableResource::new("", &Defaults::default()));
        assert_eq!(element.get_attribute("href"), None);
        assert_eq!(element.get_attribute("subscribable"), Some("0"));
    }

    #[test]
    fn test_list_and_subscribable_list_are_siblings() {
        assert_eq!(attribute_names(List::FIELDS), vec!["href", "all", "results"]);
        assert_eq!(
            attribute_names(SubscribableList::FIELDS),
            vec!["href", "subscribable", "all", "results"]
        );
    }

    #[test]
    fn test_subscribable_always_written() {
        let element = write(&SubscribableList::new("/edev", 0, 0, &Defaults::default()));
        assert_eq!(element.get_attribute("subscribable"), Some("0"));
        assert_eq!(element.get_attribute("all"), Some("0"));
        assert_eq!(element.get_attribute("results"), Some("0"));
    }

    #[test]
    fn test_constructor_uses_supplied_defaults() {
        let defaults = Defaults::default()
            .with_subscribable(SubscribableType::SubscribableConditions)
            .with_response_required(HexBinary8::new([0x03]));
        let object = RespondableSubscribableIdentifiedObject::new("/rsp", Mrid::default(), &defaults);
        let element = write(&object);
        assert_eq!(element.get_attribute("subscribable"), Some("2"));
        assert_eq!(element.get_attribute("responseRequired"), Some("03"));
        assert_eq!(element.get_attribute("replyTo"), None);
    }

    #[test]
    fn test_identified_object_sequence() {
        assert_eq!(
            element_sequence(RespondableSubscribableIdentifiedObject::FIELDS),
            vec!["mRID", "description", "version"]
        );
        let mut object = IdentifiedObject::new("/io", Mrid::new([0x11; 16]));
        object.version = Some(0);
        let element = write(&object);
        assert_eq!(element.find_child("mRID").and_then(|c| c.text.as_deref()), Some("11".repeat(16).as_str()));
        assert_eq!(element.find_child("version").and_then(|c| c.text.as_deref()), Some("0"));
        assert_eq!(IdentifiedObject::read_fields(&element).unwrap(), object);
    }

    #[test]
    fn test_absent_defaulted_attributes_read_as_schema_defaults() {
        let mut element = Element::new(QName::local("Test"));
        element.set_attribute("href", "/r");
        let value = RespondableResource::read_fields(&element).unwrap();
        assert_eq!(value.response_required, HexBinary8::default());
        assert_eq!(value.base.href.as_deref(), Some("/r"));
    }
}
