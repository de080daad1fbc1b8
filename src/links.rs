//! Link model
//!
//! A [`Link`] is a typed URI reference to a single resource; a [`ListLink`]
//! also carries `all`, the total member count of the referenced list. Both are
//! generic over a zero-sized target marker from [`kind`], so a field typed
//! `TimeLink` can only ever hold a link to a `Time` resource even though every
//! link has the same wire shape. Links never cache the target; following one
//! is the transport layer's job.

use crate::documents::Element;
use crate::error::Result;
use crate::projection::{read_attr, write_attr, FieldSpec, Fields, Occurs, Placement};
use std::fmt;
use std::marker::PhantomData;
use url::Url;

/// A resource kind that can be the target of a [`Link`]
pub trait LinkTarget {
    /// Element name of the link, e.g. `TimeLink`
    const LINK_ELEMENT: &'static str;
}

/// A list resource kind that can be the target of a [`ListLink`]
pub trait ListTarget {
    /// Element name of the list link, e.g. `EndDeviceListLink`
    const LIST_LINK_ELEMENT: &'static str;
}

const HREF: FieldSpec = FieldSpec {
    name: "href",
    placement: Placement::Attribute,
    occurs: Occurs::Required,
};

const ALL: FieldSpec = FieldSpec {
    name: "all",
    placement: Placement::Attribute,
    occurs: Occurs::Required,
};

/// Reference to a single resource of kind `K`
pub struct Link<K> {
    /// URI of the target
    pub href: String,
    _target: PhantomData<fn() -> K>,
}

/// Reference to a list of resources of kind `K`
pub struct ListLink<K> {
    /// URI of the target list
    pub href: String,
    /// Total members of the list, independent of any page size
    pub all: u32,
    _target: PhantomData<fn() -> K>,
}

impl<K> Link<K> {
    /// Create a link to `href`
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            _target: PhantomData,
        }
    }

    /// Resolve the (usually relative) `href` against a server base URL
    pub fn resolve(&self, base: &Url) -> Result<Url> {
        Ok(base.join(&self.href)?)
    }
}

impl<K: LinkTarget> Link<K> {
    /// Element name of this link kind
    pub const ELEMENT: &'static str = K::LINK_ELEMENT;
}

impl<K> ListLink<K> {
    /// Create a list link to `href` with `all` members
    pub fn new(href: impl Into<String>, all: u32) -> Self {
        Self {
            href: href.into(),
            all,
            _target: PhantomData,
        }
    }

    /// Resolve the (usually relative) `href` against a server base URL
    pub fn resolve(&self, base: &Url) -> Result<Url> {
        Ok(base.join(&self.href)?)
    }
}

impl<K: ListTarget> ListLink<K> {
    /// Element name of this list link kind
    pub const ELEMENT: &'static str = K::LIST_LINK_ELEMENT;
}

// Manual impls: derives would demand the same traits of the marker.

impl<K> Clone for Link<K> {
    fn clone(&self) -> Self {
        Self::new(self.href.clone())
    }
}

impl<K> PartialEq for Link<K> {
    fn eq(&self, other: &Self) -> bool {
        self.href == other.href
    }
}

impl<K> Eq for Link<K> {}

impl<K: LinkTarget> fmt::Debug for Link<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(K::LINK_ELEMENT).field("href", &self.href).finish()
    }
}

impl<K> Clone for ListLink<K> {
    fn clone(&self) -> Self {
        Self::new(self.href.clone(), self.all)
    }
}

impl<K> PartialEq for ListLink<K> {
    fn eq(&self, other: &Self) -> bool {
        self.href == other.href && self.all == other.all
    }
}

impl<K> Eq for ListLink<K> {}

impl<K: ListTarget> fmt::Debug for ListLink<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(K::LIST_LINK_ELEMENT)
            .field("href", &self.href)
            .field("all", &self.all)
            .finish()
    }
}

impl<K> Fields for Link<K> {
    const FIELDS: &'static [FieldSpec] = &[HREF];

    fn write_fields(&self, element: &mut Element) {
        write_attr(element, "href", &self.href);
    }

    fn read_fields(element: &Element) -> Result<Self> {
        Ok(Self::new(read_attr::<String>(element, "href")?))
    }
}

impl<K> Fields for ListLink<K> {
    const FIELDS: &'static [FieldSpec] = &[HREF, ALL];

    fn write_fields(&self, element: &mut Element) {
        write_attr(element, "href", &self.href);
        write_attr(element, "all", &self.all);
    }

    fn read_fields(element: &Element) -> Result<Self> {
        Ok(Self::new(
            read_attr::<String>(element, "href")?,
            read_attr(element, "all")?,
        ))
    }
}

/// Zero-sized markers naming the target of each link kind
pub mod kind {
    use super::{LinkTarget, ListTarget};

    macro_rules! link_targets {
        ($($marker:ident => $element:literal),* $(,)?) => {
            $(
                #[doc = concat!("Target marker for `", $element, "`")]
                #[derive(Debug, Clone, Copy, PartialEq, Eq)]
                pub enum $marker {}

                impl LinkTarget for $marker {
                    const LINK_ELEMENT: &'static str = $element;
                }
            )*
        };
    }

    macro_rules! list_targets {
        ($($marker:ident => $element:literal),* $(,)?) => {
            $(
                #[doc = concat!("Target marker for `", $element, "`")]
                #[derive(Debug, Clone, Copy, PartialEq, Eq)]
                pub enum $marker {}

                impl ListTarget for $marker {
                    const LIST_LINK_ELEMENT: &'static str = $element;
                }
            )*
        };
    }

    link_targets! {
        Configuration => "ConfigurationLink",
        DeviceInformation => "DeviceInformationLink",
        DeviceStatus => "DeviceStatusLink",
        FileStatus => "FileStatusLink",
        PowerStatus => "PowerStatusLink",
        Registration => "RegistrationLink",
        SelfDevice => "SelfDeviceLink",
        Time => "TimeLink",
    }

    list_targets! {
        CustomerAccount => "CustomerAccountListLink",
        DemandResponseProgram => "DemandResponseProgramListLink",
        Der => "DERListLink",
        DerProgram => "DERProgramListLink",
        EndDevice => "EndDeviceListLink",
        File => "FileListLink",
        FlowReservationRequest => "FlowReservationRequestListLink",
        FlowReservationResponse => "FlowReservationResponseListLink",
        FunctionSetAssignments => "FunctionSetAssignmentsListLink",
        IpInterface => "IPInterfaceListLink",
        LoadShedAvailability => "LoadShedAvailabilityListLink",
        LogEvent => "LogEventListLink",
        MessagingProgram => "MessagingProgramListLink",
        MirrorUsagePoint => "MirrorUsagePointListLink",
        Prepayment => "PrepaymentListLink",
        ResponseSet => "ResponseSetListLink",
        Subscription => "SubscriptionListLink",
        TariffProfile => "TariffProfileListLink",
        UsagePoint => "UsagePointListLink",
    }
}

/// Link to a `Configuration` resource
pub type ConfigurationLink = Link<kind::Configuration>;
/// Link to a `DeviceInformation` resource
pub type DeviceInformationLink = Link<kind::DeviceInformation>;
/// Link to a `DeviceStatus` resource
pub type DeviceStatusLink = Link<kind::DeviceStatus>;
/// Link to a `FileStatus` resource
pub type FileStatusLink = Link<kind::FileStatus>;
/// Link to a `PowerStatus` resource
pub type PowerStatusLink = Link<kind::PowerStatus>;
/// Link to a `Registration` resource
pub type RegistrationLink = Link<kind::Registration>;
/// Link to a `SelfDevice` resource
pub type SelfDeviceLink = Link<kind::SelfDevice>;
/// Link to a `Time` resource
pub type TimeLink = Link<kind::Time>;

/// Link to a `CustomerAccountList`
pub type CustomerAccountListLink = ListLink<kind::CustomerAccount>;
/// Link to a `DemandResponseProgramList`
pub type DemandResponseProgramListLink = ListLink<kind::DemandResponseProgram>;
/// Link to a `DERList`
pub type DerListLink = ListLink<kind::Der>;
/// Link to a `DERProgramList`
pub type DerProgramListLink = ListLink<kind::DerProgram>;
/// Link to an `EndDeviceList`
pub type EndDeviceListLink = ListLink<kind::EndDevice>;
/// Link to a `FileList`
pub type FileListLink = ListLink<kind::File>;
/// Link to a `FlowReservationRequestList`
pub type FlowReservationRequestListLink = ListLink<kind::FlowReservationRequest>;
/// Link to a `FlowReservationResponseList`
pub type FlowReservationResponseListLink = ListLink<kind::FlowReservationResponse>;
/// Link to a `FunctionSetAssignmentsList`
pub type FunctionSetAssignmentsListLink = ListLink<kind::FunctionSetAssignments>;
/// Link to an `IPInterfaceList`
pub type IpInterfaceListLink = ListLink<kind::IpInterface>;
/// Link to a `LoadShedAvailabilityList`
pub type LoadShedAvailabilityListLink = ListLink<kind::LoadShedAvailability>;
/// Link to a `LogEventList`
pub type LogEventListLink = ListLink<kind::LogEvent>;
/// Link to a `MessagingProgramList`
pub type MessagingProgramListLink = ListLink<kind::MessagingProgram>;
/// Link to a `MirrorUsagePointList`
pub type MirrorUsagePointListLink = ListLink<kind::MirrorUsagePoint>;
/// Link to a `PrepaymentList`
pub type PrepaymentListLink = ListLink<kind::Prepayment>;
/// Link to a `ResponseSetList`
pub type ResponseSetListLink = ListLink<kind::ResponseSet>;
/// Link to a `SubscriptionList`
pub type SubscriptionListLink = ListLink<kind::Subscription>;
/// Link to a `TariffProfileList`
pub type TariffProfileListLink = ListLink<kind::TariffProfile>;
/// Link to a `UsagePointList`
pub type UsagePointListLink = ListLink<kind::UsagePoint>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::QName;

    #[test]
    fn test_element_names_come_from_the_target() {
        assert_eq!(TimeLink::ELEMENT, "TimeLink");
        assert_eq!(SelfDeviceLink::ELEMENT, "SelfDeviceLink");
        assert_eq!(EndDeviceListLink::ELEMENT, "EndDeviceListLink");
        assert_eq!(DerListLink::ELEMENT, "DERListLink");
        assert_eq!(IpInterfaceListLink::ELEMENT, "IPInterfaceListLink");
    }

    #[test]
    fn test_list_link_fields() {
        let link = EndDeviceListLink::new("/edev", 0);
        let mut element = Element::new(QName::local(EndDeviceListLink::ELEMENT));
        link.write_fields(&mut element);

        // all = 0 is still written: it is a required attribute
        assert_eq!(element.get_attribute("all"), Some("0"));
        assert_eq!(element.get_attribute("href"), Some("/edev"));
        assert_eq!(EndDeviceListLink::read_fields(&element).unwrap(), link);
    }

    #[test]
    fn test_link_requires_href() {
        let element = Element::new(QName::local("TimeLink"));
        assert!(TimeLink::read_fields(&element).is_err());
    }

    #[test]
    fn test_resolve_against_base() {
        let base = Url::parse("https://gateway.local:8443/sep2/dcap").unwrap();
        let link = TimeLink::new("/tm");
        assert_eq!(link.resolve(&base).unwrap().as_str(), "https://gateway.local:8443/tm");

        let list = EndDeviceListLink::new("edev", 3);
        assert_eq!(
            list.resolve(&base).unwrap().as_str(),
            "https://gateway.local:8443/sep2/edev"
        );
    }

    #[test]
    fn test_debug_names_the_link_kind() {
        let debug = format!("{:?}", FileListLink::new("/file", 2));
        assert!(debug.starts_with("FileListLink"));
    }
}
