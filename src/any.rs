//! Documents whose root type is only known at run time
//!
//! [`AnyResource`] parses any supported root element by name, and
//! [`fields_of`] looks up the field table of any named type. Both are used
//! by tooling that handles arbitrary documents, such as the command line
//! interface and the structural oracle.

use crate::documents::{Document, Element};
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::projection::{self, FieldSpec, Fields, ProjectionConfig, SepResource};
use crate::resources::*;

macro_rules! any_resource {
    (
        roots { $($root:ident),* $(,)? }
        embedded { $($embedded:ident),* $(,)? }
    ) => {
        /// A parsed document of any supported root type
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum AnyResource {
            $(
                #[allow(missing_docs)]
                $root($root),
            )*
        }

        impl AnyResource {
            /// Root element names that can be parsed
            pub const ELEMENTS: &'static [&'static str] = &[
                $( <$root as SepResource>::ELEMENT, )*
            ];

            /// Root element name of the held resource
            pub fn element_name(&self) -> &'static str {
                match self {
                    $( AnyResource::$root(_) => <$root as SepResource>::ELEMENT, )*
                }
            }

            /// Field table of the held resource
            pub fn fields(&self) -> &'static [FieldSpec] {
                match self {
                    $( AnyResource::$root(_) => <$root as Fields>::FIELDS, )*
                }
            }

            /// Project the held resource into its root element
            pub fn to_element(&self) -> Element {
                match self {
                    $( AnyResource::$root(resource) => projection::to_element(resource), )*
                }
            }

            /// Parse a root element of any supported type
            pub fn from_element(root: &Element) -> Result<Self> {
                match root.local_name() {
                    $(
                        name if name == <$root as SepResource>::ELEMENT => {
                            projection::from_element::<$root>(root).map(AnyResource::$root)
                        }
                    )*
                    other => Err(Error::UnexpectedElement {
                        expected: "a SEP2 resource".to_string(),
                        found: other.to_string(),
                    }),
                }
            }
        }

        $(
            impl From<$root> for AnyResource {
                fn from(resource: $root) -> Self {
                    AnyResource::$root(resource)
                }
            }
        )*

        /// Field table of a root type, by element name
        pub fn root_fields(element: &str) -> Option<&'static [FieldSpec]> {
            match element {
                $( name if name == <$root as SepResource>::ELEMENT => Some(<$root as Fields>::FIELDS), )*
                _ => None,
            }
        }

        /// Field table of any named type, roots and embedded types alike
        pub fn fields_of(name: &str) -> Option<&'static [FieldSpec]> {
            root_fields(name).or_else(|| match name {
                $( name if name == stringify!($embedded) => Some(<$embedded as Fields>::FIELDS), )*
                _ => None,
            })
        }

        /// Every type name [`fields_of`] knows
        pub fn type_names() -> Vec<&'static str> {
            let mut names: Vec<&'static str> = AnyResource::ELEMENTS.to_vec();
            names.extend([$( stringify!($embedded), )*]);
            names
        }
    };
}

any_resource! {
    roots {
        DeviceCapability,
        EndDevice,
        EndDeviceList,
        SelfDevice,
        Time,
        Registration,
        FlowReservationRequest,
        FlowReservationRequestList,
        FlowReservationResponse,
        FlowReservationResponseList,
        PowerStatus,
        Response,
    }
    embedded {
        Resource,
        SubscribableResource,
        RespondableResource,
        List,
        SubscribableList,
        IdentifiedObject,
        RespondableIdentifiedObject,
        RespondableSubscribableIdentifiedObject,
        FunctionSetAssignmentsBase,
        AbstractDevice,
        Event,
        EventStatus,
        RequestStatus,
        DateTimeInterval,
        SignedRealEnergy,
        RealEnergy,
        ActivePower,
        PevInfo,
    }
}

impl AnyResource {
    /// Render the held resource as text
    pub fn to_xml_with(&self, config: &ProjectionConfig) -> Result<String> {
        self.to_element().to_xml(config)
    }
}

/// Parse a document of any supported root type with default limits
pub fn parse_any(xml: &str) -> Result<AnyResource> {
    parse_any_with(xml, &Limits::default())
}

/// Parse a document of any supported root type
pub fn parse_any_with(xml: &str, limits: &Limits) -> Result<AnyResource> {
    let doc = Document::parse_with_limits(xml.as_bytes(), limits)?;
    let root = doc
        .root()
        .ok_or_else(|| Error::Xml("document has no root element".to_string()))?;
    AnyResource::from_element(root)
}
