//! The SEP2 resource set
//!
//! - [`base`]: abstract base types shared by the entities
//! - [`units`]: power-of-ten quantities and intervals
//! - the remaining modules hold the concrete entities, one function set each

pub mod base;
pub mod device;
pub mod device_capability;
pub mod events;
pub mod flow_reservation;
pub mod power_status;
pub mod registration;
pub mod response;
pub mod time;
pub mod units;

pub use base::{
    IdentifiedObject, List, Resource, RespondableIdentifiedObject, RespondableResource,
    RespondableSubscribableIdentifiedObject, SubscribableList, SubscribableResource,
};
pub use device::{AbstractDevice, EndDevice, EndDeviceList, SelfDevice};
pub use device_capability::{DeviceCapability, FunctionSetAssignmentsBase};
pub use events::{Event, EventStatus};
pub use flow_reservation::{
    FlowReservationRequest, FlowReservationRequestList, FlowReservationResponse,
    FlowReservationResponseList, RequestStatus,
};
pub use power_status::{PevInfo, PowerStatus};
pub use registration::Registration;
pub use response::Response;
pub use time::Time;
pub use units::{duration_at_power, ActivePower, DateTimeInterval, PowerOfTen, RealEnergy, SignedRealEnergy};
