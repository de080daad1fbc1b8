//! Devices: the common device shape, end devices and the server's own device

use super::base::{SubscribableList, SubscribableResource};
use crate::defaults::{Defaults, DEFAULT_POLL_RATE};
use crate::links::{
    ConfigurationLink, DerListLink, DeviceInformationLink, DeviceStatusLink, FileStatusLink,
    FlowReservationRequestListLink, FlowReservationResponseListLink,
    FunctionSetAssignmentsListLink, IpInterfaceListLink, LoadShedAvailabilityListLink,
    LogEventListLink, PowerStatusLink, RegistrationLink, SubscriptionListLink,
};
use crate::primitives::{DeviceCategory, Lfdi, Sfdi, TimeType};
use crate::projection::sep_type;

sep_type! {
    /// Fields shared by every kind of device
    pub struct AbstractDevice {
        base base: SubscribableResource,
        opt_child(ConfigurationLink::ELEMENT) configuration_link: ConfigurationLink,
        opt_child(DerListLink::ELEMENT) der_list_link: DerListLink,
        /// Bitmap of device kinds
        opt_text("deviceCategory") device_category: DeviceCategory,
        opt_child(DeviceInformationLink::ELEMENT) device_information_link: DeviceInformationLink,
        opt_child(DeviceStatusLink::ELEMENT) device_status_link: DeviceStatusLink,
        opt_child(FileStatusLink::ELEMENT) file_status_link: FileStatusLink,
        opt_child(IpInterfaceListLink::ELEMENT) ip_interface_list_link: IpInterfaceListLink,
        /// Long-form device identifier
        opt_text("lFDI") lfdi: Lfdi,
        opt_child(LoadShedAvailabilityListLink::ELEMENT) load_shed_availability_list_link: LoadShedAvailabilityListLink,
        opt_child(LogEventListLink::ELEMENT) log_event_list_link: LogEventListLink,
        opt_child(PowerStatusLink::ELEMENT) power_status_link: PowerStatusLink,
        /// Short-form device identifier; stored as given, never derived
        text("sFDI") sfdi: Sfdi,
    }
}

impl AbstractDevice {
    /// Device at `href` identified by `sfdi`
    pub fn new(href: impl Into<String>, sfdi: Sfdi, defaults: &Defaults) -> Self {
        Self {
            base: SubscribableResource::new(href, defaults),
            configuration_link: None,
            der_list_link: None,
            device_category: None,
            device_information_link: None,
            device_status_link: None,
            file_status_link: None,
            ip_interface_list_link: None,
            lfdi: None,
            load_shed_availability_list_link: None,
            log_event_list_link: None,
            power_status_link: None,
            sfdi,
        }
    }

    /// Device at `href` identified by `lfdi`, with the SFDI derived from it
    pub fn from_lfdi(href: impl Into<String>, lfdi: Lfdi, defaults: &Defaults) -> Self {
        let mut device = Self::new(href, Sfdi::from_lfdi(&lfdi), defaults);
        device.lfdi = Some(lfdi);
        device
    }

    /// Whether the stored SFDI is the one derived from the stored LFDI.
    ///
    /// `None` when the device carries no LFDI.
    pub fn sfdi_matches_lfdi(&self) -> Option<bool> {
        self.lfdi.as_ref().map(|lfdi| Sfdi::from_lfdi(lfdi) == self.sfdi)
    }
}

sep_type! {
    /// A device known to the server
    pub struct EndDevice as "EndDevice" {
        base base: AbstractDevice,
        /// Last time any field of this resource changed
        text("changedTime") changed_time: TimeType,
        opt_text("enabled") enabled: bool,
        opt_child(FlowReservationRequestListLink::ELEMENT) flow_reservation_request_list_link: FlowReservationRequestListLink,
        opt_child(FlowReservationResponseListLink::ELEMENT) flow_reservation_response_list_link: FlowReservationResponseListLink,
        opt_child(FunctionSetAssignmentsListLink::ELEMENT) function_set_assignments_list_link: FunctionSetAssignmentsListLink,
        /// Posting interval in seconds
        opt_text("postRate") post_rate: u32,
        opt_child(RegistrationLink::ELEMENT) registration_link: RegistrationLink,
        opt_child(SubscriptionListLink::ELEMENT) subscription_list_link: SubscriptionListLink,
    }
}

impl EndDevice {
    /// End device built on `device`, last changed at `changed_time`
    pub fn new(device: AbstractDevice, changed_time: TimeType) -> Self {
        Self {
            base: device,
            changed_time,
            enabled: None,
            flow_reservation_request_list_link: None,
            flow_reservation_response_list_link: None,
            function_set_assignments_list_link: None,
            post_rate: None,
            registration_link: None,
            subscription_list_link: None,
        }
    }

    /// The device's SFDI
    pub fn sfdi(&self) -> Sfdi {
        self.base.sfdi
    }
}

sep_type! {
    /// The server's own device
    pub struct SelfDevice as "SelfDevice" {
        base base: AbstractDevice,
        default_attr("pollRate", DEFAULT_POLL_RATE) poll_rate: u32,
    }
}

impl SelfDevice {
    /// Self device built on `device` with the configured poll rate
    pub fn new(device: AbstractDevice, defaults: &Defaults) -> Self {
        Self {
            base: device,
            poll_rate: defaults.poll_rate,
        }
    }
}

sep_type! {
    /// One page of end devices
    pub struct EndDeviceList as "EndDeviceList" {
        base base: SubscribableList,
        default_attr("pollRate", DEFAULT_POLL_RATE) poll_rate: u32,
        children("EndDevice") end_devices: EndDevice,
    }
}

impl EndDeviceList {
    /// Page at `href` holding `end_devices` out of `all` in total.
    ///
    /// `results` is the number of devices in this page.
    pub fn new(
        href: impl Into<String>,
        all: u32,
        end_devices: Vec<EndDevice>,
        defaults: &Defaults,
    ) -> Self {
        let results = u32::try_from(end_devices.len()).unwrap_or(u32::MAX);
        Self {
            base: SubscribableList::new(href, all, results, defaults),
            poll_rate: defaults.poll_rate,
            end_devices,
        }
    }

    /// Find a device in this page by SFDI
    pub fn find_by_sfdi(&self, sfdi: Sfdi) -> Option<&EndDevice> {
        self.end_devices.iter().find(|d| d.sfdi() == sfdi)
    }
}
