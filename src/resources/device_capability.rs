//! Device capability: the entry point a client fetches first

use super::base::Resource;
use crate::defaults::{Defaults, DEFAULT_POLL_RATE};
use crate::links::{
    CustomerAccountListLink, DemandResponseProgramListLink, DerProgramListLink,
    EndDeviceListLink, FileListLink, MessagingProgramListLink, MirrorUsagePointListLink,
    PrepaymentListLink, ResponseSetListLink, SelfDeviceLink, TariffProfileListLink, TimeLink,
    UsagePointListLink,
};
use crate::projection::sep_type;

sep_type! {
    /// Links to the function sets a server offers
    pub struct FunctionSetAssignmentsBase {
        base base: Resource,
        opt_child(CustomerAccountListLink::ELEMENT) customer_account_list_link: CustomerAccountListLink,
        opt_child(DemandResponseProgramListLink::ELEMENT) demand_response_program_list_link: DemandResponseProgramListLink,
        opt_child(DerProgramListLink::ELEMENT) der_program_list_link: DerProgramListLink,
        opt_child(FileListLink::ELEMENT) file_list_link: FileListLink,
        opt_child(MessagingProgramListLink::ELEMENT) messaging_program_list_link: MessagingProgramListLink,
        opt_child(PrepaymentListLink::ELEMENT) prepayment_list_link: PrepaymentListLink,
        opt_child(ResponseSetListLink::ELEMENT) response_set_list_link: ResponseSetListLink,
        opt_child(TariffProfileListLink::ELEMENT) tariff_profile_list_link: TariffProfileListLink,
        opt_child(TimeLink::ELEMENT) time_link: TimeLink,
        opt_child(UsagePointListLink::ELEMENT) usage_point_list_link: UsagePointListLink,
    }
}

impl FunctionSetAssignmentsBase {
    /// Function set assignments at `href` with no links
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            base: Resource::new(href),
            customer_account_list_link: None,
            demand_response_program_list_link: None,
            der_program_list_link: None,
            file_list_link: None,
            messaging_program_list_link: None,
            prepayment_list_link: None,
            response_set_list_link: None,
            tariff_profile_list_link: None,
            time_link: None,
            usage_point_list_link: None,
        }
    }
}

sep_type! {
    /// Top-level directory of a server's function sets
    pub struct DeviceCapability as "DeviceCapability" {
        base base: FunctionSetAssignmentsBase,
        default_attr("pollRate", DEFAULT_POLL_RATE) poll_rate: u32,
        opt_child(EndDeviceListLink::ELEMENT) end_device_list_link: EndDeviceListLink,
        opt_child(MirrorUsagePointListLink::ELEMENT) mirror_usage_point_list_link: MirrorUsagePointListLink,
        opt_child(SelfDeviceLink::ELEMENT) self_device_link: SelfDeviceLink,
    }
}

impl DeviceCapability {
    /// Device capability at `href` with no links and the configured poll rate
    pub fn new(href: impl Into<String>, defaults: &Defaults) -> Self {
        Self {
            base: FunctionSetAssignmentsBase::new(href),
            poll_rate: defaults.poll_rate,
            end_device_list_link: None,
            mirror_usage_point_list_link: None,
            self_device_link: None,
        }
    }

    /// Set the time link
    pub fn with_time_link(mut self, link: TimeLink) -> Self {
        self.base.time_link = Some(link);
        self
    }

    /// Set the end device list link
    pub fn with_end_device_list_link(mut self, link: EndDeviceListLink) -> Self {
        self.end_device_list_link = Some(link);
        self
    }

    /// Set the self device link
    pub fn with_self_device_link(mut self, link: SelfDeviceLink) -> Self {
        self.self_device_link = Some(link);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{element_sequence, from_xml, to_element, to_xml, Fields};

    #[test]
    fn test_links_follow_base_links() {
        let sequence = element_sequence(DeviceCapability::FIELDS);
        assert_eq!(sequence.first(), Some(&"CustomerAccountListLink"));
        assert_eq!(
            &sequence[sequence.len() - 4..],
            &["UsagePointListLink", "EndDeviceListLink", "MirrorUsagePointListLink", "SelfDeviceLink"]
        );
    }

    #[test]
    fn test_empty_capability() {
        let dcap = DeviceCapability::new("/dcap", &Defaults::default());
        let root = to_element(&dcap);
        assert!(root.children.is_empty());
        assert_eq!(root.get_attribute("pollRate"), Some("900"));
        assert_eq!(root.get_attribute("href"), Some("/dcap"));
    }

    #[test]
    fn test_round_trip_with_links() {
        let mut dcap = DeviceCapability::new("/dcap", &Defaults::default().with_poll_rate(60))
            .with_time_link(TimeLink::new("/tm"))
            .with_end_device_list_link(EndDeviceListLink::new("/edev", 1));
        dcap.base.der_program_list_link = Some(DerProgramListLink::new("/derp", 0));
        let back: DeviceCapability = from_xml(&to_xml(&dcap).unwrap()).unwrap();
        assert_eq!(back, dcap);
        assert_eq!(back.poll_rate, 60);
    }
}
