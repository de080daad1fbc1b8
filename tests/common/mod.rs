//! Shared builders for the integration tests: one minimal and one maximal
//! instance of every root resource type.

#![allow(dead_code)]

use sep2::defaults::Defaults;
use sep2::links::*;
use sep2::primitives::{DeviceCategory, Int48, Lfdi, Mrid, Sfdi, SubscribableType, TimeType, UInt48};
use sep2::resources::*;

pub fn defaults() -> Defaults {
    Defaults::default()
}

pub fn mrid(byte: u8) -> Mrid {
    Mrid::new([byte; 16])
}

pub fn interval() -> DateTimeInterval {
    DateTimeInterval::new(TimeType(1_700_003_600), 7_200)
}

pub fn device_capability_min() -> DeviceCapability {
    DeviceCapability::new("/dcap", &defaults())
}

pub fn device_capability_max() -> DeviceCapability {
    let mut dcap = DeviceCapability::new("/dcap", &defaults())
        .with_time_link(TimeLink::new("/tm"))
        .with_self_device_link(SelfDeviceLink::new("/sdev"))
        .with_end_device_list_link(EndDeviceListLink::new("/edev", 1));
    dcap.mirror_usage_point_list_link = Some(MirrorUsagePointListLink::new("/mup", 0));
    let fsa = &mut dcap.base;
    fsa.customer_account_list_link = Some(CustomerAccountListLink::new("/bill", 0));
    fsa.demand_response_program_list_link = Some(DemandResponseProgramListLink::new("/dr", 2));
    fsa.der_program_list_link = Some(DerProgramListLink::new("/derp", 3));
    fsa.file_list_link = Some(FileListLink::new("/file", 0));
    fsa.messaging_program_list_link = Some(MessagingProgramListLink::new("/msg", 1));
    fsa.prepayment_list_link = Some(PrepaymentListLink::new("/ppy", 0));
    fsa.response_set_list_link = Some(ResponseSetListLink::new("/rsps", 1));
    fsa.tariff_profile_list_link = Some(TariffProfileListLink::new("/tp", 1));
    fsa.usage_point_list_link = Some(UsagePointListLink::new("/upt", 4));
    dcap
}

pub fn abstract_device_max(href: &str) -> AbstractDevice {
    let lfdi = Lfdi::new([
        0x3e, 0x4f, 0x45, 0xab, 0x31, 0xed, 0xfe, 0x5b, 0x67, 0xe3, 0x43, 0xe5, 0xe4, 0x56, 0x2e,
        0x31, 0x98, 0x4e, 0x23, 0xe5,
    ]);
    let mut device = AbstractDevice::from_lfdi(
        href,
        lfdi,
        &defaults().with_subscribable(SubscribableType::SubscribableNoConditions),
    );
    device.configuration_link = Some(ConfigurationLink::new(format!("{}/cfg", href)));
    device.der_list_link = Some(DerListLink::new(format!("{}/der", href), 1));
    device.device_category = Some(DeviceCategory::new([0, 0, 0x10, 0]));
    device.device_information_link = Some(DeviceInformationLink::new(format!("{}/di", href)));
    device.device_status_link = Some(DeviceStatusLink::new(format!("{}/ds", href)));
    device.file_status_link = Some(FileStatusLink::new(format!("{}/fs", href)));
    device.ip_interface_list_link = Some(IpInterfaceListLink::new(format!("{}/ns", href), 1));
    device.load_shed_availability_list_link =
        Some(LoadShedAvailabilityListLink::new(format!("{}/lsl", href), 0));
    device.log_event_list_link = Some(LogEventListLink::new(format!("{}/lel", href), 12));
    device.power_status_link = Some(PowerStatusLink::new(format!("{}/ps", href)));
    device
}

pub fn end_device_min(sfdi: u64) -> EndDevice {
    let sfdi = Sfdi::new(sfdi).unwrap();
    EndDevice::new(
        AbstractDevice::new(format!("/edev/{}", sfdi.get()), sfdi, &defaults()),
        TimeType(1_700_000_000),
    )
}

pub fn end_device_max() -> EndDevice {
    let mut device = EndDevice::new(abstract_device_max("/edev/0"), TimeType(1_700_000_000));
    device.enabled = Some(true);
    device.flow_reservation_request_list_link = Some(FlowReservationRequestListLink::new("/edev/0/frq", 1));
    device.flow_reservation_response_list_link = Some(FlowReservationResponseListLink::new("/edev/0/frp", 1));
    device.function_set_assignments_list_link = Some(FunctionSetAssignmentsListLink::new("/edev/0/fsa", 2));
    device.post_rate = Some(300);
    device.registration_link = Some(RegistrationLink::new("/edev/0/reg"));
    device.subscription_list_link = Some(SubscriptionListLink::new("/edev/0/sub", 0));
    device
}

pub fn end_device_list_min() -> EndDeviceList {
    EndDeviceList::new("/edev", 0, Vec::new(), &defaults())
}

pub fn end_device_list_max() -> EndDeviceList {
    EndDeviceList::new("/edev", 9, vec![end_device_max(), end_device_min(1000)], &defaults())
}

pub fn self_device_min() -> SelfDevice {
    let sfdi = Sfdi::new(5).unwrap();
    SelfDevice::new(AbstractDevice::new("/sdev", sfdi, &defaults()), &defaults())
}

pub fn self_device_max() -> SelfDevice {
    SelfDevice::new(abstract_device_max("/sdev"), &defaults().with_poll_rate(60))
}

pub fn time_min() -> Time {
    Time::new("/tm", TimeType(1_700_000_000), 7, &defaults())
}

pub fn time_max() -> Time {
    Time::new("/tm", TimeType(1_700_000_000), 3, &defaults())
        .with_zone(-18_000, 3_600, TimeType(1_699_000_000), TimeType(1_710_000_000))
        .with_local_time()
}

pub fn registration_min() -> Registration {
    Registration::new("/edev/0/reg", TimeType(1_600_000_000), 111_115, &defaults())
}

pub fn flow_reservation_request_min() -> FlowReservationRequest {
    FlowReservationRequest::new(
        "/edev/0/frq/1",
        mrid(0x01),
        TimeType(1_700_000_000),
        SignedRealEnergy::new(3, Int48::new(20).unwrap()),
        ActivePower::new(3, 7),
        interval(),
    )
}

pub fn flow_reservation_request_max() -> FlowReservationRequest {
    let mut request = flow_reservation_request_min().with_estimated_duration();
    request.base.description = Some("overnight charge".to_string());
    request.base.version = Some(2);
    request
}

pub fn event(href: &str) -> Event {
    Event::new(href, mrid(0x02), TimeType(1_700_000_100), interval(), &defaults())
}

pub fn flow_reservation_response_min() -> FlowReservationResponse {
    let request = flow_reservation_request_min();
    FlowReservationResponse::answering(
        &request,
        event("/edev/0/frp/1"),
        request.energy_requested.clone(),
        request.power_requested.clone(),
    )
}

pub fn flow_reservation_response_max() -> FlowReservationResponse {
    let mut response = flow_reservation_response_min();
    let base = &mut response.base.base;
    base.base.reply_to = Some("/rsps/1/rsp".to_string());
    base.description = Some("granted".to_string());
    base.version = Some(1);
    let status = &mut response.base.event_status;
    status.potentially_superseded = true;
    status.potentially_superseded_time = Some(TimeType(1_700_000_200));
    status.reason = Some("grid constraint".to_string());
    response
}

pub fn flow_reservation_request_list() -> FlowReservationRequestList {
    FlowReservationRequestList::new(
        "/edev/0/frq",
        2,
        vec![flow_reservation_request_max(), flow_reservation_request_min()],
        &defaults(),
    )
}

pub fn flow_reservation_response_list() -> FlowReservationResponseList {
    FlowReservationResponseList::new("/edev/0/frp", 1, vec![flow_reservation_response_max()], &defaults())
}

pub fn power_status_min() -> PowerStatus {
    PowerStatus::new("/edev/0/ps", 1, TimeType(12345), 1, &defaults())
}

pub fn power_status_max() -> PowerStatus {
    let mut status = power_status_min();
    status.estimated_charge_remaining = Some(5000);
    status.estimated_time_remaining = Some(3600);
    status.pev_info = Some(PevInfo {
        charging_power_now: ActivePower::new(0, 3300),
        energy_request_now: RealEnergy::new(0, UInt48::new(40_000).unwrap()),
        max_forward_power: ActivePower::new(0, 7200),
        minimum_charging_duration: 12_000,
        target_state_of_charge: 9000,
        time_charge_is_needed: TimeType(1_700_030_000),
        time_charging_status_pev: TimeType(1_700_000_000),
    });
    status.session_time_on_battery = Some(0);
    status.total_time_on_battery = Some(86_400);
    status
}

pub fn response_min() -> Response {
    Response::new("/rsps/1/rsp/1", Lfdi::new([0xab; 20]), mrid(0x02))
}

pub fn response_max() -> Response {
    response_min().with_status(1, TimeType(1_700_000_300))
}
