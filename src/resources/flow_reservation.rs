//! Flow reservations: a device asks for energy over a window, the server answers

use super::base::{IdentifiedObject, List, SubscribableList};
use super::events::Event;
use super::units::{duration_at_power, ActivePower, DateTimeInterval, SignedRealEnergy};
use crate::defaults::{Defaults, DEFAULT_POLL_RATE};
use crate::primitives::{Mrid, TimeType};
use crate::projection::sep_type;

/// Codes carried in `RequestStatus.requestStatus`
pub mod request_status {
    /// Request is pending
    pub const REQUESTED: u8 = 0;
    /// Request was cancelled by the requester
    pub const CANCELLED: u8 = 1;
}

sep_type! {
    /// State of a flow reservation request
    pub struct RequestStatus {
        text("dateTime") date_time: TimeType,
        text("requestStatus") request_status: u8,
    }
}

impl RequestStatus {
    /// Status `code` as of `date_time`
    pub fn new(code: u8, date_time: TimeType) -> Self {
        Self {
            date_time,
            request_status: code,
        }
    }
}

sep_type! {
    /// Request to reserve an energy flow
    pub struct FlowReservationRequest as "FlowReservationRequest" {
        base base: IdentifiedObject,
        text("creationTime") creation_time: TimeType,
        /// Seconds the device expects the flow to last
        opt_text("durationRequested") duration_requested: u16,
        child("energyRequested") energy_requested: SignedRealEnergy,
        child("intervalRequested") interval_requested: DateTimeInterval,
        child("powerRequested") power_requested: ActivePower,
        child("RequestStatus") request_status: RequestStatus,
    }
}

impl FlowReservationRequest {
    /// Pending request for `energy` at `power` within `interval`
    pub fn new(
        href: impl Into<String>,
        mrid: Mrid,
        creation_time: TimeType,
        energy: SignedRealEnergy,
        power: ActivePower,
        interval: DateTimeInterval,
    ) -> Self {
        Self {
            base: IdentifiedObject::new(href, mrid),
            creation_time,
            duration_requested: None,
            energy_requested: energy,
            interval_requested: interval,
            power_requested: power,
            request_status: RequestStatus::new(request_status::REQUESTED, creation_time),
        }
    }

    /// Seconds needed to deliver the requested energy at the requested power.
    ///
    /// Lossy, see [`duration_at_power`].
    pub fn estimated_duration(&self) -> Option<f64> {
        duration_at_power(&self.energy_requested, &self.power_requested)
    }

    /// Fill `duration_requested` from [`Self::estimated_duration`], rounded up
    /// and saturated to the field's width
    pub fn with_estimated_duration(mut self) -> Self {
        self.duration_requested = self
            .estimated_duration()
            .map(|seconds| seconds.ceil().clamp(0.0, f64::from(u16::MAX)) as u16);
        self
    }
}

sep_type! {
    /// One page of flow reservation requests
    pub struct FlowReservationRequestList as "FlowReservationRequestList" {
        base base: List,
        default_attr("pollRate", DEFAULT_POLL_RATE) poll_rate: u32,
        children("FlowReservationRequest") requests: FlowReservationRequest,
    }
}

impl FlowReservationRequestList {
    /// Page at `href` holding `requests` out of `all`
    pub fn new(
        href: impl Into<String>,
        all: u32,
        requests: Vec<FlowReservationRequest>,
        defaults: &Defaults,
    ) -> Self {
        let results = u32::try_from(requests.len()).unwrap_or(u32::MAX);
        Self {
            base: List::new(href, all, results),
            poll_rate: defaults.poll_rate,
            requests,
        }
    }
}

sep_type! {
    /// The server's answer to a flow reservation request
    pub struct FlowReservationResponse as "FlowReservationResponse" {
        base base: Event,
        child("energyAvailable") energy_available: SignedRealEnergy,
        child("powerAvailable") power_available: ActivePower,
        /// mRID of the answered request
        text("subject") subject: Mrid,
    }
}

impl FlowReservationResponse {
    /// Answer `request` with `event`, granting `energy` at `power`
    pub fn answering(
        request: &FlowReservationRequest,
        event: Event,
        energy: SignedRealEnergy,
        power: ActivePower,
    ) -> Self {
        Self {
            base: event,
            energy_available: energy,
            power_available: power,
            subject: request.base.mrid,
        }
    }

    /// Whether this response answers `request`
    pub fn answers(&self, request: &FlowReservationRequest) -> bool {
        self.subject == request.base.mrid
    }
}

sep_type! {
    /// One page of flow reservation responses
    pub struct FlowReservationResponseList as "FlowReservationResponseList" {
        base base: SubscribableList,
        default_attr("pollRate", DEFAULT_POLL_RATE) poll_rate: u32,
        children("FlowReservationResponse") responses: FlowReservationResponse,
    }
}

impl FlowReservationResponseList {
    /// Page at `href` holding `responses` out of `all`
    pub fn new(
        href: impl Into<String>,
        all: u32,
        responses: Vec<FlowReservationResponse>,
        defaults: &Defaults,
    ) -> Self {
        let results = u32::try_from(responses.len()).unwrap_or(u32::MAX);
        Self {
            base: SubscribableList::new(href, all, results, defaults),
            poll_rate: defaults.poll_rate,
            responses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Int48;
    use crate::projection::{element_sequence, from_xml, to_xml, Fields};

    fn request() -> FlowReservationRequest {
        FlowReservationRequest::new(
            "/edev/1/frq/1",
            Mrid::new([0xa5; 16]),
            TimeType(1_000),
            SignedRealEnergy::new(3, Int48::new(10).unwrap()),
            ActivePower::new(3, 5),
            DateTimeInterval::new(TimeType(2_000), 36_000),
        )
    }

    #[test]
    fn test_request_sequence() {
        assert_eq!(
            element_sequence(FlowReservationRequest::FIELDS),
            vec![
                "mRID",
                "description",
                "version",
                "creationTime",
                "durationRequested",
                "energyRequested",
                "intervalRequested",
                "powerRequested",
                "RequestStatus"
            ]
        );
    }

    #[test]
    fn test_estimated_duration() {
        let request = request().with_estimated_duration();
        assert_eq!(request.duration_requested, Some(7200));

        let mut huge = request;
        huge.power_requested = ActivePower::new(-3, 1);
        assert_eq!(huge.with_estimated_duration().duration_requested, Some(u16::MAX));
    }

    #[test]
    fn test_request_round_trip() {
        let request = request().with_estimated_duration();
        let back: FlowReservationRequest = from_xml(&to_xml(&request).unwrap()).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn test_response_answers_request() {
        let request = request();
        let event = Event::new(
            "/edev/1/frp/1",
            Mrid::new([0x5a; 16]),
            TimeType(1_500),
            request.interval_requested.clone(),
            &Defaults::default(),
        );
        let response = FlowReservationResponse::answering(
            &request,
            event,
            request.energy_requested.clone(),
            request.power_requested.clone(),
        );
        assert!(response.answers(&request));

        let xml = to_xml(&response).unwrap();
        let back: FlowReservationResponse = from_xml(&xml).unwrap();
        assert_eq!(back, response);
        assert_eq!(
            element_sequence(FlowReservationResponse::FIELDS).last(),
            Some(&"subject")
        );
    }

    #[test]
    fn test_lists() {
        let list = FlowReservationRequestList::new("/edev/1/frq", 1, vec![request()], &Defaults::default());
        let back: FlowReservationRequestList = from_xml(&to_xml(&list).unwrap()).unwrap();
        assert_eq!(back.base.results, 1);
        assert_eq!(back, list);

        let empty = FlowReservationResponseList::new("/edev/1/frp", 0, Vec::new(), &Defaults::default());
        let xml = to_xml(&empty).unwrap();
        assert!(xml.contains("subscribable=\"0\""));
        let back: FlowReservationResponseList = from_xml(&xml).unwrap();
        assert_eq!(back, empty);
    }
}
