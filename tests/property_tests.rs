//! Property-based tests for the primitive codec and projection

mod common;

use proptest::prelude::*;
use sep2::error::Error;
use sep2::primitives::{Int48, Lfdi, Mrid, Sfdi, TimeType, XmlScalar};
use sep2::resources::{EndDevice, FlowReservationRequest, SignedRealEnergy};
use sep2::{from_xml, to_xml};

proptest! {
    #[test]
    fn lfdi_encodes_exactly_forty_uppercase_digits(bytes in any::<[u8; 20]>()) {
        let text = Lfdi::new(bytes).to_xml();
        prop_assert_eq!(text.len(), 40);
        prop_assert!(text.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        prop_assert_eq!(Lfdi::from_xml(&text.to_lowercase()).unwrap(), Lfdi::new(bytes));
    }

    #[test]
    fn lfdi_rejects_any_other_length(text in "[0-9A-F]{0,60}") {
        prop_assume!(text.len() != 40);
        let is_malformed = matches!(Lfdi::from_xml(&text), Err(Error::MalformedPrimitive { .. }));
        prop_assert!(is_malformed);
    }

    #[test]
    fn int48_rejects_out_of_range(value in any::<i64>()) {
        let fits = (Int48::MIN..=Int48::MAX).contains(&value);
        prop_assert_eq!(Int48::from_xml(&value.to_string()).is_ok(), fits);
    }

    #[test]
    fn end_device_round_trips(
        sfdi in 0u64..(1 << 40),
        changed in any::<i64>(),
        enabled in any::<Option<bool>>(),
        post_rate in any::<Option<u32>>(),
        lfdi in any::<Option<[u8; 20]>>(),
    ) {
        let mut device = common::end_device_min(0);
        device.base.sfdi = Sfdi::new(sfdi).unwrap();
        device.base.lfdi = lfdi.map(Lfdi::new);
        device.changed_time = TimeType(changed);
        device.enabled = enabled;
        device.post_rate = post_rate;

        let back: EndDevice = from_xml(&to_xml(&device).unwrap()).unwrap();
        prop_assert_eq!(back, device);
    }

    #[test]
    fn flow_reservation_request_round_trips(
        description in "[ a-zA-Z0-9<>&'\"]{1,32}",
        multiplier in any::<i8>(),
        value in Int48::MIN..=Int48::MAX,
        mrid in any::<[u8; 16]>(),
    ) {
        let mut request = common::flow_reservation_request_min();
        request.base.mrid = Mrid::new(mrid);
        request.base.description = Some(description);
        request.energy_requested = SignedRealEnergy::new(multiplier, Int48::new(value).unwrap());

        let back: FlowReservationRequest = from_xml(&to_xml(&request).unwrap()).unwrap();
        prop_assert_eq!(back, request);
    }
}
