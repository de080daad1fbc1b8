//! Server time

use super::base::Resource;
use crate::defaults::{Defaults, DEFAULT_POLL_RATE};
use crate::primitives::{TimeOffsetType, TimeType};
use crate::projection::sep_type;

/// Time source quality codes carried in `quality`
pub mod quality {
    /// Obtained from an external authoritative source such as NTP
    pub const AUTHORITATIVE: u8 = 3;
    /// Obtained from a level 3 source
    pub const LEVEL_3_SOURCE: u8 = 4;
    /// Set manually or obtained from a level 4 source
    pub const MANUAL: u8 = 5;
    /// Obtained from a level 5 source
    pub const LEVEL_5_SOURCE: u8 = 6;
    /// Intentionally uncoordinated
    pub const UNCOORDINATED: u8 = 7;
}

sep_type! {
    /// The server's notion of the current time and local time rules.
    ///
    /// `localTime`, when present, should equal `currentTime + tzOffset`, plus
    /// `dstOffset` while daylight saving time is in effect. The relation is
    /// not enforced; see [`Time::expected_local_time`].
    pub struct Time as "Time" {
        base base: Resource,
        default_attr("pollRate", DEFAULT_POLL_RATE) poll_rate: u32,
        text("currentTime") current_time: TimeType,
        /// End of daylight saving time in the current year
        text("dstEndTime") dst_end_time: TimeType,
        /// Offset added while daylight saving time is in effect, in seconds
        text("dstOffset") dst_offset: TimeOffsetType,
        text("dstStartTime") dst_start_time: TimeType,
        opt_text("localTime") local_time: TimeType,
        text("quality") quality: u8,
        /// Offset of the local standard time from UTC, in seconds
        text("tzOffset") tz_offset: TimeOffsetType,
    }
}

impl Time {
    /// UTC time without daylight saving rules
    pub fn new(href: impl Into<String>, current_time: TimeType, quality: u8, defaults: &Defaults) -> Self {
        Self {
            base: Resource::new(href),
            poll_rate: defaults.poll_rate,
            current_time,
            dst_end_time: TimeType::EPOCH,
            dst_offset: 0,
            dst_start_time: TimeType::EPOCH,
            local_time: None,
            quality,
            tz_offset: 0,
        }
    }

    /// Set the time zone and daylight saving rules
    pub fn with_zone(
        mut self,
        tz_offset: TimeOffsetType,
        dst_offset: TimeOffsetType,
        dst_start_time: TimeType,
        dst_end_time: TimeType,
    ) -> Self {
        self.tz_offset = tz_offset;
        self.dst_offset = dst_offset;
        self.dst_start_time = dst_start_time;
        self.dst_end_time = dst_end_time;
        self
    }

    /// Whether `current_time` falls inside `[dst_start_time, dst_end_time)`
    pub fn dst_in_effect(&self) -> bool {
        self.dst_start_time <= self.current_time && self.current_time < self.dst_end_time
    }

    /// Local time implied by the other fields
    pub fn expected_local_time(&self) -> TimeType {
        let local = self.current_time.offset_by(self.tz_offset);
        if self.dst_in_effect() {
            local.offset_by(self.dst_offset)
        } else {
            local
        }
    }

    /// Fill `local_time` from the other fields
    pub fn with_local_time(mut self) -> Self {
        self.local_time = Some(self.expected_local_time());
        self
    }

    /// Whether `local_time` is absent or agrees with the other fields
    pub fn is_consistent(&self) -> bool {
        self.local_time
            .map_or(true, |local| local == self.expected_local_time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{from_xml, to_element, to_xml};

    fn pacific() -> Time {
        Time::new("/tm", TimeType(1_000_000), quality::AUTHORITATIVE, &Defaults::default())
            .with_zone(-8 * 3600, 3600, TimeType(500_000), TimeType(2_000_000))
    }

    #[test]
    fn test_local_time_with_dst() {
        let time = pacific().with_local_time();
        assert!(time.dst_in_effect());
        assert_eq!(time.local_time, Some(TimeType(1_000_000 - 7 * 3600)));
        assert!(time.is_consistent());
    }

    #[test]
    fn test_local_time_outside_dst() {
        let mut time = pacific();
        time.current_time = TimeType(3_000_000);
        assert!(!time.dst_in_effect());
        assert_eq!(time.expected_local_time(), TimeType(3_000_000 - 8 * 3600));
        time.local_time = Some(TimeType(3_000_000));
        assert!(!time.is_consistent());
    }

    #[test]
    fn test_zero_offsets_are_emitted() {
        let time = Time::new("/tm", TimeType(1), quality::UNCOORDINATED, &Defaults::default());
        let root = to_element(&time);
        let names: Vec<_> = root.children.iter().map(|c| c.local_name()).collect();
        assert_eq!(
            names,
            vec!["currentTime", "dstEndTime", "dstOffset", "dstStartTime", "quality", "tzOffset"]
        );
        assert_eq!(root.find_child("dstOffset").and_then(|c| c.text.as_deref()), Some("0"));
    }

    #[test]
    fn test_local_time_at_end_of_time() {
        let xml = r#"<Time xmlns="urn:ieee:std:2030.5:ns" href="/tm">
  <currentTime>9223372036854775807</currentTime>
  <dstEndTime>9223372036854775807</dstEndTime>
  <dstOffset>3600</dstOffset>
  <dstStartTime>0</dstStartTime>
  <quality>7</quality>
  <tzOffset>3600</tzOffset>
</Time>"#;
        let time: Time = from_xml(xml).unwrap();
        assert!(!time.dst_in_effect());
        assert_eq!(time.expected_local_time(), TimeType(i64::MAX));

        let mut time = time;
        time.dst_end_time = TimeType(i64::MAX);
        time.current_time = TimeType(i64::MAX - 1);
        assert!(time.dst_in_effect());
        assert_eq!(time.expected_local_time(), TimeType(i64::MAX));
        assert!(time.with_local_time().is_consistent());
    }

    #[test]
    fn test_round_trip() {
        let time = pacific().with_local_time();
        let back: Time = from_xml(&to_xml(&time).unwrap()).unwrap();
        assert_eq!(back, time);
    }
}
