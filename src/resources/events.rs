//! Events and their status

use super::base::RespondableSubscribableIdentifiedObject;
use super::units::DateTimeInterval;
use crate::defaults::Defaults;
use crate::primitives::{Mrid, String192, TimeType};
use crate::projection::sep_type;

/// Codes carried in `EventStatus.currentStatus`
pub mod status {
    /// Scheduled, not yet active
    pub const SCHEDULED: u8 = 0;
    /// In progress
    pub const ACTIVE: u8 = 1;
    /// Cancelled
    pub const CANCELLED: u8 = 2;
    /// Cancelled with randomization
    pub const CANCELLED_WITH_RANDOMIZATION: u8 = 3;
    /// Replaced by another event
    pub const SUPERSEDED: u8 = 4;
}

sep_type! {
    /// Current state of an event
    pub struct EventStatus {
        text("currentStatus") current_status: u8,
        /// When `current_status` took effect
        text("dateTime") date_time: TimeType,
        text("potentiallySuperseded") potentially_superseded: bool,
        opt_text("potentiallySupersededTime") potentially_superseded_time: TimeType,
        opt_text("reason") reason: String192,
    }
}

impl EventStatus {
    /// Status `code` as of `date_time`, not superseded
    pub fn new(code: u8, date_time: TimeType) -> Self {
        Self {
            current_status: code,
            date_time,
            potentially_superseded: false,
            potentially_superseded_time: None,
            reason: None,
        }
    }
}

sep_type! {
    /// Something scheduled to happen over an interval
    pub struct Event {
        base base: RespondableSubscribableIdentifiedObject,
        text("creationTime") creation_time: TimeType,
        child("EventStatus") event_status: EventStatus,
        child("interval") interval: DateTimeInterval,
    }
}

impl Event {
    /// Event at `href` scheduled over `interval`, created at `creation_time`.
    ///
    /// The status starts as scheduled as of `creation_time`.
    pub fn new(
        href: impl Into<String>,
        mrid: Mrid,
        creation_time: TimeType,
        interval: DateTimeInterval,
        defaults: &Defaults,
    ) -> Self {
        Self {
            base: RespondableSubscribableIdentifiedObject::new(href, mrid, defaults),
            creation_time,
            event_status: EventStatus::new(status::SCHEDULED, creation_time),
            interval,
        }
    }

    /// The event's identity
    pub fn mrid(&self) -> Mrid {
        self.base.mrid
    }

    /// Whether `at` falls inside the event interval
    pub fn is_active_at(&self, at: TimeType) -> bool {
        self.interval.contains(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Element;
    use crate::namespaces::QName;
    use crate::projection::{element_sequence, Fields};

    #[test]
    fn test_event_sequence() {
        assert_eq!(
            element_sequence(Event::FIELDS),
            vec!["mRID", "description", "version", "creationTime", "EventStatus", "interval"]
        );
    }

    #[test]
    fn test_new_event_is_scheduled() {
        let event = Event::new(
            "/ev/1",
            Mrid::new([1; 16]),
            TimeType(10),
            DateTimeInterval::new(TimeType(100), 60),
            &Defaults::default(),
        );
        assert_eq!(event.event_status.current_status, status::SCHEDULED);
        assert_eq!(event.event_status.date_time, TimeType(10));
        assert!(event.is_active_at(TimeType(159)));
        assert!(!event.is_active_at(TimeType(160)));
    }

    #[test]
    fn test_status_booleans_and_optional_reason() {
        let mut status = EventStatus::new(status::CANCELLED, TimeType(5));
        status.reason = Some("operator request".to_string());
        let mut element = Element::new(QName::local("EventStatus"));
        status.write_fields(&mut element);
        assert_eq!(
            element.find_child("potentiallySuperseded").and_then(|c| c.text.as_deref()),
            Some("false")
        );
        assert!(element.find_child("potentiallySupersededTime").is_none());
        assert_eq!(EventStatus::read_fields(&element).unwrap(), status);
    }
}
