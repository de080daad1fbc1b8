//! Registration of an end device with the server

use super::base::Resource;
use crate::defaults::{Defaults, DEFAULT_POLL_RATE};
use crate::primitives::{PinType, TimeType};
use crate::projection::sep_type;

sep_type! {
    /// Registration record of an end device
    pub struct Registration as "Registration" {
        base base: Resource,
        default_attr("pollRate", DEFAULT_POLL_RATE) poll_rate: u32,
        text("dateTimeRegistered") date_time_registered: TimeType,
        /// Registration PIN, six decimal digits
        text("pIN") pin: PinType,
    }
}

impl Registration {
    /// Registration at `href`, made at `registered` with `pin`
    pub fn new(href: impl Into<String>, registered: TimeType, pin: PinType, defaults: &Defaults) -> Self {
        Self {
            base: Resource::new(href),
            poll_rate: defaults.poll_rate,
            date_time_registered: registered,
            pin,
        }
    }

    /// Whether `pin` matches the registered PIN
    pub fn accepts(&self, pin: PinType) -> bool {
        self.pin == pin
    }
}
