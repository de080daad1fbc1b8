//! Responses a device posts about an event or message

use super::base::Resource;
use crate::primitives::{Lfdi, Mrid, TimeType};
use crate::projection::sep_type;

sep_type! {
    /// A device's reply about the resource named by `subject`
    pub struct Response as "Response" {
        base base: Resource,
        opt_text("createdDateTime") created_date_time: TimeType,
        /// LFDI of the responding device
        text("endDeviceLFDI") end_device_lfdi: Lfdi,
        opt_text("status") status: u8,
        text("subject") subject: Mrid,
    }
}

impl Response {
    /// Response from `lfdi` about `subject`
    pub fn new(href: impl Into<String>, lfdi: Lfdi, subject: Mrid) -> Self {
        Self {
            base: Resource::new(href),
            created_date_time: None,
            end_device_lfdi: lfdi,
            status: None,
            subject,
        }
    }

    /// Set the status code and when it was produced
    pub fn with_status(mut self, status: u8, at: TimeType) -> Self {
        self.status = Some(status);
        self.created_date_time = Some(at);
        self
    }
}
