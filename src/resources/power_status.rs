//! Power source and battery status of a device

use super::base::Resource;
use super::units::{ActivePower, RealEnergy};
use crate::defaults::{Defaults, DEFAULT_POLL_RATE};
use crate::primitives::{PerCent, TimeType};
use crate::projection::sep_type;

sep_type! {
    /// Charging state of a plug-in electric vehicle
    pub struct PevInfo {
        child("chargingPowerNow") charging_power_now: ActivePower,
        child("energyRequestNow") energy_request_now: RealEnergy,
        child("maxForwardPower") max_forward_power: ActivePower,
        /// Seconds of charging needed at the maximum rate
        text("minimumChargingDuration") minimum_charging_duration: u32,
        /// Hundredths of a percent
        text("targetStateOfCharge") target_state_of_charge: PerCent,
        text("timeChargeIsNeeded") time_charge_is_needed: TimeType,
        text("timeChargingStatusPEV") time_charging_status_pev: TimeType,
    }
}

sep_type! {
    /// Power source and battery state reported by a device
    pub struct PowerStatus as "PowerStatus" {
        base base: Resource,
        default_attr("pollRate", DEFAULT_POLL_RATE) poll_rate: u32,
        text("batteryStatus") battery_status: u8,
        text("changedTime") changed_time: TimeType,
        text("currentPowerSource") current_power_source: u8,
        /// Hundredths of a percent
        opt_text("estimatedChargeRemaining") estimated_charge_remaining: PerCent,
        /// Seconds
        opt_text("estimatedTimeRemaining") estimated_time_remaining: u32,
        opt_child("PEVInfo") pev_info: PevInfo,
        opt_text("sessionTimeOnBattery") session_time_on_battery: u32,
        opt_text("totalTimeOnBattery") total_time_on_battery: u32,
    }
}

impl PowerStatus {
    /// Status at `href` with only the required fields
    pub fn new(
        href: impl Into<String>,
        battery_status: u8,
        changed_time: TimeType,
        current_power_source: u8,
        defaults: &Defaults,
    ) -> Self {
        Self {
            base: Resource::new(href),
            poll_rate: defaults.poll_rate,
            battery_status,
            changed_time,
            current_power_source,
            estimated_charge_remaining: None,
            estimated_time_remaining: None,
            pev_info: None,
            session_time_on_battery: None,
            total_time_on_battery: None,
        }
    }
}
