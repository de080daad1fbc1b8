//! Power-of-ten quantities and time intervals
//!
//! Quantities keep the `(multiplier, value)` pair exactly as it travels on
//! the wire. Conversions to a number are explicit: [`PowerOfTen::to_decimal`]
//! is exact, [`PowerOfTen::to_f64`] is not.

use crate::primitives::{Int48, PowerOfTenMultiplier, TimeType, UInt48};
use crate::projection::sep_type;
use rust_decimal::Decimal;

/// A mantissa scaled by a power of ten
pub trait PowerOfTen {
    /// Exponent applied to the mantissa
    fn multiplier(&self) -> PowerOfTenMultiplier;

    /// Unscaled value
    fn mantissa(&self) -> i64;

    /// Exact value, `None` when it does not fit a `Decimal`
    fn to_decimal(&self) -> Option<Decimal> {
        let multiplier = self.multiplier();
        if multiplier >= 0 {
            (0..multiplier).try_fold(Decimal::from(self.mantissa()), |acc, _| {
                acc.checked_mul(Decimal::TEN)
            })
        } else {
            Decimal::try_from_i128_with_scale(
                i128::from(self.mantissa()),
                u32::from(multiplier.unsigned_abs()),
            )
            .ok()
        }
    }

    /// Approximate value; loses precision for large mantissas
    fn to_f64(&self) -> f64 {
        self.mantissa() as f64 * 10f64.powi(i32::from(self.multiplier()))
    }
}

sep_type! {
    /// Energy in watt-hours that may be negative (flow reversal)
    pub struct SignedRealEnergy {
        text("multiplier") multiplier: PowerOfTenMultiplier,
        text("value") value: Int48,
    }
}

sep_type! {
    /// Energy in watt-hours
    pub struct RealEnergy {
        text("multiplier") multiplier: PowerOfTenMultiplier,
        text("value") value: UInt48,
    }
}

sep_type! {
    /// Active power in watts
    pub struct ActivePower {
        text("multiplier") multiplier: PowerOfTenMultiplier,
        text("value") value: i16,
    }
}

impl SignedRealEnergy {
    /// `value` × 10^`multiplier` Wh
    pub fn new(multiplier: PowerOfTenMultiplier, value: Int48) -> Self {
        Self { multiplier, value }
    }
}

impl RealEnergy {
    /// `value` × 10^`multiplier` Wh
    pub fn new(multiplier: PowerOfTenMultiplier, value: UInt48) -> Self {
        Self { multiplier, value }
    }
}

impl ActivePower {
    /// `value` × 10^`multiplier` W
    pub fn new(multiplier: PowerOfTenMultiplier, value: i16) -> Self {
        Self { multiplier, value }
    }
}

impl PowerOfTen for SignedRealEnergy {
    fn multiplier(&self) -> PowerOfTenMultiplier {
        self.multiplier
    }

    fn mantissa(&self) -> i64 {
        self.value.get()
    }
}

impl PowerOfTen for RealEnergy {
    fn multiplier(&self) -> PowerOfTenMultiplier {
        self.multiplier
    }

    fn mantissa(&self) -> i64 {
        // 48 bits always fit
        self.value.get() as i64
    }
}

impl PowerOfTen for ActivePower {
    fn multiplier(&self) -> PowerOfTenMultiplier {
        self.multiplier
    }

    fn mantissa(&self) -> i64 {
        i64::from(self.value)
    }
}

/// Seconds needed to move `energy` (Wh) at `power` (W).
///
/// Lossy: computed in `f64`. `None` for zero power.
pub fn duration_at_power(energy: &impl PowerOfTen, power: &impl PowerOfTen) -> Option<f64> {
    let watts = power.to_f64();
    if watts == 0.0 {
        return None;
    }
    Some(energy.to_f64() / watts * 3600.0)
}

sep_type! {
    /// Span of time starting at `start`
    pub struct DateTimeInterval {
        /// Length in seconds
        text("duration") duration: u32,
        text("start") start: TimeType,
    }
}

impl DateTimeInterval {
    /// Interval of `duration` seconds from `start`
    pub fn new(start: TimeType, duration: u32) -> Self {
        Self { duration, start }
    }

    /// First instant after the interval; saturates at the last representable time
    pub fn end(&self) -> TimeType {
        TimeType(self.start.seconds().saturating_add(i64::from(self.duration)))
    }

    /// Whether `at` falls inside `[start, end)`
    pub fn contains(&self, at: TimeType) -> bool {
        self.start <= at && at < self.end()
    }
}
