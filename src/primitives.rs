//! Primitive codec
//!
//! Bidirectional mapping between the schema's scalar types and their
//! canonical text form. Every scalar that can appear as an attribute value or
//! as the text of a simple element implements [`XmlScalar`].

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// A value with a canonical XML text representation
pub trait XmlScalar: Sized {
    /// Schema type name used in diagnostics
    const KIND: &'static str;

    /// Encode to canonical text
    fn to_xml(&self) -> String;

    /// Decode from text, failing with [`Error::MalformedPrimitive`]
    fn from_xml(text: &str) -> Result<Self>;
}

macro_rules! integer_scalar {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl XmlScalar for $ty {
                const KIND: &'static str = $kind;

                fn to_xml(&self) -> String {
                    self.to_string()
                }

                fn from_xml(text: &str) -> Result<Self> {
                    text.trim()
                        .parse::<$ty>()
                        .map_err(|e| Error::malformed($kind, text, e.to_string()))
                }
            }
        )*
    };
}

integer_scalar! {
    u8 => "UInt8",
    u16 => "UInt16",
    u32 => "UInt32",
    u64 => "UInt64",
    i8 => "Int8",
    i16 => "Int16",
    i32 => "Int32",
    i64 => "Int64",
}

impl XmlScalar for bool {
    const KIND: &'static str = "boolean";

    fn to_xml(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }

    fn from_xml(text: &str) -> Result<Self> {
        match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(Error::malformed(Self::KIND, text, "expected true, false, 1 or 0")),
        }
    }
}

impl XmlScalar for String {
    const KIND: &'static str = "string";

    fn to_xml(&self) -> String {
        self.clone()
    }

    fn from_xml(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}

// =============================================================================
// Fixed-width hexBinary
// =============================================================================

/// Exactly `N` bytes, encoded as `2 * N` hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexBinary<const N: usize>(pub [u8; N]);

/// One byte, e.g. the `responseRequired` bitmask
pub type HexBinary8 = HexBinary<1>;
/// Two bytes
pub type HexBinary16 = HexBinary<2>;
/// Four bytes, e.g. `deviceCategory`
pub type HexBinary32 = HexBinary<4>;
/// Sixteen bytes, e.g. `mRID`
pub type HexBinary128 = HexBinary<16>;
/// Twenty bytes, e.g. `lFDI`
pub type HexBinary160 = HexBinary<20>;

/// Master resource identifier
pub type Mrid = HexBinary128;
/// Long-form device identifier
pub type Lfdi = HexBinary160;
/// Device category bitmask
pub type DeviceCategory = HexBinary32;

impl<const N: usize> HexBinary<N> {
    /// Wrap a byte array
    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Copy from a slice that must be exactly `N` bytes long
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; N] = bytes.try_into().map_err(|_| {
            Error::malformed(
                Self::kind(),
                &hex::encode_upper(bytes),
                format!("expected {} bytes, got {}", N, bytes.len()),
            )
        })?;
        Ok(Self(array))
    }

    /// The raw bytes
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    fn kind() -> &'static str {
        match N {
            1 => "HexBinary8",
            2 => "HexBinary16",
            4 => "HexBinary32",
            16 => "HexBinary128",
            20 => "HexBinary160",
            _ => "hexBinary",
        }
    }
}

impl<const N: usize> Default for HexBinary<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> fmt::Display for HexBinary<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl<const N: usize> FromStr for HexBinary<N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 2 * N {
            return Err(Error::malformed(
                Self::kind(),
                s,
                format!("expected {} hex digits, got {}", 2 * N, s.len()),
            ));
        }
        let mut bytes = [0u8; N];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| Error::malformed(Self::kind(), s, e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl<const N: usize> serde::Serialize for HexBinary<N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, const N: usize> serde::Deserialize<'de> for HexBinary<N> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl<const N: usize> XmlScalar for HexBinary<N> {
    const KIND: &'static str = "hexBinary";

    fn to_xml(&self) -> String {
        self.to_string()
    }

    fn from_xml(text: &str) -> Result<Self> {
        text.trim().parse()
    }
}

// =============================================================================
// Time
// =============================================================================

/// Seconds since the Unix epoch (UTC)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeType(pub i64);

/// Signed offset in seconds
pub type TimeOffsetType = i32;

impl TimeType {
    /// The epoch itself
    pub const EPOCH: TimeType = TimeType(0);

    /// Seconds since the epoch
    pub fn seconds(self) -> i64 {
        self.0
    }

    /// Convert to a chrono timestamp; `None` when out of chrono's range
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }

    /// Shift by an offset in seconds, saturating at the ends of the range
    pub fn offset_by(self, offset: TimeOffsetType) -> TimeType {
        TimeType(self.0.saturating_add(i64::from(offset)))
    }
}

impl From<i64> for TimeType {
    fn from(seconds: i64) -> Self {
        TimeType(seconds)
    }
}

impl From<DateTime<Utc>> for TimeType {
    fn from(dt: DateTime<Utc>) -> Self {
        TimeType(dt.timestamp())
    }
}

impl XmlScalar for TimeType {
    const KIND: &'static str = "TimeType";

    fn to_xml(&self) -> String {
        self.0.to_string()
    }

    fn from_xml(text: &str) -> Result<Self> {
        text.trim()
            .parse::<i64>()
            .map(TimeType)
            .map_err(|e| Error::malformed(Self::KIND, text, e.to_string()))
    }
}

// =============================================================================
// Bounded integers
// =============================================================================

macro_rules! bounded_scalar {
    ($(#[$meta:meta])* $name:ident($inner:ty) in $min:expr, $max:expr, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($inner);

        impl $name {
            /// Smallest representable value
            pub const MIN: $inner = $min;
            /// Largest representable value
            pub const MAX: $inner = $max;

            /// Checked constructor
            pub fn new(value: $inner) -> Result<Self> {
                if (Self::MIN..=Self::MAX).contains(&value) {
                    Ok(Self(value))
                } else {
                    Err(Error::malformed(
                        $kind,
                        &value.to_string(),
                        format!("must be {} <= x <= {}", Self::MIN, Self::MAX),
                    ))
                }
            }

            /// The wrapped value
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl TryFrom<$inner> for $name {
            type Error = Error;

            fn try_from(value: $inner) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> $inner {
                value.0
            }
        }

        impl XmlScalar for $name {
            const KIND: &'static str = $kind;

            fn to_xml(&self) -> String {
                self.0.to_string()
            }

            fn from_xml(text: &str) -> Result<Self> {
                let value = text
                    .trim()
                    .parse::<$inner>()
                    .map_err(|e| Error::malformed($kind, text, e.to_string()))?;
                Self::new(value).map_err(|_| {
                    Error::malformed(
                        $kind,
                        text,
                        format!("must be {} <= x <= {}", Self::MIN, Self::MAX),
                    )
                })
            }
        }
    };
}

bounded_scalar! {
    /// Signed 48-bit integer
    Int48(i64) in -(1 << 47), (1 << 47) - 1, "Int48"
}

bounded_scalar! {
    /// Unsigned 48-bit integer
    UInt48(u64) in 0, (1 << 48) - 1, "UInt48"
}

bounded_scalar! {
    /// Short-form device identifier, an unsigned 40-bit integer
    Sfdi(u64) in 0, (1 << 40) - 1, "SFDIType"
}

impl Sfdi {
    /// Derive the SFDI from an LFDI: the leading 36 bits in decimal followed
    /// by a check digit that makes the digit sum a multiple of ten.
    pub fn from_lfdi(lfdi: &Lfdi) -> Sfdi {
        let bytes = lfdi.as_bytes();
        let leading = bytes[..5]
            .iter()
            .fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
            >> 4;
        let digit_sum: u64 = leading
            .to_string()
            .bytes()
            .map(|d| u64::from(d - b'0'))
            .sum();
        let check = (10 - digit_sum % 10) % 10;
        Sfdi(leading * 10 + check)
    }
}

// =============================================================================
// Enumerated codes and aliases
// =============================================================================

/// `PowerOfTenMultiplierType`: exponent of a scaled quantity
pub type PowerOfTenMultiplier = i8;
/// Hundredths of a percent
pub type PerCent = u16;
/// Resource version counter
pub type VersionType = u16;
/// Registration PIN
pub type PinType = u32;
/// Free text limited to 32 characters by the schema
pub type String32 = String;
/// Free text limited to 192 characters by the schema
pub type String192 = String;

/// Whether and how a resource supports subscriptions.
///
/// Unknown codes are preserved in `Other` rather than rejected. Values
/// compare by wire code, so `Other(1)` equals `SubscribableNoConditions`.
#[derive(Debug, Clone, Copy, Default)]
pub enum SubscribableType {
    /// 0
    #[default]
    NonSubscribable,
    /// 1
    SubscribableNoConditions,
    /// 2
    SubscribableConditions,
    /// Any other code
    Other(u8),
}

impl SubscribableType {
    /// The wire code
    pub fn code(self) -> u8 {
        match self {
            SubscribableType::NonSubscribable => 0,
            SubscribableType::SubscribableNoConditions => 1,
            SubscribableType::SubscribableConditions => 2,
            SubscribableType::Other(code) => code,
        }
    }
}

impl PartialEq for SubscribableType {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for SubscribableType {}

impl std::hash::Hash for SubscribableType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl From<u8> for SubscribableType {
    fn from(code: u8) -> Self {
        match code {
            0 => SubscribableType::NonSubscribable,
            1 => SubscribableType::SubscribableNoConditions,
            2 => SubscribableType::SubscribableConditions,
            other => SubscribableType::Other(other),
        }
    }
}

impl XmlScalar for SubscribableType {
    const KIND: &'static str = "SubscribableType";

    fn to_xml(&self) -> String {
        self.code().to_string()
    }

    fn from_xml(text: &str) -> Result<Self> {
        u8::from_xml(text)
            .map(SubscribableType::from)
            .map_err(|_| Error::malformed(Self::KIND, text, "expected an unsigned 8-bit code"))
    }
}

impl serde::Serialize for SubscribableType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> serde::Deserialize<'de> for SubscribableType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        u8::deserialize(deserializer).map(SubscribableType::from)
    }
}
