//! Default values injected by resource constructors
//!
//! Several schema attributes carry a default (`pollRate`, `responseRequired`,
//! `subscribable`). Constructors never invent these on their own: they take a
//! [`Defaults`] value, so a caller can see and override every injected value,
//! for instance from a JSON configuration file.

use crate::error::{Error, Result};
use crate::primitives::{HexBinary8, SubscribableType, XmlScalar};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Poll interval in seconds assumed by the schema when `pollRate` is absent
pub const DEFAULT_POLL_RATE: u32 = 900;

/// Values stamped onto newly constructed resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// `pollRate` for pollable resources, in seconds
    pub poll_rate: u32,
    /// `responseRequired` for respondable resources
    pub response_required: HexBinary8,
    /// `subscribable` for subscribable resources
    pub subscribable: SubscribableType,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            poll_rate: DEFAULT_POLL_RATE,
            response_required: HexBinary8::default(),
            subscribable: SubscribableType::NonSubscribable,
        }
    }
}

/// The defaults a [`Defaults`] value recognizes, by schema attribute name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizedDefault {
    /// `pollRate`
    PollRate,
    /// `responseRequired`
    ResponseRequired,
    /// `subscribable`
    Subscribable,
}

impl RecognizedDefault {
    /// Every recognized default
    pub const ALL: [RecognizedDefault; 3] = [
        RecognizedDefault::PollRate,
        RecognizedDefault::ResponseRequired,
        RecognizedDefault::Subscribable,
    ];

    /// Schema attribute the default applies to
    pub fn attribute(self) -> &'static str {
        match self {
            RecognizedDefault::PollRate => "pollRate",
            RecognizedDefault::ResponseRequired => "responseRequired",
            RecognizedDefault::Subscribable => "subscribable",
        }
    }
}

impl fmt::Display for RecognizedDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

impl FromStr for RecognizedDefault {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RecognizedDefault::ALL
            .into_iter()
            .find(|d| d.attribute() == s)
            .ok_or_else(|| Error::Config(format!("unknown default '{}'", s)))
    }
}

impl Defaults {
    /// Create the schema defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the poll rate
    pub fn with_poll_rate(mut self, poll_rate: u32) -> Self {
        self.poll_rate = poll_rate;
        self
    }

    /// Set the response-required code
    pub fn with_response_required(mut self, code: HexBinary8) -> Self {
        self.response_required = code;
        self
    }

    /// Set the subscribable code
    pub fn with_subscribable(mut self, subscribable: SubscribableType) -> Self {
        self.subscribable = subscribable;
        self
    }

    /// Load defaults from JSON; keys that are absent keep the schema default
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load defaults from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Wire text of a recognized default
    pub fn get(&self, which: RecognizedDefault) -> String {
        match which {
            RecognizedDefault::PollRate => self.poll_rate.to_xml(),
            RecognizedDefault::ResponseRequired => self.response_required.to_xml(),
            RecognizedDefault::Subscribable => self.subscribable.to_xml(),
        }
    }

    /// Override a recognized default from its wire text
    pub fn set(&mut self, which: RecognizedDefault, value: &str) -> Result<()> {
        let attribute = format!("@{}", which.attribute());
        match which {
            RecognizedDefault::PollRate => {
                self.poll_rate = u32::from_xml(value).map_err(|e| e.within(&attribute))?;
            }
            RecognizedDefault::ResponseRequired => {
                self.response_required =
                    HexBinary8::from_xml(value).map_err(|e| e.within(&attribute))?;
            }
            RecognizedDefault::Subscribable => {
                self.subscribable =
                    SubscribableType::from_xml(value).map_err(|e| e.within(&attribute))?;
            }
        }
        log::debug!("default {} set to {}", which, value);
        Ok(())
    }

    /// Apply a `name=value` override, e.g. `pollRate=60`
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| Error::Config(format!("expected name=value, got '{}'", assignment)))?;
        self.set(name.trim().parse()?, value.trim())
    }
}
