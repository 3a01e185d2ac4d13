//! Baud rate value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidBaudRateError;

/// Default line speed of the trigger firmware
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

const MIN_BAUD_RATE: u32 = 50;
const MAX_BAUD_RATE: u32 = 4_000_000;

/// Serial line speed in bits per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaudRate(u32);

impl BaudRate {
    /// Validate a raw rate
    pub fn new(rate: u32) -> Result<Self, InvalidBaudRateError> {
        if (MIN_BAUD_RATE..=MAX_BAUD_RATE).contains(&rate) {
            Ok(Self(rate))
        } else {
            Err(InvalidBaudRateError {
                input: rate.to_string(),
            })
        }
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl Default for BaudRate {
    fn default() -> Self {
        Self(DEFAULT_BAUD_RATE)
    }
}

impl FromStr for BaudRate {
    type Err = InvalidBaudRateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rate: u32 = s.trim().parse().map_err(|_| InvalidBaudRateError {
            input: s.to_string(),
        })?;
        Self::new(rate).map_err(|_| InvalidBaudRateError {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
