//! Serial link value objects and the connection state machine

mod baud_rate;
mod interval;
mod session;

pub use baud_rate::{BaudRate, DEFAULT_BAUD_RATE};
pub use interval::Interval;
pub use session::{ConnectionSession, ConnectionState, InvalidStateTransition};

/// Parameters used when opening the serial device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSettings {
    pub baud_rate: BaudRate,
    pub read_timeout: Interval,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            baud_rate: BaudRate::default(),
            read_timeout: Interval::default_read_timeout(),
        }
    }
}
