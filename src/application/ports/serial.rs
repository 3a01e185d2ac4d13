//! Serial bus port interface

use thiserror::Error;

use crate::domain::device::DeviceInfo;
use crate::domain::link::LinkSettings;

/// Serial errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerialError {
    #[error("Failed to enumerate serial devices: {0}")]
    Enumerate(String),

    #[error("Failed to open {path}: {message}")]
    Open { path: String, message: String },

    #[error("Serial read failed: {0}")]
    Read(String),

    #[error("Received line is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("Device disconnected")]
    Disconnected,
}

/// An open, line-oriented device channel
pub trait LineReader: Send {
    /// Read the next newline-terminated line, without its terminator.
    ///
    /// # Returns
    /// `Ok(None)` when the read timeout elapsed without a complete line;
    /// any `Err` means the connection is no longer usable.
    fn read_line(&mut self) -> Result<Option<String>, SerialError>;
}

/// Port for discovering and opening serial devices
pub trait SerialBus: Send + Sync {
    /// List attached serial-capable devices in enumeration order.
    fn list_devices(&self) -> Result<Vec<DeviceInfo>, SerialError>;

    /// Open a device for line reading.
    fn open(&self, path: &str, settings: &LinkSettings) -> Result<Box<dyn LineReader>, SerialError>;
}
