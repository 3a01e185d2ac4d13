//! Serial device descriptions and discovery rules

mod matcher;

pub use matcher::{DeviceMatcher, DEFAULT_KEYWORDS, DEFAULT_PATH_FRAGMENTS};

/// A serial-capable device as reported by the operating system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Path or name used to open the device (e.g. `/dev/ttyACM0`, `COM3`)
    pub path: String,
    /// Human-readable description (manufacturer/product string)
    pub description: String,
}

impl DeviceInfo {
    pub fn new(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }
}
