//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the host's serial ports, audio output and config files.

pub mod audio;
pub mod config;
pub mod serial;

// Re-export adapters
pub use audio::RodioPlayer;
pub use config::XdgConfigStore;
pub use serial::{PortLineReader, SystemSerialBus};
