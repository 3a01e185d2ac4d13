//! Application layer - Use cases and port interfaces
//!
//! Contains the playback engine, the serial event bridge and the trait
//! definitions for external system interactions.

pub mod bridge;
pub mod playback;
pub mod ports;

// Re-export use cases
pub use bridge::{BridgeConfig, BridgeError, BridgeEvent, EventBridge, EventCallback};
pub use playback::{FailureHook, PlaybackEngine, PlaybackHandle, PlaybackStatus};
