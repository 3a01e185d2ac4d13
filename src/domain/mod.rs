//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod link;
pub mod playback;

// Re-export common types
pub use config::AppConfig;
pub use device::{DeviceInfo, DeviceMatcher};
pub use error::*;
pub use event::{EventGrammar, EventMatch, EventRule};
pub use link::{BaudRate, ConnectionSession, ConnectionState, Interval, LinkSettings};
pub use playback::{DecodedClip, SoundRequest};
