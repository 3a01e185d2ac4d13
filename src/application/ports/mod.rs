//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_player;
pub mod config;
pub mod serial;

// Re-export common types
pub use audio_player::{AudioPlayer, PlaybackError};
pub use config::ConfigStore;
pub use serial::{LineReader, SerialBus, SerialError};
