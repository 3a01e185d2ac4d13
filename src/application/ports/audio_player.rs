//! Audio player port
//!
//! Decodes one audio file and renders it to the output device.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while playing a clip
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The file is missing, unreadable or not a supported audio format
    #[error("Failed to decode audio: {0}")]
    Decode(String),

    /// The output device could not be opened or rejected the samples
    #[error("Audio device error: {0}")]
    Device(String),

    /// The player panicked while handling the clip
    #[error("Playback panicked: {0}")]
    Panicked(String),

    /// The job was dropped before it could run
    #[error("Playback abandoned before completion")]
    Abandoned,

    /// No worker could be started to run the job
    #[error("Playback workers unavailable: {0}")]
    Unavailable(String),
}

impl PlaybackError {
    /// Check if the error originates from the decode step
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Check if the error originates from the output device
    pub fn is_device(&self) -> bool {
        matches!(self, Self::Device(_))
    }
}

/// Port for decoding and rendering a clip.
///
/// Implementations block the calling thread until the clip finished
/// rendering and must release the output resource on every return path.
pub trait AudioPlayer: Send + Sync {
    /// Decode `path` fully into memory and play it to the end.
    fn play_to_end(&self, path: &Path) -> Result<(), PlaybackError>;
}
