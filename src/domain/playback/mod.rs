//! Playback value objects

mod clip;
mod request;

pub use clip::DecodedClip;
pub use request::SoundRequest;
