//! Audio adapters
//!
//! Decoding through rodio's codec backends and rendering through one
//! shared rodio output stream.

mod decode;
mod player;

pub use decode::decode_file;
pub use player::RodioPlayer;
