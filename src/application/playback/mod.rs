//! Asynchronous sound playback
//!
//! - [`PlaybackEngine`]: blocking or pooled playback of sound requests
//! - [`PlaybackHandle`]: caller-side completion/failure view
//! - [`WorkerPool`]: the bounded FIFO pool behind background playback

mod engine;
mod handle;
mod pool;

pub use engine::{FailureHook, PlaybackEngine};
pub(crate) use engine::panic_message;
pub use handle::{PlaybackHandle, PlaybackStatus};
pub use pool::{Job, PoolError, WorkerPool};
