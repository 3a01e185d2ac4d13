//! Rodio-based audio player
//!
//! All renders share one output stream; each render attaches its own sink
//! so overlapping clips are mixed by rodio.

use std::path::Path;
use std::sync::mpsc;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::application::ports::{AudioPlayer, PlaybackError};

use super::decode::decode_file;

/// Name of the thread that owns the output stream
const OUTPUT_THREAD_NAME: &str = "audio-output";

/// Extra time a render may take beyond the clip length before the device
/// is considered stalled
const RENDER_SLACK: Duration = Duration::from_secs(2);

/// How often a render checks whether its sink drained
const DRAIN_POLL: Duration = Duration::from_millis(20);

/// The default output device, kept open by a dedicated thread.
///
/// `OutputStream` cannot leave the thread that created it, so the thread
/// parks until `stop` is dropped and only the handle is shared.
struct OutputDevice {
    handle: OutputStreamHandle,
    _stop: mpsc::Sender<()>,
}

impl OutputDevice {
    fn open() -> Result<Self, PlaybackError> {
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        thread::Builder::new()
            .name(OUTPUT_THREAD_NAME.to_string())
            .spawn(move || match OutputStream::try_default() {
                Ok((stream, handle)) => {
                    if ready_tx.send(Ok(handle)).is_ok() {
                        // Returns once the sender is dropped
                        let _ = stop_rx.recv();
                    }
                    drop(stream);
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e.to_string()));
                }
            })
            .map_err(|e| PlaybackError::Device(e.to_string()))?;

        let handle = ready_rx
            .recv()
            .map_err(|_| PlaybackError::Device("output thread exited".to_string()))?
            .map_err(PlaybackError::Device)?;

        Ok(Self {
            handle,
            _stop: stop_tx,
        })
    }
}

/// Audio player implementation using rodio
pub struct RodioPlayer {
    output: Mutex<Option<OutputDevice>>,
}

impl RodioPlayer {
    /// Create a player; the output device is opened on first use
    pub fn new() -> Self {
        Self {
            output: Mutex::new(None),
        }
    }

    fn lock_output(&self) -> MutexGuard<'_, Option<OutputDevice>> {
        self.output.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach a fresh sink to the shared stream, reopening the device if
    /// the current stream no longer accepts sinks.
    fn attach_sink(&self) -> Result<Sink, PlaybackError> {
        let mut output = self.lock_output();

        if let Some(device) = output.as_ref() {
            if let Ok(sink) = Sink::try_new(&device.handle) {
                return Ok(sink);
            }
            *output = None;
        }

        let device = OutputDevice::open()?;
        let sink =
            Sink::try_new(&device.handle).map_err(|e| PlaybackError::Device(e.to_string()))?;
        *output = Some(device);
        Ok(sink)
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayer for RodioPlayer {
    fn play_to_end(&self, path: &Path) -> Result<(), PlaybackError> {
        let clip = decode_file(path)?;
        let sink = self.attach_sink()?;

        let channels = clip.channels();
        let sample_rate = clip.sample_rate();
        let limit = clip.duration() + RENDER_SLACK;
        sink.append(SamplesBuffer::new(channels, sample_rate, clip.into_samples()));

        let drained = wait_until(limit, || sink.empty());
        if drained.is_err() {
            sink.stop();
            // A stalled stream will not accept new sinks either
            *self.lock_output() = None;
        }
        drained
    }
}

/// Poll `done` until it holds, failing with a device error after `limit`
fn wait_until(limit: Duration, mut done: impl FnMut() -> bool) -> Result<(), PlaybackError> {
    let deadline = Instant::now() + limit;
    while !done() {
        let now = Instant::now();
        if now >= deadline {
            return Err(PlaybackError::Device(format!(
                "output stalled; render not finished after {:?}",
                limit
            )));
        }
        thread::sleep((deadline - now).min(DRAIN_POLL));
    }
    Ok(())
}
