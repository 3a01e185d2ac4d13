//! Playback engine
//!
//! Owns the worker pool that multiplexes background playback and the
//! player adapter that does the actual decode + render work.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application::ports::{AudioPlayer, PlaybackError};
use crate::domain::playback::SoundRequest;

use super::handle::PlaybackHandle;
use super::pool::WorkerPool;

/// Thread name prefix of the playback workers
const WORKER_NAME_PREFIX: &str = "sound";

/// Callback invoked for every failed background playback
pub type FailureHook = Arc<dyn Fn(&Path, &PlaybackError) + Send + Sync>;

/// Plays sound requests either on the caller's thread or on a bounded pool.
///
/// The pool is created on the first background submission and recreated
/// on the next submission after [`shutdown`](Self::shutdown). At most
/// `capacity` clips render at the same time; further submissions queue.
pub struct PlaybackEngine {
    player: Arc<dyn AudioPlayer>,
    capacity: usize,
    pool: Mutex<Option<WorkerPool>>,
    on_failure: Option<FailureHook>,
}

impl PlaybackEngine {
    /// Create an engine; no threads are started until the first submission
    pub fn new(player: Arc<dyn AudioPlayer>, capacity: usize) -> Self {
        Self {
            player,
            capacity: capacity.max(1),
            pool: Mutex::new(None),
            on_failure: None,
        }
    }

    /// Report background failures through `hook` in addition to the handle
    pub fn with_failure_hook(mut self, hook: FailureHook) -> Self {
        self.on_failure = Some(hook);
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if a live pool currently exists
    pub fn is_running(&self) -> bool {
        self.lock_pool()
            .as_ref()
            .is_some_and(|pool| !pool.is_shut_down())
    }

    /// Play a request according to its blocking mode.
    ///
    /// Blocking requests decode and render on the calling thread and return
    /// a finished handle, or the failure. Background requests are queued on
    /// the pool and return a pending handle.
    pub fn decode_and_render(&self, request: SoundRequest) -> Result<PlaybackHandle, PlaybackError> {
        if request.is_blocking() {
            let path = request.into_path();
            self.play_blocking(&path)?;
            Ok(PlaybackHandle::finished(path, Ok(())))
        } else {
            Ok(self.submit_async(request.into_path()))
        }
    }

    /// Decode and render on the calling thread, returning once the clip ended
    pub fn play_blocking(&self, path: &Path) -> Result<(), PlaybackError> {
        run_guarded(self.player.as_ref(), path)
    }

    /// Queue a clip on the worker pool and return immediately.
    pub fn submit_async(&self, path: impl Into<PathBuf>) -> PlaybackHandle {
        let path = path.into();
        let (handle, completer) = PlaybackHandle::pending(path.clone());

        let player = Arc::clone(&self.player);
        let on_failure = self.on_failure.clone();
        let job = Box::new(move || {
            let result = run_guarded(player.as_ref(), &path);
            if let (Err(e), Some(hook)) = (&result, &on_failure) {
                hook(&path, e);
            }
            completer.complete(result);
        });

        let mut slot = self.lock_pool();
        let pool = match self.live_pool(&mut slot) {
            Ok(pool) => pool,
            Err(e) => {
                drop(slot);
                // Dropping the job marks the handle as abandoned; report the cause instead
                let failed = PlaybackHandle::finished(handle.path().to_path_buf(), Err(e.clone()));
                if let Some(hook) = &self.on_failure {
                    hook(handle.path(), &e);
                }
                return failed;
            }
        };

        // The pool cannot be shut down while we hold the slot lock; if the
        // job is rejected anyway it is dropped and the handle reports Abandoned.
        let _ = pool.execute(job);
        handle
    }

    /// Tear down the pool. Queued clips still play; the call returns once
    /// all of them finished. The next submission starts a fresh pool.
    pub fn shutdown(&self) {
        let pool = self.lock_pool().take();
        if let Some(mut pool) = pool {
            pool.shutdown();
        }
    }

    fn lock_pool(&self) -> MutexGuard<'_, Option<WorkerPool>> {
        self.pool.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn live_pool<'a>(
        &self,
        slot: &'a mut Option<WorkerPool>,
    ) -> Result<&'a WorkerPool, PlaybackError> {
        let needs_pool = slot.as_ref().map_or(true, WorkerPool::is_shut_down);
        if needs_pool {
            let pool = WorkerPool::new(self.capacity, WORKER_NAME_PREFIX)
                .map_err(|e| PlaybackError::Unavailable(e.to_string()))?;
            *slot = Some(pool);
        }
        slot.as_ref()
            .ok_or_else(|| PlaybackError::Unavailable("pool missing".to_string()))
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Run the player, turning a panic into a playback failure
fn run_guarded(player: &dyn AudioPlayer, path: &Path) -> Result<(), PlaybackError> {
    panic::catch_unwind(AssertUnwindSafe(|| player.play_to_end(path)))
        .unwrap_or_else(|payload| Err(PlaybackError::Panicked(panic_message(payload.as_ref()))))
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
