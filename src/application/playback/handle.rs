//! Playback handle
//!
//! Caller-side view of one playback operation. The engine keeps only the
//! completing half ([`PlaybackCompleter`]) and drops it once the clip ended.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::application::ports::PlaybackError;

/// Completion state of a playback operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackStatus {
    Pending,
    Succeeded,
    Failed(PlaybackError),
}

impl PlaybackStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    fn to_result(&self) -> Option<Result<(), PlaybackError>> {
        match self {
            Self::Pending => None,
            Self::Succeeded => Some(Ok(())),
            Self::Failed(e) => Some(Err(e.clone())),
        }
    }
}

impl From<Result<(), PlaybackError>> for PlaybackStatus {
    fn from(result: Result<(), PlaybackError>) -> Self {
        match result {
            Ok(()) => Self::Succeeded,
            Err(e) => Self::Failed(e),
        }
    }
}

struct Shared {
    path: PathBuf,
    status: Mutex<PlaybackStatus>,
    finished: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, PlaybackStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to an in-flight or completed playback.
///
/// Clones observe the same operation. Dropping every clone does not
/// cancel playback.
#[derive(Clone)]
pub struct PlaybackHandle {
    shared: Arc<Shared>,
}

impl PlaybackHandle {
    /// Create a pending handle together with the half that completes it
    pub(crate) fn pending(path: PathBuf) -> (Self, PlaybackCompleter) {
        let shared = Arc::new(Shared {
            path,
            status: Mutex::new(PlaybackStatus::Pending),
            finished: Condvar::new(),
        });
        let completer = PlaybackCompleter {
            shared: Arc::clone(&shared),
            completed: false,
        };
        (Self { shared }, completer)
    }

    /// Create a handle that is already in a terminal state
    pub(crate) fn finished(path: PathBuf, result: Result<(), PlaybackError>) -> Self {
        Self {
            shared: Arc::new(Shared {
                path,
                status: Mutex::new(result.into()),
                finished: Condvar::new(),
            }),
        }
    }

    /// File this playback was requested for
    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    /// Snapshot of the current state
    pub fn status(&self) -> PlaybackStatus {
        self.shared.lock().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.shared.lock().is_finished()
    }

    /// The captured fault, if playback failed
    pub fn error(&self) -> Option<PlaybackError> {
        match &*self.shared.lock() {
            PlaybackStatus::Failed(e) => Some(e.clone()),
            _ => None,
        }
    }

    /// Block until playback finished and return its outcome
    pub fn wait(&self) -> Result<(), PlaybackError> {
        let mut status = self.shared.lock();
        loop {
            if let Some(result) = status.to_result() {
                return result;
            }
            status = self
                .shared
                .finished
                .wait(status)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Like [`wait`](Self::wait), giving up after `timeout`.
    ///
    /// # Returns
    /// `None` if playback was still pending when the timeout elapsed
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<(), PlaybackError>> {
        let deadline = Instant::now() + timeout;
        let mut status = self.shared.lock();
        loop {
            if let Some(result) = status.to_result() {
                return Some(result);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            status = self
                .shared
                .finished
                .wait_timeout(status, remaining)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|e| e.into_inner().0);
        }
    }
}

impl fmt::Debug for PlaybackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackHandle")
            .field("path", &self.shared.path)
            .field("status", &self.status())
            .finish()
    }
}

/// Completing half of a [`PlaybackHandle`].
///
/// Dropping it without calling [`complete`](Self::complete) marks the
/// playback as [`PlaybackError::Abandoned`], so waiters never hang.
pub(crate) struct PlaybackCompleter {
    shared: Arc<Shared>,
    completed: bool,
}

impl PlaybackCompleter {
    pub(crate) fn complete(mut self, result: Result<(), PlaybackError>) {
        self.publish(result.into());
    }

    fn publish(&mut self, outcome: PlaybackStatus) {
        *self.shared.lock() = outcome;
        self.completed = true;
        self.shared.finished.notify_all();
    }
}

impl Drop for PlaybackCompleter {
    fn drop(&mut self) {
        if !self.completed {
            self.publish(PlaybackStatus::Failed(PlaybackError::Abandoned));
        }
    }
}
