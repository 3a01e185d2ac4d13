//! Fixed-size worker pool
//!
//! A bounded set of named threads pulling jobs from one FIFO queue.
//! Jobs beyond the pool capacity wait in submission order until a
//! worker frees up.

use std::collections::VecDeque;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use thiserror::Error;

/// Unit of work executed by a pool worker
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Pool errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("Worker pool has been shut down")]
    ShutDown,
}

struct Queue {
    jobs: VecDeque<Job>,
    stopping: bool,
}

struct Shared {
    queue: Mutex<Queue>,
    available: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Queue> {
        // Jobs never run under the lock, so a poisoned queue is still consistent
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Bounded worker pool
pub struct WorkerPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
    capacity: usize,
}

impl WorkerPool {
    /// Start `capacity` workers named `<name_prefix>-<index>`.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize, name_prefix: &str) -> io::Result<Self> {
        let capacity = capacity.max(1);
        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue {
                jobs: VecDeque::new(),
                stopping: false,
            }),
            available: Condvar::new(),
        });

        let mut pool = Self {
            shared,
            workers: Vec::with_capacity(capacity),
            capacity,
        };

        for index in 0..capacity {
            let shared = Arc::clone(&pool.shared);
            let handle = thread::Builder::new()
                .name(format!("{}-{}", name_prefix, index))
                .spawn(move || worker_loop(shared))?;
            pool.workers.push(handle);
        }

        Ok(pool)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of jobs waiting for a free worker
    pub fn queued(&self) -> usize {
        self.shared.lock().jobs.len()
    }

    /// Check if the pool stopped accepting work
    pub fn is_shut_down(&self) -> bool {
        self.shared.lock().stopping
    }

    /// Queue a job. Never blocks on running jobs.
    pub fn execute(&self, job: Job) -> Result<(), PoolError> {
        {
            let mut queue = self.shared.lock();
            if queue.stopping {
                return Err(PoolError::ShutDown);
            }
            queue.jobs.push_back(job);
        }
        self.shared.available.notify_one();
        Ok(())
    }

    /// Stop accepting work, let queued jobs drain, and join the workers.
    pub fn shutdown(&mut self) {
        self.shared.lock().stopping = true;
        self.shared.available.notify_all();

        for handle in self.workers.drain(..) {
            // Workers catch job panics, so a join error is not expected
            let _ = handle.join();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(shared: Arc<Shared>) {
    loop {
        let job = {
            let mut queue = shared.lock();
            loop {
                if let Some(job) = queue.jobs.pop_front() {
                    break job;
                }
                if queue.stopping {
                    return;
                }
                queue = shared
                    .available
                    .wait(queue)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };

        // A panicking job must not take the worker down with it
        let _ = panic::catch_unwind(AssertUnwindSafe(job));
    }
}
