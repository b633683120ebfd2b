//! Periodic refresh driving re-fetches of the record set.
//!
//! The map stays current by re-fetching on a fixed interval. The schedule
//! is owned by a [`RefreshTask`] value with explicit start and stop:
//! dropping the task cancels and joins its thread, so a dismissed map view
//! can never leave a timer running against a dead consumer.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{ObsmapError, Result};

struct Shared {
    stopped: Mutex<bool>,
    wake: Condvar,
}

/// Runs a callback at a fixed interval on a background thread.
///
/// The first tick fires one interval after spawning. Ticks are serial: a
/// slow callback delays the next tick rather than overlapping it. `stop`
/// signals the worker and joins it; dropping the task does the same.
///
/// # Examples
///
/// ```
/// use obsmap::RefreshTask;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
///
/// let ticks = Arc::new(AtomicUsize::new(0));
/// let seen = Arc::clone(&ticks);
///
/// let mut task = RefreshTask::spawn(Duration::from_millis(5), move || {
///     seen.fetch_add(1, Ordering::SeqCst);
/// })
/// .unwrap();
///
/// std::thread::sleep(Duration::from_millis(40));
/// task.stop();
/// assert!(ticks.load(Ordering::SeqCst) >= 1);
/// ```
pub struct RefreshTask {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl RefreshTask {
    /// Spawns the worker thread.
    ///
    /// A zero interval is rejected; it would spin the callback without
    /// ever sleeping.
    pub fn spawn<F>(interval: Duration, mut callback: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        if interval.is_zero() {
            return Err(ObsmapError::InvalidInput(
                "Refresh interval must be non-zero".to_string(),
            ));
        }

        let shared = Arc::new(Shared {
            stopped: Mutex::new(false),
            wake: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("obsmap-refresh".to_string())
            .spawn(move || {
                loop {
                    let mut stopped = worker_shared.stopped.lock();
                    if *stopped {
                        break;
                    }
                    // parking_lot condvars have no spurious wakeups, so a
                    // non-timeout return means stop was signaled.
                    let timed_out = worker_shared
                        .wake
                        .wait_for(&mut stopped, interval)
                        .timed_out();
                    if *stopped || !timed_out {
                        break;
                    }
                    drop(stopped);
                    callback();
                }
                log::debug!("Refresh task stopped");
            })
            .map_err(|e| ObsmapError::Other(format!("Failed to spawn refresh thread: {}", e)))?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Signals the worker to stop and waits for it to finish.
    ///
    /// A tick already in progress completes first. Calling `stop` again is
    /// a no-op.
    pub fn stop(&mut self) {
        *self.shared.stopped.lock() = true;
        self.shared.wake.notify_all();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    /// True until `stop` has run.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.stop();
    }
}
