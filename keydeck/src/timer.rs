//! Scoped one-shot timers
//!
//! Timed UI resets (e.g., a "copied" indicator reverting after two seconds)
//! must not outlive the view that armed them. `ScopedTimer` aborts its task
//! on drop, so a callback can never fire after teardown.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

#[derive(Debug)]
pub struct ScopedTimer {
    handle: JoinHandle<()>,
}

impl ScopedTimer {
    /// Arm a one-shot timer. The callback runs on the runtime after `delay`
    /// unless the timer is cancelled or dropped first.
    pub fn once<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            callback();
        });
        Self { handle }
    }

    /// True once the callback has run (or the task was aborted)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel without waiting for the deadline
    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
