//! Scheduler adapters.
//!
//! Provides the tokio-backed scheduler for production use (feature `async`).
//! Tasks run under panic protection: a panicking task is logged and dropped,
//! never taking the page down with it.
//!
//! # Testing
//!
//! See `MockScheduler` (in `crate::infrastructure::mocks`) for a virtual-clock
//! scheduler. Available with the `test-helpers` feature or in test builds.

use crate::application::ports::Task;
use std::panic;

/// Run a scheduled task, catching and logging any panic.
#[cfg_attr(
    not(any(test, feature = "test-helpers", feature = "async")),
    allow(dead_code)
)]
pub(crate) fn run_guarded(task: Task) {
    if let Err(payload) = panic::catch_unwind(panic::AssertUnwindSafe(task)) {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        tracing::error!(reason = %reason, "scheduled task panicked");
    }
}

#[cfg(feature = "async")]
pub use tokio_scheduler::TokioScheduler;

#[cfg(feature = "async")]
mod tokio_scheduler {
    use super::run_guarded;
    use crate::application::ports::{Scheduler, Task, TimerHandle};
    use dashmap::DashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::runtime::Handle;
    use tokio::task::AbortHandle;

    /// Scheduler spawning one sleeping tokio task per timer.
    ///
    /// A current-thread runtime gives the single-threaded event loop model the
    /// page components expect; a multi-thread runtime works too since every
    /// component is `Send + Sync`.
    #[derive(Debug, Clone)]
    pub struct TokioScheduler {
        runtime: Handle,
        // `None` until the spawned task's abort handle is known
        timers: Arc<DashMap<u64, Option<AbortHandle>>>,
        next_id: Arc<AtomicU64>,
    }

    impl TokioScheduler {
        /// Create a scheduler spawning onto `runtime`.
        pub fn new(runtime: Handle) -> Self {
            Self {
                runtime,
                timers: Arc::new(DashMap::new()),
                next_id: Arc::new(AtomicU64::new(1)),
            }
        }

        /// Create a scheduler on the runtime of the calling context.
        ///
        /// Returns `None` outside a tokio runtime.
        pub fn try_current() -> Option<Self> {
            Handle::try_current().ok().map(Self::new)
        }

        /// Number of timers that have not fired or been cancelled.
        pub fn pending_count(&self) -> usize {
            self.timers.len()
        }
    }

    impl Scheduler for TokioScheduler {
        fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            self.timers.insert(id, None);

            let timers = Arc::clone(&self.timers);
            let join = self.runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                if timers.remove(&id).is_some() {
                    run_guarded(task);
                }
            });

            if let Some(mut slot) = self.timers.get_mut(&id) {
                *slot = Some(join.abort_handle());
            }
            TimerHandle(id)
        }

        fn cancel(&self, handle: TimerHandle) -> bool {
            match self.timers.remove(&handle.0) {
                Some((_, abort)) => {
                    if let Some(abort) = abort {
                        abort.abort();
                    }
                    true
                }
                None => false,
            }
        }
    }

}
