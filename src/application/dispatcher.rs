//! Rate-limited event dispatch.
//!
//! Higher-order wrappers that control how often an action runs:
//! - [`Debounced`] batches bursts and runs only the last call, `wait` after it.
//! - [`Throttled`] runs the first call of each `limit` window immediately and
//!   drops the rest.
//!
//! Each wrapper owns its own state. Deferred work goes through the injected
//! [`Scheduler`], so tests drive time with a virtual clock.

use crate::application::config::{non_zero, ConfigError};
use crate::application::metrics::DispatchMetrics;
use crate::application::ports::{Clock, Scheduler, TimerHandle};
use crate::domain::policy::{PolicyDecision, ThrottleWindow};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Action wrapped by a dispatcher.
pub type Action<A> = Arc<dyn Fn(A) + Send + Sync + 'static>;

/// Wrap `action` so it only runs once calls pause for `wait`.
///
/// # Errors
/// Returns `ConfigError::ZeroDuration` if `wait` is zero.
pub fn debounce<A, F>(
    action: F,
    wait: Duration,
    scheduler: Arc<dyn Scheduler>,
) -> Result<Debounced<A>, ConfigError>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced::new(Arc::new(action), wait, scheduler, DispatchMetrics::new())
}

/// Wrap `action` so it runs at most once per `limit`.
///
/// # Errors
/// Returns `ConfigError::ZeroDuration` if `limit` is zero.
pub fn throttle<A, F>(
    action: F,
    limit: Duration,
    clock: Arc<dyn Clock>,
) -> Result<Throttled<A>, ConfigError>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Throttled::new(Arc::new(action), limit, clock, DispatchMetrics::new())
}

#[derive(Debug, Default)]
struct PendingCall {
    handle: Option<TimerHandle>,
    /// Bumped on every call; a firing task with an older value is stale.
    generation: u64,
}

struct DebounceInner<A> {
    action: Action<A>,
    wait: Duration,
    scheduler: Arc<dyn Scheduler>,
    metrics: DispatchMetrics,
    pending: Mutex<PendingCall>,
}

impl<A> DebounceInner<A> {
    fn lock_pending(&self) -> MutexGuard<'_, PendingCall> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fire(&self, generation: u64, args: A) {
        {
            let mut pending = self.lock_pending();
            if pending.generation != generation {
                // Cancellation lost the race with the timer
                self.metrics.record_suppressed();
                return;
            }
            pending.handle = None;
        }

        self.metrics.record_fired();
        (self.action)(args);
    }
}

/// Trailing-edge debounced action.
///
/// Cloning yields another handle to the same debounce state.
pub struct Debounced<A> {
    inner: Arc<DebounceInner<A>>,
}

impl<A> Debounced<A>
where
    A: Send + 'static,
{
    /// Create a debounced action reporting to `metrics`.
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroDuration` if `wait` is zero.
    pub fn new(
        action: Action<A>,
        wait: Duration,
        scheduler: Arc<dyn Scheduler>,
        metrics: DispatchMetrics,
    ) -> Result<Self, ConfigError> {
        let wait = non_zero("debounce wait", wait)?;
        Ok(Self {
            inner: Arc::new(DebounceInner {
                action,
                wait,
                scheduler,
                metrics,
                pending: Mutex::new(PendingCall::default()),
            }),
        })
    }

    /// Invoke the action `wait` from now with `args`, replacing any pending call.
    pub fn call(&self, args: A) {
        let inner = &self.inner;
        inner.metrics.record_received();

        let mut pending = inner.lock_pending();
        if let Some(handle) = pending.handle.take() {
            if inner.scheduler.cancel(handle) {
                inner.metrics.record_suppressed();
            }
        }

        pending.generation += 1;
        let generation = pending.generation;
        let task_inner = Arc::clone(inner);
        let handle = inner.scheduler.schedule(
            inner.wait,
            Box::new(move || task_inner.fire(generation, args)),
        );
        pending.handle = Some(handle);
    }

    /// Drop the pending call, if any.
    ///
    /// Returns `true` if a call was pending.
    pub fn cancel(&self) -> bool {
        let mut pending = self.inner.lock_pending();
        pending.generation += 1;
        match pending.handle.take() {
            Some(handle) => {
                let cancelled = self.inner.scheduler.cancel(handle);
                if cancelled {
                    self.inner.metrics.record_suppressed();
                }
                cancelled
            }
            None => false,
        }
    }

    /// Whether a call is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.inner.lock_pending().handle.is_some()
    }

    /// The quiet period before a call fires.
    pub fn wait(&self) -> Duration {
        self.inner.wait
    }

    /// Metrics for this wrapper.
    pub fn metrics(&self) -> &DispatchMetrics {
        &self.inner.metrics
    }
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.inner.wait)
            .field("pending", &*self.inner.lock_pending())
            .finish()
    }
}

struct ThrottleInner<A> {
    action: Action<A>,
    clock: Arc<dyn Clock>,
    window: Mutex<ThrottleWindow>,
    metrics: DispatchMetrics,
}

/// Leading-edge throttled action.
///
/// Cloning yields another handle to the same throttle window.
pub struct Throttled<A> {
    inner: Arc<ThrottleInner<A>>,
}

impl<A> Throttled<A> {
    /// Create a throttled action reporting to `metrics`.
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroDuration` if `limit` is zero.
    pub fn new(
        action: Action<A>,
        limit: Duration,
        clock: Arc<dyn Clock>,
        metrics: DispatchMetrics,
    ) -> Result<Self, ConfigError> {
        let limit = non_zero("throttle limit", limit)?;
        Ok(Self {
            inner: Arc::new(ThrottleInner {
                action,
                clock,
                window: Mutex::new(ThrottleWindow::new(limit)),
                metrics,
            }),
        })
    }

    /// Run the action with `args` unless the current window is still open.
    pub fn call(&self, args: A) -> PolicyDecision {
        let inner = &self.inner;
        inner.metrics.record_received();

        let decision = inner
            .window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .register_call(inner.clock.now());

        match decision {
            PolicyDecision::Allow => {
                inner.metrics.record_fired();
                (inner.action)(args);
            }
            PolicyDecision::Suppress => {
                inner.metrics.record_suppressed();
                tracing::trace!("throttled call suppressed");
            }
        }

        decision
    }

    /// Close the current window so the next call fires immediately.
    pub fn reset(&self) {
        self.inner
            .window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reset();
    }

    /// Length of the throttle window.
    pub fn limit(&self) -> Duration {
        self.inner
            .window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .limit()
    }

    /// Metrics for this wrapper.
    pub fn metrics(&self) -> &DispatchMetrics {
        &self.inner.metrics
    }
}

impl<A> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Throttled<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttled")
            .field("limit", &self.limit())
            .finish()
    }
}
