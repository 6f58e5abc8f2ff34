//! Virtual-clock scheduler for testing.

use crate::application::ports::{Clock, Scheduler, Task, TimerHandle};
use crate::infrastructure::mocks::clock::MockClock;
use crate::infrastructure::scheduler::run_guarded;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Scheduler driven by a virtual clock.
///
/// Nothing runs until the test calls [`advance`](MockScheduler::advance).
/// Due tasks then run in `(due time, scheduling order)` order, with the clock
/// set to each task's due time while it runs. Tasks scheduled by running tasks
/// run in the same `advance` if they fall due inside it.
///
/// # Examples
///
/// ```
/// use portfolio_interactions::infrastructure::mocks::MockScheduler;
/// use portfolio_interactions::Scheduler;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let scheduler = MockScheduler::new();
/// let fired = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&fired);
///
/// scheduler.schedule(
///     Duration::from_millis(100),
///     Box::new(move || flag.store(true, Ordering::SeqCst)),
/// );
///
/// scheduler.advance(Duration::from_millis(99));
/// assert!(!fired.load(Ordering::SeqCst));
///
/// scheduler.advance(Duration::from_millis(1));
/// assert!(fired.load(Ordering::SeqCst));
/// ```
#[derive(Clone)]
pub struct MockScheduler {
    clock: MockClock,
    queue: Arc<Mutex<TimerQueue>>,
}

#[derive(Default)]
struct TimerQueue {
    next_id: u64,
    tasks: BTreeMap<(Instant, u64), Task>,
    due_by_id: HashMap<u64, Instant>,
}

impl TimerQueue {
    fn pop_due(&mut self, deadline: Instant) -> Option<(Instant, Task)> {
        let (&(due, id), _) = self.tasks.first_key_value()?;
        if due > deadline {
            return None;
        }
        self.due_by_id.remove(&id);
        self.tasks.remove(&(due, id)).map(|task| (due, task))
    }
}

impl MockScheduler {
    /// Create a scheduler with a fresh virtual clock.
    pub fn new() -> Self {
        Self::with_clock(MockClock::default())
    }

    /// Create a scheduler driven by an existing mock clock.
    pub fn with_clock(clock: MockClock) -> Self {
        Self {
            clock,
            queue: Arc::new(Mutex::new(TimerQueue::default())),
        }
    }

    /// Move virtual time forward, running every task that falls due.
    pub fn advance(&self, duration: Duration) {
        let deadline = self.clock.now() + duration;
        loop {
            // Release the queue lock before running, tasks may schedule more
            let next = self.lock().pop_due(deadline);
            match next {
                Some((due, task)) => {
                    self.clock.advance_to(due);
                    run_guarded(task);
                }
                None => break,
            }
        }
        self.clock.advance_to(deadline);
    }

    /// Advance until the queue is empty, running at most `max_tasks` tasks.
    ///
    /// Returns the number of tasks run.
    pub fn run_until_idle(&self, max_tasks: usize) -> usize {
        let mut ran = 0;
        while ran < max_tasks {
            let next = {
                let mut queue = self.lock();
                match queue.tasks.first_key_value() {
                    Some((&(due, _), _)) => queue.pop_due(due),
                    None => None,
                }
            };
            match next {
                Some((due, task)) => {
                    self.clock.advance_to(due);
                    run_guarded(task);
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }

    /// Number of tasks waiting to run.
    pub fn pending_count(&self) -> usize {
        self.lock().tasks.len()
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Instant> {
        self.lock().tasks.keys().next().map(|&(due, _)| due)
    }

    /// Virtual time elapsed since the scheduler was created.
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// The underlying mock clock.
    pub fn mock_clock(&self) -> &MockClock {
        &self.clock
    }

    /// The virtual clock as a shared [`Clock`] port.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::new(self.clock.clone())
    }

    /// This scheduler as a shared [`Scheduler`] port.
    pub fn shared(&self) -> Arc<dyn Scheduler> {
        Arc::new(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, TimerQueue> {
        self.queue
            .lock()
            .expect("MockScheduler mutex poisoned - a test thread panicked while holding the lock")
    }
}

impl Default for MockScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockScheduler")
            .field("elapsed", &self.elapsed())
            .field("pending", &self.pending_count())
            .finish()
    }
}

impl Clock for MockScheduler {
    fn now(&self) -> Instant {
        self.clock.now()
    }
}

impl Scheduler for MockScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let due = self.clock.now() + delay;
        let mut queue = self.lock();
        let id = queue.next_id;
        queue.next_id += 1;
        queue.tasks.insert((due, id), task);
        queue.due_by_id.insert(id, due);
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let mut queue = self.lock();
        match queue.due_by_id.remove(&handle.0) {
            Some(due) => queue.tasks.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }
}
