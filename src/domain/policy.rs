//! Throttle window policy.
//!
//! Decides whether a call is let through based only on timestamps, so the
//! decision logic stays independent of any clock or timer implementation.

use std::time::{Duration, Instant};

/// Decision made by a dispatch policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Run the wrapped action now
    Allow,
    /// Drop this call
    Suppress,
}

impl PolicyDecision {
    /// Check if the decision is to allow the call.
    pub fn is_allow(&self) -> bool {
        matches!(self, PolicyDecision::Allow)
    }

    /// Check if the decision is to suppress the call.
    pub fn is_suppress(&self) -> bool {
        matches!(self, PolicyDecision::Suppress)
    }
}

/// Leading-edge throttle window.
///
/// The first call opens a window of `limit` and is allowed. Calls inside the
/// window are suppressed. The first call once the window has elapsed is
/// allowed and opens a new window.
///
/// # Example
/// ```
/// use portfolio_interactions::domain::policy::ThrottleWindow;
/// use std::time::{Duration, Instant};
///
/// let mut window = ThrottleWindow::new(Duration::from_millis(100));
/// let t0 = Instant::now();
///
/// assert!(window.register_call(t0).is_allow());
/// assert!(window.register_call(t0 + Duration::from_millis(50)).is_suppress());
/// assert!(window.register_call(t0 + Duration::from_millis(150)).is_allow());
/// ```
#[derive(Debug, Clone)]
pub struct ThrottleWindow {
    limit: Duration,
    window_start: Option<Instant>,
}

impl ThrottleWindow {
    /// Create a throttle window of the given length.
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            window_start: None,
        }
    }

    /// Register a call at `timestamp` and decide whether it fires.
    pub fn register_call(&mut self, timestamp: Instant) -> PolicyDecision {
        let open = match self.window_start {
            None => true,
            Some(start) => timestamp.saturating_duration_since(start) >= self.limit,
        };

        if open {
            self.window_start = Some(timestamp);
            PolicyDecision::Allow
        } else {
            PolicyDecision::Suppress
        }
    }

    /// Whether a call at `timestamp` would be suppressed.
    pub fn is_throttling(&self, timestamp: Instant) -> bool {
        self.window_start
            .is_some_and(|start| timestamp.saturating_duration_since(start) < self.limit)
    }

    /// Forget the current window.
    pub fn reset(&mut self) {
        self.window_start = None;
    }

    /// Length of the window.
    pub fn limit(&self) -> Duration {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_allows_first_only() {
        let mut window = ThrottleWindow::new(Duration::from_millis(100));
        let now = Instant::now();

        assert!(window.register_call(now).is_allow());
        for _ in 0..4 {
            assert!(window.register_call(now).is_suppress());
        }
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let mut window = ThrottleWindow::new(Duration::from_millis(100));
        let now = Instant::now();

        assert!(window.register_call(now).is_allow());
        assert!(window
            .register_call(now + Duration::from_millis(99))
            .is_suppress());
        assert!(window
            .register_call(now + Duration::from_millis(100))
            .is_allow());
    }

    #[test]
    fn test_window_restarts_on_allowed_call() {
        let mut window = ThrottleWindow::new(Duration::from_millis(100));
        let now = Instant::now();

        assert!(window.register_call(now).is_allow());
        assert!(window
            .register_call(now + Duration::from_millis(150))
            .is_allow());
        // Window now starts at 150ms
        assert!(window
            .register_call(now + Duration::from_millis(200))
            .is_suppress());
        assert!(window
            .register_call(now + Duration::from_millis(250))
            .is_allow());
    }

    #[test]
    fn test_is_throttling_and_reset() {
        let mut window = ThrottleWindow::new(Duration::from_millis(100));
        let now = Instant::now();

        assert!(!window.is_throttling(now));
        window.register_call(now);
        assert!(window.is_throttling(now + Duration::from_millis(10)));

        window.reset();
        assert!(!window.is_throttling(now));
        assert!(window.register_call(now).is_allow());
    }
}
