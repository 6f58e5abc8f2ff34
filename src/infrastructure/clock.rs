//! Wall clock adapter.
//!
//! Tests drive time with `MockClock` or `MockScheduler` from
//! `crate::infrastructure::mocks`, available with the `test-helpers` feature:
//!
//! ```toml
//! [dev-dependencies]
//! portfolio-interactions = { version = "*", features = ["test-helpers"] }
//! ```

use crate::application::ports::Clock;
use std::time::Instant;

/// Monotonic clock backed by `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
