//! Manually settled transport for testing.

use crate::application::ports::{Completion, SubmissionTransport};
use crate::domain::field::FormSnapshot;
use crate::domain::submission::SubmissionError;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Transport that holds every submission until the test settles it.
///
/// Lets tests observe the in-flight state and choose the outcome and timing
/// of each submission.
#[derive(Clone, Default)]
pub struct ManualTransport {
    pending: Arc<Mutex<VecDeque<(FormSnapshot, Completion)>>>,
    submitted: Arc<Mutex<Vec<FormSnapshot>>>,
}

impl ManualTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settle the oldest pending submission with `result`.
    ///
    /// Returns `false` if nothing was pending.
    pub fn complete_next(&self, result: Result<(), SubmissionError>) -> bool {
        // Pop first so the completion runs without the lock held
        let next = lock(&self.pending).pop_front();
        match next {
            Some((_, on_complete)) => {
                on_complete(result);
                true
            }
            None => false,
        }
    }

    /// Number of submissions waiting to be settled.
    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Every form ever submitted, in order.
    pub fn submitted(&self) -> Vec<FormSnapshot> {
        lock(&self.submitted).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .expect("ManualTransport mutex poisoned - a test thread panicked while holding the lock")
}

impl fmt::Debug for ManualTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTransport")
            .field("pending", &self.pending_count())
            .finish()
    }
}

impl SubmissionTransport for ManualTransport {
    fn submit(&self, form: FormSnapshot, on_complete: Completion) {
        lock(&self.submitted).push(form.clone());
        lock(&self.pending).push_back((form, on_complete));
    }
}
