//! Contact form submission lifecycle.

use std::fmt;

/// Lifecycle state of a form submission.
///
/// ```text
/// Idle -> Validating -> Idle                      (validation failed)
///                    -> Submitting -> Succeeded -> Idle
///                                  -> Failed    -> Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Waiting for a submit
    #[default]
    Idle,
    /// Checking field values
    Validating,
    /// Waiting for the transport to settle
    Submitting,
    /// Transport reported success
    Succeeded,
    /// Transport failed or timed out
    Failed,
}

impl SubmissionState {
    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Idle)
                | (Validating, Submitting)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }

    /// Whether a submission is waiting on the transport.
    pub fn is_in_flight(self) -> bool {
        self == SubmissionState::Submitting
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Error reported when a submission does not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The transport reported a failure
    Network(String),
    /// The transport did not settle in time
    Timeout,
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::Network(reason) => write!(f, "network error: {}", reason),
            SubmissionError::Timeout => write!(f, "submission timed out"),
        }
    }
}

impl std::error::Error for SubmissionError {}
