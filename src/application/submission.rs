//! Contact form submission flow.
//!
//! Validates the whole form, drives the submit button's loading state, hands
//! the form to a [`SubmissionTransport`] and reports the outcome through the
//! [`NotificationPresenter`]. One submission may be in flight at a time.

use crate::application::config::{non_zero, ConfigError};
use crate::application::notifier::NotificationPresenter;
use crate::application::ports::{FormView, Scheduler, SubmissionTransport, SubmitControl, TimerHandle};
use crate::domain::field::FormSnapshot;
use crate::domain::notification::NotificationKind;
use crate::domain::submission::{SubmissionError, SubmissionState};
use crate::domain::validation::{validate_form, ValidationResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

/// Message shown after a successful submission.
pub const SUCCESS_MESSAGE: &str = "¡Mensaje enviado exitosamente!";

/// Message shown after a failed or timed out submission.
pub const FAILURE_MESSAGE: &str = "Error al enviar el mensaje. Inténtalo de nuevo.";

/// Submission settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionConfig {
    /// How long to wait for the transport. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl SubmissionConfig {
    /// Create a config with a custom timeout.
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroDuration` for `Some(Duration::ZERO)`.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let config = Self { timeout };
        config.validate()?;
        Ok(config)
    }

    /// A config that never times out.
    pub fn without_timeout() -> Self {
        Self { timeout: None }
    }

    /// Check the timeout.
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroDuration` for a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(timeout) = self.timeout {
            non_zero("submission timeout", timeout)?;
        }
        Ok(())
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; carries the first failure
    Rejected(ValidationResult),
    /// A submission was already in flight
    Ignored,
    /// The form was handed to the transport
    Started,
}

#[derive(Debug, Default)]
struct FlowState {
    state: SubmissionState,
    /// Attempt that may still finish
    current: Option<u64>,
    timeout: Option<TimerHandle>,
    next_attempt: u64,
}

impl FlowState {
    fn transition(&mut self, next: SubmissionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal submission transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(from = %self.state, to = %next, "submission state changed");
        self.state = next;
    }
}

#[derive(Debug)]
struct ControllerInner {
    transport: Arc<dyn SubmissionTransport>,
    submit_control: Arc<dyn SubmitControl>,
    form_view: Arc<dyn FormView>,
    notifier: NotificationPresenter,
    scheduler: Arc<dyn Scheduler>,
    config: SubmissionConfig,
    flow: Mutex<FlowState>,
}

impl ControllerInner {
    fn flow(&self) -> MutexGuard<'_, FlowState> {
        self.flow.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn finish(&self, attempt: u64, result: Result<(), SubmissionError>) {
        let timeout = {
            let mut flow = self.flow();
            if flow.current != Some(attempt) {
                tracing::debug!(attempt, "stale submission callback ignored");
                return;
            }
            flow.current = None;
            flow.transition(if result.is_ok() {
                SubmissionState::Succeeded
            } else {
                SubmissionState::Failed
            });
            // Settle before any port call so a submit arriving during the
            // form reset starts a fresh attempt that nothing overwrites
            flow.transition(SubmissionState::Idle);
            flow.timeout.take()
        };

        if let Some(handle) = timeout {
            self.scheduler.cancel(handle);
        }
        self.submit_control.set_loading(false);

        match result {
            Ok(()) => {
                tracing::info!(attempt, "contact form submitted");
                self.notifier.notify(SUCCESS_MESSAGE, NotificationKind::Success);
                self.form_view.reset_fields();
                self.form_view.reset_labels();
            }
            Err(error) => {
                tracing::warn!(attempt, %error, "contact form submission failed");
                self.notifier.notify(FAILURE_MESSAGE, NotificationKind::Error);
            }
        }
    }
}

/// Orchestrates contact form submissions.
///
/// Cloning is cheap and clones share state.
#[derive(Debug, Clone)]
pub struct FormSubmissionController {
    inner: Arc<ControllerInner>,
}

impl FormSubmissionController {
    /// Create a controller.
    ///
    /// # Errors
    /// Returns `ConfigError` if the config is invalid.
    pub fn new(
        transport: Arc<dyn SubmissionTransport>,
        submit_control: Arc<dyn SubmitControl>,
        form_view: Arc<dyn FormView>,
        notifier: NotificationPresenter,
        scheduler: Arc<dyn Scheduler>,
        config: SubmissionConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(ControllerInner {
                transport,
                submit_control,
                form_view,
                notifier,
                scheduler,
                config,
                flow: Mutex::new(FlowState::default()),
            }),
        })
    }

    /// Handle a submit of `form`.
    pub fn on_submit(&self, form: &FormSnapshot) -> SubmitOutcome {
        let inner = &self.inner;
        let attempt = {
            let mut flow = inner.flow();
            if flow.state.is_in_flight() {
                tracing::debug!("submit ignored while a submission is in flight");
                return SubmitOutcome::Ignored;
            }
            flow.transition(SubmissionState::Validating);

            if let Some(first) = validate_form(form).into_iter().next() {
                flow.transition(SubmissionState::Idle);
                drop(flow);
                tracing::debug!(field = %first.field_name, "submit rejected by validation");
                inner.notifier.notify(first.message.clone(), NotificationKind::Error);
                return SubmitOutcome::Rejected(first);
            }

            flow.transition(SubmissionState::Submitting);
            let attempt = flow.next_attempt;
            flow.next_attempt += 1;
            flow.current = Some(attempt);
            attempt
        };

        inner.submit_control.set_loading(true);

        if let Some(timeout) = inner.config.timeout {
            let weak = Arc::downgrade(inner);
            let handle = inner.scheduler.schedule(
                timeout,
                Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.finish(attempt, Err(SubmissionError::Timeout));
                    }
                }),
            );
            let mut flow = inner.flow();
            if flow.current == Some(attempt) {
                flow.timeout = Some(handle);
            }
        }

        let weak: Weak<ControllerInner> = Arc::downgrade(inner);
        tracing::debug!(attempt, "submitting contact form");
        inner.transport.submit(
            form.clone(),
            Box::new(move |result| {
                if let Some(inner) = weak.upgrade() {
                    inner.finish(attempt, result);
                }
            }),
        );

        SubmitOutcome::Started
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SubmissionState {
        self.inner.flow().state
    }

    /// Whether a submission is waiting on the transport.
    pub fn is_in_flight(&self) -> bool {
        self.state().is_in_flight()
    }

    /// The submission settings.
    pub fn config(&self) -> &SubmissionConfig {
        &self.inner.config
    }
}
