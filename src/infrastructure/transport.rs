//! Simulated network transport.
//!
//! Stands in for a real mail endpoint: every submission settles after a fixed
//! latency and succeeds with a configurable probability.

use crate::application::config::{non_zero, ConfigError};
use crate::application::ports::{Completion, Scheduler, SubmissionTransport};
use crate::domain::field::FormSnapshot;
use crate::domain::submission::SubmissionError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Reason reported for simulated failures.
pub const SIMULATED_FAILURE: &str = "Error de red simulado";

/// Builder for [`SimulatedTransport`].
#[derive(Debug)]
pub struct SimulatedTransportBuilder {
    scheduler: Arc<dyn Scheduler>,
    latency: Duration,
    success_rate: f64,
    seed: Option<u64>,
}

impl SimulatedTransportBuilder {
    /// Set how long each submission takes to settle.
    ///
    /// Default: 2 seconds
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Set the probability of success, in `0.0..=1.0`.
    ///
    /// Default: 0.9
    pub fn success_rate(mut self, success_rate: f64) -> Self {
        self.success_rate = success_rate;
        self
    }

    /// Seed the random source for reproducible outcomes.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroDuration` for a zero latency, or
    /// `ConfigError::InvalidProbability` for a success rate outside `0.0..=1.0`.
    pub fn build(self) -> Result<SimulatedTransport, ConfigError> {
        let latency = non_zero("latency", self.latency)?;
        if !(0.0..=1.0).contains(&self.success_rate) {
            return Err(ConfigError::InvalidProbability("success_rate"));
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(SimulatedTransport {
            scheduler: self.scheduler,
            latency,
            success_rate: self.success_rate,
            rng: Arc::new(Mutex::new(rng)),
        })
    }
}

/// Transport that settles on the scheduler after a fixed latency.
///
/// The outcome is drawn when the form is submitted, so a seeded transport
/// yields the same sequence of outcomes regardless of timing.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    scheduler: Arc<dyn Scheduler>,
    latency: Duration,
    success_rate: f64,
    rng: Arc<Mutex<StdRng>>,
}

impl SimulatedTransport {
    /// Start building a transport that schedules on `scheduler`.
    pub fn builder(scheduler: Arc<dyn Scheduler>) -> SimulatedTransportBuilder {
        SimulatedTransportBuilder {
            scheduler,
            latency: Duration::from_millis(2000),
            success_rate: 0.9,
            seed: None,
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }

    fn draw(&self) -> Result<(), SubmissionError> {
        let success = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_bool(self.success_rate);
        if success {
            Ok(())
        } else {
            Err(SubmissionError::Network(SIMULATED_FAILURE.to_string()))
        }
    }
}

impl SubmissionTransport for SimulatedTransport {
    fn submit(&self, form: FormSnapshot, on_complete: Completion) {
        let outcome = self.draw();
        tracing::trace!(fields = form.len(), ok = outcome.is_ok(), "simulated submission queued");
        self.scheduler
            .schedule(self.latency, Box::new(move || on_complete(outcome)));
    }
}
