//! Mock implementations for testing.
//!
//! This module provides test doubles for the ports: a virtual clock and
//! scheduler, recording render targets and a manually settled transport.

pub mod clock;
pub mod scheduler;
pub mod transport;
pub mod views;

pub use clock::MockClock;
pub use scheduler::MockScheduler;
pub use transport::ManualTransport;
pub use views::{
    FieldSnapshot, RecordingBarView, RecordingFieldView, RecordingFormView,
    RecordingLayoutView, RecordingModalView, RecordingNavView, RecordingPortfolioView,
    RecordingRippleView, RecordingSceneView, RecordingSubmitControl, RecordingSurface,
    RecordingTextView, SurfaceEvent,
};
