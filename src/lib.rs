//! # portfolio-interactions
//!
//! Interaction logic of a single-page portfolio: rate-limited scroll and resize
//! handling, client-side contact form validation, the submission flow with
//! loading state and notifications, and the page's decorative effects.
//!
//! The crate never touches a document tree. Every visible effect goes through a
//! small port trait (`NavView`, `FieldView`, `NotificationSurface`, ...) and all
//! deferred work goes through an injected [`Scheduler`], so the whole page runs
//! deterministically on a virtual clock in tests.
//!
//! ## Quick Start
//!
//! ```rust
//! use portfolio_interactions::infrastructure::mocks::*;
//! use portfolio_interactions::{
//!     FormSnapshot, NotificationKind, Page, PageBindings, PageContext, SubmitOutcome,
//! };
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let scheduler = MockScheduler::new();
//! let transport = ManualTransport::new();
//! let surface = RecordingSurface::new();
//!
//! let page = Page::builder(PageContext::new(scheduler.clock(), scheduler.shared()))
//!     .build(PageBindings {
//!         nav: Arc::new(RecordingNavView::new()),
//!         layout: Arc::new(RecordingLayoutView::new()),
//!         portfolio: Arc::new(RecordingPortfolioView::new()),
//!         surface: Arc::new(surface.clone()),
//!         modals: Arc::new(RecordingModalView::new()),
//!         transport: Arc::new(transport.clone()),
//!         submit_control: Arc::new(RecordingSubmitControl::new()),
//!         form: Arc::new(RecordingFormView::new()),
//!         fields: Vec::new(),
//!         sections: Vec::new(),
//!         portfolio_items: Vec::new(),
//!         scene: Arc::new(RecordingSceneView::new()),
//!         reveal_elements: Vec::new(),
//!         floating_shapes: 0,
//!     })
//!     .unwrap();
//!
//! let form = FormSnapshot::new()
//!     .with("name", "Ana")
//!     .with("email", "ana@example.com")
//!     .with("subject", "Consulta")
//!     .with("message", "Me gustaría hablar de un proyecto.");
//!
//! assert_eq!(page.on_submit(&form), SubmitOutcome::Started);
//! transport.complete_next(Ok(()));
//! assert_eq!(surface.displayed()[0].kind, NotificationKind::Success);
//!
//! // Notifications leave on their own
//! scheduler.advance(Duration::from_millis(5300));
//! assert!(surface.displayed().is_empty());
//! ```
//!
//! ## Features
//!
//! ### Rate-Limited Dispatch
//! - **Debounce**: run only the last call of a burst, once calls pause
//! - **Throttle**: run the first call of each window, drop the rest
//! - **Metrics**: received, fired and suppressed call counts
//!
//! ### Contact Form
//! - **Validation**: pure per-field rules with user-facing messages
//! - **Inline errors**: one annotation per field, idempotent clearing
//! - **Submission**: loading state, timeout, single submission in flight
//! - **Notifications**: stacked, self-dismissing, independently timed
//!
//! ### Effects
//! - Animated counters and skill bars, each run once per element
//! - Typewriter text and modal dialogs
//! - Click ripples, parallax shapes and background particles
//! - Scroll reveal of hidden elements and the mobile menu
//!
//! ## Scheduling
//!
//! Production code uses `TokioScheduler` (feature `async`). Tests use
//! `MockScheduler` (feature `test-helpers`), whose `advance` runs every task
//! that falls due, in order, with the clock set to the task's due time.
//!
//! A panicking task is caught and logged at `error` level; it never takes the
//! page down.
//!
//! ## Validation Rules
//!
//! | Field | Rule | Message |
//! |-------|------|---------|
//! | `name` | at least 2 characters | El nombre debe tener al menos 2 caracteres |
//! | `email` | `local@domain.tld` shape | Por favor ingresa un email válido |
//! | `subject` | at least 5 characters | El asunto debe tener al menos 5 caracteres |
//! | `message` | at least 10 characters | El mensaje debe tener al menos 10 caracteres |
//!
//! Values are trimmed before checking and lengths count characters.

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    animation::{Particle, Rect, Ripple},
    field::{FormFieldSpec, FormSnapshot, CONTACT_FORM_FIELDS},
    navigation::{LayoutMode, SectionBounds},
    notification::{Notification, NotificationId, NotificationKind},
    policy::{PolicyDecision, ThrottleWindow},
    portfolio::{PortfolioFilter, PortfolioItem},
    submission::{SubmissionError, SubmissionState},
    validation::{validate, validate_form, ValidationResult},
};

pub use application::{
    config::ConfigError,
    dispatcher::{debounce, throttle, Action, Debounced, Throttled},
    effects::{Animation, Effects, ModalController, ScrollReveal},
    field_errors::{FieldErrorPresenter, PresenterError},
    metrics::{DispatchMetrics, MetricsSnapshot},
    notifier::{NotificationPresenter, NotifierConfig},
    page::{BuildError, Page, PageBindings, PageBuilder, PageContext},
    ports::{
        BarView, Clock, Completion, FieldView, FieldVisualState, FormView, LabelState, LayoutView,
        ModalView, NavView, NotificationSurface, PortfolioView, RippleView, SceneView, Scheduler,
        SubmissionTransport, SubmitControl, Task, TextView, TimerHandle,
    },
    submission::{FormSubmissionController, SubmissionConfig, SubmitOutcome},
};

pub use infrastructure::{
    clock::SystemClock,
    transport::{SimulatedTransport, SimulatedTransportBuilder},
};

#[cfg(feature = "async")]
pub use infrastructure::scheduler::TokioScheduler;
