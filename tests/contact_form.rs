use portfolio_interactions::infrastructure::mocks::*;
use portfolio_interactions::{
    FieldErrorPresenter, FieldView, FieldVisualState, FormSnapshot, FormSubmissionController,
    FormView, NotificationKind, NotificationPresenter, NotifierConfig, SimulatedTransport,
    SubmissionConfig, SubmissionError, SubmissionState, SubmitOutcome, SubmissionTransport,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

fn valid_form() -> FormSnapshot {
    FormSnapshot::new()
        .with("name", "Lucía")
        .with("email", "lucia@example.com")
        .with("subject", "Sesión de fotos")
        .with("message", "Quisiera reservar una sesión en mayo.")
}

struct Setup {
    scheduler: MockScheduler,
    surface: RecordingSurface,
    button: RecordingSubmitControl,
    form_view: RecordingFormView,
    controller: FormSubmissionController,
}

fn setup(transport: Arc<dyn SubmissionTransport>, scheduler: MockScheduler) -> Setup {
    let surface = RecordingSurface::new();
    let button = RecordingSubmitControl::new();
    let form_view = RecordingFormView::new();
    let notifier = NotificationPresenter::new(
        Arc::new(surface.clone()),
        scheduler.clock(),
        scheduler.shared(),
        NotifierConfig::default(),
    )
    .unwrap();
    let controller = FormSubmissionController::new(
        transport,
        Arc::new(button.clone()),
        Arc::new(form_view.clone()),
        notifier,
        scheduler.shared(),
        SubmissionConfig::default(),
    )
    .unwrap();

    Setup {
        scheduler,
        surface,
        button,
        form_view,
        controller,
    }
}

fn latest_kind(surface: &RecordingSurface) -> Option<NotificationKind> {
    surface.displayed().last().map(|n| n.kind)
}

#[test]
fn test_invalid_form_reports_failures_in_field_order() {
    let form = FormSnapshot::new()
        .with("name", "A")
        .with("email", "bad")
        .with("subject", "hi")
        .with("message", "short");

    let failures = portfolio_interactions::validate_form(&form);
    let names: Vec<_> = failures.iter().map(|f| f.field_name.as_str()).collect();
    assert_eq!(names, ["name", "email", "subject", "message"]);

    let scheduler = MockScheduler::new();
    let transport = ManualTransport::new();
    let s = setup(Arc::new(transport.clone()), scheduler);

    assert!(matches!(
        s.controller.on_submit(&form),
        SubmitOutcome::Rejected(first) if first.field_name == "name"
    ));
    assert_eq!(transport.pending_count(), 0);
    assert_eq!(latest_kind(&s.surface), Some(NotificationKind::Error));
}

#[test]
fn test_simulated_submission_succeeds_after_latency() {
    let scheduler = MockScheduler::new();
    let transport = SimulatedTransport::builder(scheduler.shared())
        .success_rate(1.0)
        .build()
        .unwrap();
    let s = setup(Arc::new(transport), scheduler);

    assert_eq!(s.controller.on_submit(&valid_form()), SubmitOutcome::Started);
    assert!(s.button.is_loading());

    s.scheduler.advance(Duration::from_millis(1999));
    assert!(s.button.is_loading());
    assert!(s.surface.displayed().is_empty());

    s.scheduler.advance(Duration::from_millis(1));
    assert!(!s.button.is_loading());
    assert_eq!(latest_kind(&s.surface), Some(NotificationKind::Success));
    assert_eq!(s.form_view.field_resets(), 1);
    assert_eq!(s.form_view.label_resets(), 1);
}

#[test]
fn test_roughly_one_in_ten_submissions_fail() {
    let scheduler = MockScheduler::new();
    let transport = SimulatedTransport::builder(scheduler.shared())
        .seed(2024)
        .build()
        .unwrap();
    let s = setup(Arc::new(transport), scheduler);

    let trials = 1000;
    let mut failures = 0;
    for _ in 0..trials {
        assert_eq!(s.controller.on_submit(&valid_form()), SubmitOutcome::Started);
        s.scheduler.advance(Duration::from_millis(2000));

        assert!(!s.button.is_loading());
        if latest_kind(&s.surface) == Some(NotificationKind::Error) {
            failures += 1;
        }
    }

    assert!(
        (60..=140).contains(&failures),
        "expected about 100 failures out of {}, got {}",
        trials,
        failures
    );
    // Failed submissions leave the form untouched
    assert_eq!(s.form_view.field_resets(), trials - failures);
}

#[test]
fn test_hanging_transport_times_out() {
    let scheduler = MockScheduler::new();
    let transport = ManualTransport::new();
    let s = setup(Arc::new(transport.clone()), scheduler);

    s.controller.on_submit(&valid_form());
    assert_eq!(s.controller.on_submit(&valid_form()), SubmitOutcome::Ignored);

    s.scheduler.advance(Duration::from_secs(10));
    assert!(!s.button.is_loading());
    assert_eq!(latest_kind(&s.surface), Some(NotificationKind::Error));

    // The transport settling late changes nothing
    transport.complete_next(Ok(()));
    assert_eq!(s.form_view.field_resets(), 0);
    assert_eq!(s.surface.displayed().len(), 1);

    // And a new submission can start
    assert_eq!(s.controller.on_submit(&valid_form()), SubmitOutcome::Started);
}

/// Form view whose field reset blocks until the test lets it go.
#[derive(Debug)]
struct GatedFormView {
    entered: Arc<Barrier>,
    release: Arc<Barrier>,
}

impl FormView for GatedFormView {
    fn reset_fields(&self) {
        self.entered.wait();
        self.release.wait();
    }

    fn reset_labels(&self) {}
}

#[test]
fn test_submit_during_form_reset_keeps_one_submission_in_flight() {
    let scheduler = MockScheduler::new();
    let transport = ManualTransport::new();
    let entered = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));
    let notifier = NotificationPresenter::new(
        Arc::new(RecordingSurface::new()),
        scheduler.clock(),
        scheduler.shared(),
        NotifierConfig::default(),
    )
    .unwrap();
    let controller = FormSubmissionController::new(
        Arc::new(transport.clone()),
        Arc::new(RecordingSubmitControl::new()),
        Arc::new(GatedFormView {
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        }),
        notifier,
        scheduler.shared(),
        SubmissionConfig::default(),
    )
    .unwrap();

    assert_eq!(controller.on_submit(&valid_form()), SubmitOutcome::Started);
    let settle = {
        let transport = transport.clone();
        thread::spawn(move || transport.complete_next(Ok(())))
    };

    // The first attempt is resetting the form on the other thread
    entered.wait();
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.on_submit(&valid_form()), SubmitOutcome::Started);

    release.wait();
    assert!(settle.join().unwrap());

    assert!(controller.is_in_flight());
    assert_eq!(controller.on_submit(&valid_form()), SubmitOutcome::Ignored);
    assert_eq!(transport.pending_count(), 1);
    assert_eq!(transport.submitted().len(), 2);
}

#[test]
fn test_blur_shows_and_input_clears_field_error() {
    let presenter = FieldErrorPresenter::new();
    let email = RecordingFieldView::new();
    presenter.bind("email", Arc::new(email.clone()) as Arc<dyn FieldView>);

    let result = presenter.on_blur("email", "  no-es-email ").unwrap();
    assert!(!result.is_valid);
    assert_eq!(email.snapshot().visual_state, FieldVisualState::Invalid);
    assert_eq!(
        email.snapshot().annotation.as_deref(),
        Some("Por favor ingresa un email válido")
    );

    presenter.on_input("email").unwrap();
    assert_eq!(email.snapshot().visual_state, FieldVisualState::Neutral);
    assert_eq!(email.snapshot().annotation, None);

    assert!(presenter.on_blur("email", " ana@b.co ").unwrap().is_valid);
}

#[derive(Clone, Default)]
struct WarnCounter(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn test_failed_submission_is_logged_as_warning() {
    let warnings = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(warnings.clone());

    tracing::subscriber::with_default(subscriber, || {
        let scheduler = MockScheduler::new();
        let transport = ManualTransport::new();
        let s = setup(Arc::new(transport.clone()), scheduler);

        s.controller.on_submit(&valid_form());
        transport.complete_next(Err(SubmissionError::Network("offline".into())));
    });

    assert_eq!(warnings.0.load(Ordering::SeqCst), 1);
}
