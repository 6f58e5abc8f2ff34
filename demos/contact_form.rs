//! Contact form demo running on tokio timers.
//!
//! Render targets print to the terminal. Run with
//! `RUST_LOG=portfolio_interactions=debug` to see the component logs.

use portfolio_interactions::{
    FieldErrorPresenter, FieldView, FieldVisualState, FormSnapshot, FormSubmissionController,
    FormView, LabelState, Notification, NotificationId, NotificationPresenter,
    NotificationSurface, NotifierConfig, SimulatedTransport, SubmissionConfig, SubmitControl,
    SystemClock, TokioScheduler,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct ConsoleField(&'static str);

impl FieldView for ConsoleField {
    fn set_visual_state(&self, state: FieldVisualState) {
        println!("  [{}] {:?}", self.0, state);
    }

    fn attach_annotation(&self) {}

    fn set_annotation_text(&self, text: &str) {
        println!("  [{}] ⚠ {}", self.0, text);
    }

    fn detach_annotation(&self) {}

    fn set_label_state(&self, _state: LabelState) {}
}

#[derive(Debug)]
struct ConsoleForm;

impl FormView for ConsoleForm {
    fn reset_fields(&self) {
        println!("  [form] fields cleared");
    }

    fn reset_labels(&self) {}
}

impl SubmitControl for ConsoleForm {
    fn set_loading(&self, loading: bool) {
        println!("  [button] {}", if loading { "Enviando..." } else { "Enviar mensaje" });
    }
}

#[derive(Debug)]
struct ConsoleSurface;

impl NotificationSurface for ConsoleSurface {
    fn render(&self, notification: &Notification) {
        println!(
            "  [{}] {} {}",
            notification.id,
            notification.kind.icon(),
            notification.message
        );
    }

    fn slide_in(&self, _id: NotificationId) {}

    fn slide_out(&self, id: NotificationId) {
        println!("  [{}] leaving", id);
    }

    fn remove(&self, _id: NotificationId) {}
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let Some(scheduler) = TokioScheduler::try_current() else {
        eprintln!("no tokio runtime");
        return;
    };
    let scheduler = Arc::new(scheduler);

    let notifier = match NotificationPresenter::new(
        Arc::new(ConsoleSurface),
        Arc::new(SystemClock::new()),
        scheduler.clone(),
        NotifierConfig::new(Duration::from_millis(1500), Duration::from_millis(300))
            .unwrap_or_default(),
    ) {
        Ok(notifier) => notifier,
        Err(e) => {
            eprintln!("notifier: {}", e);
            return;
        }
    };

    let transport = SimulatedTransport::builder(scheduler.clone())
        .latency(Duration::from_millis(500))
        .seed(3)
        .build();
    let controller = transport
        .and_then(|transport| {
            FormSubmissionController::new(
                Arc::new(transport),
                Arc::new(ConsoleForm),
                Arc::new(ConsoleForm),
                notifier.clone(),
                scheduler.clone(),
                SubmissionConfig::default(),
            )
        });
    let controller = match controller {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("controller: {}", e);
            return;
        }
    };

    let fields = FieldErrorPresenter::new();
    for name in ["name", "email", "subject", "message"] {
        fields.bind(name, Arc::new(ConsoleField(name)));
    }

    println!("=== Inline validation ===");
    for (name, value) in [("name", "A"), ("email", "ana@"), ("email", "ana@example.com")] {
        if let Err(e) = fields.on_blur(name, value) {
            eprintln!("{}", e);
        }
    }

    println!("\n=== Invalid submit ===");
    let draft = FormSnapshot::new().with("name", "Ana").with("email", "ana@example.com");
    println!("  -> {:?}", controller.on_submit(&draft));

    println!("\n=== Submissions ===");
    let form = FormSnapshot::new()
        .with("name", "Ana")
        .with("email", "ana@example.com")
        .with("subject", "Sesión de fotos")
        .with("message", "Me gustaría reservar una sesión en junio.");

    for attempt in 1..=5 {
        println!("attempt {}: {:?}", attempt, controller.on_submit(&form));
        println!("  again right away: {:?}", controller.on_submit(&form));
        tokio::time::sleep(Duration::from_millis(700)).await;
    }

    tokio::time::sleep(Duration::from_secs(2)).await;
    println!("\nactive notifications: {}", notifier.active_count());
}
