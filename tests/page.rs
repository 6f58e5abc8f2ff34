use portfolio_interactions::infrastructure::mocks::*;
use portfolio_interactions::{
    FieldView, FormSnapshot, LayoutMode, NotificationKind, Page, PageBindings, PageContext,
    PortfolioItem, Rect, SectionBounds, SubmissionConfig, SubmitOutcome,
};
use std::sync::Arc;
use std::time::Duration;

struct Site {
    scheduler: MockScheduler,
    nav: RecordingNavView,
    layout: RecordingLayoutView,
    portfolio: RecordingPortfolioView,
    surface: RecordingSurface,
    modal_view: RecordingModalView,
    transport: ManualTransport,
    name_field: RecordingFieldView,
    scene: RecordingSceneView,
    page: Page,
}

fn site() -> Site {
    let scheduler = MockScheduler::new();
    let nav = RecordingNavView::new();
    let layout = RecordingLayoutView::new();
    let portfolio = RecordingPortfolioView::new();
    let surface = RecordingSurface::new();
    let modal_view = RecordingModalView::new();
    let transport = ManualTransport::new();
    let name_field = RecordingFieldView::new();
    let scene = RecordingSceneView::new();

    let page = Page::builder(PageContext::new(scheduler.clock(), scheduler.shared()))
        .with_submission_config(SubmissionConfig::new(Some(Duration::from_secs(5))).unwrap())
        .with_particle_seed(42)
        .build(PageBindings {
            nav: Arc::new(nav.clone()),
            layout: Arc::new(layout.clone()),
            portfolio: Arc::new(portfolio.clone()),
            surface: Arc::new(surface.clone()),
            modals: Arc::new(modal_view.clone()),
            transport: Arc::new(transport.clone()),
            submit_control: Arc::new(RecordingSubmitControl::new()),
            form: Arc::new(RecordingFormView::new()),
            fields: vec![(
                "name".to_string(),
                Arc::new(name_field.clone()) as Arc<dyn FieldView>,
            )],
            sections: vec![
                SectionBounds::new("inicio", 0.0, 800.0),
                SectionBounds::new("sobre-mi", 800.0, 600.0),
                SectionBounds::new("portafolio", 1400.0, 1000.0),
                SectionBounds::new("contacto", 2400.0, 700.0),
            ],
            portfolio_items: vec![
                PortfolioItem::new("boda-1", "bodas"),
                PortfolioItem::new("retrato-1", "retratos"),
                PortfolioItem::new("boda-2", "bodas"),
            ],
            scene: Arc::new(scene.clone()),
            reveal_elements: vec![
                "about-text".to_string(),
                "about-image".to_string(),
                "boda-1".to_string(),
            ],
            floating_shapes: 4,
        })
        .unwrap();

    Site {
        scheduler,
        nav,
        layout,
        portfolio,
        surface,
        modal_view,
        transport,
        name_field,
        scene,
        page,
    }
}

#[test]
fn test_active_section_follows_scroll() {
    let s = site();

    let positions = [(0.0, "inicio"), (750.0, "sobre-mi"), (1350.0, "portafolio"), (2350.0, "contacto")];
    for (scroll_y, expected) in positions {
        s.page.on_scroll(scroll_y);
        assert_eq!(s.nav.active_link().as_deref(), Some(expected));
        s.scheduler.advance(Duration::from_millis(100));
    }
    assert!(s.nav.is_scrolled());

    s.page.on_scroll(5000.0);
    assert_eq!(s.nav.active_link(), None);
}

#[test]
fn test_scroll_burst_updates_link_once_per_window() {
    let s = site();

    for step in 0..10 {
        s.page.on_scroll(f64::from(step) * 10.0);
        s.scheduler.advance(Duration::from_millis(16));
    }

    // Calls at 0, 112 ms are the only ones opening a window
    assert_eq!(s.nav.link_updates(), 2);
    assert_eq!(s.page.metrics().calls_suppressed(), 8);
}

#[test]
fn test_resize_applies_layout_after_quiet_period() {
    let s = site();

    for width in [1280, 1000, 760] {
        s.page.on_resize(width);
        s.scheduler.advance(Duration::from_millis(50));
    }
    assert!(s.layout.applied().is_empty());

    s.scheduler.advance(Duration::from_millis(200));
    assert_eq!(s.layout.applied(), vec![LayoutMode::Mobile]);

    s.page.on_resize(1440);
    s.scheduler.advance(Duration::from_millis(250));
    assert_eq!(s.layout.applied(), vec![LayoutMode::Mobile, LayoutMode::Desktop]);
}

#[test]
fn test_portfolio_filtering() {
    let s = site();

    s.page.select_filter("retratos");
    assert!(!s.portfolio.is_visible("boda-1"));
    assert!(s.portfolio.is_visible("retrato-1"));
    assert!(!s.portfolio.is_visible("boda-2"));

    s.page.select_filter("all");
    assert!(s.portfolio.is_visible("boda-1"));
    assert_eq!(s.portfolio.active_filter().as_deref(), Some("all"));
}

#[test]
fn test_contact_flow_through_page() {
    let s = site();

    s.page.fields().on_focus("name").unwrap();
    s.page.fields().on_blur("name", "J").unwrap();
    assert!(s.name_field.snapshot().annotation.is_some());

    let form = FormSnapshot::new()
        .with("name", "Jorge")
        .with("email", "jorge@example.com")
        .with("subject", "Presupuesto")
        .with("message", "¿Cuánto cuesta una sesión familiar?");
    s.page.fields().on_input("name").unwrap();
    assert!(s.name_field.snapshot().annotation.is_none());

    assert_eq!(s.page.on_submit(&form), SubmitOutcome::Started);
    s.scheduler.advance(Duration::from_secs(5));

    assert!(!s.page.submission().is_in_flight());
    assert_eq!(
        s.surface.displayed().last().map(|n| n.kind),
        Some(NotificationKind::Error)
    );
    assert_eq!(s.transport.submitted().len(), 1);
}

#[test]
fn test_effects_and_modals_share_the_page_scheduler() {
    let s = site();
    let counter = RecordingTextView::new();
    let title = RecordingTextView::new();

    s.page.effects().animate_counter(Arc::new(counter.clone()), 120);
    s.page.effects().type_text(Arc::new(title.clone()), "Hola");
    s.page.modals().open("boda-1");

    s.scheduler.advance(Duration::from_millis(1300));
    assert_eq!(title.text(), "Hola");
    assert!(s.modal_view.is_scroll_locked());

    assert!(s.page.modals().close("boda-1"));
    s.scheduler.advance(Duration::from_millis(700));
    assert_eq!(counter.text(), "120");
    assert!(!s.modal_view.is_displayed("boda-1"));
    assert!(!s.modal_view.is_scroll_locked());

    s.scheduler.advance(Duration::from_millis(1000));
    assert!(!title.cursor_visible());
}

#[test]
fn test_unload_clears_notifications() {
    let s = site();
    s.page.notifier().notify("Bienvenido", NotificationKind::Info);
    s.page.on_resize(600);

    s.page.unload();

    assert!(s.surface.displayed().is_empty());
    s.scheduler.advance(Duration::from_secs(1));
    assert!(s.layout.applied().is_empty());
}

#[test]
fn test_scrolling_down_the_page_reveals_and_moves_shapes() {
    let s = site();
    assert_eq!(s.page.on_load(1920, 1080), 15);
    assert!(s.scene.is_hidden("about-image"));

    s.page.on_scroll(300.0);
    assert!(s.page.on_intersect("about-text"));
    assert!(s.page.on_intersect("about-image"));
    assert!(!s.page.on_intersect("about-text"));

    assert!(s.scene.is_revealed("about-image"));
    assert!(s.scene.is_hidden("boda-1"));
    assert_eq!(s.scene.shape_offset(0), Some(-150.0));
    assert!((s.scene.shape_offset(3).unwrap() + 330.0).abs() < 1e-9);
}

#[test]
fn test_mobile_menu_closes_on_navigation() {
    let s = site();

    assert!(s.page.toggle_menu());
    assert!(s.nav.is_menu_open());

    assert_eq!(s.page.on_nav_link("contacto"), Some(2330.0));
    assert!(!s.nav.is_menu_open());
    assert_eq!(s.page.on_nav_link("blog"), None);
}

#[test]
fn test_counters_and_ripples_on_the_page_clock() {
    let s = site();
    let stat = RecordingTextView::new();
    let button = RecordingRippleView::new();

    assert!(s.page.effects().start_counter("bodas", Arc::new(stat.clone()), 250).is_some());
    assert!(s.page.effects().start_counter("bodas", Arc::new(stat.clone()), 250).is_none());

    s.page.effects().ripple(
        Arc::new(button.clone()),
        Rect {
            x: 0.0,
            y: 0.0,
            width: 160.0,
            height: 48.0,
        },
        80.0,
        24.0,
    );
    assert_eq!(button.active().len(), 1);

    s.scheduler.advance(Duration::from_millis(600));
    assert!(button.active().is_empty());

    s.scheduler.advance(Duration::from_millis(1400));
    assert_eq!(stat.text(), "250");
    assert_eq!(stat.history().len(), 50);
}
