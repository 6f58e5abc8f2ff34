//! Page-level wiring.
//!
//! A [`Page`] owns every interactive component of the portfolio page and
//! routes browser events (load, scroll, resize, intersections, menu and
//! filter clicks, form submits) to them. All components share one
//! [`PageContext`].

use crate::application::config::ConfigError;
use crate::application::dispatcher::{Debounced, Throttled};
use crate::application::effects::{Effects, ModalController, ScrollReveal};
use crate::application::field_errors::FieldErrorPresenter;
use crate::application::metrics::DispatchMetrics;
use crate::application::notifier::{NotificationPresenter, NotifierConfig};
use crate::application::ports::{
    Clock, FieldView, FormView, LayoutView, ModalView, NavView, NotificationSurface,
    PortfolioView, Scheduler, SceneView, SubmissionTransport, SubmitControl,
};
use crate::application::submission::{FormSubmissionController, SubmissionConfig, SubmitOutcome};
use crate::domain::animation::parallax_offset;
use crate::domain::field::FormSnapshot;
use crate::domain::navigation::{self, active_section, navbar_scrolled, LayoutMode, SectionBounds};
use crate::domain::policy::PolicyDecision;
use crate::domain::portfolio::{apply_filter, PortfolioFilter, PortfolioItem};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Error returned when building a [`Page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A component rejected its configuration
    Config(ConfigError),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Config(e) => write!(f, "invalid page configuration: {}", e),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Config(e) => Some(e),
        }
    }
}

impl From<ConfigError> for BuildError {
    fn from(e: ConfigError) -> Self {
        BuildError::Config(e)
    }
}

/// Time and scheduling capabilities shared by every component of a page.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Time source of the throttles and notification timestamps
    pub clock: Arc<dyn Clock>,
    /// Runs every deferred task of the page
    pub scheduler: Arc<dyn Scheduler>,
    /// Aggregated scroll and resize dispatch metrics
    pub metrics: DispatchMetrics,
}

impl PageContext {
    /// Create a context with fresh metrics.
    pub fn new(clock: Arc<dyn Clock>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            clock,
            scheduler,
            metrics: DispatchMetrics::new(),
        }
    }
}

/// Render targets and content of a page.
#[derive(Debug)]
pub struct PageBindings {
    /// Navigation bar, its links and the mobile menu
    pub nav: Arc<dyn NavView>,
    /// Viewport-dependent layout
    pub layout: Arc<dyn LayoutView>,
    /// Portfolio grid and its filter buttons
    pub portfolio: Arc<dyn PortfolioView>,
    /// Where notifications are stacked
    pub surface: Arc<dyn NotificationSurface>,
    /// Modal dialog host
    pub modals: Arc<dyn ModalView>,
    /// Destination of contact form submissions
    pub transport: Arc<dyn SubmissionTransport>,
    /// The contact form's submit button
    pub submit_control: Arc<dyn SubmitControl>,
    /// The contact form as a whole
    pub form: Arc<dyn FormView>,
    /// Form inputs by field name
    pub fields: Vec<(String, Arc<dyn FieldView>)>,
    /// Navigable sections, in document order
    pub sections: Vec<SectionBounds>,
    /// Portfolio grid items, in document order
    pub portfolio_items: Vec<PortfolioItem>,
    /// Decorative layer: reveals, floating shapes, particles
    pub scene: Arc<dyn SceneView>,
    /// Elements kept hidden until they scroll into view
    pub reveal_elements: Vec<String>,
    /// Number of floating shapes moved by parallax
    pub floating_shapes: usize,
}

/// Builder for [`Page`].
#[derive(Debug)]
pub struct PageBuilder {
    context: PageContext,
    scroll_throttle: Duration,
    resize_debounce: Duration,
    notifier_config: NotifierConfig,
    submission_config: SubmissionConfig,
    particle_seed: Option<u64>,
}

impl PageBuilder {
    /// Set the throttle window of the active-link update on scroll.
    ///
    /// Default: 100 milliseconds
    pub fn with_scroll_throttle(mut self, limit: Duration) -> Self {
        self.scroll_throttle = limit;
        self
    }

    /// Set the quiet period before a resize is handled.
    ///
    /// Default: 250 milliseconds
    pub fn with_resize_debounce(mut self, wait: Duration) -> Self {
        self.resize_debounce = wait;
        self
    }

    /// Set notification timing.
    pub fn with_notifier_config(mut self, config: NotifierConfig) -> Self {
        self.notifier_config = config;
        self
    }

    /// Set submission settings.
    pub fn with_submission_config(mut self, config: SubmissionConfig) -> Self {
        self.submission_config = config;
        self
    }

    /// Seed the particle placement for reproducible pages.
    ///
    /// Default: seeded from the OS
    pub fn with_particle_seed(mut self, seed: u64) -> Self {
        self.particle_seed = Some(seed);
        self
    }

    /// Wire the page onto `bindings`.
    ///
    /// # Errors
    /// Returns `BuildError::Config` if any duration is invalid.
    pub fn build(self, bindings: PageBindings) -> Result<Page, BuildError> {
        let PageContext {
            clock,
            scheduler,
            metrics,
        } = self.context.clone();

        let sections = Arc::new(bindings.sections);
        let scroll = {
            let nav = Arc::clone(&bindings.nav);
            let sections = Arc::clone(&sections);
            Throttled::new(
                Arc::new(move |scroll_y: f64| {
                    nav.set_active_link(active_section(&sections, scroll_y));
                }),
                self.scroll_throttle,
                Arc::clone(&clock),
                metrics.clone(),
            )?
        };

        let last_width: Arc<Mutex<Option<u32>>> = Arc::new(Mutex::new(None));
        let resize = {
            let layout = Arc::clone(&bindings.layout);
            let last_width = Arc::clone(&last_width);
            Debounced::new(
                Arc::new(move |width: u32| {
                    let changed = {
                        let mut last = last_width.lock().unwrap_or_else(PoisonError::into_inner);
                        let changed = *last != Some(width);
                        *last = Some(width);
                        changed
                    };
                    if changed {
                        layout.apply_layout(LayoutMode::for_width(width));
                    }
                }),
                self.resize_debounce,
                Arc::clone(&scheduler),
                metrics,
            )?
        };

        let notifier = NotificationPresenter::new(
            bindings.surface,
            clock,
            Arc::clone(&scheduler),
            self.notifier_config,
        )?;
        let submission = FormSubmissionController::new(
            bindings.transport,
            bindings.submit_control,
            bindings.form,
            notifier.clone(),
            Arc::clone(&scheduler),
            self.submission_config,
        )?;

        let fields = FieldErrorPresenter::new();
        for (name, view) in bindings.fields {
            fields.bind(name, view);
        }

        let reveal = ScrollReveal::new(Arc::clone(&bindings.scene), bindings.reveal_elements);

        tracing::debug!(
            sections = sections.len(),
            portfolio_items = bindings.portfolio_items.len(),
            hidden = reveal.hidden_count(),
            "page wired"
        );

        Ok(Page {
            context: self.context,
            nav: bindings.nav,
            portfolio: bindings.portfolio,
            sections,
            portfolio_items: bindings.portfolio_items,
            filter: Mutex::new(PortfolioFilter::All),
            last_width,
            scroll,
            resize,
            fields,
            submission,
            notifier,
            effects: Effects::new(Arc::clone(&scheduler)),
            modals: ModalController::new(bindings.modals, scheduler),
            scene: bindings.scene,
            floating_shapes: bindings.floating_shapes,
            reveal,
            particle_seed: self.particle_seed,
            loaded: AtomicBool::new(false),
            menu_open: AtomicBool::new(false),
        })
    }
}

/// The interactive portfolio page.
#[derive(Debug)]
pub struct Page {
    context: PageContext,
    nav: Arc<dyn NavView>,
    portfolio: Arc<dyn PortfolioView>,
    sections: Arc<Vec<SectionBounds>>,
    portfolio_items: Vec<PortfolioItem>,
    filter: Mutex<PortfolioFilter>,
    last_width: Arc<Mutex<Option<u32>>>,
    scroll: Throttled<f64>,
    resize: Debounced<u32>,
    fields: FieldErrorPresenter,
    submission: FormSubmissionController,
    notifier: NotificationPresenter,
    effects: Effects,
    modals: ModalController,
    scene: Arc<dyn SceneView>,
    floating_shapes: usize,
    reveal: ScrollReveal,
    particle_seed: Option<u64>,
    loaded: AtomicBool,
    menu_open: AtomicBool,
}

impl Page {
    /// Start building a page on `context`.
    ///
    /// # Example
    ///
    /// ```
    /// use portfolio_interactions::infrastructure::mocks::*;
    /// use portfolio_interactions::{Page, PageBindings, PageContext, SectionBounds};
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let scheduler = MockScheduler::new();
    /// let nav = RecordingNavView::new();
    /// let page = Page::builder(PageContext::new(scheduler.clock(), scheduler.shared()))
    ///     .with_scroll_throttle(Duration::from_millis(50))
    ///     .build(PageBindings {
    ///         nav: Arc::new(nav.clone()),
    ///         layout: Arc::new(RecordingLayoutView::new()),
    ///         portfolio: Arc::new(RecordingPortfolioView::new()),
    ///         surface: Arc::new(RecordingSurface::new()),
    ///         modals: Arc::new(RecordingModalView::new()),
    ///         transport: Arc::new(ManualTransport::new()),
    ///         submit_control: Arc::new(RecordingSubmitControl::new()),
    ///         form: Arc::new(RecordingFormView::new()),
    ///         fields: Vec::new(),
    ///         sections: vec![SectionBounds::new("inicio", 0.0, 800.0)],
    ///         portfolio_items: Vec::new(),
    ///         scene: Arc::new(RecordingSceneView::new()),
    ///         reveal_elements: Vec::new(),
    ///         floating_shapes: 0,
    ///     })
    ///     .unwrap();
    ///
    /// page.on_scroll(120.0);
    /// assert!(nav.is_scrolled());
    /// assert_eq!(nav.active_link().as_deref(), Some("inicio"));
    /// ```
    pub fn builder(context: PageContext) -> PageBuilder {
        PageBuilder {
            context,
            scroll_throttle: Duration::from_millis(100),
            resize_debounce: Duration::from_millis(250),
            notifier_config: NotifierConfig::default(),
            submission_config: SubmissionConfig::default(),
            particle_seed: None,
        }
    }

    /// Load handler: scatter the background particles.
    ///
    /// Runs once per page. Returns how many particles were added, none on
    /// mobile viewports.
    pub fn on_load(&self, viewport_width: u32, viewport_height: u32) -> usize {
        if self.loaded.swap(true, Ordering::SeqCst) {
            return 0;
        }
        let mut rng = match self.particle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let spawned = self.effects.spawn_particles(
            self.scene.as_ref(),
            viewport_width,
            viewport_height,
            &mut rng,
        );
        tracing::debug!(viewport_width, spawned, "page loaded");
        spawned
    }

    /// Scroll handler.
    ///
    /// The navbar style and the floating shapes follow every event; the
    /// active link is recomputed at most once per throttle window.
    pub fn on_scroll(&self, scroll_y: f64) -> PolicyDecision {
        self.nav.set_scrolled(navbar_scrolled(scroll_y));
        for index in 0..self.floating_shapes {
            self.scene
                .set_shape_offset(index, parallax_offset(scroll_y, index));
        }
        self.scroll.call(scroll_y)
    }

    /// An element scrolled into view. Reveals it if it was hidden.
    pub fn on_intersect(&self, element_id: &str) -> bool {
        self.reveal.on_intersect(element_id)
    }

    /// Hamburger click: open or close the mobile menu.
    ///
    /// Returns whether the menu is now open.
    pub fn toggle_menu(&self) -> bool {
        let open = !self.menu_open.fetch_xor(true, Ordering::SeqCst);
        self.nav.set_menu_open(open);
        open
    }

    /// Whether the mobile menu is open.
    pub fn is_menu_open(&self) -> bool {
        self.menu_open.load(Ordering::SeqCst)
    }

    /// Nav link click: close the mobile menu and return where to scroll.
    pub fn on_nav_link(&self, section_id: &str) -> Option<f64> {
        self.menu_open.store(false, Ordering::SeqCst);
        self.nav.set_menu_open(false);
        self.scroll_target(section_id)
    }

    /// Resize handler. The layout is applied once resizing pauses.
    pub fn on_resize(&self, width: u32) {
        self.resize.call(width);
    }

    /// Smooth-scroll destination for a nav link, below the fixed navbar.
    ///
    /// Returns `None` for an unknown section.
    pub fn scroll_target(&self, section_id: &str) -> Option<f64> {
        self.sections
            .iter()
            .find(|section| section.id == section_id)
            .map(|section| navigation::scroll_target(section.top))
    }

    /// Show the portfolio items matching `filter` and hide the rest.
    pub fn select_filter(&self, filter: &str) -> PortfolioFilter {
        let filter = PortfolioFilter::parse(filter);
        self.portfolio.set_active_filter(&filter.to_string());
        for (item, visible) in apply_filter(&filter, &self.portfolio_items) {
            self.portfolio.set_item_visible(&item.id, visible);
        }
        tracing::debug!(%filter, "portfolio filter applied");
        *lock(&self.filter) = filter.clone();
        filter
    }

    /// The portfolio filter last selected.
    pub fn current_filter(&self) -> PortfolioFilter {
        lock(&self.filter).clone()
    }

    /// Viewport width the layout was last applied for.
    pub fn viewport_width(&self) -> Option<u32> {
        *lock(&self.last_width)
    }

    /// Submit handler of the contact form.
    pub fn on_submit(&self, form: &FormSnapshot) -> SubmitOutcome {
        self.submission.on_submit(form)
    }

    /// Tear the page down: drop the pending resize and every notification.
    pub fn unload(&self) {
        self.resize.cancel();
        self.notifier.clear();
        tracing::debug!("page unloaded");
    }

    /// The context shared by every component.
    pub fn context(&self) -> &PageContext {
        &self.context
    }

    /// Aggregated scroll and resize dispatch metrics.
    pub fn metrics(&self) -> &DispatchMetrics {
        &self.context.metrics
    }

    /// Inline field errors of the contact form.
    pub fn fields(&self) -> &FieldErrorPresenter {
        &self.fields
    }

    /// The contact form submission flow.
    pub fn submission(&self) -> &FormSubmissionController {
        &self.submission
    }

    pub fn notifier(&self) -> &NotificationPresenter {
        &self.notifier
    }

    /// Scroll reveal of hidden elements.
    pub fn reveal(&self) -> &ScrollReveal {
        &self.reveal
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn modals(&self) -> &ModalController {
        &self.modals
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::NotificationKind;
    use crate::infrastructure::mocks::*;

    struct Fixture {
        scheduler: MockScheduler,
        nav: RecordingNavView,
        layout: RecordingLayoutView,
        portfolio: RecordingPortfolioView,
        surface: RecordingSurface,
        scene: RecordingSceneView,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                scheduler: MockScheduler::new(),
                nav: RecordingNavView::new(),
                layout: RecordingLayoutView::new(),
                portfolio: RecordingPortfolioView::new(),
                surface: RecordingSurface::new(),
                scene: RecordingSceneView::new(),
            }
        }

        fn context(&self) -> PageContext {
            PageContext::new(self.scheduler.clock(), self.scheduler.shared())
        }

        fn bindings(&self) -> PageBindings {
            PageBindings {
                nav: Arc::new(self.nav.clone()),
                layout: Arc::new(self.layout.clone()),
                portfolio: Arc::new(self.portfolio.clone()),
                surface: Arc::new(self.surface.clone()),
                modals: Arc::new(RecordingModalView::new()),
                transport: Arc::new(ManualTransport::new()),
                submit_control: Arc::new(RecordingSubmitControl::new()),
                form: Arc::new(RecordingFormView::new()),
                fields: vec![("name".to_string(), Arc::new(RecordingFieldView::new()) as Arc<dyn FieldView>)],
                sections: vec![
                    SectionBounds::new("inicio", 0.0, 700.0),
                    SectionBounds::new("sobre-mi", 700.0, 900.0),
                    SectionBounds::new("portafolio", 1600.0, 1200.0),
                ],
                portfolio_items: vec![
                    PortfolioItem::new("p1", "web"),
                    PortfolioItem::new("p2", "mobile"),
                    PortfolioItem::new("p3", "web"),
                ],
                scene: Arc::new(self.scene.clone()),
                reveal_elements: vec!["about-text".to_string(), "p1".to_string()],
                floating_shapes: 3,
            }
        }

        fn page(&self) -> Page {
            Page::builder(self.context()).build(self.bindings()).unwrap()
        }
    }

    #[test]
    fn test_scroll_updates_active_link_throttled() {
        let fx = Fixture::new();
        let page = fx.page();

        assert!(page.on_scroll(650.0).is_allow());
        assert_eq!(fx.nav.active_link().as_deref(), Some("sobre-mi"));

        fx.scheduler.advance(Duration::from_millis(50));
        assert!(page.on_scroll(1550.0).is_suppress());
        assert_eq!(fx.nav.active_link().as_deref(), Some("sobre-mi"));
        assert!(fx.nav.is_scrolled());

        fx.scheduler.advance(Duration::from_millis(50));
        assert!(page.on_scroll(1550.0).is_allow());
        assert_eq!(fx.nav.active_link().as_deref(), Some("portafolio"));
        assert_eq!(fx.nav.link_updates(), 2);
    }

    #[test]
    fn test_parallax_follows_every_scroll() {
        let fx = Fixture::new();
        let page = fx.page();

        page.on_scroll(100.0);
        page.on_scroll(200.0);

        assert_eq!(fx.scene.shape_offset(0), Some(-100.0));
        assert!((fx.scene.shape_offset(2).unwrap() + 180.0).abs() < 1e-9);
        assert_eq!(fx.scene.shape_offset(3), None);
    }

    #[test]
    fn test_menu_toggle_and_link_close() {
        let fx = Fixture::new();
        let page = fx.page();

        assert!(page.toggle_menu());
        assert!(fx.nav.is_menu_open());
        assert!(!page.toggle_menu());
        assert!(!fx.nav.is_menu_open());

        page.toggle_menu();
        assert_eq!(page.on_nav_link("sobre-mi"), Some(630.0));
        assert!(!page.is_menu_open());
        assert!(!fx.nav.is_menu_open());
    }

    #[test]
    fn test_reveal_elements_start_hidden() {
        let fx = Fixture::new();
        let page = fx.page();

        assert!(fx.scene.is_hidden("about-text"));
        assert!(page.on_intersect("about-text"));
        assert!(fx.scene.is_revealed("about-text"));
        assert!(!page.on_intersect("about-text"));
        assert_eq!(page.reveal().hidden_count(), 1);
    }

    #[test]
    fn test_particles_spawn_once_on_desktop_load() {
        let fx = Fixture::new();
        let page = Page::builder(fx.context())
            .with_particle_seed(5)
            .build(fx.bindings())
            .unwrap();

        assert_eq!(page.on_load(1280, 800), 15);
        assert_eq!(page.on_load(1280, 800), 0);
        assert_eq!(fx.scene.particles().len(), 15);

        let mobile = Fixture::new();
        let page = mobile.page();
        assert_eq!(page.on_load(375, 667), 0);
        assert!(mobile.scene.particles().is_empty());
    }

    #[test]
    fn test_navbar_style_follows_every_scroll() {
        let fx = Fixture::new();
        let page = fx.page();

        page.on_scroll(80.0);
        assert!(fx.nav.is_scrolled());
        page.on_scroll(10.0);
        assert!(!fx.nav.is_scrolled());
    }

    #[test]
    fn test_resize_is_debounced_and_deduplicated() {
        let fx = Fixture::new();
        let page = fx.page();

        page.on_resize(1200);
        fx.scheduler.advance(Duration::from_millis(100));
        page.on_resize(700);
        fx.scheduler.advance(Duration::from_millis(249));
        assert!(fx.layout.applied().is_empty());

        fx.scheduler.advance(Duration::from_millis(1));
        assert_eq!(fx.layout.applied(), vec![LayoutMode::Mobile]);
        assert_eq!(page.viewport_width(), Some(700));

        page.on_resize(700);
        fx.scheduler.advance(Duration::from_millis(250));
        assert_eq!(fx.layout.applied().len(), 1);

        let snapshot = page.metrics().snapshot();
        assert_eq!(snapshot.calls_received, 3);
        assert_eq!(snapshot.calls_fired, 2);
    }

    #[test]
    fn test_filter_hides_other_categories() {
        let fx = Fixture::new();
        let page = fx.page();

        page.select_filter("web");
        assert_eq!(fx.portfolio.active_filter().as_deref(), Some("web"));
        assert!(fx.portfolio.is_visible("p1"));
        assert!(!fx.portfolio.is_visible("p2"));
        assert!(fx.portfolio.is_visible("p3"));

        assert_eq!(page.select_filter("all"), PortfolioFilter::All);
        assert!(fx.portfolio.is_visible("p2"));
        assert_eq!(page.current_filter(), PortfolioFilter::All);
    }

    #[test]
    fn test_scroll_target_offsets_navbar() {
        let fx = Fixture::new();
        let page = fx.page();

        assert_eq!(page.scroll_target("sobre-mi"), Some(630.0));
        assert_eq!(page.scroll_target("inicio"), Some(0.0));
        assert_eq!(page.scroll_target("blog"), None);
    }

    #[test]
    fn test_unload_cancels_pending_work() {
        let fx = Fixture::new();
        let page = fx.page();

        page.on_resize(500);
        page.notifier().notify("hola", NotificationKind::Info);
        page.unload();

        assert_eq!(fx.scheduler.pending_count(), 0);
        assert!(fx.surface.displayed().is_empty());
        fx.scheduler.advance(Duration::from_secs(1));
        assert!(fx.layout.applied().is_empty());
    }

    #[test]
    fn test_fields_are_bound() {
        let fx = Fixture::new();
        let page = fx.page();
        assert!(page.fields().is_bound("name"));
        assert!(!page.fields().is_bound("email"));
    }

    #[test]
    fn test_invalid_durations_fail_build() {
        let fx = Fixture::new();
        let result = Page::builder(fx.context())
            .with_resize_debounce(Duration::ZERO)
            .build(fx.bindings());

        assert!(matches!(
            result,
            Err(BuildError::Config(ConfigError::ZeroDuration(_)))
        ));
    }
}
