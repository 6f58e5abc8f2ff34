//! Recording render targets for testing.
//!
//! Each view records what the application asked it to do, so tests can
//! assert on the visible outcome without a document tree.

use crate::application::ports::{
    BarView, FieldView, FieldVisualState, FormView, LabelState, LayoutView, ModalView, NavView,
    NotificationSurface, PortfolioView, RippleView, SceneView, SubmitControl, TextView,
};
use crate::domain::animation::{Particle, Ripple};
use crate::domain::navigation::LayoutMode;
use crate::domain::notification::{Notification, NotificationId};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .expect("recording view mutex poisoned - a test thread panicked while holding the lock")
}

/// What a [`RecordingFieldView`] currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub visual_state: FieldVisualState,
    /// Annotation text, `None` when no annotation element exists
    pub annotation: Option<String>,
    /// How many annotation elements were ever created
    pub annotations_created: usize,
    pub label: LabelState,
}

/// Field view recording its visible state.
#[derive(Debug, Clone, Default)]
pub struct RecordingFieldView {
    state: Arc<Mutex<FieldSnapshot>>,
}

impl RecordingFieldView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current visible state.
    pub fn snapshot(&self) -> FieldSnapshot {
        lock(&self.state).clone()
    }
}

impl FieldView for RecordingFieldView {
    fn set_visual_state(&self, state: FieldVisualState) {
        lock(&self.state).visual_state = state;
    }

    fn attach_annotation(&self) {
        let mut state = lock(&self.state);
        state.annotation = Some(String::new());
        state.annotations_created += 1;
    }

    fn set_annotation_text(&self, text: &str) {
        if let Some(annotation) = lock(&self.state).annotation.as_mut() {
            *annotation = text.to_string();
        }
    }

    fn detach_annotation(&self) {
        lock(&self.state).annotation = None;
    }

    fn set_label_state(&self, label: LabelState) {
        lock(&self.state).label = label;
    }
}

/// Form view counting resets.
#[derive(Debug, Clone, Default)]
pub struct RecordingFormView {
    resets: Arc<Mutex<(usize, usize)>>,
}

impl RecordingFormView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of field value resets.
    pub fn field_resets(&self) -> usize {
        lock(&self.resets).0
    }

    /// Number of label resets.
    pub fn label_resets(&self) -> usize {
        lock(&self.resets).1
    }
}

impl FormView for RecordingFormView {
    fn reset_fields(&self) {
        lock(&self.resets).0 += 1;
    }

    fn reset_labels(&self) {
        lock(&self.resets).1 += 1;
    }
}

/// Submit button recording every loading toggle.
#[derive(Debug, Clone, Default)]
pub struct RecordingSubmitControl {
    history: Arc<Mutex<Vec<bool>>>,
}

impl RecordingSubmitControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the button currently shows its loading state.
    pub fn is_loading(&self) -> bool {
        lock(&self.history).last().copied().unwrap_or(false)
    }

    /// Every value passed to `set_loading`, in order.
    pub fn history(&self) -> Vec<bool> {
        lock(&self.history).clone()
    }
}

impl SubmitControl for RecordingSubmitControl {
    fn set_loading(&self, loading: bool) {
        lock(&self.history).push(loading);
    }
}

/// Call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Rendered(NotificationId),
    SlidIn(NotificationId),
    SlidOut(NotificationId),
    Removed(NotificationId),
}

#[derive(Debug, Default)]
struct SurfaceState {
    events: Vec<SurfaceEvent>,
    displayed: BTreeMap<NotificationId, Notification>,
}

/// Notification surface recording what is on screen.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications currently in the document, oldest first.
    pub fn displayed(&self) -> Vec<Notification> {
        lock(&self.state).displayed.values().cloned().collect()
    }

    /// Every surface call, in order.
    pub fn events(&self) -> Vec<SurfaceEvent> {
        lock(&self.state).events.clone()
    }
}

impl NotificationSurface for RecordingSurface {
    fn render(&self, notification: &Notification) {
        let mut state = lock(&self.state);
        state.events.push(SurfaceEvent::Rendered(notification.id));
        state
            .displayed
            .insert(notification.id, notification.clone());
    }

    fn slide_in(&self, id: NotificationId) {
        lock(&self.state).events.push(SurfaceEvent::SlidIn(id));
    }

    fn slide_out(&self, id: NotificationId) {
        lock(&self.state).events.push(SurfaceEvent::SlidOut(id));
    }

    fn remove(&self, id: NotificationId) {
        let mut state = lock(&self.state);
        state.events.push(SurfaceEvent::Removed(id));
        state.displayed.remove(&id);
    }
}

#[derive(Debug, Default)]
struct NavState {
    scrolled: bool,
    active: Option<String>,
    link_updates: usize,
    menu_open: bool,
}

/// Navigation bar recording its highlight state.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavView {
    state: Arc<Mutex<NavState>>,
}

impl RecordingNavView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scrolled(&self) -> bool {
        lock(&self.state).scrolled
    }

    /// Section whose link is highlighted.
    pub fn active_link(&self) -> Option<String> {
        lock(&self.state).active.clone()
    }

    /// How many times the active link was recomputed.
    pub fn link_updates(&self) -> usize {
        lock(&self.state).link_updates
    }

    pub fn is_menu_open(&self) -> bool {
        lock(&self.state).menu_open
    }
}

impl NavView for RecordingNavView {
    fn set_scrolled(&self, scrolled: bool) {
        lock(&self.state).scrolled = scrolled;
    }

    fn set_active_link(&self, section: Option<&str>) {
        let mut state = lock(&self.state);
        state.active = section.map(str::to_string);
        state.link_updates += 1;
    }

    fn set_menu_open(&self, open: bool) {
        lock(&self.state).menu_open = open;
    }
}

/// Layout target recording applied modes.
#[derive(Debug, Clone, Default)]
pub struct RecordingLayoutView {
    applied: Arc<Mutex<Vec<LayoutMode>>>,
}

impl RecordingLayoutView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> Vec<LayoutMode> {
        lock(&self.applied).clone()
    }
}

impl LayoutView for RecordingLayoutView {
    fn apply_layout(&self, mode: LayoutMode) {
        lock(&self.applied).push(mode);
    }
}

#[derive(Debug, Default)]
struct PortfolioState {
    active_filter: Option<String>,
    hidden: BTreeSet<String>,
}

/// Portfolio grid recording item visibility.
#[derive(Debug, Clone, Default)]
pub struct RecordingPortfolioView {
    state: Arc<Mutex<PortfolioState>>,
}

impl RecordingPortfolioView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_filter(&self) -> Option<String> {
        lock(&self.state).active_filter.clone()
    }

    pub fn is_visible(&self, item_id: &str) -> bool {
        !lock(&self.state).hidden.contains(item_id)
    }
}

impl PortfolioView for RecordingPortfolioView {
    fn set_active_filter(&self, filter: &str) {
        lock(&self.state).active_filter = Some(filter.to_string());
    }

    fn set_item_visible(&self, item_id: &str, visible: bool) {
        let mut state = lock(&self.state);
        if visible {
            state.hidden.remove(item_id);
        } else {
            state.hidden.insert(item_id.to_string());
        }
    }
}

#[derive(Debug, Default)]
struct TextState {
    history: Vec<String>,
    cursor_visible: bool,
}

/// Text target recording every displayed value.
#[derive(Debug, Clone, Default)]
pub struct RecordingTextView {
    state: Arc<Mutex<TextState>>,
}

impl RecordingTextView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently displayed text.
    pub fn text(&self) -> String {
        lock(&self.state).history.last().cloned().unwrap_or_default()
    }

    /// Every value displayed, in order.
    pub fn history(&self) -> Vec<String> {
        lock(&self.state).history.clone()
    }

    pub fn cursor_visible(&self) -> bool {
        lock(&self.state).cursor_visible
    }
}

impl TextView for RecordingTextView {
    fn set_text(&self, text: &str) {
        lock(&self.state).history.push(text.to_string());
    }

    fn set_cursor_visible(&self, visible: bool) {
        lock(&self.state).cursor_visible = visible;
    }
}

/// Progress bar recording its width.
#[derive(Debug, Clone, Default)]
pub struct RecordingBarView {
    widths: Arc<Mutex<Vec<String>>>,
}

impl RecordingBarView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current width, `None` if never set.
    pub fn width(&self) -> Option<String> {
        lock(&self.widths).last().cloned()
    }

    pub fn updates(&self) -> usize {
        lock(&self.widths).len()
    }
}

impl BarView for RecordingBarView {
    fn set_width(&self, width: &str) {
        lock(&self.widths).push(width.to_string());
    }
}

#[derive(Debug, Default)]
struct ModalState {
    displayed: BTreeSet<String>,
    animations: Vec<(String, bool)>,
    scroll_locked: bool,
}

/// Modal host recording which dialogs are displayed.
#[derive(Debug, Clone, Default)]
pub struct RecordingModalView {
    state: Arc<Mutex<ModalState>>,
}

impl RecordingModalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_displayed(&self, modal_id: &str) -> bool {
        lock(&self.state).displayed.contains(modal_id)
    }

    pub fn is_scroll_locked(&self) -> bool {
        lock(&self.state).scroll_locked
    }

    /// `(modal, entering)` for every animation started.
    pub fn animations(&self) -> Vec<(String, bool)> {
        lock(&self.state).animations.clone()
    }
}

impl ModalView for RecordingModalView {
    fn set_displayed(&self, modal_id: &str, displayed: bool) {
        let mut state = lock(&self.state);
        if displayed {
            state.displayed.insert(modal_id.to_string());
        } else {
            state.displayed.remove(modal_id);
        }
    }

    fn animate(&self, modal_id: &str, entering: bool) {
        lock(&self.state)
            .animations
            .push((modal_id.to_string(), entering));
    }

    fn set_scroll_locked(&self, locked: bool) {
        lock(&self.state).scroll_locked = locked;
    }
}

#[derive(Debug, Default)]
struct RippleState {
    active: BTreeMap<u64, Ripple>,
    created: usize,
}

/// Button recording its live ripples.
#[derive(Debug, Clone, Default)]
pub struct RecordingRippleView {
    state: Arc<Mutex<RippleState>>,
}

impl RecordingRippleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ripples still in the button, oldest first.
    pub fn active(&self) -> Vec<(u64, Ripple)> {
        lock(&self.state)
            .active
            .iter()
            .map(|(id, ripple)| (*id, *ripple))
            .collect()
    }

    /// How many ripples were ever added.
    pub fn created(&self) -> usize {
        lock(&self.state).created
    }
}

impl RippleView for RecordingRippleView {
    fn add_ripple(&self, ripple_id: u64, ripple: &Ripple) {
        let mut state = lock(&self.state);
        state.active.insert(ripple_id, *ripple);
        state.created += 1;
    }

    fn remove_ripple(&self, ripple_id: u64) {
        lock(&self.state).active.remove(&ripple_id);
    }
}

#[derive(Debug, Default)]
struct SceneState {
    revealed: BTreeMap<String, bool>,
    shape_offsets: BTreeMap<usize, f64>,
    particles: Vec<Particle>,
}

/// Decorative layer recording reveals, shape offsets and particles.
#[derive(Debug, Clone, Default)]
pub struct RecordingSceneView {
    state: Arc<Mutex<SceneState>>,
}

impl RecordingSceneView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the element was hidden and not revealed since.
    pub fn is_hidden(&self, element_id: &str) -> bool {
        lock(&self.state).revealed.get(element_id) == Some(&false)
    }

    pub fn is_revealed(&self, element_id: &str) -> bool {
        lock(&self.state).revealed.get(element_id) == Some(&true)
    }

    /// Last offset applied to a floating shape.
    pub fn shape_offset(&self, index: usize) -> Option<f64> {
        lock(&self.state).shape_offsets.get(&index).copied()
    }

    pub fn particles(&self) -> Vec<Particle> {
        lock(&self.state).particles.clone()
    }
}

impl SceneView for RecordingSceneView {
    fn set_revealed(&self, element_id: &str, revealed: bool) {
        lock(&self.state)
            .revealed
            .insert(element_id.to_string(), revealed);
    }

    fn set_shape_offset(&self, index: usize, offset_y: f64) {
        lock(&self.state).shape_offsets.insert(index, offset_y);
    }

    fn add_particle(&self, particle: &Particle) {
        lock(&self.state).particles.push(*particle);
    }
}
