//! Scheduled decorative effects: counters, skill bars, typewriter text,
//! click ripples, background particles, scroll reveals and modal dialogs.

use crate::application::ports::{
    BarView, ModalView, RippleView, Scheduler, SceneView, TextView, TimerHandle,
};
use crate::domain::animation::{
    counter_frames, counter_step_interval, random_particle, ripple_geometry, typewriter_frames,
    Rect, MODAL_TRANSITION, PARTICLE_COUNT, RIPPLE_LIFETIME, SKILL_BAR_DELAY,
    TYPEWRITER_CHAR_DELAY, TYPEWRITER_CURSOR_LINGER, TYPEWRITER_START_DELAY,
};
use crate::domain::navigation::LayoutMode;
use dashmap::DashSet;
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Timers making up one running effect.
#[derive(Debug)]
pub struct Animation {
    scheduler: Arc<dyn Scheduler>,
    timers: Vec<TimerHandle>,
}

impl Animation {
    /// Stop the effect where it is.
    ///
    /// Returns how many frames were still pending.
    pub fn cancel(&self) -> usize {
        self.timers
            .iter()
            .filter(|&&handle| self.scheduler.cancel(handle))
            .count()
    }

    /// Number of frames the effect was scheduled with.
    pub fn frame_count(&self) -> usize {
        self.timers.len()
    }
}

/// Starts effects on the shared scheduler.
#[derive(Debug, Clone)]
pub struct Effects {
    scheduler: Arc<dyn Scheduler>,
    revealed_bars: Arc<DashSet<String>>,
    started_counters: Arc<DashSet<String>>,
    next_ripple: Arc<AtomicU64>,
}

impl Effects {
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            revealed_bars: Arc::new(DashSet::new()),
            started_counters: Arc::new(DashSet::new()),
            next_ripple: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Start the counter `counter_id` the first time it scrolls into view.
    ///
    /// Returns `None` if that counter already ran.
    pub fn start_counter(
        &self,
        counter_id: &str,
        view: Arc<dyn TextView>,
        target: u64,
    ) -> Option<Animation> {
        if !self.started_counters.insert(counter_id.to_string()) {
            return None;
        }
        tracing::trace!(counter = %counter_id, target, "counter started");
        Some(self.animate_counter(view, target))
    }

    /// Whether the counter has been started.
    pub fn is_counter_started(&self, counter_id: &str) -> bool {
        self.started_counters.contains(counter_id)
    }

    /// Count `view` up to `target` in 50 steps over two seconds.
    pub fn animate_counter(&self, view: Arc<dyn TextView>, target: u64) -> Animation {
        let interval = counter_step_interval();
        let timers = counter_frames(target)
            .into_iter()
            .zip(1u32..)
            .map(|(value, step)| {
                let view = Arc::clone(&view);
                self.scheduler.schedule(
                    interval * step,
                    Box::new(move || view.set_text(&value.to_string())),
                )
            })
            .collect();
        self.animation(timers)
    }

    /// Fill a skill bar to `width` shortly after it scrolls into view.
    ///
    /// Each bar is revealed once. Returns `None` if `bar_id` was already
    /// revealed.
    pub fn reveal_skill_bar(
        &self,
        bar_id: &str,
        view: Arc<dyn BarView>,
        width: &str,
    ) -> Option<TimerHandle> {
        if !self.revealed_bars.insert(bar_id.to_string()) {
            return None;
        }
        let width = width.to_string();
        Some(
            self.scheduler
                .schedule(SKILL_BAR_DELAY, Box::new(move || view.set_width(&width))),
        )
    }

    /// Whether the bar has been revealed.
    pub fn is_revealed(&self, bar_id: &str) -> bool {
        self.revealed_bars.contains(bar_id)
    }

    /// Type `text` into `view` one character at a time behind a cursor.
    ///
    /// The view is cleared right away. Typing starts after one second, one
    /// character every 100 ms, and the cursor disappears one second after
    /// typing ends.
    pub fn type_text(&self, view: Arc<dyn TextView>, text: &str) -> Animation {
        view.set_text("");
        view.set_cursor_visible(true);

        let frames = typewriter_frames(text);
        let typed = frames.len() as u32;
        let mut timers: Vec<TimerHandle> = frames
            .into_iter()
            .zip(0u32..)
            .map(|(frame, index)| {
                let view = Arc::clone(&view);
                self.scheduler.schedule(
                    TYPEWRITER_START_DELAY + TYPEWRITER_CHAR_DELAY * index,
                    Box::new(move || view.set_text(&frame)),
                )
            })
            .collect();

        let hide_at =
            TYPEWRITER_START_DELAY + TYPEWRITER_CHAR_DELAY * typed + TYPEWRITER_CURSOR_LINGER;
        timers.push(
            self.scheduler
                .schedule(hide_at, Box::new(move || view.set_cursor_visible(false))),
        );
        self.animation(timers)
    }

    /// Ripple out from a click at `(client_x, client_y)` on `button`.
    ///
    /// The ripple element is removed once its animation has played.
    pub fn ripple(
        &self,
        view: Arc<dyn RippleView>,
        button: Rect,
        client_x: f64,
        client_y: f64,
    ) -> TimerHandle {
        let ripple_id = self.next_ripple.fetch_add(1, Ordering::Relaxed);
        view.add_ripple(ripple_id, &ripple_geometry(button, client_x, client_y));
        self.scheduler.schedule(
            RIPPLE_LIFETIME,
            Box::new(move || view.remove_ripple(ripple_id)),
        )
    }

    /// Scatter background particles over the viewport.
    ///
    /// Mobile viewports get none. Returns how many particles were added.
    pub fn spawn_particles<R: Rng + ?Sized>(
        &self,
        view: &dyn SceneView,
        viewport_width: u32,
        viewport_height: u32,
        rng: &mut R,
    ) -> usize {
        if LayoutMode::for_width(viewport_width) == LayoutMode::Mobile {
            return 0;
        }
        for _ in 0..PARTICLE_COUNT {
            let particle = random_particle(
                &mut *rng,
                f64::from(viewport_width),
                f64::from(viewport_height),
            );
            view.add_particle(&particle);
        }
        PARTICLE_COUNT
    }

    fn animation(&self, timers: Vec<TimerHandle>) -> Animation {
        Animation {
            scheduler: Arc::clone(&self.scheduler),
            timers,
        }
    }
}

/// Keeps page elements hidden until they first scroll into view.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    view: Arc<dyn SceneView>,
    hidden: Arc<DashSet<String>>,
}

impl ScrollReveal {
    /// Hide every element of `element_ids`.
    pub fn new(view: Arc<dyn SceneView>, element_ids: impl IntoIterator<Item = String>) -> Self {
        let hidden = DashSet::new();
        for id in element_ids {
            view.set_revealed(&id, false);
            hidden.insert(id);
        }
        Self {
            view,
            hidden: Arc::new(hidden),
        }
    }

    /// An element intersected the viewport.
    ///
    /// Returns `true` if it was hidden and is now revealed.
    pub fn on_intersect(&self, element_id: &str) -> bool {
        if self.hidden.remove(element_id).is_none() {
            return false;
        }
        self.view.set_revealed(element_id, true);
        true
    }

    /// Number of elements still waiting to be revealed.
    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }
}

#[derive(Debug, Default)]
struct ModalState {
    /// Displayed modals, most recently opened last
    open: Vec<String>,
    closing: HashMap<String, TimerHandle>,
}

#[derive(Debug)]
struct ModalInner {
    view: Arc<dyn ModalView>,
    scheduler: Arc<dyn Scheduler>,
    state: Mutex<ModalState>,
}

impl ModalInner {
    fn state(&self) -> MutexGuard<'_, ModalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hide `modal_id` now. Returns `false` if it was not displayed.
    fn hide(&self, modal_id: &str) -> bool {
        let (pending, unlock) = {
            let mut state = self.state();
            let Some(position) = state.open.iter().position(|id| id == modal_id) else {
                return false;
            };
            state.open.remove(position);
            (state.closing.remove(modal_id), state.open.is_empty())
        };

        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
        self.view.set_displayed(modal_id, false);
        if unlock {
            self.view.set_scroll_locked(false);
        }
        tracing::trace!(modal = %modal_id, "modal hidden");
        true
    }
}

/// Opens and closes modal dialogs, locking page scroll while any is open.
#[derive(Debug, Clone)]
pub struct ModalController {
    inner: Arc<ModalInner>,
}

impl ModalController {
    pub fn new(view: Arc<dyn ModalView>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            inner: Arc::new(ModalInner {
                view,
                scheduler,
                state: Mutex::new(ModalState::default()),
            }),
        }
    }

    /// Display a modal with its entry animation.
    ///
    /// Opening a modal that is closing aborts the close.
    pub fn open(&self, modal_id: &str) {
        let pending = {
            let mut state = self.inner.state();
            if !state.open.iter().any(|id| id == modal_id) {
                state.open.push(modal_id.to_string());
            }
            state.closing.remove(modal_id)
        };
        if let Some(handle) = pending {
            self.inner.scheduler.cancel(handle);
        }

        self.inner.view.set_displayed(modal_id, true);
        self.inner.view.set_scroll_locked(true);
        self.inner.view.animate(modal_id, true);
    }

    /// Play the exit animation and hide the modal once it ends.
    ///
    /// Returns `false` if the modal is not displayed or already closing.
    pub fn close(&self, modal_id: &str) -> bool {
        {
            let state = self.inner.state();
            if !state.open.iter().any(|id| id == modal_id) || state.closing.contains_key(modal_id) {
                return false;
            }
        }

        self.inner.view.animate(modal_id, false);
        let weak = Arc::downgrade(&self.inner);
        let id = modal_id.to_string();
        let handle = self.inner.scheduler.schedule(
            MODAL_TRANSITION,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.hide(&id);
                }
            }),
        );
        self.inner
            .state()
            .closing
            .insert(modal_id.to_string(), handle);
        true
    }

    /// Escape key: hide the most recently opened modal immediately.
    pub fn on_escape(&self) -> Option<String> {
        let last = self.inner.state().open.last().cloned()?;
        self.inner.hide(&last);
        Some(last)
    }

    /// Click on a modal's backdrop: hide that modal immediately.
    pub fn on_backdrop_click(&self, modal_id: &str) -> bool {
        self.inner.hide(modal_id)
    }

    /// Whether the modal is displayed, including while closing.
    pub fn is_open(&self, modal_id: &str) -> bool {
        self.inner.state().open.iter().any(|id| id == modal_id)
    }

    /// Displayed modals, oldest first.
    pub fn open_modals(&self) -> Vec<String> {
        self.inner.state().open.clone()
    }
}
