//! Transient, stacked user notifications.
//!
//! Every notification has its own timers: it slides in shortly after being
//! rendered, dismisses itself after the display duration, and is removed
//! from the surface once its exit transition has played.

use crate::application::config::{non_zero, ConfigError};
use crate::application::ports::{Clock, NotificationSurface, Scheduler, TimerHandle};
use crate::domain::notification::{Notification, NotificationId, NotificationKind};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Timing of notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Delay between rendering off screen and sliding in
    pub enter_delay: Duration,
    /// How long a notification stays before dismissing itself
    pub display_duration: Duration,
    /// Length of the exit transition before removal
    pub exit_transition: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enter_delay: Duration::from_millis(100),
            display_duration: Duration::from_millis(5000),
            exit_transition: Duration::from_millis(300),
        }
    }
}

impl NotifierConfig {
    /// Create a config with custom display and exit durations.
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroDuration` if either duration is zero.
    pub fn new(display_duration: Duration, exit_transition: Duration) -> Result<Self, ConfigError> {
        let config = Self {
            display_duration,
            exit_transition,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the slide-in delay. Zero slides in on the next scheduler turn.
    pub fn with_enter_delay(mut self, enter_delay: Duration) -> Self {
        self.enter_delay = enter_delay;
        self
    }

    /// Check the durations.
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroDuration` for a zero display or exit duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_zero("display_duration", self.display_duration)?;
        non_zero("exit_transition", self.exit_transition)?;
        Ok(())
    }

    /// Time from creation to removal when nobody dismisses the notification.
    pub fn lifetime(&self) -> Duration {
        self.display_duration + self.exit_transition
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Visible,
    Leaving,
}

#[derive(Debug)]
struct ActiveNotification {
    notification: Notification,
    phase: Phase,
    enter: Option<TimerHandle>,
    auto_dismiss: Option<TimerHandle>,
    removal: Option<TimerHandle>,
}

impl ActiveNotification {
    fn timers(&mut self) -> impl Iterator<Item = TimerHandle> {
        [self.enter.take(), self.auto_dismiss.take(), self.removal.take()]
            .into_iter()
            .flatten()
    }
}

#[derive(Debug)]
struct NotifierInner {
    surface: Arc<dyn NotificationSurface>,
    clock: Arc<dyn Clock>,
    scheduler: Arc<dyn Scheduler>,
    config: NotifierConfig,
    active: DashMap<NotificationId, ActiveNotification>,
    next_id: AtomicU64,
}

type Step = fn(&Arc<NotifierInner>, NotificationId);

impl NotifierInner {
    fn schedule(self: &Arc<Self>, delay: Duration, id: NotificationId, step: Step) -> TimerHandle {
        let weak: Weak<Self> = Arc::downgrade(self);
        self.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    step(&inner, id);
                }
            }),
        )
    }

    fn slide_in(self: &Arc<Self>, id: NotificationId) {
        let visible = match self.active.get_mut(&id) {
            Some(mut entry) => {
                entry.enter = None;
                entry.phase == Phase::Visible
            }
            None => false,
        };
        if visible {
            self.surface.slide_in(id);
        }
    }

    fn auto_dismiss(self: &Arc<Self>, id: NotificationId) {
        if let Some(mut entry) = self.active.get_mut(&id) {
            entry.auto_dismiss = None;
        }
        self.dismiss(id);
    }

    fn dismiss(self: &Arc<Self>, id: NotificationId) -> bool {
        let timers: Vec<TimerHandle> = {
            let Some(mut entry) = self.active.get_mut(&id) else {
                return false;
            };
            if entry.phase == Phase::Leaving {
                return false;
            }
            entry.phase = Phase::Leaving;
            entry.timers().collect()
        };

        for handle in timers {
            self.scheduler.cancel(handle);
        }
        self.surface.slide_out(id);

        let removal = self.schedule(self.config.exit_transition, id, Self::release);
        if let Some(mut entry) = self.active.get_mut(&id) {
            entry.removal = Some(removal);
        }
        tracing::debug!(%id, "notification dismissed");
        true
    }

    fn release(self: &Arc<Self>, id: NotificationId) {
        if self.active.remove(&id).is_some() {
            self.surface.remove(id);
            tracing::trace!(%id, "notification removed");
        }
    }
}

/// Shows notifications and manages their lifetime.
///
/// Clones share the same set of active notifications.
#[derive(Debug, Clone)]
pub struct NotificationPresenter {
    inner: Arc<NotifierInner>,
}

impl NotificationPresenter {
    /// Create a presenter rendering onto `surface`.
    ///
    /// # Errors
    /// Returns `ConfigError` if the config durations are invalid.
    pub fn new(
        surface: Arc<dyn NotificationSurface>,
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn Scheduler>,
        config: NotifierConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(NotifierInner {
                surface,
                clock,
                scheduler,
                config,
                active: DashMap::new(),
                next_id: AtomicU64::new(1),
            }),
        })
    }

    /// Show `message` and schedule its automatic dismissal.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let inner = &self.inner;
        let id = NotificationId(inner.next_id.fetch_add(1, Ordering::Relaxed));
        let notification = Notification {
            id,
            message: message.into(),
            kind,
            created_at: inner.clock.now(),
        };

        inner.surface.render(&notification);
        inner.active.insert(
            id,
            ActiveNotification {
                notification,
                phase: Phase::Visible,
                enter: None,
                auto_dismiss: None,
                removal: None,
            },
        );

        let enter = inner.schedule(inner.config.enter_delay, id, NotifierInner::slide_in);
        let auto_dismiss = inner.schedule(
            inner.config.display_duration,
            id,
            NotifierInner::auto_dismiss,
        );
        if let Some(mut entry) = inner.active.get_mut(&id) {
            entry.enter = Some(enter);
            entry.auto_dismiss = Some(auto_dismiss);
        }

        tracing::debug!(%id, %kind, "notification shown");
        id
    }

    /// Slide a notification out and remove it after the exit transition.
    ///
    /// Returns `false` if it is already leaving or gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        self.inner.dismiss(id)
    }

    /// Remove every notification immediately, cancelling their timers.
    pub fn clear(&self) {
        let ids: Vec<NotificationId> = self.inner.active.iter().map(|e| *e.key()).collect();
        for id in ids {
            if let Some((_, mut entry)) = self.inner.active.remove(&id) {
                for handle in entry.timers() {
                    self.inner.scheduler.cancel(handle);
                }
                self.inner.surface.remove(id);
            }
        }
    }

    /// Whether the notification is still in the document.
    pub fn is_active(&self, id: NotificationId) -> bool {
        self.inner.active.contains_key(&id)
    }

    /// Number of notifications in the document, including leaving ones.
    pub fn active_count(&self) -> usize {
        self.inner.active.len()
    }

    /// Notifications in the document, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        let mut notifications: Vec<_> = self
            .inner
            .active
            .iter()
            .map(|entry| entry.notification.clone())
            .collect();
        notifications.sort_by_key(|n| n.id);
        notifications
    }

    /// The timing configuration.
    pub fn config(&self) -> &NotifierConfig {
        &self.inner.config
    }
}
