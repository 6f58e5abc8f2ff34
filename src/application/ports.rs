//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters (a DOM binding, a terminal UI, the
//! recording mocks) implement these ports. Each component receives only the
//! render targets it controls.

use crate::domain::animation::{Particle, Ripple};
use crate::domain::field::FormSnapshot;
use crate::domain::navigation::LayoutMode;
use crate::domain::notification::{Notification, NotificationId};
use crate::domain::submission::SubmissionError;
use std::fmt::{self, Debug};
use std::time::{Duration, Instant};

/// Port for obtaining current time.
///
/// Infrastructure provides concrete implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}

/// Deferred unit of work run by a [`Scheduler`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Port for timer scheduling (the `setTimeout` capability).
///
/// Tasks run after at least `delay` has passed. Implementations must not run
/// a task from inside `schedule` or `cancel`.
pub trait Scheduler: Send + Sync + Debug {
    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Cancel a pending task.
    ///
    /// Returns `false` if the task already ran or was cancelled.
    fn cancel(&self, handle: TimerHandle) -> bool;
}

/// Visual state of a form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldVisualState {
    /// Regular border
    #[default]
    Neutral,
    /// Error border
    Invalid,
}

/// Position of a floating label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelState {
    /// Inside the empty input
    #[default]
    Resting,
    /// Raised above the input while focused or filled
    Floating,
}

/// Render target for one form field.
pub trait FieldView: Send + Sync + Debug {
    /// Apply the input's visual state.
    fn set_visual_state(&self, state: FieldVisualState);

    /// Create the error annotation element next to the input.
    fn attach_annotation(&self);

    /// Replace the annotation text.
    fn set_annotation_text(&self, text: &str);

    /// Remove the annotation element.
    fn detach_annotation(&self);

    /// Move the floating label.
    fn set_label_state(&self, state: LabelState);
}

/// Render target for the whole contact form.
pub trait FormView: Send + Sync + Debug {
    /// Clear every input value.
    fn reset_fields(&self);

    /// Return every floating label to its resting position.
    fn reset_labels(&self);
}

/// The submit button's loading affordance.
pub trait SubmitControl: Send + Sync + Debug {
    /// Show or hide the loading state.
    fn set_loading(&self, loading: bool);
}

/// Callback receiving the outcome of a submission.
pub type Completion = Box<dyn FnOnce(Result<(), SubmissionError>) + Send + 'static>;

/// Port for sending a form to its destination.
///
/// Implementations call `on_complete` exactly once, possibly later from a
/// scheduled task. Calling it more than once is tolerated by the controller.
pub trait SubmissionTransport: Send + Sync + Debug {
    /// Send `form` and report the outcome through `on_complete`.
    fn submit(&self, form: FormSnapshot, on_complete: Completion);
}

/// Render target for stacked notifications.
pub trait NotificationSurface: Send + Sync + Debug {
    /// Add the notification element, positioned off screen.
    fn render(&self, notification: &Notification);

    /// Animate the notification into view.
    fn slide_in(&self, id: NotificationId);

    /// Animate the notification out of view.
    fn slide_out(&self, id: NotificationId);

    /// Remove the notification element.
    fn remove(&self, id: NotificationId);
}

/// Render target for the navigation bar.
pub trait NavView: Send + Sync + Debug {
    /// Toggle the compact scrolled style.
    fn set_scrolled(&self, scrolled: bool);

    /// Highlight the link for `section`, or none.
    fn set_active_link(&self, section: Option<&str>);

    /// Open or close the mobile menu and its hamburger button.
    fn set_menu_open(&self, open: bool);
}

/// Render target for viewport-dependent layout tweaks.
pub trait LayoutView: Send + Sync + Debug {
    /// Apply the layout for the current viewport.
    fn apply_layout(&self, mode: LayoutMode);
}

/// Render target for the portfolio grid.
pub trait PortfolioView: Send + Sync + Debug {
    /// Mark the filter button for `filter` active.
    fn set_active_filter(&self, filter: &str);

    /// Show or hide a grid item.
    fn set_item_visible(&self, item_id: &str, visible: bool);
}

/// Render target for a piece of animated text (counter, typewriter, bar).
pub trait TextView: Send + Sync + Debug {
    /// Replace the displayed text.
    fn set_text(&self, text: &str);

    /// Show or hide the typing cursor.
    fn set_cursor_visible(&self, visible: bool);
}

/// Render target for a skill progress bar.
pub trait BarView: Send + Sync + Debug {
    /// Set the CSS width of the filled part.
    fn set_width(&self, width: &str);
}

/// Render target for modal dialogs.
pub trait ModalView: Send + Sync + Debug {
    /// Display or hide a modal.
    fn set_displayed(&self, modal_id: &str, displayed: bool);

    /// Start the entry or exit animation.
    fn animate(&self, modal_id: &str, entering: bool);

    /// Lock or unlock page scrolling behind the modal.
    fn set_scroll_locked(&self, locked: bool);
}

/// Render target for click ripples inside one button.
pub trait RippleView: Send + Sync + Debug {
    /// Add a ripple element.
    fn add_ripple(&self, ripple_id: u64, ripple: &Ripple);

    /// Remove a ripple element.
    fn remove_ripple(&self, ripple_id: u64);
}

/// Render target for the page's decorative layer: scroll reveals, parallax
/// shapes and background particles.
pub trait SceneView: Send + Sync + Debug {
    /// Show or hide an element waiting to scroll into view.
    fn set_revealed(&self, element_id: &str, revealed: bool);

    /// Translate the `index`-th floating shape vertically.
    fn set_shape_offset(&self, index: usize, offset_y: f64);

    /// Add a background particle.
    fn add_particle(&self, particle: &Particle);
}
