//! Frame sequences and geometry for decorative page effects.

use rand::Rng;
use std::time::Duration;

/// Number of increments an animated counter goes through.
pub const COUNTER_STEPS: u32 = 50;
/// Total duration of a counter animation.
pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);
/// Delay between a skill bar becoming visible and its width being set.
pub const SKILL_BAR_DELAY: Duration = Duration::from_millis(200);
/// Delay before the typewriter starts typing.
pub const TYPEWRITER_START_DELAY: Duration = Duration::from_millis(1000);
/// Delay between typed characters.
pub const TYPEWRITER_CHAR_DELAY: Duration = Duration::from_millis(100);
/// How long the cursor lingers after the last character.
pub const TYPEWRITER_CURSOR_LINGER: Duration = Duration::from_millis(1000);
/// Modal exit animation length.
pub const MODAL_TRANSITION: Duration = Duration::from_millis(300);
/// Lifetime of a click ripple.
pub const RIPPLE_LIFETIME: Duration = Duration::from_millis(600);
/// Number of background particles on desktop viewports.
pub const PARTICLE_COUNT: usize = 15;

/// Time between two counter frames.
pub fn counter_step_interval() -> Duration {
    COUNTER_DURATION / COUNTER_STEPS
}

/// Values displayed by a counter counting up to `target`.
///
/// Each frame adds `target / 50` and shows the floor. The last frame is
/// exactly `target`. A zero target is reached on the first frame.
///
/// # Example
/// ```
/// use portfolio_interactions::domain::animation::counter_frames;
///
/// let frames = counter_frames(100);
/// assert_eq!(frames.len(), 50);
/// assert_eq!(frames[0], 2);
/// assert_eq!(*frames.last().unwrap(), 100);
/// ```
pub fn counter_frames(target: u64) -> Vec<u64> {
    if target == 0 {
        return vec![0];
    }
    let increment = target as f64 / f64::from(COUNTER_STEPS);
    (1..=COUNTER_STEPS)
        .map(|step| {
            if step == COUNTER_STEPS {
                target
            } else {
                (f64::from(step) * increment).min(target as f64).floor() as u64
            }
        })
        .collect()
}

/// Successive prefixes revealed by the typewriter, one per character.
pub fn typewriter_frames(text: &str) -> Vec<String> {
    text.char_indices()
        .map(|(offset, ch)| text[..offset + ch.len_utf8()].to_string())
        .collect()
}

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Placement of a click ripple relative to its button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    /// Diameter
    pub size: f64,
    /// Left offset inside the button
    pub left: f64,
    /// Top offset inside the button
    pub top: f64,
}

/// Ripple centered on a click at `(client_x, client_y)` inside `button`.
pub fn ripple_geometry(button: Rect, client_x: f64, client_y: f64) -> Ripple {
    let size = button.width.max(button.height);
    Ripple {
        size,
        left: client_x - button.x - size / 2.0,
        top: client_y - button.y - size / 2.0,
    }
}

/// Vertical translation of the `index`-th floating shape at `scroll_y`.
pub fn parallax_offset(scroll_y: f64, index: usize) -> f64 {
    let speed = 0.5 + index as f64 * 0.2;
    -(scroll_y * speed)
}

/// A background particle drifting in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Diameter in pixels, between 2 and 6
    pub size: f64,
    pub x: f64,
    pub y: f64,
    /// Length of one drift cycle, between 10 and 30 seconds
    pub cycle: Duration,
}

/// Draw a particle placed anywhere in a `width` by `height` viewport.
pub fn random_particle<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Particle {
    Particle {
        size: rng.gen_range(2.0..6.0),
        x: rng.gen::<f64>() * width,
        y: rng.gen::<f64>() * height,
        cycle: Duration::from_secs_f64(rng.gen_range(10.0..30.0)),
    }
}
