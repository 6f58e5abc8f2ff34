//! Scroll geometry for navigation highlighting and layout.

/// Scroll offset past which the navbar switches to its compact style.
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;

/// Distance above a section's top at which it counts as current.
pub const ACTIVE_SECTION_OFFSET: f64 = 100.0;

/// Height of the fixed navbar, subtracted from smooth-scroll targets.
pub const NAVBAR_HEIGHT: f64 = 70.0;

/// Widest viewport treated as mobile.
pub const MOBILE_MAX_WIDTH: u32 = 768;

/// Vertical extent of a page section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    /// Section element id, also the nav link fragment
    pub id: String,
    /// Offset of the section's top from the document top
    pub top: f64,
    /// Rendered height
    pub height: f64,
}

impl SectionBounds {
    /// Describe a section.
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn contains(&self, scroll_y: f64) -> bool {
        let start = self.top - ACTIVE_SECTION_OFFSET;
        scroll_y >= start && scroll_y < start + self.height
    }
}

/// Whether the navbar should use its scrolled style.
pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLL_THRESHOLD
}

/// Id of the section the viewport is currently in.
///
/// When ranges overlap the last matching section wins.
///
/// # Example
/// ```
/// use portfolio_interactions::domain::navigation::{active_section, SectionBounds};
///
/// let sections = [
///     SectionBounds::new("inicio", 0.0, 600.0),
///     SectionBounds::new("sobre-mi", 600.0, 800.0),
/// ];
/// assert_eq!(active_section(&sections, 0.0), Some("inicio"));
/// assert_eq!(active_section(&sections, 520.0), Some("sobre-mi"));
/// ```
pub fn active_section(sections: &[SectionBounds], scroll_y: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|section| section.contains(scroll_y))
        .map(|section| section.id.as_str())
}

/// Scroll position that brings a section just below the fixed navbar.
pub fn scroll_target(section_top: f64) -> f64 {
    (section_top - NAVBAR_HEIGHT).max(0.0)
}

/// Page layout mode derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Narrow viewport: shortened animations, hover effects disabled
    Mobile,
    /// Full effects
    Desktop,
}

impl LayoutMode {
    /// Layout for a viewport width.
    pub fn for_width(width: u32) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            LayoutMode::Mobile
        } else {
            LayoutMode::Desktop
        }
    }
}
