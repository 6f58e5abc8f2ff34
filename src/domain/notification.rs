//! User-facing notification values.

use std::fmt;
use std::time::Instant;

/// Category of a notification, driving its icon and accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Operation completed
    Success,
    /// Operation failed
    Error,
    /// Something the user should look at
    Warning,
    /// Neutral information
    Info,
}

impl NotificationKind {
    /// Parse a kind from its lowercase name.
    ///
    /// Unrecognized names fall back to [`NotificationKind::Info`].
    ///
    /// # Example
    /// ```
    /// use portfolio_interactions::NotificationKind;
    ///
    /// assert_eq!(NotificationKind::from_name("error"), NotificationKind::Error);
    /// assert_eq!(NotificationKind::from_name("shout"), NotificationKind::Info);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => NotificationKind::Success,
            "error" => NotificationKind::Error,
            "warning" => NotificationKind::Warning,
            _ => NotificationKind::Info,
        }
    }

    /// Lowercase name, as used in CSS class suffixes.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }

    /// Icon glyph shown next to the message.
    pub fn icon(&self) -> char {
        match self {
            NotificationKind::Success => '✓',
            NotificationKind::Error => '✗',
            NotificationKind::Warning => '⚠',
            NotificationKind::Info => 'ℹ',
        }
    }

    /// Accent color for the left border.
    pub fn accent_color(&self) -> &'static str {
        match self {
            NotificationKind::Success => "var(--primary-color)",
            NotificationKind::Error => "var(--accent-color)",
            NotificationKind::Warning => "#FFA726",
            NotificationKind::Info => "var(--secondary-color)",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a displayed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identifier, unique per presenter
    pub id: NotificationId,
    /// Message text
    pub message: String,
    /// Kind, driving icon and color
    pub kind: NotificationKind,
    /// When the notification was created
    pub created_at: Instant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_lookup() {
        assert_eq!(NotificationKind::Success.icon(), '✓');
        assert_eq!(NotificationKind::Error.icon(), '✗');
        assert_eq!(NotificationKind::Warning.icon(), '⚠');
        assert_eq!(NotificationKind::Info.icon(), 'ℹ');
    }

    #[test]
    fn test_unknown_kind_uses_info_styling() {
        let kind = NotificationKind::from_name("celebration");
        assert_eq!(kind.icon(), NotificationKind::Info.icon());
        assert_eq!(kind.accent_color(), "var(--secondary-color)");
    }

    #[test]
    fn test_name_round_trip() {
        for kind in [
            NotificationKind::Success,
            NotificationKind::Error,
            NotificationKind::Warning,
            NotificationKind::Info,
        ] {
            assert_eq!(NotificationKind::from_name(kind.as_str()), kind);
        }
    }
}
