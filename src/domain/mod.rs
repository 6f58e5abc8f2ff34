//! Domain layer - pure logic with no timers and no rendering.
//!
//! This layer contains the rules of the portfolio page:
//! - Contact form fields and their validation rules
//! - Notification kinds and their styling
//! - The submission lifecycle
//! - The throttle window policy
//! - Scroll geometry, portfolio filtering and animation frames
//!
//! All types in this layer are pure and easily testable.

pub mod animation;
pub mod field;
pub mod navigation;
pub mod notification;
pub mod policy;
pub mod portfolio;
pub mod submission;
pub mod validation;
