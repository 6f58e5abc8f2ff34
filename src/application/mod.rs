//! Application layer - orchestration of domain logic.
//!
//! This layer wires the domain rules to the page and owns all runtime state:
//! - Rate-limited dispatch (debounce, throttle)
//! - Field error presentation
//! - Form submission flow
//! - Notification lifecycle
//! - Decorative effects and modals
//! - Page wiring
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from any document tree, timer or network implementation.

pub mod config;
pub mod dispatcher;
pub mod effects;
pub mod field_errors;
pub mod metrics;
pub mod notifier;
pub mod page;
pub mod ports;
pub mod submission;
