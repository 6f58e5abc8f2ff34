//! Inline per-field error presentation.
//!
//! Shows and clears the error annotation next to each contact form input and
//! runs the per-field blur/input/focus reactions.

use crate::application::ports::{FieldView, FieldVisualState, LabelState};
use crate::domain::validation::{validate, ValidationResult};
use dashmap::DashMap;
use std::sync::Arc;

/// Error returned by the field presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterError {
    /// No view was bound for the named field
    UnboundField(String),
}

impl std::fmt::Display for PresenterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresenterError::UnboundField(name) => {
                write!(f, "no view bound for field '{}'", name)
            }
        }
    }
}

impl std::error::Error for PresenterError {}

#[derive(Debug)]
struct FieldSlot {
    view: Arc<dyn FieldView>,
    /// Whether the annotation element currently exists
    annotated: bool,
}

/// Presents validation errors next to form fields.
///
/// The annotation element of a field is created on the first error and
/// reused until the error is cleared. Clearing is idempotent.
#[derive(Debug, Clone, Default)]
pub struct FieldErrorPresenter {
    fields: Arc<DashMap<String, FieldSlot>>,
}

impl FieldErrorPresenter {
    /// Create a presenter with no bound fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the render target of a field, replacing any previous binding.
    pub fn bind(&self, name: impl Into<String>, view: Arc<dyn FieldView>) {
        self.fields.insert(
            name.into(),
            FieldSlot {
                view,
                annotated: false,
            },
        );
    }

    /// Whether a view is bound for `name`.
    pub fn is_bound(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Whether the field currently shows an error annotation.
    pub fn has_error(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|slot| slot.annotated)
    }

    /// Mark the field invalid and show `message` next to it.
    ///
    /// # Errors
    /// Returns `PresenterError::UnboundField` if no view is bound for `name`.
    pub fn show_field_error(&self, name: &str, message: &str) -> Result<(), PresenterError> {
        let (view, attach) = {
            let mut slot = self.slot_mut(name)?;
            let attach = !slot.annotated;
            slot.annotated = true;
            (Arc::clone(&slot.view), attach)
        };

        view.set_visual_state(FieldVisualState::Invalid);
        if attach {
            view.attach_annotation();
        }
        view.set_annotation_text(message);
        Ok(())
    }

    /// Restore the field's neutral state and remove its annotation.
    ///
    /// # Errors
    /// Returns `PresenterError::UnboundField` if no view is bound for `name`.
    pub fn clear_field_error(&self, name: &str) -> Result<(), PresenterError> {
        let (view, detach) = {
            let mut slot = self.slot_mut(name)?;
            let detach = slot.annotated;
            slot.annotated = false;
            (Arc::clone(&slot.view), detach)
        };

        view.set_visual_state(FieldVisualState::Neutral);
        if detach {
            view.detach_annotation();
        }
        Ok(())
    }

    /// Blur reaction: validate the value and show or clear its error.
    ///
    /// An empty field also drops its floating label back into the input.
    ///
    /// # Errors
    /// Returns `PresenterError::UnboundField` if no view is bound for `name`.
    pub fn on_blur(&self, name: &str, value: &str) -> Result<ValidationResult, PresenterError> {
        let result = validate(name, value);
        if result.is_valid {
            self.clear_field_error(name)?;
        } else {
            tracing::debug!(field = %name, message = %result.message, "field failed validation");
            self.show_field_error(name, &result.message)?;
        }

        if value.is_empty() {
            self.view(name)?.set_label_state(LabelState::Resting);
        }
        Ok(result)
    }

    /// Input reaction: the user is editing, drop any error.
    ///
    /// # Errors
    /// Returns `PresenterError::UnboundField` if no view is bound for `name`.
    pub fn on_input(&self, name: &str) -> Result<(), PresenterError> {
        self.clear_field_error(name)
    }

    /// Focus reaction: raise the floating label.
    ///
    /// # Errors
    /// Returns `PresenterError::UnboundField` if no view is bound for `name`.
    pub fn on_focus(&self, name: &str) -> Result<(), PresenterError> {
        self.view(name)?.set_label_state(LabelState::Floating);
        Ok(())
    }

    fn view(&self, name: &str) -> Result<Arc<dyn FieldView>, PresenterError> {
        self.fields
            .get(name)
            .map(|slot| Arc::clone(&slot.view))
            .ok_or_else(|| unbound(name))
    }

    fn slot_mut(
        &self,
        name: &str,
    ) -> Result<dashmap::mapref::one::RefMut<'_, String, FieldSlot>, PresenterError> {
        self.fields.get_mut(name).ok_or_else(|| unbound(name))
    }
}

fn unbound(name: &str) -> PresenterError {
    tracing::warn!(field = %name, "no view bound for field");
    PresenterError::UnboundField(name.to_string())
}
