//! Field validation rules.
//!
//! Validation is pure: the same `(field, value)` always yields the same
//! [`ValidationResult`]. Values are trimmed before any rule is applied.

use crate::domain::field::{field_spec, FieldPattern, FormFieldSpec, FormSnapshot, CONTACT_FORM_FIELDS};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Verdict for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Name of the validated field
    pub field_name: String,
    /// Whether the value passed its rule
    pub is_valid: bool,
    /// Failure message, empty when valid
    pub message: String,
}

impl ValidationResult {
    /// A passing result.
    pub fn valid(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            is_valid: true,
            message: String::new(),
        }
    }

    /// A failing result with a user-facing message.
    pub fn invalid(field_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            is_valid: false,
            message: message.into(),
        }
    }
}

/// Check whether a value has an email shape.
///
/// # Example
/// ```
/// use portfolio_interactions::domain::validation::is_valid_email;
///
/// assert!(is_valid_email("a@b.co"));
/// assert!(!is_valid_email("a b@c.com"));
/// assert!(!is_valid_email("abc"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

fn check(spec: &FormFieldSpec, trimmed: &str) -> bool {
    let long_enough = spec
        .min_length
        .map_or(true, |min| trimmed.chars().count() >= min);
    let well_formed = match spec.pattern {
        Some(FieldPattern::Email) => is_valid_email(trimmed),
        None => true,
    };
    long_enough && well_formed
}

/// Validate one field by name.
///
/// Unknown field names always pass.
///
/// # Example
/// ```
/// use portfolio_interactions::validate;
///
/// assert!(validate("name", "  ab  ").is_valid);
/// assert!(!validate("subject", "hi").is_valid);
/// assert!(validate("phone", "").is_valid);
/// ```
pub fn validate(field_name: &str, raw_value: &str) -> ValidationResult {
    match field_spec(field_name) {
        Some(spec) if !check(spec, raw_value.trim()) => {
            ValidationResult::invalid(field_name, spec.message)
        }
        _ => ValidationResult::valid(field_name),
    }
}

/// Validate every contact form field.
///
/// Returns the failing results in field declaration order. An empty vector
/// means the form can be submitted.
pub fn validate_form(form: &FormSnapshot) -> Vec<ValidationResult> {
    CONTACT_FORM_FIELDS
        .iter()
        .map(|spec| validate(spec.name, form.get(spec.name)))
        .filter(|result| !result.is_valid)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("abc"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("@b.co"));
    }

    #[test]
    fn test_email_is_trimmed() {
        assert!(validate("email", "  a@b.co ").is_valid);
    }

    #[test]
    fn test_length_boundaries() {
        assert!(validate("name", "ab").is_valid);
        assert!(!validate("name", "a").is_valid);
        assert!(validate("subject", "hello").is_valid);
        assert!(!validate("subject", "hell").is_valid);
        assert!(validate("message", "0123456789").is_valid);
        assert!(!validate("message", "012345678").is_valid);
    }

    #[test]
    fn test_trimming_before_length() {
        assert!(validate("name", "  ab  ").is_valid);
        assert!(!validate("name", "   a   ").is_valid);
        assert!(!validate("message", "          ").is_valid);
    }

    #[test]
    fn test_length_counts_characters() {
        // Two chars, four bytes
        assert!(validate("name", "ñá").is_valid);
    }

    #[test]
    fn test_failure_messages() {
        let result = validate("name", "A");
        assert!(!result.is_valid);
        assert_eq!(result.field_name, "name");
        assert_eq!(result.message, "El nombre debe tener al menos 2 caracteres");

        assert_eq!(
            validate("email", "bad").message,
            "Por favor ingresa un email válido"
        );
        assert_eq!(
            validate("subject", "hi").message,
            "El asunto debe tener al menos 5 caracteres"
        );
        assert_eq!(
            validate("message", "short").message,
            "El mensaje debe tener al menos 10 caracteres"
        );
    }

    #[test]
    fn test_valid_result_has_empty_message() {
        let result = validate("email", "a@b.co");
        assert!(result.is_valid);
        assert!(result.message.is_empty());
    }

    #[test]
    fn test_unknown_field_always_valid() {
        assert_eq!(validate("phone", ""), ValidationResult::valid("phone"));
    }

    #[test]
    fn test_validate_is_deterministic() {
        for value in ["", "a", "ab", "a@b.co", "  padded  "] {
            for field in ["name", "email", "subject", "message", "other"] {
                assert_eq!(validate(field, value), validate(field, value));
            }
        }
    }

    #[test]
    fn test_validate_form_reports_in_declaration_order() {
        let form = FormSnapshot::new()
            .with("message", "short")
            .with("subject", "hi")
            .with("email", "bad")
            .with("name", "A");

        let failures = validate_form(&form);
        let fields: Vec<_> = failures.iter().map(|r| r.field_name.as_str()).collect();
        assert_eq!(fields, ["name", "email", "subject", "message"]);
    }

    #[test]
    fn test_validate_form_missing_fields_fail() {
        assert_eq!(validate_form(&FormSnapshot::new()).len(), 4);
    }

    #[test]
    fn test_validate_form_passes() {
        let form = FormSnapshot::new()
            .with("name", "Ana")
            .with("email", "ana@example.com")
            .with("subject", "Encargo")
            .with("message", "Hola, me interesa un retrato.");

        assert!(validate_form(&form).is_empty());
    }
}
