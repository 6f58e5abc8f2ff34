//! Contact form field declarations and form snapshots.
//!
//! Field specs are static: the contact form declares its four fields once, in
//! the order they are validated and reported.

use std::collections::BTreeMap;

/// Format matcher applied to a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPattern {
    /// `local@domain.tld` shape with no whitespace and a single `@`.
    Email,
}

/// Static description of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormFieldSpec {
    /// Field identifier, matching the input's `name` attribute
    pub name: &'static str,
    /// Minimum trimmed length in characters, if any
    pub min_length: Option<usize>,
    /// Format the trimmed value must match, if any
    pub pattern: Option<FieldPattern>,
    /// Message shown when the rule fails
    pub message: &'static str,
}

impl FormFieldSpec {
    const fn min_length(name: &'static str, min: usize, message: &'static str) -> Self {
        Self {
            name,
            min_length: Some(min),
            pattern: None,
            message,
        }
    }

    const fn pattern(name: &'static str, pattern: FieldPattern, message: &'static str) -> Self {
        Self {
            name,
            min_length: None,
            pattern: Some(pattern),
            message,
        }
    }
}

/// Fields of the contact form, in declaration order.
pub const CONTACT_FORM_FIELDS: [FormFieldSpec; 4] = [
    FormFieldSpec::min_length("name", 2, "El nombre debe tener al menos 2 caracteres"),
    FormFieldSpec::pattern(
        "email",
        FieldPattern::Email,
        "Por favor ingresa un email válido",
    ),
    FormFieldSpec::min_length("subject", 5, "El asunto debe tener al menos 5 caracteres"),
    FormFieldSpec::min_length("message", 10, "El mensaje debe tener al menos 10 caracteres"),
];

/// Look up a field definition by name.
pub fn field_spec(name: &str) -> Option<&'static FormFieldSpec> {
    CONTACT_FORM_FIELDS.iter().find(|spec| spec.name == name)
}

/// Field values read from a form at submit time.
///
/// Missing fields read as the empty string, like an absent `FormData` entry.
///
/// # Example
/// ```
/// use portfolio_interactions::FormSnapshot;
///
/// let form = FormSnapshot::new()
///     .with("name", "Ana")
///     .with("email", "ana@example.com");
///
/// assert_eq!(form.get("name"), "Ana");
/// assert_eq!(form.get("subject"), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    values: BTreeMap<String, String>,
}

impl FormSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Raw value of a field, or `""` when absent.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for FormSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (name, value) in iter {
            snapshot.set(name, value);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order() {
        let names: Vec<_> = CONTACT_FORM_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names, ["name", "email", "subject", "message"]);
    }

    #[test]
    fn test_field_spec_lookup() {
        assert_eq!(field_spec("subject").and_then(|s| s.min_length), Some(5));
        assert_eq!(
            field_spec("email").and_then(|s| s.pattern),
            Some(FieldPattern::Email)
        );
        assert!(field_spec("phone").is_none());
    }

    #[test]
    fn test_snapshot_missing_field_is_empty() {
        let form: FormSnapshot = [("name", "Ana")].into_iter().collect();
        assert_eq!(form.len(), 1);
        assert_eq!(form.get("name"), "Ana");
        assert_eq!(form.get("message"), "");
    }
}
