//! Field-level validation errors for create requests.

use serde::Serialize;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the field (e.g. `address`, `location.lat`).
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

/// Errors produced when a create request fails schema validation.
///
/// Collects every offending field rather than stopping at the first one, so a
/// client can fix a request in a single round trip.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[error("validation failed: {}", summarize(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create an empty error collector.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a rejected field.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Record that a required field is absent.
    pub fn missing(&mut self, field: &'static str) {
        self.push(field, "is required");
    }

    /// The rejected fields, in the order they were checked.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether no field has been rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the given field was rejected.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Turn the collector into a result: `Ok(value)` if nothing was rejected.
    ///
    /// # Errors
    ///
    /// Returns `self` if at least one field was rejected.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Take a required string, rejecting absent or blank values.
pub(crate) fn required_text(
    errors: &mut ValidationError,
    field: &'static str,
    value: Option<String>,
) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        Some(_) => {
            errors.push(field, "must not be blank");
            String::new()
        }
        None => {
            errors.missing(field);
            String::new()
        }
    }
}

/// Normalize an optional string: blank becomes `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
