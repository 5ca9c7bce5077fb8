//! Field Validation
//!
//! Request bodies are validated by an explicit [`Validate`] implementation
//! per request type. Every failing field is collected so the client gets
//! the whole list in one response.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// A single failing field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears in the request body
    pub field: Cow<'static, str>,
    /// Human readable reason
    pub message: String,
}

/// Accumulated validation failures for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for a single failing field
    pub fn single(field: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a failing field
    pub fn add(&mut self, field: impl Into<Cow<'static, str>>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Record `field` as missing when `value` is blank
    ///
    /// Returns the trimmed value when present.
    pub fn require<'a>(&mut self, field: &'static str, value: &'a str) -> Option<&'a str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.add(field, format!("{field} is required"));
            None
        } else {
            Some(trimmed)
        }
    }

    /// Keep the `Ok` value, or record the error message against `field`
    pub fn check<T, E: fmt::Display>(
        &mut self,
        field: &'static str,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.add(field, e.to_string());
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether any error was recorded for `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Err(self)` when anything failed, otherwise `Ok(())`
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.errors.iter().map(|e| e.field.as_ref()).collect();
        write!(f, "validation failed for: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Explicit validation of an inbound request
///
/// `Output` is the validated, typed form handed to the application layer.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ValidationErrors>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_collects_blank_fields() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.require("name", "  Alice "), Some("Alice"));
        assert_eq!(errors.require("phone", "   "), None);
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("phone"));
        assert!(!errors.has_field("name"));
    }

    #[test]
    fn test_check_records_message() {
        let mut errors = ValidationErrors::new();
        let parsed: Option<i32> = errors.check("age", "abc".parse::<i32>());
        assert!(parsed.is_none());
        assert_eq!(errors.errors()[0].field, "age");
        assert!(!errors.errors()[0].message.is_empty());
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        let err = ValidationErrors::single("email", "Invalid email format")
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "validation failed for: email");
    }

    #[test]
    fn test_serializes_field_and_message() {
        let errors = ValidationErrors::single("password", "too short");
        let json = serde_json::to_value(errors.errors()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "field": "password", "message": "too short" }])
        );
    }
}
