//! Client-side form validation.
//!
//! Every form is a plain struct of raw field values as typed by the user.
//! `validate()` checks the whole shape at once and either returns a typed
//! input ready for the store or a [`ValidationErrors`] listing every failing
//! field. Nothing is trimmed before length checks.

mod account;
mod entity;

pub use account::{LoginForm, ProfileForm, ProfileInput, RegisterForm, RegisterInput};
pub use entity::{
    DecisionForm, DecisionInput, ProjectForm, ProjectInput, TaskForm, TaskInput, split_list,
};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// A single failing field with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field errors produced by one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
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

    /// First message reported for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Finish a validation pass: `Ok(value)` when nothing failed.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Length in Unicode scalar values.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub(crate) fn check_min(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    min: usize,
    message: &str,
) {
    if char_len(value) < min {
        errors.add(field, message);
    }
}

pub(crate) fn check_max(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    max: usize,
    message: &str,
) {
    if char_len(value) > max {
        errors.add(field, message);
    }
}

pub(crate) const INVALID_EMAIL: &str = "Invalid email address.";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Check the shape of an email address.
///
/// The local part may not start with a dot or contain consecutive dots.
pub fn is_valid_email(value: &str) -> bool {
    if value.starts_with('.') || value.contains("..") {
        return false;
    }
    EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("dev@collabcut.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(is_valid_email("o'brien@example.ie"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email(".user@example.com"));
        assert!(!is_valid_email("us..er@example.com"));
        assert!(!is_valid_email("user.@example.com"));
        assert!(!is_valid_email("user@-example.com"));
        assert!(!is_valid_email("user@example.c"));
        assert!(!is_valid_email("user name@example.com"));
    }

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(char_len("Año"), 3);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_validation_errors_display_and_lookup() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());
        errors.add("name", "too short");
        errors.add("email", "bad");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("bad"));
        assert!(!errors.has("bio"));
        assert_eq!(errors.to_string(), "name: too short; email: bad");
    }

    #[test]
    fn test_validation_errors_serialize_as_list() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "required");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"[{"field":"title","message":"required"}]"#);
    }
}
