#![forbid(unsafe_code)]

//! Core validation types and built-in validators.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Error Codes
// ---------------------------------------------------------------------------

/// Error code for required field validation.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Error code for minimum length validation.
pub const ERROR_CODE_MIN_LENGTH: &str = "too_short";
/// Error code for maximum length validation.
pub const ERROR_CODE_MAX_LENGTH: &str = "too_long";
/// Error code for email validation.
pub const ERROR_CODE_EMAIL: &str = "email";

/// Structural email check: something, `@`, something, `.`, something, with
/// no whitespace and no second `@`. Deliberately permissive.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A validation error with code, message template, and interpolation parameters.
///
/// # Example
///
/// ```rust
/// use cmui_validation::ValidationError;
///
/// let error = ValidationError::new("too_short", "Name must be at least {min} characters")
///     .with_param("min", 2);
///
/// assert_eq!(error.format_message(), "Name must be at least 2 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable error code for programmatic handling.
    pub code: &'static str,
    /// Human-readable message template.
    pub message: String,
    /// Parameters for `{key}` interpolation.
    pub params: HashMap<String, String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter for message interpolation.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Format the message, replacing each `{key}` with its parameter value.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut result = self.message.clone();
        for (key, value) in &self.params {
            result = result.replace(&format!("{{{key}}}"), value);
        }
        result
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_message())
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// Outcome of one validation pass. Never cached; recompute from the value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    #[default]
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Formatted message if invalid, `None` if valid.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ValidationError::format_message)
    }

    /// First error wins.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::Valid => other,
            Self::Invalid(_) => self,
        }
    }
}

// ---------------------------------------------------------------------------
// Validator Trait
// ---------------------------------------------------------------------------

/// A check over values of type `T`.
///
/// # Implementing a Custom Validator
///
/// ```rust
/// use cmui_validation::{ValidationError, ValidationResult, Validator};
///
/// struct NoDigits;
///
/// impl Validator<str> for NoDigits {
///     fn validate(&self, value: &str) -> ValidationResult {
///         if value.chars().any(|c| c.is_ascii_digit()) {
///             ValidationResult::Invalid(ValidationError::new("no_digits", self.error_message()))
///         } else {
///             ValidationResult::Valid
///         }
///     }
///
///     fn error_message(&self) -> &str {
///         "Digits are not allowed"
///     }
/// }
///
/// assert!(NoDigits.validate("Ada").is_valid());
/// ```
pub trait Validator<T: ?Sized>: Send + Sync {
    fn validate(&self, value: &T) -> ValidationResult;

    /// Default message template for this validator.
    fn error_message(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Built-in Validators
// ---------------------------------------------------------------------------

/// Fails on empty or whitespace-only strings.
#[derive(Debug, Clone)]
pub struct Required {
    message: String,
}

impl Default for Required {
    fn default() -> Self {
        Self {
            message: "This field is required".to_string(),
        }
    }
}

impl Required {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<str> for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.trim().is_empty() {
            ValidationResult::Invalid(ValidationError::new(ERROR_CODE_REQUIRED, &self.message))
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

/// Fails when a string has fewer than `min` characters.
#[derive(Debug, Clone)]
pub struct MinLength {
    pub min: usize,
    message: String,
}

impl MinLength {
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self {
            min,
            message: "Must be at least {min} characters".to_string(),
        }
    }

    /// Replace the message template. `{min}` and `{actual}` are interpolated.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<str> for MinLength {
    fn validate(&self, value: &str) -> ValidationResult {
        let len = value.chars().count();
        if len < self.min {
            ValidationResult::Invalid(
                ValidationError::new(ERROR_CODE_MIN_LENGTH, &self.message)
                    .with_param("min", self.min)
                    .with_param("actual", len),
            )
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

/// Fails when a string has more than `max` characters.
#[derive(Debug, Clone)]
pub struct MaxLength {
    pub max: usize,
    message: String,
}

impl MaxLength {
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self {
            max,
            message: "Must be at most {max} characters".to_string(),
        }
    }

    /// Replace the message template. `{max}` and `{actual}` are interpolated.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<str> for MaxLength {
    fn validate(&self, value: &str) -> ValidationResult {
        let len = value.chars().count();
        if len > self.max {
            ValidationResult::Invalid(
                ValidationError::new(ERROR_CODE_MAX_LENGTH, &self.message)
                    .with_param("max", self.max)
                    .with_param("actual", len),
            )
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

/// Structural email check against [`EMAIL_PATTERN`].
///
/// Empty strings pass; combine with [`Required`] to reject them.
#[derive(Debug, Clone)]
pub struct Email {
    message: String,
}

impl Default for Email {
    fn default() -> Self {
        Self {
            message: "Invalid email address".to_string(),
        }
    }
}

impl Email {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Validator<str> for Email {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.is_empty() {
            return ValidationResult::Valid;
        }
        let matches = EMAIL_RE.as_ref().is_some_and(|re| re.is_match(value));
        if matches {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError::new(ERROR_CODE_EMAIL, &self.message))
        }
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

// ---------------------------------------------------------------------------
// Composition Validators
// ---------------------------------------------------------------------------

/// Ordered list of validators; the first failure wins.
pub struct All<T: ?Sized> {
    validators: Vec<Box<dyn Validator<T>>>,
}

impl<T: ?Sized> All<T> {
    #[must_use]
    pub fn new(validators: Vec<Box<dyn Validator<T>>>) -> Self {
        Self { validators }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<T: ?Sized> Validator<T> for All<T> {
    fn validate(&self, value: &T) -> ValidationResult {
        for validator in &self.validators {
            let result = validator.validate(value);
            if result.is_invalid() {
                return result;
            }
        }
        ValidationResult::Valid
    }

    fn error_message(&self) -> &str {
        self.validators
            .first()
            .map_or("Validation failed", |v| v.error_message())
    }
}

impl<T: ?Sized> fmt::Debug for All<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("All")
            .field(
                "validators",
                &format!("[{} validators]", self.validators.len()),
            )
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ValidatorBuilder
// ---------------------------------------------------------------------------

/// Fluent construction of an [`All`] chain.
///
/// ```rust
/// use cmui_validation::{Validator, ValidatorBuilder};
///
/// let name = ValidatorBuilder::<str>::new()
///     .min_length(2, "Too short")
///     .max_length(100, "Too long")
///     .build();
///
/// assert!(name.validate("Al").is_valid());
/// assert!(name.validate("A").is_invalid());
/// ```
pub struct ValidatorBuilder<T: ?Sized> {
    validators: Vec<Box<dyn Validator<T>>>,
    _phantom: PhantomData<T>,
}

impl<T: ?Sized> Default for ValidatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> ValidatorBuilder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Append any validator.
    #[must_use]
    pub fn custom(mut self, validator: impl Validator<T> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    #[must_use]
    pub fn build(self) -> All<T> {
        All::new(self.validators)
    }
}

impl ValidatorBuilder<str> {
    /// Append a [`MinLength`] with its message template.
    #[must_use]
    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.custom(MinLength::new(min).with_message(message))
    }

    /// Append a [`MaxLength`] with its message template.
    #[must_use]
    pub fn max_length(self, max: usize, message: impl Into<String>) -> Self {
        self.custom(MaxLength::new(max).with_message(message))
    }

    /// Append an [`Email`] check with its message.
    #[must_use]
    pub fn email(self, message: impl Into<String>) -> Self {
        self.custom(Email::new().with_message(message))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ValidationError tests --

    #[test]
    fn validation_error_format_message() {
        let err = ValidationError::new("test", "Must be at least {min} characters")
            .with_param("min", 8);
        assert_eq!(err.format_message(), "Must be at least 8 characters");
        assert_eq!(format!("{err}"), "Must be at least 8 characters");
    }

    #[test]
    fn validation_error_unknown_placeholder_left_alone() {
        let err = ValidationError::new("test", "Between {min} and {max}").with_param("min", 1);
        assert_eq!(err.format_message(), "Between 1 and {max}");
    }

    // -- ValidationResult tests --

    #[test]
    fn validation_result_accessors() {
        assert!(ValidationResult::Valid.is_valid());
        assert_eq!(ValidationResult::Valid.error_message(), None);

        let invalid = ValidationResult::Invalid(ValidationError::new("x", "bad"));
        assert!(invalid.is_invalid());
        assert_eq!(invalid.error().map(|e| e.code), Some("x"));
        assert_eq!(invalid.error_message().as_deref(), Some("bad"));
    }

    #[test]
    fn validation_result_and_keeps_first_error() {
        let a = ValidationResult::Invalid(ValidationError::new("a", "a"));
        let b = ValidationResult::Invalid(ValidationError::new("b", "b"));
        assert_eq!(a.clone().and(b.clone()).error().map(|e| e.code), Some("a"));
        assert_eq!(ValidationResult::Valid.and(b).error().map(|e| e.code), Some("b"));
    }

    // -- Required tests --

    #[test]
    fn required_rejects_blank() {
        let v = Required::new();
        assert!(v.validate("").is_invalid());
        assert!(v.validate(" \t\n").is_invalid());
        assert!(v.validate("  x  ").is_valid());
        assert_eq!(
            v.validate("").error_message().as_deref(),
            Some("This field is required")
        );
    }

    // -- Length tests --

    #[test]
    fn min_length_boundary_and_params() {
        let v = MinLength::new(2).with_message("Name must be at least {min} characters");
        assert!(v.validate("A").is_invalid());
        assert!(v.validate("Al").is_valid());
        let err = v.validate("A");
        let err = err.error().unwrap();
        assert_eq!(err.code, ERROR_CODE_MIN_LENGTH);
        assert_eq!(err.params.get("actual"), Some(&"1".to_string()));
        assert_eq!(err.format_message(), "Name must be at least 2 characters");
    }

    #[test]
    fn max_length_counts_chars_not_bytes() {
        let v = MaxLength::new(4);
        assert!(v.validate("café").is_valid());
        assert!(v.validate("cafés").is_invalid());
        assert!(MaxLength::new(1).validate("🎉").is_valid());
    }

    // -- Email tests --

    #[test]
    fn email_pattern_compiles() {
        assert!(EMAIL_RE.is_some());
    }

    #[test]
    fn email_structural_check() {
        let v = Email::new();
        assert!(v.validate("a@b.co").is_valid());
        assert!(v.validate("first.last@sub.example.org").is_valid());
        assert!(v.validate("a@b").is_invalid());
        assert!(v.validate("a b@c.d").is_invalid());
        assert!(v.validate("a@@b.c").is_invalid());
        assert!(v.validate("@b.c").is_invalid());
        assert!(v.validate("").is_valid());
    }

    #[test]
    fn email_keeps_permissive_shape() {
        // Weird but structurally fine addresses pass.
        let v = Email::new();
        assert!(v.validate("x@y.z").is_valid());
        assert!(v.validate("a@b.c.").is_valid());
        assert!(v.validate("!#$@%.^").is_valid());
    }

    // -- Composition tests --

    #[test]
    fn builder_preserves_order() {
        let v = ValidatorBuilder::<str>::new()
            .custom(Required::new())
            .email("Bad address")
            .max_length(10, "At most {max}")
            .build();
        assert_eq!(v.len(), 3);
        assert_eq!(v.validate(" ").error().map(|e| e.code), Some(ERROR_CODE_REQUIRED));
        assert_eq!(v.validate("nope").error_message().as_deref(), Some("Bad address"));
        assert_eq!(
            v.validate("abcdef@gh.ij").error_message().as_deref(),
            Some("At most 10")
        );
        assert!(v.validate("ab@cd.ef").is_valid());
    }

    #[test]
    fn empty_all_is_valid() {
        let v: All<str> = ValidatorBuilder::new().build();
        assert!(v.is_empty());
        assert!(v.validate("anything").is_valid());
        assert_eq!(v.error_message(), "Validation failed");
    }
}
