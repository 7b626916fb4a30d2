#![forbid(unsafe_code)]

//! Field validation for the contact-manager forms.
//!
//! This crate provides:
//! - A core [`Validator`] trait and built-in validators (required, min/max
//!   length, email)
//! - Ordered composition via [`All`] and [`ValidatorBuilder`]
//! - Error messages with `{param}` interpolation and stable error codes
//! - The [`Field`] model and the per-kind rule engine ([`validate`])
//!
//! # Example
//!
//! ```rust
//! use cmui_validation::{validate, Field};
//!
//! let email = Field::new("email", "a@b").required();
//! assert_eq!(
//!     validate(&email).error_message().as_deref(),
//!     Some("Please enter a valid email address"),
//! );
//! ```

pub mod field;
mod validators;

pub use field::{
    EMAIL_MAX_CHARS, Field, FieldKind, MESSAGE_MAX_CHARS, NAME_MAX_CHARS, NAME_MIN_CHARS, validate,
    validate_value,
};
pub use validators::{
    // Composition
    All,
    // Error codes
    ERROR_CODE_EMAIL,
    ERROR_CODE_MAX_LENGTH,
    ERROR_CODE_MIN_LENGTH,
    ERROR_CODE_REQUIRED,
    EMAIL_PATTERN,
    // Built-in validators
    Email,
    MaxLength,
    MinLength,
    Required,
    // Core types
    ValidationError,
    ValidationResult,
    Validator,
    // Builder
    ValidatorBuilder,
};
