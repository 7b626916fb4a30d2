#![forbid(unsafe_code)]

//! Contact form fields and the per-kind rule engine.
//!
//! A field's kind comes from its `name` attribute. Validation always runs on
//! the trimmed current value and is recomputed on every call.
//!
//! Rule order, first failure wins:
//!
//! 1. Required and blank: `"This field is required"`.
//! 2. Blank and optional: valid, no further checks.
//! 3. Kind rules on the trimmed value.
//!
//! | Kind | Rules |
//! |------|-------|
//! | `name` | 2 to 100 characters |
//! | `email` | structural address check, then at most 100 characters |
//! | `message` | at most 1000 characters |
//! | other | none |

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::validators::{All, Required, ValidationResult, Validator, ValidatorBuilder};

/// Shortest accepted contact name.
pub const NAME_MIN_CHARS: usize = 2;
/// Longest accepted contact name.
pub const NAME_MAX_CHARS: usize = 100;
/// Longest accepted email address.
pub const EMAIL_MAX_CHARS: usize = 100;
/// Longest accepted message body.
pub const MESSAGE_MAX_CHARS: usize = 1000;

static NAME_RULES: LazyLock<All<str>> = LazyLock::new(|| {
    ValidatorBuilder::<str>::new()
        .min_length(NAME_MIN_CHARS, "Name must be at least {min} characters")
        .max_length(NAME_MAX_CHARS, "Name must be less than {max} characters")
        .build()
});

static EMAIL_RULES: LazyLock<All<str>> = LazyLock::new(|| {
    ValidatorBuilder::<str>::new()
        .email("Please enter a valid email address")
        .max_length(EMAIL_MAX_CHARS, "Email must be less than {max} characters")
        .build()
});

static MESSAGE_RULES: LazyLock<All<str>> = LazyLock::new(|| {
    ValidatorBuilder::<str>::new()
        .max_length(MESSAGE_MAX_CHARS, "Message must be less than {max} characters")
        .build()
});

static GENERIC_RULES: LazyLock<All<str>> = LazyLock::new(|| ValidatorBuilder::<str>::new().build());

/// Semantic kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Name,
    Email,
    Message,
    #[default]
    Generic,
}

impl FieldKind {
    /// Derive the kind from a field's `name` attribute.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "name" => Self::Name,
            "email" => Self::Email,
            "message" => Self::Message,
            _ => Self::Generic,
        }
    }

    /// Rules applied to a non-blank value of this kind.
    #[must_use]
    pub fn rules(self) -> &'static All<str> {
        match self {
            Self::Name => &*NAME_RULES,
            Self::Email => &*EMAIL_RULES,
            Self::Message => &*MESSAGE_RULES,
            Self::Generic => &*GENERIC_RULES,
        }
    }
}

/// One named input or textarea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub required: bool,
    /// The `maxlength` attribute, if any.
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub textarea: bool,
}

impl Field {
    /// Optional single-line field with an initial value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            required: false,
            max_length: None,
            readonly: false,
            textarea: false,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    #[must_use]
    pub fn textarea(mut self) -> Self {
        self.textarea = true;
        self
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        FieldKind::from_name(&self.name)
    }

    /// Run the rules against the current value.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        validate_value(self.kind(), self.required, &self.value)
    }
}

/// Validate a raw value as a field of `kind`.
#[must_use]
pub fn validate_value(kind: FieldKind, required: bool, raw: &str) -> ValidationResult {
    let value = raw.trim();
    if value.is_empty() {
        return if required {
            Required::new().validate(value)
        } else {
            ValidationResult::Valid
        };
    }
    kind.rules().validate(value)
}

/// Validate a field. Same as [`Field::validate`].
#[must_use]
pub fn validate(field: &Field) -> ValidationResult {
    field.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(field: &Field) -> Option<String> {
        field.validate().error_message()
    }

    #[test]
    fn kind_follows_name_attribute() {
        assert_eq!(FieldKind::from_name("name"), FieldKind::Name);
        assert_eq!(FieldKind::from_name("email"), FieldKind::Email);
        assert_eq!(FieldKind::from_name("message"), FieldKind::Message);
        assert_eq!(FieldKind::from_name("phone"), FieldKind::Generic);
        assert_eq!(FieldKind::from_name("Name"), FieldKind::Generic);
    }

    #[test]
    fn name_length_boundaries() {
        let one = Field::new("name", "A").required();
        assert_eq!(msg(&one).as_deref(), Some("Name must be at least 2 characters"));

        assert!(Field::new("name", "Al").validate().is_valid());
        assert!(Field::new("name", "a".repeat(100)).validate().is_valid());

        let long = Field::new("name", "a".repeat(101));
        assert_eq!(
            msg(&long).as_deref(),
            Some("Name must be less than 100 characters")
        );
    }

    #[test]
    fn email_examples() {
        assert!(Field::new("email", "a@b.co").validate().is_valid());
        assert_eq!(
            msg(&Field::new("email", "a@b")).as_deref(),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            msg(&Field::new("email", "a b@c.d")).as_deref(),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn email_too_long_after_shape_check() {
        let local = "a".repeat(95);
        let long = format!("{local}@b.com");
        assert_eq!(long.chars().count(), 101);
        assert_eq!(
            msg(&Field::new("email", long)).as_deref(),
            Some("Email must be less than 100 characters")
        );
    }

    #[test]
    fn message_limit() {
        assert!(Field::new("message", "m".repeat(1000)).validate().is_valid());
        assert_eq!(
            msg(&Field::new("message", "m".repeat(1001))).as_deref(),
            Some("Message must be less than 1000 characters")
        );
    }

    #[test]
    fn required_blank_wins_over_kind_rules() {
        for name in ["name", "email", "message", "phone"] {
            let field = Field::new(name, "   ").required();
            assert_eq!(msg(&field).as_deref(), Some("This field is required"));
        }
    }

    #[test]
    fn optional_blank_is_valid() {
        assert!(Field::new("email", "").validate().is_valid());
        assert!(Field::new("name", "  ").validate().is_valid());
    }

    #[test]
    fn values_are_trimmed_before_checks() {
        assert!(Field::new("name", "  Al  ").validate().is_valid());
        assert!(Field::new("email", " a@b.co ").validate().is_valid());
        assert!(Field::new("name", " A ").validate().is_invalid());
    }

    #[test]
    fn generic_fields_only_check_required() {
        assert!(Field::new("phone", "x".repeat(5000)).validate().is_valid());
        assert!(Field::new("phone", "").required().validate().is_invalid());
    }

    #[test]
    fn deserializes_with_defaults() {
        let field: Field = serde_json::from_str(r#"{"name":"message","textarea":true}"#).unwrap();
        assert_eq!(field.value, "");
        assert!(!field.required);
        assert!(field.textarea);
        assert_eq!(field.kind(), FieldKind::Message);
    }
}
