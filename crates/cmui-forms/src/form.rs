#![forbid(unsafe_code)]

//! Bound forms: field values, error annotations and the form gate.
//!
//! # Invariants
//!
//! 1. A field shows an error annotation iff its latest check failed.
//! 2. At most one annotation exists per field; an old one is removed before
//!    a new one is shown.
//! 3. Validity is recomputed from the current value on every check.
//!
//! # Failure Modes
//!
//! | Scenario | Behavior |
//! |----------|----------|
//! | Unknown field name | Check is skipped, returns `None` |
//! | Form without submit control | Gate still decides allow/prevent |
//! | Form without fields | Gate passes |

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use cmui_core::ids::FormId;
use cmui_core::intent::{FieldVisual, Intent};
use cmui_validation::{Field, ValidationResult};

use crate::effects::Effects;

/// Form action fragment that marks an edit form.
pub const EDIT_ACTION_MARKER: &str = "update";

/// The form's submit button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitControl {
    /// Label shown while idle, restored after a stalled submission.
    pub label: String,
}

impl SubmitControl {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Description of one `<form>` as rendered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    /// The `action` attribute.
    #[serde(default)]
    pub action: String,
    /// Demo forms are display-only and never bound.
    #[serde(default)]
    pub demo: bool,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub submit: Option<SubmitControl>,
    /// Whether the form has a reset button.
    #[serde(default)]
    pub reset: bool,
}

impl Form {
    #[must_use]
    pub fn new(id: FormId, action: impl Into<String>) -> Self {
        Self {
            id,
            action: action.into(),
            demo: false,
            fields: Vec::new(),
            submit: None,
            reset: false,
        }
    }

    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_submit(mut self, label: impl Into<String>) -> Self {
        self.submit = Some(SubmitControl::new(label));
        self
    }

    #[must_use]
    pub fn with_reset(mut self) -> Self {
        self.reset = true;
        self
    }

    #[must_use]
    pub fn demo(mut self) -> Self {
        self.demo = true;
        self
    }

    /// Edit forms get dirty tracking and the unload guard.
    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.action.contains(EDIT_ACTION_MARKER)
    }
}

/// Live state of a bound form.
#[derive(Debug, Clone)]
pub struct FormState {
    form: Form,
    annotated: HashSet<String>,
    processing: bool,
}

impl FormState {
    #[must_use]
    pub fn new(form: Form) -> Self {
        Self {
            form,
            annotated: HashSet::new(),
            processing: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> FormId {
        self.form.id
    }

    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.form.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.form.fields.iter()
    }

    /// Store a new value. Returns `false` for an unknown field.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.form.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value.clear();
                field.value.push_str(value);
                true
            }
            None => false,
        }
    }

    /// Whether the field currently shows an error annotation.
    #[must_use]
    pub fn has_error(&self, name: &str) -> bool {
        self.annotated.contains(name)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.annotated.len()
    }

    /// Whether the submit control is in its processing state.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub(crate) fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }

    /// Check one field and annotate it. `None` if the field is unknown.
    pub fn validate_field(&mut self, fx: &mut Effects, name: &str) -> Option<ValidationResult> {
        let result = self.field(name)?.validate();
        self.annotate(fx, name, &result);
        Some(result)
    }

    /// The form gate: check every required field, annotating each, and
    /// report whether all of them passed.
    pub fn validate_form(&mut self, fx: &mut Effects) -> bool {
        let required: Vec<String> = self
            .form
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.clone())
            .collect();

        let mut all_valid = true;
        for name in &required {
            if let Some(result) = self.validate_field(fx, name) {
                all_valid &= result.is_valid();
            }
        }
        cmui_core::debug!(
            target: cmui_core::targets::VALIDATION,
            form = %self.form.id,
            valid = all_valid,
            checked = required.len(),
            "form gate",
        );
        all_valid
    }

    /// Return a field to its neutral look and drop its annotation.
    pub fn clear_field(&mut self, fx: &mut Effects, name: &str) {
        fx.emit(Intent::SetFieldVisual {
            form: self.form.id,
            field: name.to_string(),
            visual: FieldVisual::Neutral,
        });
        self.remove_annotation(fx, name);
    }

    /// Neutralize every field (after a confirmed reset).
    pub fn clear_all(&mut self, fx: &mut Effects) {
        let names: Vec<String> = self.form.fields.iter().map(|f| f.name.clone()).collect();
        for name in &names {
            self.clear_field(fx, name);
        }
    }

    fn annotate(&mut self, fx: &mut Effects, name: &str, result: &ValidationResult) {
        let form = self.form.id;
        match result.error_message() {
            None => {
                fx.emit(Intent::SetFieldVisual {
                    form,
                    field: name.to_string(),
                    visual: FieldVisual::Success,
                });
                self.remove_annotation(fx, name);
            }
            Some(message) => {
                fx.emit(Intent::SetFieldVisual {
                    form,
                    field: name.to_string(),
                    visual: FieldVisual::Error,
                });
                self.remove_annotation(fx, name);
                fx.emit(Intent::ShowFieldError {
                    form,
                    field: name.to_string(),
                    message,
                });
                self.annotated.insert(name.to_string());
            }
        }
    }

    fn remove_annotation(&mut self, fx: &mut Effects, name: &str) {
        if self.annotated.remove(name) {
            fx.emit(Intent::RemoveFieldError {
                form: self.form.id,
                field: name.to_string(),
            });
        }
    }
}
