#![forbid(unsafe_code)]

//! Unsaved-changes tracking for edit forms.
//!
//! A [`DirtyTracker`] snapshots raw (untrimmed) field values when an edit
//! form is bound. Each input recomputes every field's flag from the form's
//! current values; the form is dirty iff any flag is set. Submitting disarms
//! the tracker immediately, whatever the validation outcome, and the next
//! input re-arms it.

use std::collections::{HashMap, HashSet};

use cmui_core::ids::FormId;
use cmui_core::intent::{FormStatus, Intent};

use crate::effects::Effects;
use crate::form::Form;

/// Prompt shown by the browser when leaving with unsaved changes.
pub const UNLOAD_MESSAGE: &str = "You have unsaved changes. Are you sure you want to leave?";

/// Snapshot and per-field dirty flags for one edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyTracker {
    form: FormId,
    snapshot: HashMap<String, String>,
    dirty: HashSet<String>,
}

impl DirtyTracker {
    /// Snapshot every field's current value.
    #[must_use]
    pub fn capture(form: &Form) -> Self {
        Self {
            form: form.id,
            snapshot: form
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect(),
            dirty: HashSet::new(),
        }
    }

    #[must_use]
    pub fn form(&self) -> FormId {
        self.form
    }

    /// Value captured at bind time.
    #[must_use]
    pub fn original(&self, field: &str) -> Option<&str> {
        self.snapshot.get(field).map(String::as_str)
    }

    /// Recompute the flags from the form's current `(name, value)` pairs and
    /// return the form's status.
    ///
    /// Fields that were not present at bind time compare against `""`.
    pub fn update<'a>(
        &mut self,
        values: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> FormStatus {
        self.dirty.clear();
        for (field, value) in values {
            if value != self.original(field).unwrap_or("") {
                self.dirty.insert(field.to_string());
            }
        }
        self.status()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    #[must_use]
    pub fn is_field_dirty(&self, field: &str) -> bool {
        self.dirty.contains(field)
    }

    #[must_use]
    pub fn status(&self) -> FormStatus {
        if self.is_dirty() {
            FormStatus::Unsaved
        } else {
            FormStatus::Saved
        }
    }

    /// Forget every change without touching the snapshot.
    pub fn disarm(&mut self) {
        self.dirty.clear();
    }
}

/// Trackers for every bound edit form, keyed by form id.
#[derive(Debug, Default)]
pub struct DirtyRegistry {
    trackers: HashMap<FormId, DirtyTracker>,
}

impl DirtyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `form` if it is an edit form. Returns whether it is tracked.
    pub fn track(&mut self, form: &Form) -> bool {
        if !form.is_edit() {
            return false;
        }
        self.trackers
            .entry(form.id)
            .or_insert_with(|| DirtyTracker::capture(form));
        cmui_core::debug!(
            target: cmui_core::targets::DIRTY,
            form = %form.id,
            fields = form.fields.len(),
            "dirty snapshot taken",
        );
        true
    }

    /// Dispose of a form's tracker.
    pub fn release(&mut self, form: FormId) -> Option<DirtyTracker> {
        self.trackers.remove(&form)
    }

    #[must_use]
    pub fn get(&self, form: FormId) -> Option<&DirtyTracker> {
        self.trackers.get(&form)
    }

    #[must_use]
    pub fn is_tracked(&self, form: FormId) -> bool {
        self.trackers.contains_key(&form)
    }

    /// Recompute dirtiness after an input and refresh the status banner.
    pub fn on_input<'a>(
        &mut self,
        fx: &mut Effects,
        form: FormId,
        values: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) {
        let Some(tracker) = self.trackers.get_mut(&form) else {
            return;
        };
        let status = tracker.update(values);
        fx.emit(Intent::SetFormStatus { form, status });
    }

    /// Any submit disarms the unload guard for that form.
    pub fn on_submit(&mut self, form: FormId) {
        if let Some(tracker) = self.trackers.get_mut(&form) {
            if tracker.is_dirty() {
                cmui_core::debug!(
                    target: cmui_core::targets::DIRTY,
                    form = %form,
                    "unload guard disarmed by submit",
                );
            }
            tracker.disarm();
        }
    }

    #[must_use]
    pub fn any_dirty(&self) -> bool {
        self.trackers.values().any(DirtyTracker::is_dirty)
    }

    /// Ask for an unload prompt if any tracked form is dirty.
    pub fn before_unload(&self, fx: &mut Effects) -> bool {
        let dirty = self.any_dirty();
        if dirty {
            fx.emit(Intent::PromptBeforeUnload {
                message: UNLOAD_MESSAGE.to_string(),
            });
        }
        dirty
    }
}
