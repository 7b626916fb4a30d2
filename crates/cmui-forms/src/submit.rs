#![forbid(unsafe_code)]

//! Submission lifecycle: gate, processing state, stalled-submit restore.
//!
//! ```text
//! submit ──gate fails──▶ PreventSubmit + error notice
//!    │
//!    └──gate passes──▶ AllowSubmit + SetSubmitProcessing
//!                            │
//!                     (restore delay, page still here, still disabled)
//!                            ▼
//!                      RestoreSubmit + info notice
//! ```

use core::time::Duration;

use cmui_core::intent::{Intent, NoticeKind};
use cmui_core::scheduler::TaskOwner;

use crate::effects::{Effects, Task};
use crate::form::FormState;
use crate::notice::NoticeCenter;

/// Text and timing of the submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSettings {
    /// Label shown on the submit control while processing.
    pub processing_label: String,
    /// How long to wait before giving a stalled submit control back.
    pub restore_after: Duration,
    /// Notice shown when the gate rejects a submission.
    pub invalid_notice: String,
    /// Notice shown when a stalled submission is restored. `None` disables it.
    pub stalled_notice: Option<String>,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            processing_label: "Processing...".to_string(),
            restore_after: Duration::from_millis(5000),
            invalid_notice: "Please fix the errors below before submitting.".to_string(),
            stalled_notice: Some(
                "The submission is taking longer than expected. You can try again.".to_string(),
            ),
        }
    }
}

/// What the host should do with the native submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    Allow,
    Prevent,
}

/// Runs the gate on submit and owns the processing/restore cycle.
#[derive(Debug, Default)]
pub struct SubmitController {
    settings: SubmitSettings,
}

impl SubmitController {
    #[must_use]
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &SubmitSettings {
        &self.settings
    }

    /// Handle a submit attempt on `state`.
    pub fn on_submit(
        &self,
        fx: &mut Effects,
        notices: &mut NoticeCenter,
        state: &mut FormState,
    ) -> SubmitDecision {
        let form = state.id();
        if !state.validate_form(fx) {
            fx.emit(Intent::PreventSubmit { form });
            notices.show(fx, NoticeKind::Error, self.settings.invalid_notice.clone());
            cmui_core::info!(
                target: cmui_core::targets::SUBMIT,
                form = %form,
                errors = state.error_count(),
                "submission blocked",
            );
            return SubmitDecision::Prevent;
        }

        fx.emit(Intent::AllowSubmit { form });
        if state.form().submit.is_some() {
            fx.emit(Intent::SetSubmitProcessing {
                form,
                label: self.settings.processing_label.clone(),
            });
            // A resubmission restarts the restore window.
            fx.cancel_owner(TaskOwner::Form(form));
            fx.schedule(
                self.settings.restore_after,
                TaskOwner::Form(form),
                Task::RestoreSubmit { form },
            );
            state.set_processing(true);
        }
        cmui_core::info!(target: cmui_core::targets::SUBMIT, form = %form, "submission allowed");
        SubmitDecision::Allow
    }

    /// Restore timer fired; the page is evidently still here.
    pub fn on_restore_due(
        &self,
        fx: &mut Effects,
        notices: &mut NoticeCenter,
        state: &mut FormState,
    ) {
        if !state.is_processing() {
            return;
        }
        let Some(submit) = state.form().submit.as_ref() else {
            return;
        };
        let form = state.id();
        fx.emit(Intent::RestoreSubmit {
            form,
            label: submit.label.clone(),
        });
        state.set_processing(false);
        cmui_core::warn!(
            target: cmui_core::targets::SUBMIT,
            form = %form,
            "submission stalled, control restored",
        );
        if let Some(text) = &self.settings.stalled_notice {
            notices.show(fx, NoticeKind::Info, text.clone());
        }
    }
}
