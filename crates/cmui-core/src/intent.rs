#![forbid(unsafe_code)]

//! Presentation intents.
//!
//! The engine never mutates a document directly. Every visible effect is an
//! [`Intent`] the host applies (or a test asserts against). Intents are
//! serialized with an `intent` tag so the JS side can switch on it.

use serde::{Deserialize, Serialize};

use crate::ids::{FormId, NoticeId, RowId};

/// Visual treatment of an input or textarea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldVisual {
    /// Default border, no glow.
    #[default]
    Neutral,
    /// Green border after a passing check.
    Success,
    /// Red border after a failing check.
    Error,
}

/// Semantic kind of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
    #[default]
    Info,
}

impl NoticeKind {
    /// Icon name the page's icon font uses for this kind.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "exclamation-triangle",
            Self::Info => "info-circle",
        }
    }
}

/// Status banner state of an edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    /// Warning style: at least one field differs from its loaded value.
    Unsaved,
    /// Success style: every field matches its loaded value.
    Saved,
}

impl FormStatus {
    /// Banner text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Unsaved => "You have unsaved changes",
            Self::Saved => "All changes saved",
        }
    }
}

/// Color band of a textarea character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterLevel {
    #[default]
    Normal,
    Warning,
    Danger,
}

/// One observable effect on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Restyle a field.
    SetFieldVisual {
        form: FormId,
        field: String,
        visual: FieldVisual,
    },
    /// Attach an error annotation below a field.
    ShowFieldError {
        form: FormId,
        field: String,
        message: String,
    },
    /// Remove the field's error annotation.
    RemoveFieldError { form: FormId, field: String },

    /// Cancel the native submission.
    PreventSubmit { form: FormId },
    /// Let the native submission proceed.
    AllowSubmit { form: FormId },
    /// Disable the submit control and show the processing label.
    SetSubmitProcessing { form: FormId, label: String },
    /// Re-enable the submit control with its original label.
    RestoreSubmit { form: FormId, label: String },

    /// Create or update the form's status banner.
    SetFormStatus { form: FormId, status: FormStatus },
    /// Ask the browser to confirm leaving the page.
    PromptBeforeUnload { message: String },

    /// Insert the notices container at the top of the main content.
    CreateNoticeRegion,
    /// Append a notice to the notices container.
    ShowNotice {
        notice: NoticeId,
        kind: NoticeKind,
        message: String,
    },
    /// Start the notice's fade-out.
    FadeNotice { notice: NoticeId },
    /// Remove the notice from the page.
    RemoveNotice { notice: NoticeId },

    /// Cancel the native reset.
    PreventReset { form: FormId },

    /// Replace the delete button content with a spinner and ignore clicks.
    SetDeleteBusy { row: RowId },
    /// Fade and shrink a row that is about to be deleted.
    DimRow { row: RowId },
    /// Full page navigation.
    Navigate { url: String },

    /// Update a textarea character counter.
    SetCounter {
        form: FormId,
        field: String,
        text: String,
        level: CounterLevel,
    },

    /// Re-append the table body rows in this order.
    ReorderRows { order: Vec<RowId> },
    /// Flash a header cell after sorting.
    HighlightHeader { column: usize },
    /// Return a header cell to its normal background.
    ClearHeaderHighlight { column: usize },

    /// Cancel the browser default for the current key press.
    PreventDefault,
    /// Move focus to a field.
    FocusField { form: FormId, field: String },
    /// Smooth-scroll an element with this id into view.
    ScrollIntoView { anchor: String },
    /// Drop focus from the active element.
    BlurActive,
}

impl Intent {
    /// Short stable name, identical to the serialized tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetFieldVisual { .. } => "set_field_visual",
            Self::ShowFieldError { .. } => "show_field_error",
            Self::RemoveFieldError { .. } => "remove_field_error",
            Self::PreventSubmit { .. } => "prevent_submit",
            Self::AllowSubmit { .. } => "allow_submit",
            Self::SetSubmitProcessing { .. } => "set_submit_processing",
            Self::RestoreSubmit { .. } => "restore_submit",
            Self::SetFormStatus { .. } => "set_form_status",
            Self::PromptBeforeUnload { .. } => "prompt_before_unload",
            Self::CreateNoticeRegion => "create_notice_region",
            Self::ShowNotice { .. } => "show_notice",
            Self::FadeNotice { .. } => "fade_notice",
            Self::RemoveNotice { .. } => "remove_notice",
            Self::PreventReset { .. } => "prevent_reset",
            Self::SetDeleteBusy { .. } => "set_delete_busy",
            Self::DimRow { .. } => "dim_row",
            Self::Navigate { .. } => "navigate",
            Self::SetCounter { .. } => "set_counter",
            Self::ReorderRows { .. } => "reorder_rows",
            Self::HighlightHeader { .. } => "highlight_header",
            Self::ClearHeaderHighlight { .. } => "clear_header_highlight",
            Self::PreventDefault => "prevent_default",
            Self::FocusField { .. } => "focus_field",
            Self::ScrollIntoView { .. } => "scroll_into_view",
            Self::BlurActive => "blur_active",
        }
    }
}
