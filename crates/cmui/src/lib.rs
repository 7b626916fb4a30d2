#![forbid(unsafe_code)]

//! Contact-manager page engine, public facade.
//!
//! Re-exports the common types from the internal crates and offers a small
//! prelude. The `web` feature (on by default) adds the host runtime.

// --- Core re-exports -------------------------------------------------------

pub use cmui_core::clock::{Clock, DeterministicClock};
pub use cmui_core::event::{Event, KeyCode, KeyEvent, Modifiers};
pub use cmui_core::ids::{FormId, NoticeId, RowId};
pub use cmui_core::intent::{CounterLevel, FieldVisual, FormStatus, Intent, NoticeKind};

// --- Validation re-exports -------------------------------------------------

pub use cmui_validation::{Field, FieldKind, ValidationError, ValidationResult, Validator};

// --- Behavior re-exports ---------------------------------------------------

pub use cmui_forms::{
    ConfirmPrompt, ContactRow, ContactTable, DeleteOutcome, Form, ScriptedPrompt, SubmitDecision,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "web")]
pub use cmui_web::{
    EnhanceError as Error, Enhancer, EnhancerConfig, FlashMessage, Page, Result, parse_event,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ConfirmPrompt, ContactRow, ContactTable, Event, Field, Form, FormId, Intent, KeyCode,
        KeyEvent, Modifiers, RowId,
    };

    #[cfg(feature = "web")]
    pub use crate::{Enhancer, EnhancerConfig, Error, Page, Result};

    pub use crate::{core, forms, validation};

    #[cfg(feature = "web")]
    pub use crate::web;
}

pub use cmui_core as core;
pub use cmui_forms as forms;
pub use cmui_validation as validation;
#[cfg(feature = "web")]
pub use cmui_web as web;
