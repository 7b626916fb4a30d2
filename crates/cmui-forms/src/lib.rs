#![forbid(unsafe_code)]

//! Page behaviors for the contact manager.
//!
//! Each module owns one behavior and reports through [`Effects`]:
//!
//! - [`form`]: bound forms, field annotations and the form gate
//! - [`submit`]: submission decision, processing state and stalled restore
//! - [`dirty`]: unsaved-changes tracking and the unload guard
//! - [`notice`]: transient notices and server flash messages
//! - [`confirm`]: delete and reset confirmation
//! - [`counter`]: textarea character counters
//! - [`table`]: contacts table rows and sorting
//! - [`shortcuts`]: keyboard shortcuts and autofocus

pub mod confirm;
pub mod counter;
pub mod dirty;
pub mod effects;
pub mod form;
pub mod notice;
pub mod shortcuts;
pub mod submit;
pub mod table;

pub use confirm::{ConfirmPrompt, DeleteFlow, DeleteOutcome, ScriptedPrompt};
pub use dirty::{DirtyRegistry, DirtyTracker};
pub use effects::{Effects, Task};
pub use form::{Form, FormState, SubmitControl};
pub use notice::{NoticeCenter, NoticeTimings};
pub use submit::{SubmitController, SubmitDecision, SubmitSettings};
pub use table::{ContactRow, ContactTable};
