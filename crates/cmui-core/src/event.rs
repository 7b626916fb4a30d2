#![forbid(unsafe_code)]

//! Canonical page events.
//!
//! Each variant corresponds to one DOM listener the enhancement layer
//! installs. Fields are addressed by their owning form plus their `name`
//! attribute, which is how the page identifies them.
//!
//! # Design Notes
//!
//! - `Input` carries the full current value, not a delta.
//! - `Blur` carries no value; the engine already knows the latest one.
//! - Key events only matter for page-wide shortcuts, so only presses exist.

use bitflags::bitflags;

use crate::ids::{FormId, NoticeId, RowId};

/// Canonical page event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A field lost focus.
    Blur { form: FormId, field: String },

    /// A field's value changed (fires on every keystroke).
    Input {
        form: FormId,
        field: String,
        value: String,
    },

    /// A form's submit was attempted.
    Submit { form: FormId },

    /// A form's reset button was clicked.
    Reset { form: FormId },

    /// The delete action inside a table row was clicked.
    DeleteClick { row: RowId },

    /// A contacts-table header cell was clicked.
    HeaderClick { column: usize },

    /// The close button of a notice was clicked.
    DismissNotice { notice: NoticeId },

    /// A key was pressed with focus anywhere on the page.
    Key(KeyEvent),

    /// The page is about to be unloaded (navigation, tab close, reload).
    BeforeUnload,
}

impl Event {
    /// Short stable name used in logs and traces.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Blur { .. } => "blur",
            Self::Input { .. } => "input",
            Self::Submit { .. } => "submit",
            Self::Reset { .. } => "reset",
            Self::DeleteClick { .. } => "delete_click",
            Self::HeaderClick { .. } => "header_click",
            Self::DismissNotice { .. } => "dismiss_notice",
            Self::Key(_) => "key",
            Self::BeforeUnload => "before_unload",
        }
    }

    /// The form this event targets, if any.
    #[must_use]
    pub fn form(&self) -> Option<FormId> {
        match self {
            Self::Blur { form, .. }
            | Self::Input { form, .. }
            | Self::Submit { form }
            | Self::Reset { form } => Some(*form),
            _ => None,
        }
    }
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers held during the press.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Key press without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// `true` when Ctrl or the platform command key (Cmd/Super) is held.
    #[must_use]
    pub fn command(&self) -> bool {
        self.modifiers.intersects(Modifiers::CTRL | Modifiers::SUPER)
    }
}

/// Normalized key identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, as reported by DOM `key`.
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    /// Anything the page shortcuts do not care about.
    Other(String),
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` string.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other(key.to_string()),
                }
            }
        }
    }

    /// Inverse of [`KeyCode::from_dom_key`].
    #[must_use]
    pub fn to_dom_key(&self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::Enter => "Enter".to_string(),
            Self::Escape => "Escape".to_string(),
            Self::Tab => "Tab".to_string(),
            Self::Backspace => "Backspace".to_string(),
            Self::Other(key) => key.clone(),
        }
    }
}

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}
