#![forbid(unsafe_code)]

//! Page-wide keyboard shortcuts and initial focus.

use cmui_core::event::{KeyCode, KeyEvent};
use cmui_core::ids::FormId;
use cmui_core::intent::Intent;

use crate::form::FormState;

/// Field focused by the "new contact" shortcut.
pub const ADD_FIELD: &str = "name";
/// Element id of the add-contact section.
pub const ADD_ANCHOR: &str = "add-contact";

/// A recognized shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl+N / Cmd+N.
    NewContact,
    /// Escape.
    ReleaseFocus,
}

impl Shortcut {
    /// Match a key press against the page shortcuts.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('n') if key.command() => Some(Self::NewContact),
            KeyCode::Escape => Some(Self::ReleaseFocus),
            _ => None,
        }
    }
}

/// The form holding the add-contact `name` field, preferring non-edit forms.
pub fn add_form<'a>(forms: impl IntoIterator<Item = &'a FormState>) -> Option<FormId> {
    let mut fallback = None;
    for state in forms {
        if state.field(ADD_FIELD).is_none() {
            continue;
        }
        if !state.form().is_edit() {
            return Some(state.id());
        }
        fallback.get_or_insert(state.id());
    }
    fallback
}

/// Intents for a shortcut. `target` is the add form, if the page has one.
#[must_use]
pub fn shortcut_intents(shortcut: Shortcut, target: Option<FormId>) -> Vec<Intent> {
    match shortcut {
        Shortcut::NewContact => {
            let mut out = vec![Intent::PreventDefault];
            if let Some(form) = target {
                out.push(Intent::FocusField {
                    form,
                    field: ADD_FIELD.to_string(),
                });
                out.push(Intent::ScrollIntoView {
                    anchor: ADD_ANCHOR.to_string(),
                });
            }
            out
        }
        Shortcut::ReleaseFocus => vec![Intent::BlurActive],
    }
}

/// First non-readonly field across `forms`, in page order.
pub fn first_editable<'a>(
    forms: impl IntoIterator<Item = &'a FormState>,
) -> Option<(FormId, String)> {
    forms.into_iter().find_map(|state| {
        state
            .fields()
            .find(|f| !f.readonly)
            .map(|f| (state.id(), f.name.clone()))
    })
}

/// Whether autofocus should run for this location hash.
#[must_use]
pub fn autofocus_allowed(hash: Option<&str>) -> bool {
    hash.map(|h| h.trim_start_matches('#')) != Some(ADD_ANCHOR)
}
