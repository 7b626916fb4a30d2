#![forbid(unsafe_code)]

//! JSON event schema for the web host.
//!
//! The host (JS/TS) serializes each DOM event as one object tagged by
//! `kind`. Modifiers travel as a compact `mods: u8` bitset, the same bits as
//! [`cmui_core::event::Modifiers`]. Keys use DOM `KeyboardEvent.key`.
//!
//! ```json
//! {"kind": "input", "form": 1, "field": "name", "value": "Al"}
//! {"kind": "key", "key": "n", "mods": 4}
//! ```

use core::time::Duration;

use serde::{Deserialize, Serialize};

use cmui_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use cmui_core::ids::{FormId, NoticeId, RowId};

use crate::Result;

/// Wire form of [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventJson {
    Blur {
        form: FormId,
        field: String,
    },
    Input {
        form: FormId,
        field: String,
        #[serde(default)]
        value: String,
    },
    Submit {
        form: FormId,
    },
    Reset {
        form: FormId,
    },
    DeleteClick {
        row: RowId,
    },
    HeaderClick {
        column: usize,
    },
    DismissNotice {
        notice: NoticeId,
    },
    Key {
        key: String,
        #[serde(default)]
        mods: u8,
    },
    BeforeUnload,
}

impl From<EventJson> for Event {
    fn from(json: EventJson) -> Self {
        match json {
            EventJson::Blur { form, field } => Self::Blur { form, field },
            EventJson::Input { form, field, value } => Self::Input { form, field, value },
            EventJson::Submit { form } => Self::Submit { form },
            EventJson::Reset { form } => Self::Reset { form },
            EventJson::DeleteClick { row } => Self::DeleteClick { row },
            EventJson::HeaderClick { column } => Self::HeaderClick { column },
            EventJson::DismissNotice { notice } => Self::DismissNotice { notice },
            EventJson::Key { key, mods } => Self::Key(
                KeyEvent::new(KeyCode::from_dom_key(&key))
                    .with_modifiers(Modifiers::from_bits_truncate(mods)),
            ),
            EventJson::BeforeUnload => Self::BeforeUnload,
        }
    }
}

impl From<&Event> for EventJson {
    fn from(event: &Event) -> Self {
        match event {
            Event::Blur { form, field } => Self::Blur {
                form: *form,
                field: field.clone(),
            },
            Event::Input { form, field, value } => Self::Input {
                form: *form,
                field: field.clone(),
                value: value.clone(),
            },
            Event::Submit { form } => Self::Submit { form: *form },
            Event::Reset { form } => Self::Reset { form: *form },
            Event::DeleteClick { row } => Self::DeleteClick { row: *row },
            Event::HeaderClick { column } => Self::HeaderClick { column: *column },
            Event::DismissNotice { notice } => Self::DismissNotice { notice: *notice },
            Event::Key(key) => Self::Key {
                key: key.code.to_dom_key(),
                mods: key.modifiers.bits(),
            },
            Event::BeforeUnload => Self::BeforeUnload,
        }
    }
}

/// Decode one host event.
pub fn parse_event(json: &str) -> Result<Event> {
    let wire: EventJson = serde_json::from_str(json)?;
    Ok(wire.into())
}

/// Encode an event for record/replay logs.
pub fn encode_event(event: &Event) -> Result<String> {
    Ok(serde_json::to_string(&EventJson::from(event))?)
}

/// Convert a host time step in milliseconds to a [`Duration`].
///
/// Negative and NaN steps are zero; steps too large to represent clamp to
/// [`Duration::MAX`].
#[must_use]
pub fn host_millis(ms: f64) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
}
