#![forbid(unsafe_code)]

//! Character counters under textareas.

use cmui_core::ids::FormId;
use cmui_core::intent::{CounterLevel, Intent};
use cmui_validation::Field;

use crate::effects::Effects;

/// Limit used when a textarea has no `maxlength`.
pub const DEFAULT_COUNTER_MAX: usize = 1000;

/// Counter text and color band for `len` characters out of `max`.
///
/// Above 90% of `max` is danger, above 70% is warning.
#[must_use]
pub fn counter_state(len: usize, max: usize) -> (String, CounterLevel) {
    // Integer form of `len > max * 0.9` and `len > max * 0.7`.
    let level = if len.saturating_mul(10) > max.saturating_mul(9) {
        CounterLevel::Danger
    } else if len.saturating_mul(10) > max.saturating_mul(7) {
        CounterLevel::Warning
    } else {
        CounterLevel::Normal
    };
    (format!("{len}/{max} characters"), level)
}

/// Emit the counter for a textarea. Other fields are ignored.
pub fn render_counter(fx: &mut Effects, form: FormId, field: &Field) {
    if !field.textarea {
        return;
    }
    let max = field.max_length.unwrap_or(DEFAULT_COUNTER_MAX);
    let (text, level) = counter_state(field.value.chars().count(), max);
    fx.emit(Intent::SetCounter {
        form,
        field: field.name.clone(),
        text,
        level,
    });
}
