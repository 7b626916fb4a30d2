#![forbid(unsafe_code)]

//! Confirmation-gated actions: row deletion and form reset.
//!
//! The host answers confirmation prompts through [`ConfirmPrompt`]. A
//! declined prompt produces no delete intents at all; a declined reset only
//! cancels the native reset.

use core::time::Duration;
use std::collections::{HashSet, VecDeque};

use cmui_core::ids::RowId;
use cmui_core::intent::Intent;
use cmui_core::scheduler::TaskOwner;

use crate::effects::{Effects, Task};
use crate::form::FormState;
use crate::table::ContactRow;

/// Question asked before clearing a form.
pub const RESET_MESSAGE: &str = "Are you sure you want to clear all fields?";

/// Name used when a row has no name cell.
pub const FALLBACK_CONTACT_NAME: &str = "this contact";

/// Id used when a row has no id cell.
pub const FALLBACK_CONTACT_ID: &str = "?";

/// Blocking yes/no question answered by the user.
pub trait ConfirmPrompt {
    /// Ask `message`; `true` means the user accepted.
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Prompt that replays canned answers and records every question.
///
/// Once the answers run out it declines.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far.
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}

/// Delete prompt text for a row.
#[must_use]
pub fn delete_message(row: &ContactRow) -> String {
    let name = row.name.as_deref().unwrap_or(FALLBACK_CONTACT_NAME);
    let id = row.contact_id.as_deref().unwrap_or(FALLBACK_CONTACT_ID);
    format!("Are you sure you want to delete \"{name}\" (ID: {id})?\n\nThis action cannot be undone!")
}

/// Outcome of a delete click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing happened.
    Declined,
    /// Confirmed; navigation is scheduled.
    Scheduled,
    /// Confirmed, but the row has no link to follow.
    NoTarget,
    /// The row is already on its way out; the click was ignored.
    Busy,
}

/// Tracks rows whose deletion is in flight.
#[derive(Debug, Default)]
pub struct DeleteFlow {
    navigate_after: Duration,
    busy: HashSet<RowId>,
}

impl DeleteFlow {
    #[must_use]
    pub fn new(navigate_after: Duration) -> Self {
        Self {
            navigate_after,
            busy: HashSet::new(),
        }
    }

    #[must_use]
    pub fn is_busy(&self, row: RowId) -> bool {
        self.busy.contains(&row)
    }

    /// Handle a click on `row`'s delete action.
    pub fn on_click(
        &mut self,
        fx: &mut Effects,
        prompt: &mut dyn ConfirmPrompt,
        row: &ContactRow,
    ) -> DeleteOutcome {
        if self.busy.contains(&row.id) {
            return DeleteOutcome::Busy;
        }
        if !prompt.confirm(&delete_message(row)) {
            cmui_core::debug!(
                target: cmui_core::targets::CONFIRM,
                row = %row.id,
                "delete declined",
            );
            return DeleteOutcome::Declined;
        }
        let Some(url) = row.delete_href.clone() else {
            cmui_core::warn!(
                target: cmui_core::targets::CONFIRM,
                row = %row.id,
                "confirmed delete has no target link",
            );
            return DeleteOutcome::NoTarget;
        };

        fx.emit(Intent::SetDeleteBusy { row: row.id });
        fx.emit(Intent::DimRow { row: row.id });
        fx.schedule(
            self.navigate_after,
            TaskOwner::Row(row.id),
            Task::NavigateDelete { row: row.id, url },
        );
        self.busy.insert(row.id);
        cmui_core::info!(target: cmui_core::targets::CONFIRM, row = %row.id, "delete confirmed");
        DeleteOutcome::Scheduled
    }

    /// Navigation timer fired.
    pub fn on_navigate_due(&mut self, fx: &mut Effects, row: RowId, url: String) {
        if self.busy.remove(&row) {
            fx.emit(Intent::Navigate { url });
        }
    }

    /// The row left the page; drop its pending navigation.
    pub fn forget(&mut self, fx: &mut Effects, row: RowId) {
        self.busy.remove(&row);
        fx.cancel_owner(TaskOwner::Row(row));
    }
}

/// Handle a reset click on `state`. Returns whether the reset proceeds.
pub fn confirm_reset(fx: &mut Effects, prompt: &mut dyn ConfirmPrompt, state: &mut FormState) -> bool {
    if !prompt.confirm(RESET_MESSAGE) {
        fx.emit(Intent::PreventReset { form: state.id() });
        return false;
    }
    state.clear_all(fx);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Form;
    use cmui_core::ids::FormId;
    use cmui_core::intent::FieldVisual;
    use cmui_validation::Field;
    use pretty_assertions::assert_eq;

    fn row() -> ContactRow {
        ContactRow::contact(RowId(4), "12", "Ada Lovelace", "ada@x.io", "hi")
    }

    #[test]
    fn message_names_the_contact() {
        assert_eq!(
            delete_message(&row()),
            "Are you sure you want to delete \"Ada Lovelace\" (ID: 12)?\n\nThis action cannot be undone!"
        );
        assert_eq!(
            delete_message(&ContactRow::new(RowId(1))),
            "Are you sure you want to delete \"this contact\" (ID: ?)?\n\nThis action cannot be undone!"
        );
    }

    #[test]
    fn declined_delete_emits_nothing() {
        let mut flow = DeleteFlow::new(Duration::from_millis(500));
        let mut fx = Effects::new();
        let mut prompt = ScriptedPrompt::new([false]);
        assert_eq!(flow.on_click(&mut fx, &mut prompt, &row()), DeleteOutcome::Declined);
        assert!(fx.intents().is_empty());
        assert_eq!(fx.pending_tasks(), 0);
        assert_eq!(prompt.asked().len(), 1);
    }

    #[test]
    fn confirmed_delete_dims_then_navigates() {
        let mut flow = DeleteFlow::new(Duration::from_millis(500));
        let mut fx = Effects::new();
        let mut prompt = ScriptedPrompt::new([true]);
        assert_eq!(flow.on_click(&mut fx, &mut prompt, &row()), DeleteOutcome::Scheduled);
        assert_eq!(
            fx.drain_intents(),
            vec![
                Intent::SetDeleteBusy { row: RowId(4) },
                Intent::DimRow { row: RowId(4) },
            ]
        );

        // A second click while busy does not prompt again.
        assert_eq!(flow.on_click(&mut fx, &mut prompt, &row()), DeleteOutcome::Busy);
        assert_eq!(prompt.asked().len(), 1);

        assert!(fx.pop_due(Duration::from_millis(499)).is_none());
        let due = fx.pop_due(Duration::from_millis(500)).unwrap();
        if let Task::NavigateDelete { row, url } = due.task {
            flow.on_navigate_due(&mut fx, row, url);
        }
        assert_eq!(
            fx.drain_intents(),
            vec![Intent::Navigate {
                url: "/delete/12".into()
            }]
        );
    }

    #[test]
    fn removed_row_never_navigates() {
        let mut flow = DeleteFlow::new(Duration::from_millis(500));
        let mut fx = Effects::new();
        flow.on_click(&mut fx, &mut |_: &str| true, &row());
        flow.forget(&mut fx, RowId(4));
        assert_eq!(fx.pending_tasks(), 0);
        assert!(!flow.is_busy(RowId(4)));
    }

    #[test]
    fn confirmed_delete_without_link_degrades() {
        let mut flow = DeleteFlow::new(Duration::from_millis(500));
        let mut fx = Effects::new();
        let r = row().without_delete();
        assert_eq!(
            flow.on_click(&mut fx, &mut |_: &str| true, &r),
            DeleteOutcome::NoTarget
        );
        assert!(fx.intents().is_empty());
    }

    #[test]
    fn reset_confirmation() {
        let mut state = FormState::new(
            Form::new(FormId(2), "/add_contact")
                .field(Field::new("name", "").required())
                .with_reset(),
        );
        let mut fx = Effects::new();
        state.validate_field(&mut fx, "name");
        fx.drain_intents();

        let mut prompt = ScriptedPrompt::new([false, true]);
        assert!(!confirm_reset(&mut fx, &mut prompt, &mut state));
        assert_eq!(fx.drain_intents(), vec![Intent::PreventReset { form: FormId(2) }]);

        assert!(confirm_reset(&mut fx, &mut prompt, &mut state));
        assert_eq!(
            fx.drain_intents(),
            vec![
                Intent::SetFieldVisual {
                    form: FormId(2),
                    field: "name".into(),
                    visual: FieldVisual::Neutral,
                },
                Intent::RemoveFieldError {
                    form: FormId(2),
                    field: "name".into(),
                },
            ]
        );
        assert_eq!(prompt.asked(), [RESET_MESSAGE, RESET_MESSAGE]);
    }
}
