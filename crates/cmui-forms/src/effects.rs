#![forbid(unsafe_code)]

//! Output sink shared by every page behavior.
//!
//! Behaviors never touch the document or a wall clock. They push
//! [`Intent`]s and schedule [`Task`]s through an [`Effects`] value that the
//! runtime owns and drains.

use core::time::Duration;

use cmui_core::ids::{FormId, NoticeId, RowId};
use cmui_core::intent::Intent;
use cmui_core::scheduler::{DueTask, Scheduler, TaskId, TaskOwner};

/// A deferred page action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Give a stalled submit control its label and interactivity back.
    RestoreSubmit { form: FormId },
    /// Start fading a notice.
    FadeNotice { notice: NoticeId },
    /// Drop a faded notice from the page.
    RemoveNotice { notice: NoticeId },
    /// Follow a confirmed delete link.
    NavigateDelete { row: RowId, url: String },
    /// Return a sorted header to its normal background.
    ClearHeaderHighlight { column: usize },
    /// Focus the first editable input.
    Autofocus,
}

impl Task {
    /// Short stable name used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RestoreSubmit { .. } => "restore_submit",
            Self::FadeNotice { .. } => "fade_notice",
            Self::RemoveNotice { .. } => "remove_notice",
            Self::NavigateDelete { .. } => "navigate_delete",
            Self::ClearHeaderHighlight { .. } => "clear_header_highlight",
            Self::Autofocus => "autofocus",
        }
    }
}

/// Pending intents plus the deferred-task queue, stamped with the current time.
#[derive(Debug, Default)]
pub struct Effects {
    now: Duration,
    intents: Vec<Intent>,
    tasks: Scheduler<Task>,
}

impl Effects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current host time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the stamp forward. Earlier times are ignored.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    pub fn emit(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Intents emitted so far, oldest first.
    #[must_use]
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Take every pending intent.
    pub fn drain_intents(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }

    /// Schedule `task` to run `delay` from now.
    pub fn schedule(&mut self, delay: Duration, owner: TaskOwner, task: Task) -> TaskId {
        cmui_core::trace!(
            target: cmui_core::targets::SCHEDULER,
            task = task.kind(),
            delay_ms = delay.as_millis() as u64,
            "scheduled",
        );
        self.tasks.schedule(self.now, delay, owner, task)
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.cancel(id)
    }

    /// Cancel everything `owner` scheduled.
    pub fn cancel_owner(&mut self, owner: TaskOwner) -> usize {
        let dropped = self.tasks.cancel_owner(owner);
        if dropped > 0 {
            cmui_core::debug!(
                target: cmui_core::targets::SCHEDULER,
                ?owner,
                dropped,
                "cancelled tasks for disposed owner",
            );
        }
        dropped
    }

    /// Cancel every pending task.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    #[must_use]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.is_pending(id)
    }

    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.tasks.pending_count()
    }

    /// Earliest pending due time.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.next_due()
    }

    /// Release the next task due at or before `until`, moving the stamp to
    /// its due time so follow-ups are scheduled relative to it.
    pub fn pop_due(&mut self, until: Duration) -> Option<DueTask<Task>> {
        let due = self.tasks.pop_due(until)?;
        self.set_now(due.due);
        Some(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_due_moves_time_to_task_due() {
        let mut fx = Effects::new();
        fx.schedule(
            Duration::from_millis(5000),
            TaskOwner::Notice(NoticeId(1)),
            Task::FadeNotice {
                notice: NoticeId(1),
            },
        );
        assert!(fx.pop_due(Duration::from_millis(4999)).is_none());

        let due = fx.pop_due(Duration::from_secs(10)).unwrap();
        assert_eq!(fx.now(), Duration::from_millis(5000));
        assert_eq!(due.task.kind(), "fade_notice");

        let follow = fx.schedule(
            Duration::from_millis(300),
            TaskOwner::Notice(NoticeId(1)),
            Task::RemoveNotice {
                notice: NoticeId(1),
            },
        );
        assert!(fx.is_pending(follow));
        assert_eq!(fx.next_due(), Some(Duration::from_millis(5300)));
    }

    #[test]
    fn drain_empties_the_buffer() {
        let mut fx = Effects::new();
        fx.emit(Intent::BlurActive);
        assert_eq!(fx.intents().len(), 1);
        assert_eq!(fx.drain_intents(), vec![Intent::BlurActive]);
        assert!(fx.intents().is_empty());
    }

    #[test]
    fn time_never_moves_backwards() {
        let mut fx = Effects::new();
        fx.set_now(Duration::from_secs(2));
        fx.set_now(Duration::from_secs(1));
        assert_eq!(fx.now(), Duration::from_secs(2));
    }
}
