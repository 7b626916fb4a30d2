#![forbid(unsafe_code)]

//! Cancelable deferred tasks.
//!
//! Every delayed page action (notice fade, stalled-submit restore, delete
//! navigation, header un-highlight, autofocus) is a task with an owner.
//! Removing the owner cancels everything it scheduled, so a timer can never
//! act on a node that is gone.
//!
//! Tasks are released by [`Scheduler::pop_due`] in `(due, id)` order. The
//! caller loops until it returns `None`, which lets a task schedule a
//! follow-up that is still released within the same advance when due.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

use crate::ids::{FormId, NoticeId, RowId};

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Node whose lifetime bounds a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOwner {
    Form(FormId),
    Row(RowId),
    Notice(NoticeId),
    /// A header cell of the contacts table, by column index.
    Header(usize),
    /// The page itself; only cleared by a full teardown.
    Page,
}

#[derive(Debug)]
struct Entry<T> {
    owner: TaskOwner,
    task: T,
}

/// A task released by [`Scheduler::pop_due`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueTask<T> {
    pub id: TaskId,
    pub owner: TaskOwner,
    pub due: Duration,
    pub task: T,
}

/// Deterministic single-threaded timer queue.
#[derive(Debug)]
pub struct Scheduler<T> {
    queue: BTreeMap<(Duration, TaskId), Entry<T>>,
    index: HashMap<TaskId, Duration>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: BTreeMap::new(),
            index: HashMap::new(),
            next_id: 0,
        }
    }

    /// Schedule `task` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, owner: TaskOwner, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = now.saturating_add(delay);
        self.queue.insert((due, id), Entry { owner, task });
        self.index.insert(id, due);
        id
    }

    /// Cancel one task. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.index.remove(&id) {
            Some(due) => self.queue.remove(&(due, id)).is_some(),
            None => false,
        }
    }

    /// Cancel every task belonging to `owner`. Returns how many were dropped.
    pub fn cancel_owner(&mut self, owner: TaskOwner) -> usize {
        let doomed: Vec<(Duration, TaskId)> = self
            .queue
            .iter()
            .filter(|(_, entry)| entry.owner == owner)
            .map(|(key, _)| *key)
            .collect();
        for key in &doomed {
            self.queue.remove(key);
            self.index.remove(&key.1);
        }
        doomed.len()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.index.clear();
    }

    #[must_use]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Number of pending tasks owned by `owner`.
    #[must_use]
    pub fn pending_for(&self, owner: TaskOwner) -> usize {
        self.queue.values().filter(|e| e.owner == owner).count()
    }

    /// Earliest due time, if anything is pending.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<DueTask<T>> {
        let (&(due, id), _) = self.queue.iter().next()?;
        if due > now {
            return None;
        }
        let entry = self.queue.remove(&(due, id))?;
        self.index.remove(&id);
        Some(DueTask {
            id,
            owner: entry.owner,
            due,
            task: entry.task,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn releases_in_due_order_then_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(0), ms(500), TaskOwner::Page, "late");
        s.schedule(ms(0), ms(100), TaskOwner::Page, "first");
        s.schedule(ms(0), ms(100), TaskOwner::Page, "second");

        assert!(s.pop_due(ms(99)).is_none());
        assert_eq!(s.pop_due(ms(1000)).map(|t| t.task), Some("first"));
        assert_eq!(s.pop_due(ms(1000)).map(|t| t.task), Some("second"));
        assert_eq!(s.pop_due(ms(1000)).map(|t| t.task), Some("late"));
        assert!(s.pop_due(ms(1000)).is_none());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut s = Scheduler::new();
        let id = s.schedule(ms(0), ms(10), TaskOwner::Page, ());
        assert!(s.is_pending(id));
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(!s.is_pending(id));
        assert!(s.pop_due(ms(100)).is_none());
    }

    #[test]
    fn cancel_owner_only_drops_that_owner() {
        let mut s = Scheduler::new();
        let row = TaskOwner::Row(RowId(1));
        s.schedule(ms(0), ms(10), row, 1);
        s.schedule(ms(0), ms(20), row, 2);
        let keep = s.schedule(ms(0), ms(30), TaskOwner::Form(FormId(1)), 3);

        assert_eq!(s.pending_for(row), 2);
        assert_eq!(s.cancel_owner(row), 2);
        assert_eq!(s.pending_count(), 1);
        assert!(s.is_pending(keep));
        assert_eq!(s.next_due(), Some(ms(30)));
    }

    #[test]
    fn fired_tasks_are_no_longer_pending() {
        let mut s = Scheduler::new();
        let id = s.schedule(ms(5), ms(5), TaskOwner::Notice(NoticeId(1)), ());
        let due = s.pop_due(ms(10)).unwrap();
        assert_eq!(due.id, id);
        assert_eq!(due.due, ms(10));
        assert!(!s.cancel(id));
    }

    #[test]
    fn follow_up_scheduled_inside_the_window_is_released() {
        let mut s = Scheduler::new();
        s.schedule(ms(0), ms(5000), TaskOwner::Page, "fade");
        let now = ms(6000);
        let mut fired = Vec::new();
        while let Some(t) = s.pop_due(now) {
            if t.task == "fade" {
                s.schedule(t.due, ms(300), TaskOwner::Page, "remove");
            }
            fired.push((t.task, t.due));
        }
        assert_eq!(fired, vec![("fade", ms(5000)), ("remove", ms(5300))]);
    }
}
