#![forbid(unsafe_code)]

//! Identifiers for the page nodes the engine reacts to.
//!
//! The host assigns form, row and flash-message ids when it describes the
//! page. Notices created by the engine draw fresh ids from [`NoticeIdGen`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one `<form>` on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(pub u32);

/// Identity of one `<tr>` in the contacts table body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u32);

/// Identity of a notice (server flash message or engine-created notice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoticeId(pub u64);

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "form#{}", self.0)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notice#{}", self.0)
    }
}

/// Monotonic notice id allocator.
///
/// Starts above every id the host already used so engine notices never
/// collide with flash messages rendered by the server.
#[derive(Debug, Clone, Default)]
pub struct NoticeIdGen {
    next: u64,
}

impl NoticeIdGen {
    /// Allocator whose first id is `first`.
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Make sure future ids are strictly greater than `used`.
    pub fn reserve(&mut self, used: NoticeId) {
        self.next = self.next.max(used.0.saturating_add(1));
    }

    /// Hand out the next id.
    pub fn next_id(&mut self) -> NoticeId {
        let id = NoticeId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}
