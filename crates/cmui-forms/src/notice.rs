#![forbid(unsafe_code)]

//! Transient notices: engine messages and server flash messages.
//!
//! Each notice moves through `Visible -> Fading -> removed`. Auto-hide and
//! the close action both enter `Fading` and schedule removal after the fade
//! delay. Timers belong to the notice, so a removed notice is never touched
//! again.

use core::time::Duration;
use std::collections::HashMap;

use cmui_core::ids::{NoticeId, NoticeIdGen};
use cmui_core::intent::{Intent, NoticeKind};
use cmui_core::scheduler::TaskOwner;

use crate::effects::{Effects, Task};

/// Lifecycle phase of a live notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePhase {
    Visible,
    Fading,
}

/// Timing of the notice lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTimings {
    /// Delay before an engine notice starts fading.
    pub auto_hide: Duration,
    /// Delay before a server flash message starts fading.
    pub flash_auto_hide: Duration,
    /// Fade duration before removal.
    pub fade: Duration,
}

impl Default for NoticeTimings {
    fn default() -> Self {
        Self {
            auto_hide: Duration::from_millis(5000),
            flash_auto_hide: Duration::from_millis(7000),
            fade: Duration::from_millis(300),
        }
    }
}

/// Owner of every live notice and of the notices region.
#[derive(Debug, Default)]
pub struct NoticeCenter {
    timings: NoticeTimings,
    ids: NoticeIdGen,
    region: bool,
    live: HashMap<NoticeId, NoticePhase>,
}

impl NoticeCenter {
    #[must_use]
    pub fn new(timings: NoticeTimings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    /// Record that the page already has a notices region.
    pub fn set_region_present(&mut self, present: bool) {
        self.region = present;
    }

    #[must_use]
    pub fn has_region(&self) -> bool {
        self.region
    }

    #[must_use]
    pub fn phase(&self, id: NoticeId) -> Option<NoticePhase> {
        self.live.get(&id).copied()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Take over a flash message the server rendered. Idempotent.
    pub fn adopt_flash(&mut self, fx: &mut Effects, id: NoticeId) {
        self.ids.reserve(id);
        if self.live.contains_key(&id) {
            return;
        }
        // A server-rendered message implies the region exists.
        self.region = true;
        self.live.insert(id, NoticePhase::Visible);
        fx.schedule(
            self.timings.flash_auto_hide,
            TaskOwner::Notice(id),
            Task::FadeNotice { notice: id },
        );
    }

    /// Show a new notice, creating the region first if needed.
    pub fn show(&mut self, fx: &mut Effects, kind: NoticeKind, message: impl Into<String>) -> NoticeId {
        if !self.region {
            fx.emit(Intent::CreateNoticeRegion);
            self.region = true;
        }
        let id = self.ids.next_id();
        let message = message.into();
        cmui_core::debug!(
            target: cmui_core::targets::NOTICE,
            notice = %id,
            ?kind,
            message = %message,
            "notice shown",
        );
        fx.emit(Intent::ShowNotice {
            notice: id,
            kind,
            message,
        });
        self.live.insert(id, NoticePhase::Visible);
        fx.schedule(
            self.timings.auto_hide,
            TaskOwner::Notice(id),
            Task::FadeNotice { notice: id },
        );
        id
    }

    /// Close action: fade now, remove after the fade delay.
    pub fn dismiss(&mut self, fx: &mut Effects, id: NoticeId) -> bool {
        if self.phase(id) != Some(NoticePhase::Visible) {
            return false;
        }
        fx.cancel_owner(TaskOwner::Notice(id));
        self.begin_fade(fx, id);
        true
    }

    /// Auto-hide timer fired.
    pub fn on_fade_due(&mut self, fx: &mut Effects, id: NoticeId) {
        if self.phase(id) == Some(NoticePhase::Visible) {
            self.begin_fade(fx, id);
        }
    }

    /// Removal timer fired.
    pub fn on_remove_due(&mut self, fx: &mut Effects, id: NoticeId) {
        if self.live.remove(&id).is_some() {
            fx.emit(Intent::RemoveNotice { notice: id });
        }
    }

    /// Forget every notice and cancel their timers.
    pub fn clear(&mut self, fx: &mut Effects) {
        for id in self.live.keys() {
            fx.cancel_owner(TaskOwner::Notice(*id));
        }
        self.live.clear();
    }

    fn begin_fade(&mut self, fx: &mut Effects, id: NoticeId) {
        self.live.insert(id, NoticePhase::Fading);
        fx.emit(Intent::FadeNotice { notice: id });
        fx.schedule(
            self.timings.fade,
            TaskOwner::Notice(id),
            Task::RemoveNotice { notice: id },
        );
    }
}
