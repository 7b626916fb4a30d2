#![forbid(unsafe_code)]

//! Engine configuration: timings and user-facing texts.
//!
//! Defaults match the contact-manager page. Timings can be overridden from
//! `CMUI_*` environment variables (milliseconds), and the whole config
//! round-trips through JSON for the wasm bridge.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `CMUI_RESTORE_SUBMIT_MS` | `restore_submit_after` |
//! | `CMUI_NOTICE_AUTO_HIDE_MS` | `notice_auto_hide` |
//! | `CMUI_FLASH_AUTO_HIDE_MS` | `flash_auto_hide` |
//! | `CMUI_NOTICE_FADE_MS` | `notice_fade` |
//! | `CMUI_DELETE_DELAY_MS` | `delete_navigate_after` |
//! | `CMUI_HEADER_HIGHLIGHT_MS` | `header_highlight` |
//! | `CMUI_AUTOFOCUS_MS` | `autofocus_after` |

use core::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use cmui_core::targets;
use cmui_forms::{NoticeTimings, SubmitSettings};

/// Tunables for [`crate::Enhancer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    #[serde(with = "millis")]
    pub restore_submit_after: Duration,
    #[serde(with = "millis")]
    pub notice_auto_hide: Duration,
    #[serde(with = "millis")]
    pub flash_auto_hide: Duration,
    #[serde(with = "millis")]
    pub notice_fade: Duration,
    #[serde(with = "millis")]
    pub delete_navigate_after: Duration,
    #[serde(with = "millis")]
    pub header_highlight: Duration,
    #[serde(with = "millis")]
    pub autofocus_after: Duration,
    /// Submit control label while a submission is in flight.
    pub processing_label: String,
    /// Notice shown when the form gate blocks a submission.
    pub invalid_notice: String,
    /// Notice shown when a stalled submission is restored.
    pub stalled_notice: Option<String>,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        let submit = SubmitSettings::default();
        let notices = NoticeTimings::default();
        Self {
            restore_submit_after: submit.restore_after,
            notice_auto_hide: notices.auto_hide,
            flash_auto_hide: notices.flash_auto_hide,
            notice_fade: notices.fade,
            delete_navigate_after: Duration::from_millis(500),
            header_highlight: Duration::from_millis(1000),
            autofocus_after: Duration::from_millis(500),
            processing_label: submit.processing_label,
            invalid_notice: submit.invalid_notice,
            stalled_notice: submit.stalled_notice,
        }
    }
}

impl EnhancerConfig {
    /// Defaults with `CMUI_*` environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source. Unparseable values are
    /// logged and ignored.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let slots: [(&str, &mut Duration); 7] = [
            ("CMUI_RESTORE_SUBMIT_MS", &mut self.restore_submit_after),
            ("CMUI_NOTICE_AUTO_HIDE_MS", &mut self.notice_auto_hide),
            ("CMUI_FLASH_AUTO_HIDE_MS", &mut self.flash_auto_hide),
            ("CMUI_NOTICE_FADE_MS", &mut self.notice_fade),
            ("CMUI_DELETE_DELAY_MS", &mut self.delete_navigate_after),
            ("CMUI_HEADER_HIGHLIGHT_MS", &mut self.header_highlight),
            ("CMUI_AUTOFOCUS_MS", &mut self.autofocus_after),
        ];
        for (key, slot) in slots {
            let Some(raw) = lookup(key) else {
                continue;
            };
            match raw.trim().parse::<u64>() {
                Ok(ms) => *slot = Duration::from_millis(ms),
                Err(_) => warn!(
                    target: targets::CONFIG,
                    key,
                    value = %raw,
                    "ignoring non-numeric override",
                ),
            }
        }
        self
    }

    #[must_use]
    pub fn with_restore_submit_after(mut self, delay: Duration) -> Self {
        self.restore_submit_after = delay;
        self
    }

    #[must_use]
    pub fn with_notice_auto_hide(mut self, delay: Duration) -> Self {
        self.notice_auto_hide = delay;
        self
    }

    #[must_use]
    pub fn with_flash_auto_hide(mut self, delay: Duration) -> Self {
        self.flash_auto_hide = delay;
        self
    }

    #[must_use]
    pub fn with_notice_fade(mut self, delay: Duration) -> Self {
        self.notice_fade = delay;
        self
    }

    #[must_use]
    pub fn with_delete_navigate_after(mut self, delay: Duration) -> Self {
        self.delete_navigate_after = delay;
        self
    }

    #[must_use]
    pub fn with_header_highlight(mut self, delay: Duration) -> Self {
        self.header_highlight = delay;
        self
    }

    #[must_use]
    pub fn with_autofocus_after(mut self, delay: Duration) -> Self {
        self.autofocus_after = delay;
        self
    }

    #[must_use]
    pub fn with_processing_label(mut self, label: impl Into<String>) -> Self {
        self.processing_label = label.into();
        self
    }

    /// Replace the stalled-submission notice; `None` restores silently.
    #[must_use]
    pub fn with_stalled_notice(mut self, text: Option<String>) -> Self {
        self.stalled_notice = text;
        self
    }

    #[must_use]
    pub fn submit_settings(&self) -> SubmitSettings {
        SubmitSettings {
            processing_label: self.processing_label.clone(),
            restore_after: self.restore_submit_after,
            invalid_notice: self.invalid_notice.clone(),
            stalled_notice: self.stalled_notice.clone(),
        }
    }

    #[must_use]
    pub fn notice_timings(&self) -> NoticeTimings {
        NoticeTimings {
            auto_hide: self.notice_auto_hide,
            flash_auto_hide: self.flash_auto_hide,
            fade: self.notice_fade,
        }
    }
}

/// `Duration` as integer milliseconds.
mod millis {
    use core::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
