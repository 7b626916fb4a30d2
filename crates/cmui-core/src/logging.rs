#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported, so
//! downstream crates can write
//! `cmui_core::debug!(target: cmui_core::targets::DIRTY, form = %id, "bound")`.
//! Without it the same invocations expand to nothing.
//!
//! Every page behavior logs under its own target in [`targets`], so a host
//! can filter with directives such as `cmui::submit=info,cmui::scheduler=off`.

/// Log targets, one per page behavior.
pub mod targets {
    /// Binding, dispatch and task execution in the page engine.
    pub const ENGINE: &str = "cmui::engine";
    /// Timing and text overrides.
    pub const CONFIG: &str = "cmui::config";
    /// Field annotations and the form gate.
    pub const VALIDATION: &str = "cmui::validation";
    /// Submission lifecycle.
    pub const SUBMIT: &str = "cmui::submit";
    /// Unsaved-changes tracking.
    pub const DIRTY: &str = "cmui::dirty";
    pub const NOTICE: &str = "cmui::notice";
    /// Delete and reset confirmation.
    pub const CONFIRM: &str = "cmui::confirm";
    pub const TABLE: &str = "cmui::table";
    /// Deferred tasks.
    pub const SCHEDULER: &str = "cmui::scheduler";

    /// Every target, for building filters.
    pub const ALL: [&str; 9] = [
        ENGINE, CONFIG, VALIDATION, SUBMIT, DIRTY, NOTICE, CONFIRM, TABLE, SCHEDULER,
    ];
}

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, info, info_span, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op debug_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op info macro when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op info_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! info_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

/// Stand-in span returned by the span macros when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span. Holds nothing.
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard for [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
pub struct NoopGuard;
