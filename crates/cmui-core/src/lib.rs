#![forbid(unsafe_code)]

//! Core: page events, node identifiers, presentation intents, host-driven time,
//! and cancelable scheduling.
//!
//! Nothing in this crate touches a real document. Events come in from the
//! host, [`intent::Intent`] values go out, and every deferred action is a
//! [`scheduler::Scheduler`] entry that can be cancelled when its owner goes away.

pub mod clock;
pub mod event;
pub mod ids;
pub mod intent;
pub mod logging;
pub mod scheduler;

pub use logging::targets;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, info_span, trace, warn};
