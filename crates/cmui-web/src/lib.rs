#![forbid(unsafe_code)]

//! Host-driven contact-manager page engine.
//!
//! The host describes the server-rendered page once ([`page::Page`]), feeds
//! DOM events ([`cmui_core::event::Event`], or JSON via [`input`]), advances
//! time explicitly, and applies the [`cmui_core::intent::Intent`]s the
//! [`Enhancer`] produces. No threads, no blocking, no wall clock.
//!
//! On `wasm32` the same engine is exported to JavaScript through
//! `wasm-bindgen` as `ContactPage`.

pub mod config;
pub mod enhancer;
pub mod input;
pub mod page;

#[cfg(target_arch = "wasm32")]
mod wasm;

use cmui_core::ids::{FormId, RowId};

pub use config::EnhancerConfig;
pub use enhancer::Enhancer;
pub use input::{EventJson, encode_event, host_millis, parse_event};
pub use page::{FlashMessage, Page};

#[cfg(target_arch = "wasm32")]
pub use wasm::{ContactPage, WindowConfirm};

/// Native builds compile the bridge as a stub so `cargo check --workspace`
/// stays green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct ContactPage;

#[cfg(not(target_arch = "wasm32"))]
impl ContactPage {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Host misuse of the engine API.
///
/// None of these are fatal to the page; the offending call is skipped.
#[derive(Debug)]
pub enum EnhanceError {
    /// An event arrived before [`Enhancer::init`].
    NotInitialized,
    /// No form with this id is on the page.
    UnknownForm(FormId),
    /// The form has no field with this name.
    UnknownField { form: FormId, field: String },
    /// No row with this id is in the contacts table.
    UnknownRow(RowId),
    /// A form or row with this id is already on the page.
    DuplicateId(&'static str, u32),
    /// JSON input did not match the schema.
    Json(serde_json::Error),
}

impl core::fmt::Display for EnhanceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "page engine used before init"),
            Self::UnknownForm(form) => write!(f, "unknown form: {form}"),
            Self::UnknownField { form, field } => write!(f, "unknown field {field:?} in {form}"),
            Self::UnknownRow(row) => write!(f, "unknown row: {row}"),
            Self::DuplicateId(what, id) => write!(f, "duplicate {what} id: {id}"),
            Self::Json(err) => write!(f, "invalid json: {err}"),
        }
    }
}

impl std::error::Error for EnhanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for EnhanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Result alias for engine calls.
pub type Result<T> = std::result::Result<T, EnhanceError>;
