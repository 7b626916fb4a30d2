#![forbid(unsafe_code)]

//! Snapshot of the server-rendered page the engine enhances.

use serde::{Deserialize, Serialize};

use cmui_core::ids::{FormId, NoticeId, RowId};
use cmui_core::intent::NoticeKind;
use cmui_forms::{ContactTable, Form};

use crate::{EnhanceError, Result};

/// A flash message the server rendered into the notices region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub id: NoticeId,
    #[serde(default)]
    pub kind: NoticeKind,
    #[serde(default)]
    pub message: String,
}

impl FlashMessage {
    #[must_use]
    pub fn new(id: NoticeId, kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            message: message.into(),
        }
    }
}

/// Everything the engine needs to know about the loaded document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub forms: Vec<Form>,
    #[serde(default)]
    pub table: Option<ContactTable>,
    #[serde(default)]
    pub flashes: Vec<FlashMessage>,
    /// Whether the notices region is already in the document.
    #[serde(default)]
    pub notice_region: bool,
    /// `location.hash`, with or without the leading `#`.
    #[serde(default)]
    pub hash: Option<String>,
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn form(mut self, form: Form) -> Self {
        self.forms.push(form);
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: ContactTable) -> Self {
        self.table = Some(table);
        self
    }

    #[must_use]
    pub fn flash(mut self, flash: FlashMessage) -> Self {
        self.notice_region = true;
        self.flashes.push(flash);
        self
    }

    #[must_use]
    pub fn with_notice_region(mut self) -> Self {
        self.notice_region = true;
        self
    }

    #[must_use]
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Parse and check a page description sent by the host.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let page: Self = serde_json::from_str(json)?;
        page.check_ids()?;
        Ok(page)
    }

    /// Reject duplicate form or row ids.
    pub fn check_ids(&self) -> Result<()> {
        let mut forms: Vec<FormId> = self.forms.iter().map(|f| f.id).collect();
        forms.sort_unstable();
        if let Some(w) = forms.windows(2).find(|w| w[0] == w[1]) {
            return Err(EnhanceError::DuplicateId("form", w[0].0));
        }
        if let Some(table) = &self.table {
            let mut rows: Vec<RowId> = table.rows.iter().map(|r| r.id).collect();
            rows.sort_unstable();
            if let Some(w) = rows.windows(2).find(|w| w[0] == w[1]) {
                return Err(EnhanceError::DuplicateId("row", w[0].0));
            }
        }
        Ok(())
    }

    /// Whether a form with this id exists, bound or not.
    #[must_use]
    pub fn has_form(&self, id: FormId) -> bool {
        self.forms.iter().any(|f| f.id == id)
    }
}
