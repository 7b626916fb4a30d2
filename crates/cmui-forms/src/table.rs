#![forbid(unsafe_code)]

//! The contacts table: rows, delete links and header sorting.

use core::time::Duration;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use cmui_core::ids::RowId;
use cmui_core::intent::Intent;
use cmui_core::scheduler::TaskOwner;

use crate::effects::{Effects, Task};

/// Number of leading header cells that sort (ID, Name, Email, Message).
pub const SORTABLE_COLUMNS: usize = 4;

/// One `<tr>` of the table body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRow {
    pub id: RowId,
    /// Text content of each cell, in column order.
    #[serde(default)]
    pub cells: Vec<String>,
    /// Text of the row's name cell, if it has one.
    #[serde(default)]
    pub name: Option<String>,
    /// Text of the row's id cell, if it has one.
    #[serde(default)]
    pub contact_id: Option<String>,
    /// Target of the row's delete link.
    #[serde(default)]
    pub delete_href: Option<String>,
    /// Demo rows are display-only and never bound.
    #[serde(default)]
    pub demo: bool,
}

impl ContactRow {
    #[must_use]
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            cells: Vec::new(),
            name: None,
            contact_id: None,
            delete_href: None,
            demo: false,
        }
    }

    /// Typical contact row: id, name, email and message cells plus a delete link.
    #[must_use]
    pub fn contact(id: RowId, contact_id: &str, name: &str, email: &str, message: &str) -> Self {
        Self {
            id,
            cells: vec![
                contact_id.to_string(),
                name.to_string(),
                email.to_string(),
                message.to_string(),
            ],
            name: Some(name.to_string()),
            contact_id: Some(contact_id.to_string()),
            delete_href: Some(format!("/delete/{contact_id}")),
            demo: false,
        }
    }

    #[must_use]
    pub fn demo(mut self) -> Self {
        self.demo = true;
        self
    }

    #[must_use]
    pub fn without_delete(mut self) -> Self {
        self.delete_href = None;
        self
    }

    /// Trimmed text of a cell; missing cells read as empty.
    #[must_use]
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map_or("", |c| c.trim())
    }
}

/// Header cells and body rows of the contacts table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactTable {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<ContactRow>,
}

impl ContactTable {
    #[must_use]
    pub fn row(&self, id: RowId) -> Option<&ContactRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn is_sortable(&self, column: usize) -> bool {
        column < SORTABLE_COLUMNS && column < self.headers.len()
    }

    /// Sort rows ascending by `column` and emit the new order with header feedback.
    ///
    /// Column 0 compares the integer prefix of the contact id (`"12 a"` is 12);
    /// rows whose id has no digits sort after every numeric id, keeping their
    /// relative order. Other
    /// columns compare trimmed, lowercased text.
    pub fn sort_by(&mut self, fx: &mut Effects, column: usize, highlight: Duration) -> bool {
        if !self.is_sortable(column) {
            return false;
        }
        if column == 0 {
            self.rows.sort_by(|a, b| compare_ids(a.cell(0), b.cell(0)));
        } else {
            self.rows
                .sort_by_cached_key(|r| r.cell(column).to_lowercase());
        }
        cmui_core::debug!(
            target: cmui_core::targets::TABLE,
            column,
            rows = self.rows.len(),
            "table sorted",
        );

        fx.emit(Intent::ReorderRows {
            order: self.rows.iter().map(|r| r.id).collect(),
        });
        fx.emit(Intent::HighlightHeader { column });
        fx.cancel_owner(TaskOwner::Header(column));
        fx.schedule(
            highlight,
            TaskOwner::Header(column),
            Task::ClearHeaderHighlight { column },
        );
        true
    }
}

fn compare_ids(a: &str, b: &str) -> Ordering {
    match (leading_int(a), leading_int(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Integer prefix of `text` after leading whitespace and an optional sign,
/// so `"12 a"` reads as 12. Saturates instead of overflowing.
fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i64 = 0;
    let mut seen = false;
    for d in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let d = i64::from(d - b'0');
        value = value.saturating_mul(10).saturating_add(d);
    }
    if !seen {
        return None;
    }
    Some(if negative { value.saturating_neg() } else { value })
}
