// ── Form ──
//
// The rows of one configuration dialog, keyed by field name. The map is
// insertion-ordered, so iteration order is the visible row order and the
// same map is what commit uses to find each field's control.

use indexmap::IndexMap;
use tracing::warn;

use crate::control::Control;

/// One labeled row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    pub name: String,
    pub label: String,
    pub control: Control,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    title: String,
    rows: IndexMap<String, FormRow>,
}

impl Form {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: IndexMap::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Append a row. Field names are unique within a schema; a repeated
    /// name replaces the earlier control in its original position.
    pub fn add_row(&mut self, name: impl Into<String>, label: impl Into<String>, control: Control) {
        let name = name.into();
        let row = FormRow {
            name: name.clone(),
            label: label.into(),
            control,
        };
        if self.rows.insert(name, row).is_some() {
            warn!(form = %self.title, "duplicate field name replaced an existing row");
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &FormRow> {
        self.rows.values()
    }

    pub fn row(&self, index: usize) -> Option<&FormRow> {
        self.rows.get_index(index).map(|(_, row)| row)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut FormRow> {
        self.rows.get_index_mut(index).map(|(_, row)| row)
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.rows.get(name).map(|row| &row.control)
    }

    pub fn control_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.rows.get_mut(name).map(|row| &mut row.control)
    }

    /// Field names in row order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }
}
