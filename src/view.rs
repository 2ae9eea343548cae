//! Page view - a pure projection of [`RenderState`] into what gets shown
//!
//! Drawing lives in [`crate::ui`]; this module only decides *what* is
//! visible so it can be tested without a terminal.

use crate::constants::INPUT_PLACEHOLDER;
use crate::messages::RenderState;
use crate::models::Field;

/// Selection badge shown under the input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub field: Field,
    pub active: bool,
}

impl Badge {
    /// Inactive badges render as an empty box
    pub fn caption(&self) -> &'static str {
        if self.active {
            self.field.badge()
        } else {
            ""
        }
    }
}

/// One row of the field checklist
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecklistItem {
    pub field: Field,
    pub checked: bool,
}

/// One line of the filtered response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilteredEntry {
    pub field: Field,
    pub value: String,
}

impl FilteredEntry {
    pub fn line(&self) -> String {
        format!("{}: {}", self.field.label(), self.value)
    }
}

/// Everything the page shows for a given state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    pub input: String,
    pub placeholder: &'static str,
    pub error: Option<String>,
    pub badges: Vec<Badge>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub filtered: Vec<FilteredEntry>,
}

impl PageView {
    /// Filtered response as newline separated `Label: value` lines
    pub fn filtered_text(&self) -> String {
        self.filtered
            .iter()
            .map(FilteredEntry::line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build the page for the current state
pub fn render(state: &RenderState) -> PageView {
    let payload = state.response.as_ref().filter(|p| p.is_present());

    let badges = Field::ALL
        .into_iter()
        .map(|field| Badge { field, active: state.selected.contains(field) })
        .collect();

    let checklist = payload.map(|_| {
        Field::ALL
            .into_iter()
            .map(|field| ChecklistItem { field, checked: state.selected.contains(field) })
            .collect()
    });

    let filtered = match payload {
        Some(payload) if state.response_visible => state
            .selected
            .iter()
            .map(|field| FilteredEntry { field, value: payload.display(field) })
            .collect(),
        _ => Vec::new(),
    };

    PageView {
        input: state.input.clone(),
        placeholder: INPUT_PLACEHOLDER,
        error: (!state.error.is_empty()).then(|| state.error.clone()),
        badges,
        checklist,
        filtered,
    }
}
