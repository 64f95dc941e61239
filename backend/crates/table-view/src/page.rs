//! Rendered table output.
//!
//! A [`TablePage`] is what a screen shows: the header row, the visible body,
//! the controls, and the pagination footer. It serialises to camelCase JSON.

use serde::Serialize;

use crate::cell::{Align, Cell};
use crate::filter::{Action, FilterOption};
use crate::state::SortDirection;

/// One rendered page of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    /// Table title.
    pub title: String,
    /// Optional subtitle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether a search box is shown.
    pub searchable: bool,
    /// Current search term.
    pub search_term: String,
    /// Filter control, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterControl>,
    /// Header row.
    pub headers: Vec<Header>,
    /// Whether a trailing actions column is shown.
    pub has_actions: bool,
    /// Controls rendered above the table.
    pub top_actions: Vec<Action>,
    /// Visible rows or the empty placeholder.
    pub body: TableBody,
    /// Footer; absent when no rows match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl TablePage {
    /// Keys of the visible rows in display order.
    #[must_use]
    pub fn row_keys(&self) -> Vec<&str> {
        match &self.body {
            TableBody::Rows { rows } => rows.iter().map(|row| row.key.as_str()).collect(),
            TableBody::Empty { .. } => Vec::new(),
        }
    }
}

/// Selected value and options of the filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterControl {
    /// Placeholder label.
    pub placeholder: String,
    /// Options in display order.
    pub options: Vec<FilterOption>,
    /// Currently selected value.
    pub selected: String,
}

/// A column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Column key.
    pub key: String,
    /// Visible label.
    pub label: String,
    /// Alignment.
    pub align: Align,
    /// Whether activating the header sorts.
    pub sortable: bool,
    /// Direction indicator when this column is the active sort.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorted: Option<SortDirection>,
}

/// Table body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TableBody {
    /// Visible rows.
    Rows {
        /// Rows in display order.
        rows: Vec<Row>,
    },
    /// Single placeholder row spanning every column.
    #[serde(rename_all = "camelCase")]
    Empty {
        /// Placeholder message.
        message: String,
        /// Columns the placeholder spans, including the actions column.
        col_span: usize,
    },
}

/// A rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Stable row key.
    pub key: String,
    /// Cells in column order.
    pub cells: Vec<RenderedCell>,
    /// Row actions; empty when the view has none.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

/// A cell tagged with its column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    /// Column key.
    pub column: String,
    /// Column alignment.
    pub align: Align,
    /// Cell content.
    #[serde(flatten)]
    pub cell: Cell,
}

/// Pagination footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Visible page, 1-based.
    pub current_page: usize,
    /// Total pages.
    pub total_pages: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Rows after search and filter.
    pub total_items: usize,
    /// 1-based index of the first visible row.
    pub first_item: usize,
    /// 1-based index of the last visible row.
    pub last_item: usize,
    /// "Showing a to b of n items".
    pub summary: String,
    /// "Page p of q".
    pub indicator: String,
    /// Whether the previous/first controls are enabled.
    pub can_previous: bool,
    /// Whether the next/last controls are enabled.
    pub can_next: bool,
}

impl Pagination {
    pub(crate) fn new(
        current_page: usize,
        total_pages: usize,
        page_size: usize,
        total_items: usize,
        offset: usize,
        visible: usize,
    ) -> Self {
        let first_item = offset.saturating_add(1);
        let last_item = offset.saturating_add(visible);
        Self {
            current_page,
            total_pages,
            page_size,
            total_items,
            first_item,
            last_item,
            summary: format!("Showing {first_item} to {last_item} of {total_items} items"),
            indicator: format!("Page {current_page} of {total_pages}"),
            can_previous: current_page > 1,
            can_next: current_page < total_pages,
        }
    }
}
