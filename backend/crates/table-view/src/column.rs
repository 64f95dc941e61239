//! Column descriptors.

use crate::cell::{Align, Cell, SortValue};

type CellFn<T> = Box<dyn Fn(&T) -> Cell + Send + Sync>;
type SortKeyFn<T> = Box<dyn Fn(&T) -> SortValue + Send + Sync>;

/// Describes one column: its key, header label, cell renderer, and
/// optionally how rows compare when the column is the active sort key.
pub struct Column<T> {
    key: String,
    header: String,
    cell: CellFn<T>,
    sort_key: Option<SortKeyFn<T>>,
    align: Align,
}

impl<T> Column<T> {
    /// Create a non-sortable, left-aligned column.
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        cell: impl Fn(&T) -> Cell + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            cell: Box::new(cell),
            sort_key: None,
            align: Align::Left,
        }
    }

    /// Make the column sortable by the value `sort_key` extracts from a row.
    #[must_use]
    pub fn sortable_by(
        mut self,
        sort_key: impl Fn(&T) -> SortValue + Send + Sync + 'static,
    ) -> Self {
        self.sort_key = Some(Box::new(sort_key));
        self
    }

    /// Set the column alignment.
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Stable column key used by sort state and query strings.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Header label.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Column alignment.
    #[must_use]
    pub fn alignment(&self) -> Align {
        self.align
    }

    /// Whether activating the header changes the sort.
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.sort_key.is_some()
    }

    /// Render the cell for `item`.
    pub fn render(&self, item: &T) -> Cell {
        (self.cell)(item)
    }

    pub(crate) fn sort_value(&self, item: &T) -> Option<SortValue> {
        self.sort_key.as_ref().map(|key| key(item))
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.is_sortable())
            .field("align", &self.align)
            .finish()
    }
}
