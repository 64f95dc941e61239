//! Interactive table state: search term, filter selection, sort, and page.
//!
//! Any change to the search term, filter, sort, or page size resets the
//! current page to 1 so a narrowed result never lands on an empty page.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::view::TableView;

/// Filter value selected when a view has no filter options.
pub const DEFAULT_FILTER_VALUE: &str = "all";

/// Sort direction for the active sort column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl FromStr for SortDirection {
    type Err = TableStateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(TableStateError::InvalidDirection {
                value: value.to_owned(),
            }),
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortConfig {
    /// Key of the column rows are sorted by.
    pub key: String,
    /// Sort direction.
    pub direction: SortDirection,
}

/// Pagination controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNavigation {
    /// Jump to page 1.
    First,
    /// Step back one page.
    Previous,
    /// Step forward one page.
    Next,
    /// Jump to the last page.
    Last,
}

/// Rejected state changes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableStateError {
    /// No column carries the requested key.
    #[error("unknown column: {key}")]
    UnknownColumn {
        /// Requested column key.
        key: String,
    },
    /// The column exists but cannot be sorted.
    #[error("column {key} is not sortable")]
    NotSortable {
        /// Requested column key.
        key: String,
    },
    /// The filter value is not one of the configured options.
    #[error("unknown filter option: {value}")]
    UnknownFilterOption {
        /// Requested filter value.
        value: String,
    },
    /// The sort direction is neither ascending nor descending.
    #[error("invalid sort direction: {value}; expected asc or desc")]
    InvalidDirection {
        /// Rejected direction.
        value: String,
    },
    /// Pages are numbered from 1.
    #[error("page must be at least 1")]
    InvalidPage,
}

/// Table state as carried in a query string.
///
/// ```text
/// ?search=maria&filter=high&sort=points&direction=desc&page=2&pageSize=5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQuery {
    /// Search term.
    pub search: Option<String>,
    /// Selected filter value.
    pub filter: Option<String>,
    /// Sort column key.
    pub sort: Option<String>,
    /// Sort direction; ignored without `sort`.
    pub direction: Option<String>,
    /// Requested page, 1-based.
    pub page: Option<usize>,
    /// Rows per page.
    pub page_size: Option<usize>,
}

/// Presentation state owned by a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    search_term: String,
    filter_value: String,
    sort: Option<SortConfig>,
    current_page: usize,
    page_size: usize,
}

impl TableState {
    /// Initial state for `view`: no search, first filter option selected, no
    /// sort, page 1.
    #[must_use]
    pub fn for_view<T>(view: &TableView<T>) -> Self {
        let filter_value = view
            .filter()
            .and_then(|filter| filter.options().first())
            .map_or_else(|| DEFAULT_FILTER_VALUE.to_owned(), |option| option.value.clone());
        Self {
            search_term: String::new(),
            filter_value,
            sort: None,
            current_page: 1,
            page_size: view.page_size(),
        }
    }

    /// Rebuild state for `view` from query parameters.
    ///
    /// # Errors
    /// Returns [`TableStateError`] when the query names an unknown filter
    /// option, an unknown or unsortable column, an invalid direction, or
    /// page 0.
    pub fn from_query<T>(view: &TableView<T>, query: &TableQuery) -> Result<Self, TableStateError> {
        let mut state = Self::for_view(view);
        if let Some(term) = &query.search {
            state.set_search(term.clone());
        }
        if let Some(value) = &query.filter {
            state.select_filter(view, value)?;
        }
        if let Some(key) = &query.sort {
            let direction = match &query.direction {
                Some(raw) => raw.parse()?,
                None => SortDirection::Asc,
            };
            state.sort_by(view, key, direction)?;
        }
        if let Some(size) = query.page_size {
            state.set_page_size(size);
        }
        if let Some(page) = query.page {
            if page == 0 {
                return Err(TableStateError::InvalidPage);
            }
            state.current_page = page;
        }
        Ok(state)
    }

    /// Current search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Selected filter value.
    #[must_use]
    pub fn filter_value(&self) -> &str {
        &self.filter_value
    }

    /// Active sort, if any.
    #[must_use]
    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    /// Requested page (1-based). Rendering clamps it to the available pages.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Rows per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search_term {
            self.search_term = term;
            self.current_page = 1;
        }
    }

    /// Select a filter option.
    ///
    /// # Errors
    /// Returns [`TableStateError::UnknownFilterOption`] when `view` has no
    /// filter or the value is not one of its options.
    pub fn select_filter<T>(
        &mut self,
        view: &TableView<T>,
        value: &str,
    ) -> Result<(), TableStateError> {
        let known = view.filter().is_some_and(|filter| filter.has_option(value));
        if !known {
            return Err(TableStateError::UnknownFilterOption {
                value: value.to_owned(),
            });
        }
        if value != self.filter_value {
            value.clone_into(&mut self.filter_value);
            self.current_page = 1;
        }
        Ok(())
    }

    /// Activate a column header.
    ///
    /// Activating the active column while ascending switches to descending;
    /// any other activation sorts ascending by that column. Non-sortable
    /// columns are ignored and `Ok(false)` is returned.
    ///
    /// # Errors
    /// Returns [`TableStateError::UnknownColumn`] when no column has `key`.
    pub fn toggle_sort<T>(&mut self, view: &TableView<T>, key: &str) -> Result<bool, TableStateError> {
        let column = view
            .column(key)
            .ok_or_else(|| TableStateError::UnknownColumn {
                key: key.to_owned(),
            })?;
        if !column.is_sortable() {
            return Ok(false);
        }
        let direction = match &self.sort {
            Some(active) if active.key == key && active.direction == SortDirection::Asc => {
                SortDirection::Desc
            }
            _ => SortDirection::Asc,
        };
        self.apply_sort(key, direction);
        Ok(true)
    }

    /// Sort by `key` in an explicit direction.
    ///
    /// # Errors
    /// Returns [`TableStateError::UnknownColumn`] or
    /// [`TableStateError::NotSortable`] when the column cannot be sorted.
    pub fn sort_by<T>(
        &mut self,
        view: &TableView<T>,
        key: &str,
        direction: SortDirection,
    ) -> Result<(), TableStateError> {
        let column = view
            .column(key)
            .ok_or_else(|| TableStateError::UnknownColumn {
                key: key.to_owned(),
            })?;
        if !column.is_sortable() {
            return Err(TableStateError::NotSortable {
                key: key.to_owned(),
            });
        }
        self.apply_sort(key, direction);
        Ok(())
    }

    /// Change the page size; values below 1 are raised to 1.
    pub fn set_page_size(&mut self, size: usize) {
        let size = size.max(1);
        if size != self.page_size {
            self.page_size = size;
            self.current_page = 1;
        }
    }

    /// Move to `page`, clamped to `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.min(total_pages).max(1);
    }

    /// Apply a pagination control.
    pub fn navigate(&mut self, navigation: PageNavigation, total_pages: usize) {
        let target = match navigation {
            PageNavigation::First => 1,
            PageNavigation::Previous => self.current_page.saturating_sub(1),
            PageNavigation::Next => self.current_page.saturating_add(1),
            PageNavigation::Last => total_pages,
        };
        self.go_to_page(target, total_pages);
    }

    fn apply_sort(&mut self, key: &str, direction: SortDirection) {
        self.sort = Some(SortConfig {
            key: key.to_owned(),
            direction,
        });
        self.current_page = 1;
    }
}
