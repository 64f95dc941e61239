//! Generic table models for console screens.
//!
//! A [`TableView`] describes how a homogeneous collection is presented:
//! columns, a stable row key, optional search and filter predicates, row and
//! top-level actions, and a page size. A [`TableState`] carries the
//! interactive state (search term, filter selection, sort key and direction,
//! current page). Rendering composes search, filter, sort and pagination in
//! that fixed order and produces a serialisable [`TablePage`].
//!
//! ```
//! use table_view::{Cell, Column, SortValue, TableState, TableView};
//!
//! struct Drink {
//!     id: u32,
//!     name: &'static str,
//!     price_cents: i64,
//! }
//!
//! let view = TableView::builder("Menu", |drink: &Drink| drink.id.to_string())
//!     .column(
//!         Column::new("name", "Name", |drink: &Drink| Cell::text(drink.name))
//!             .sortable_by(|drink| SortValue::text(drink.name)),
//!     )
//!     .column(
//!         Column::new("price", "Price", |drink: &Drink| {
//!             Cell::text(drink.price_cents.to_string())
//!         })
//!         .sortable_by(|drink| SortValue::Number(drink.price_cents)),
//!     )
//!     .page_size(2)
//!     .build();
//!
//! let drinks = vec![
//!     Drink { id: 1, name: "Latte", price_cents: 450 },
//!     Drink { id: 2, name: "Espresso", price_cents: 250 },
//!     Drink { id: 3, name: "Cortado", price_cents: 350 },
//! ];
//!
//! let mut state = TableState::for_view(&view);
//! state.toggle_sort(&view, "price").expect("price is sortable");
//! let page = view.render(&state, &drinks);
//! assert_eq!(page.row_keys(), vec!["2", "3"]);
//! ```

mod cell;
mod column;
mod filter;
mod page;
mod state;
mod view;

pub use cell::{Align, Cell, SortValue};
pub use column::Column;
pub use filter::{Action, Filter, FilterOption};
pub use page::{FilterControl, Header, Pagination, RenderedCell, Row, TableBody, TablePage};
pub use state::{
    DEFAULT_FILTER_VALUE, PageNavigation, SortConfig, SortDirection, TableQuery, TableState,
    TableStateError,
};
pub use view::{DEFAULT_PAGE_SIZE, EMPTY_MESSAGE, TableView, TableViewBuilder};
