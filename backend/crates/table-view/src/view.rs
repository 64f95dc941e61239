//! Table configuration and the search → filter → sort → paginate pipeline.

use crate::cell::SortValue;
use crate::column::Column;
use crate::filter::{Action, Filter};
use crate::page::{FilterControl, Header, Pagination, RenderedCell, Row, TableBody, TablePage};
use crate::state::{SortDirection, TableState};

/// Rows per page when the view does not configure a size.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Message shown when no rows survive search and filtering.
pub const EMPTY_MESSAGE: &str = "No data found.";

type KeyFn<T> = Box<dyn Fn(&T) -> String + Send + Sync>;
type SearchFn<T> = Box<dyn Fn(&str, &T) -> bool + Send + Sync>;
type ActionsFn<T> = Box<dyn Fn(&T) -> Vec<Action> + Send + Sync>;

/// How a collection of `T` is presented as a table.
pub struct TableView<T> {
    title: String,
    description: Option<String>,
    columns: Vec<Column<T>>,
    row_key: KeyFn<T>,
    search: Option<SearchFn<T>>,
    filter: Option<Filter<T>>,
    row_actions: Option<ActionsFn<T>>,
    top_actions: Vec<Action>,
    page_size: usize,
}

impl<T> TableView<T> {
    /// Start configuring a view. `row_key` must return a value unique per row.
    pub fn builder(
        title: impl Into<String>,
        row_key: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> TableViewBuilder<T> {
        TableViewBuilder {
            view: Self {
                title: title.into(),
                description: None,
                columns: Vec::new(),
                row_key: Box::new(row_key),
                search: None,
                filter: None,
                row_actions: None,
                top_actions: Vec::new(),
                page_size: DEFAULT_PAGE_SIZE,
            },
        }
    }

    /// Table title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Column with `key`, if any.
    #[must_use]
    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|column| column.key() == key)
    }

    /// Configured filter, if any.
    #[must_use]
    pub fn filter(&self) -> Option<&Filter<T>> {
        self.filter.as_ref()
    }

    /// Whether a search predicate is configured.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.search.is_some()
    }

    /// Configured rows per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Apply search, filter, then sort to `items`.
    ///
    /// An empty search term keeps every row. Sorting is stable, so rows with
    /// equal keys keep their collection order.
    pub fn process<'a>(&self, state: &TableState, items: &'a [T]) -> Vec<&'a T> {
        let term = state.search_term();
        let mut rows: Vec<&T> = items
            .iter()
            .filter(|item| match &self.search {
                Some(search) if !term.is_empty() => search(term, item),
                _ => true,
            })
            .filter(|item| {
                self.filter
                    .as_ref()
                    .is_none_or(|filter| filter.matches(state.filter_value(), item))
            })
            .collect();

        if let Some(sort) = state.sort()
            && let Some(column) = self.column(&sort.key)
            && column.is_sortable()
        {
            let mut keyed: Vec<(Option<SortValue>, &T)> = rows
                .into_iter()
                .map(|item| (column.sort_value(item), item))
                .collect();
            keyed.sort_by(|(left, _), (right, _)| match sort.direction {
                SortDirection::Asc => left.cmp(right),
                SortDirection::Desc => right.cmp(left),
            });
            rows = keyed.into_iter().map(|(_, item)| item).collect();
        }
        rows
    }

    /// Number of pages for `total_items` rows; zero rows yield zero pages.
    #[must_use]
    pub fn total_pages(&self, state: &TableState, total_items: usize) -> usize {
        total_items.div_ceil(state.page_size().max(1))
    }

    /// Render the visible page.
    ///
    /// The requested page is clamped to the available range, so a state
    /// pointing past the end shows the last page.
    pub fn render(&self, state: &TableState, items: &[T]) -> TablePage {
        let processed = self.process(state, items);
        let total_items = processed.len();
        let page_size = state.page_size().max(1);
        let total_pages = self.total_pages(state, total_items);
        let current_page = state.current_page().min(total_pages).max(1);
        let offset = current_page.saturating_sub(1).saturating_mul(page_size);

        let rows: Vec<Row> = processed
            .iter()
            .skip(offset)
            .take(page_size)
            .map(|item| self.render_row(item))
            .collect();

        let body = if rows.is_empty() {
            TableBody::Empty {
                message: EMPTY_MESSAGE.to_owned(),
                col_span: self.col_span(),
            }
        } else {
            TableBody::Rows { rows }
        };

        let pagination = (total_items > 0).then(|| {
            let visible = match &body {
                TableBody::Rows { rows } => rows.len(),
                TableBody::Empty { .. } => 0,
            };
            Pagination::new(current_page, total_pages, page_size, total_items, offset, visible)
        });

        TablePage {
            title: self.title.clone(),
            description: self.description.clone(),
            searchable: self.is_searchable(),
            search_term: state.search_term().to_owned(),
            filter: self.filter.as_ref().map(|filter| FilterControl {
                placeholder: filter.placeholder().to_owned(),
                options: filter.options().to_vec(),
                selected: state.filter_value().to_owned(),
            }),
            headers: self.headers(state),
            has_actions: self.row_actions.is_some(),
            top_actions: self.top_actions.clone(),
            body,
            pagination,
        }
    }

    fn headers(&self, state: &TableState) -> Vec<Header> {
        self.columns
            .iter()
            .map(|column| Header {
                key: column.key().to_owned(),
                label: column.header().to_owned(),
                align: column.alignment(),
                sortable: column.is_sortable(),
                sorted: state
                    .sort()
                    .filter(|sort| sort.key == column.key())
                    .map(|sort| sort.direction),
            })
            .collect()
    }

    fn render_row(&self, item: &T) -> Row {
        Row {
            key: (self.row_key)(item),
            cells: self
                .columns
                .iter()
                .map(|column| RenderedCell {
                    column: column.key().to_owned(),
                    align: column.alignment(),
                    cell: column.render(item),
                })
                .collect(),
            actions: self
                .row_actions
                .as_ref()
                .map(|actions| actions(item))
                .unwrap_or_default(),
        }
    }

    fn col_span(&self) -> usize {
        self.columns
            .len()
            .saturating_add(usize::from(self.row_actions.is_some()))
    }
}

impl<T> std::fmt::Debug for TableView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableView")
            .field("title", &self.title)
            .field("columns", &self.columns)
            .field("searchable", &self.is_searchable())
            .field("filter", &self.filter)
            .field("top_actions", &self.top_actions)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

/// Builder returned by [`TableView::builder`].
#[derive(Debug)]
pub struct TableViewBuilder<T> {
    view: TableView<T>,
}

impl<T> TableViewBuilder<T> {
    /// Subtitle shown under the title.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.view.description = Some(description.into());
        self
    }

    /// Append a column.
    #[must_use]
    pub fn column(mut self, column: Column<T>) -> Self {
        self.view.columns.push(column);
        self
    }

    /// Enable the search box with a predicate over the raw term and a row.
    #[must_use]
    pub fn search(mut self, predicate: impl Fn(&str, &T) -> bool + Send + Sync + 'static) -> Self {
        self.view.search = Some(Box::new(predicate));
        self
    }

    /// Enable a single-select filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter<T>) -> Self {
        self.view.filter = Some(filter);
        self
    }

    /// Produce per-row actions; enables the trailing actions column.
    #[must_use]
    pub fn row_actions(mut self, actions: impl Fn(&T) -> Vec<Action> + Send + Sync + 'static) -> Self {
        self.view.row_actions = Some(Box::new(actions));
        self
    }

    /// Add a control rendered above the table.
    #[must_use]
    pub fn top_action(mut self, action: Action) -> Self {
        self.view.top_actions.push(action);
        self
    }

    /// Rows per page; values below 1 are raised to 1.
    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.view.page_size = page_size.max(1);
        self
    }

    /// Finish configuration.
    #[must_use]
    pub fn build(self) -> TableView<T> {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, FilterOption, PageNavigation};
    use rstest::{fixture, rstest};

    #[derive(Debug)]
    struct Member {
        id: u32,
        name: &'static str,
        points: i64,
    }

    #[fixture]
    fn members() -> Vec<Member> {
        [
            ("Maria", 320),
            ("Juan", 150),
            ("Ana", 90),
            ("Pedro", 210),
            ("Lucia", 150),
            ("Carlos", 40),
            ("Sofia", 500),
        ]
        .into_iter()
        .zip(1..)
        .map(|((name, points), id)| Member { id, name, points })
        .collect()
    }

    #[fixture]
    fn view() -> TableView<Member> {
        TableView::builder("Members", |member: &Member| member.id.to_string())
            .description("Loyalty members")
            .column(
                Column::new("name", "Name", |member: &Member| Cell::strong(member.name))
                    .sortable_by(|member| SortValue::text(member.name)),
            )
            .column(
                Column::new("points", "Points", |member: &Member| {
                    Cell::text(member.points.to_string())
                })
                .sortable_by(|member| SortValue::Number(member.points)),
            )
            .search(|term, member: &Member| {
                member.name.to_lowercase().contains(&term.to_lowercase())
            })
            .filter(Filter::new(
                "Points",
                vec![FilterOption::new("all", "All"), FilterOption::new("high", "High")],
                |value, member: &Member| value != "high" || member.points >= 200,
            ))
            .row_actions(|member: &Member| {
                vec![Action::new("view", "View").with_href(format!("/members/{}", member.id))]
            })
            .page_size(3)
            .build()
    }

    #[rstest]
    fn first_page_holds_page_size_rows(view: TableView<Member>, members: Vec<Member>) {
        let state = TableState::for_view(&view);
        let page = view.render(&state, &members);
        assert_eq!(page.row_keys(), vec!["1", "2", "3"]);
        let pagination = page.pagination.expect("pagination shown");
        assert_eq!(pagination.total_pages, 3);
        assert_eq!(pagination.summary, "Showing 1 to 3 of 7 items");
        assert_eq!(pagination.indicator, "Page 1 of 3");
        assert!(!pagination.can_previous);
        assert!(pagination.can_next);
    }

    #[rstest]
    fn last_page_holds_the_remainder(view: TableView<Member>, members: Vec<Member>) {
        let mut state = TableState::for_view(&view);
        state.navigate(PageNavigation::Last, view.total_pages(&state, members.len()));
        let page = view.render(&state, &members);
        assert_eq!(page.row_keys(), vec!["7"]);
        let pagination = page.pagination.expect("pagination shown");
        assert_eq!(pagination.summary, "Showing 7 to 7 of 7 items");
        assert!(!pagination.can_next);
    }

    #[rstest]
    fn search_is_case_insensitive_substring(view: TableView<Member>, members: Vec<Member>) {
        let mut state = TableState::for_view(&view);
        state.set_search("AN");
        let page = view.render(&state, &members);
        assert_eq!(page.row_keys(), vec!["2", "3"]);
    }

    #[rstest]
    fn filter_and_sort_compose(view: TableView<Member>, members: Vec<Member>) {
        let mut state = TableState::for_view(&view);
        state.select_filter(&view, "high").expect("known option");
        state.toggle_sort(&view, "points").expect("sortable");
        state.toggle_sort(&view, "points").expect("sortable");
        let page = view.render(&state, &members);
        assert_eq!(page.row_keys(), vec!["7", "1", "4"]);
        let sorted: Vec<_> = page.headers.iter().map(|header| header.sorted).collect();
        assert_eq!(sorted, vec![None, Some(SortDirection::Desc)]);
    }

    #[rstest]
    fn equal_keys_keep_collection_order(view: TableView<Member>, members: Vec<Member>) {
        let mut state = TableState::for_view(&view);
        state.set_search("u");
        state.toggle_sort(&view, "points").expect("sortable");
        let page = view.render(&state, &members);
        // Juan and Lucia share 150 points.
        assert_eq!(page.row_keys(), vec!["2", "5"]);
    }

    #[rstest]
    fn no_matches_renders_empty_body_without_pagination(
        view: TableView<Member>,
        members: Vec<Member>,
    ) {
        let mut state = TableState::for_view(&view);
        state.set_search("zzz");
        let page = view.render(&state, &members);
        assert_eq!(
            page.body,
            TableBody::Empty {
                message: EMPTY_MESSAGE.to_owned(),
                col_span: 3
            }
        );
        assert!(page.pagination.is_none());
    }

    #[rstest]
    fn page_past_the_end_is_clamped(view: TableView<Member>, members: Vec<Member>) {
        let mut state = TableState::for_view(&view);
        state.go_to_page(9, 9);
        let page = view.render(&state, &members);
        assert_eq!(page.row_keys(), vec!["7"]);
        assert_eq!(page.pagination.map(|p| p.current_page), Some(3));
    }

    #[rstest]
    #[case("", "all")]
    #[case("a", "all")]
    #[case("", "high")]
    #[case("IA", "high")]
    #[case("zzz", "all")]
    fn pages_partition_the_processed_rows(
        view: TableView<Member>,
        members: Vec<Member>,
        #[values(1, 3, 5, 7, 20)] page_size: usize,
        #[case] search: &str,
        #[case] filter: &str,
    ) {
        let mut state = TableState::for_view(&view);
        state.set_search(search);
        state.select_filter(&view, filter).expect("known option");
        state.set_page_size(page_size);
        let expected: Vec<String> = view
            .process(&state, &members)
            .iter()
            .map(|member| member.id.to_string())
            .collect();

        let total_pages = view.total_pages(&state, expected.len());
        let mut seen = Vec::new();
        for number in 1..=total_pages {
            state.go_to_page(number, total_pages);
            let page = view.render(&state, &members);
            let keys = page.row_keys();
            assert!(keys.len() <= page_size, "page {number} overflows");
            assert!(!keys.is_empty(), "page {number} is empty");
            seen.extend(keys.into_iter().map(str::to_owned));
        }
        assert_eq!(seen, expected);
    }

    #[rstest]
    fn rows_carry_actions_and_aligned_cells(view: TableView<Member>, members: Vec<Member>) {
        let state = TableState::for_view(&view);
        let page = view.render(&state, &members);
        let TableBody::Rows { rows } = page.body else {
            panic!("expected rows");
        };
        let first = rows.first().expect("first row");
        assert_eq!(first.actions.first().and_then(|a| a.href.as_deref()), Some("/members/1"));
        assert_eq!(first.cells.len(), 2);
        assert!(page.has_actions);
        assert_eq!(page.description.as_deref(), Some("Loyalty members"));
    }
}
