//! Table state and its derivation.
//!
//! [`derive_table`] is the pure part: given source rows and a
//! [`TableState`], it filters, sorts and slices, returning the rows to show
//! and the total count before pagination.
//!
//! [`Table`] is the stateful part a page container holds. It owns the state
//! in a [`MergeState`], hands out a [`TableHandle`] whose handlers queue
//! changes, and re-derives (memoized per state revision and source slice)
//! whenever [`Table::view`] is called.
//!
//! # Example
//!
//! ```
//! use repodeck_table::{use_table, Filter, FilterSpec, SortOrder, TableProps};
//! use serde_json::json;
//!
//! let repos = vec![
//!     json!({ "id": 1, "name": "alpha", "stars": 5 }),
//!     json!({ "id": 2, "name": "beta", "stars": 50 }),
//!     json!({ "id": 3, "name": "gamma", "stars": 1 }),
//! ];
//!
//! let mut table = use_table(
//!     TableProps::new()
//!         .page(0)
//!         .size(2)
//!         .filter("name", FilterSpec::search("name")),
//! );
//!
//! let view = table.view(Some(&repos));
//! assert_eq!(view.total_rows, 3);
//! assert_eq!(view.rows.len(), 2);
//!
//! let handle = table.handle();
//! handle.on_sort_change(None, "stars");
//! handle.on_filter_change(Filter::Search("A".into()), "name").unwrap();
//!
//! let view = table.view(Some(&repos));
//! let names: Vec<_> = view.rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
//! assert_eq!(names, ["gamma", "alpha"]);
//! assert_eq!(view.header.sort_order, Some(SortOrder::Asc));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::{Result, TableError};
use crate::filter::{CompiledFilter, Filter, FilterKind, FilterSpec, FiltersMap};
use crate::merge::{MergeState, Setter};
use crate::ordering::{compare_rows, SortOrder};
use crate::page::{page_count, PageSpec};
use crate::row::Row;
use crate::Merge;

/// Paging, sorting and filtering parameters of one table.
#[derive(Merge, Debug, Clone, Default)]
pub struct TableState {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub filters: FiltersMap,
}

impl TableState {
    pub fn page_spec(&self) -> PageSpec {
        PageSpec {
            page: self.page,
            size: self.size,
        }
    }

    pub fn sort_spec(&self) -> SortSpec {
        SortSpec {
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order,
        }
    }
}

/// Field and direction of the current sort.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl SortSpec {
    /// Field and direction when both are set.
    pub fn active(&self) -> Option<(&str, SortOrder)> {
        match (self.sort_by.as_deref(), self.sort_order) {
            (Some(by), Some(order)) if !by.is_empty() => Some((by, order)),
            _ => None,
        }
    }
}

/// Rows to display and the count they were cut from.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived<'r, T> {
    /// The current page, in display order.
    pub rows: Vec<&'r T>,
    /// Rows left after filtering, before pagination.
    pub total_rows: usize,
}

/// Filters, sorts and paginates `source` according to `state`.
///
/// An absent source derives to no rows and a total of zero. The source is
/// never modified; the result borrows from it.
pub fn derive_table<'r, T: Row>(source: Option<&'r [T]>, state: &TableState) -> Derived<'r, T> {
    let Some(source) = source else {
        return Derived {
            rows: Vec::new(),
            total_rows: 0,
        };
    };
    let (indices, total_rows) = derive_indices(source, state);
    Derived {
        rows: indices.into_iter().map(|i| &source[i]).collect(),
        total_rows,
    }
}

/// Positions in `source` of the rows to show, plus the pre-pagination total.
fn derive_indices<T: Row>(source: &[T], state: &TableState) -> (Vec<usize>, usize) {
    let active: Vec<CompiledFilter<'_>> = state
        .filters
        .values()
        .map(FilterSpec::compile)
        .filter(|compiled| !compiled.is_pass())
        .collect();

    let mut indices: Vec<usize> = if active.is_empty() {
        (0..source.len()).collect()
    } else {
        (0..source.len())
            .filter(|&i| {
                let row = &source[i];
                active
                    .iter()
                    .all(|filter| filter.matches(&row.field(filter.filter_by)))
            })
            .collect()
    };

    let sort = state.sort_spec();
    if let Some((sort_by, order)) = sort.active() {
        indices.sort_by(|&a, &b| compare_rows(&source[a], &source[b], sort_by, order));
    }

    let total_rows = indices.len();
    if let Some(window) = state.page_spec().window(total_rows) {
        indices.truncate(window.end);
        indices.drain(..window.start);
    }

    debug!(
        source = source.len(),
        filters = active.len(),
        total_rows,
        shown = indices.len(),
        "derived table"
    );
    (indices, total_rows)
}

/// Initial parameters of a [`Table`].
#[derive(Debug, Clone, Default)]
pub struct TableProps {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub filters: FiltersMap,
}

impl TableProps {
    pub fn new() -> Self {
        TableProps::default()
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(order);
        self
    }

    /// Registers a filter under `key`.
    pub fn filter(mut self, key: impl Into<String>, spec: FilterSpec) -> Self {
        self.filters.insert(key.into(), spec);
        self
    }
}

impl From<TableProps> for TableState {
    fn from(props: TableProps) -> Self {
        TableState {
            page: props.page,
            size: props.size,
            sort_by: props.sort_by,
            sort_order: props.sort_order,
            filters: props.filters,
        }
    }
}

/// Creates a table from its initial parameters.
pub fn use_table<T: Row>(props: TableProps) -> Table<T> {
    Table::new(props)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MemoKey {
    revision: u64,
    source: Option<(usize, usize)>,
}

#[derive(Debug)]
struct Memo {
    key: MemoKey,
    indices: Vec<usize>,
    total_rows: usize,
}

/// Stateful table controller owned by a page container.
pub struct Table<T> {
    state: MergeState<TableState>,
    handle: TableHandle,
    memo: Option<Memo>,
    _rows: PhantomData<fn(&T)>,
}

impl<T: Row> Table<T> {
    pub fn new(props: TableProps) -> Self {
        let state = MergeState::new(TableState::from(props));
        let shapes = state
            .state()
            .filters
            .iter()
            .map(|(key, spec)| (key.clone(), FilterShape::of(spec)))
            .collect();
        let handle = TableHandle {
            setter: state.setter(),
            shapes: Rc::new(shapes),
        };
        Table {
            state,
            handle,
            memo: None,
            _rows: PhantomData,
        }
    }

    /// Current state, as of the last [`Table::view`] or [`Table::flush`].
    pub fn state(&self) -> &TableState {
        self.state.state()
    }

    /// Handlers for the presentation layer.
    pub fn handle(&self) -> TableHandle {
        self.handle.clone()
    }

    /// Applies queued handler calls. Returns `true` if the state changed.
    pub fn flush(&mut self) -> bool {
        self.state.flush()
    }

    /// Forgets the memoized derivation.
    ///
    /// Call this after replacing the source rows in place: a new vector can
    /// land at the address and length of the old one.
    pub fn invalidate(&mut self) {
        self.memo = None;
    }

    /// Applies queued handler calls and derives the rows to display.
    ///
    /// Derivation is skipped when neither the state nor the source slice
    /// changed since the previous view.
    pub fn view<'r>(&mut self, source: Option<&'r [T]>) -> TableView<'r, T> {
        self.state.flush();
        let key = MemoKey {
            revision: self.state.revision(),
            source: source.map(|rows| (rows.as_ptr() as usize, rows.len())),
        };

        let memo = match self.memo.take() {
            Some(memo) if memo.key == key => memo,
            _ => {
                let (indices, total_rows) = match source {
                    Some(rows) => derive_indices(rows, self.state.state()),
                    None => (Vec::new(), 0),
                };
                Memo {
                    key,
                    indices,
                    total_rows,
                }
            }
        };

        let rows = match source {
            Some(source) => memo.indices.iter().map(|&i| &source[i]).collect(),
            None => Vec::new(),
        };
        let total_rows = memo.total_rows;
        self.memo = Some(memo);

        let state = self.state.state();
        TableView {
            rows,
            total_rows,
            pagination: PaginationProps {
                page: state.page,
                size: state.size,
                total_rows,
                handle: self.handle.clone(),
            },
            header: HeaderCellProps {
                sort_by: state.sort_by.clone(),
                sort_order: state.sort_order,
                filters: state.filters.clone(),
                handle: self.handle.clone(),
            },
        }
    }
}

impl<T> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("state", &self.state)
            .field("memo", &self.memo)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
struct FilterShape {
    kind: FilterKind,
    custom: bool,
}

impl FilterShape {
    fn of(spec: &FilterSpec) -> Self {
        FilterShape {
            kind: spec.kind(),
            custom: spec.custom.is_some(),
        }
    }
}

/// Event handlers feeding back into a [`Table`]'s state.
///
/// Calls are queued and take effect on the table's next view.
#[derive(Clone)]
pub struct TableHandle {
    setter: Setter<TableState>,
    shapes: Rc<BTreeMap<String, FilterShape>>,
}

impl TableHandle {
    /// Moves to `page`, keeping size, sort and filters.
    pub fn on_page_change(&self, page: usize) {
        self.setter.set(TableStatePatch::default().page(Some(page)));
    }

    /// Changes the page length and goes back to the first page.
    pub fn on_size_change(&self, size: usize) {
        self.setter
            .set(TableStatePatch::default().size(Some(size)).page(Some(0)));
    }

    /// Sorts by `sort_by`, advancing `current` one step in the sort cycle.
    pub fn on_sort_change(&self, current: Option<SortOrder>, sort_by: impl Into<String>) {
        self.setter.set(
            TableStatePatch::default()
                .sort_by(Some(sort_by.into()))
                .sort_order(Some(SortOrder::cycle(current))),
        );
    }

    /// Replaces the value of the filter registered under `key` and goes
    /// back to the first page.
    ///
    /// Fails when no such filter exists, or when `value` has the other
    /// shape and the filter has no custom predicate to interpret it.
    pub fn on_filter_change(&self, value: Filter, key: &str) -> Result<()> {
        let shape = self
            .shapes
            .get(key)
            .ok_or_else(|| TableError::UnknownFilter(key.to_string()))?;
        if !shape.custom && shape.kind != value.kind() {
            return Err(TableError::FilterKindMismatch {
                key: key.to_string(),
                expected: shape.kind,
                actual: value.kind(),
            });
        }

        let key = key.to_string();
        self.setter.update(move |current| {
            let mut filters = current.filters.clone();
            match filters.get_mut(&key) {
                Some(spec) => spec.filter = value,
                None => warn!(%key, "filter vanished before update was applied"),
            }
            TableStatePatch::default().filters(filters).page(Some(0))
        });
        Ok(())
    }

    /// Names of the registered filters.
    pub fn filter_keys(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }
}

impl fmt::Debug for TableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableHandle")
            .field("pending", &self.setter.pending())
            .field("filters", &self.shapes.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Everything the presentation layer needs to render one table.
#[derive(Debug)]
pub struct TableView<'r, T> {
    pub rows: Vec<&'r T>,
    pub total_rows: usize,
    pub pagination: PaginationProps,
    pub header: HeaderCellProps,
}

impl<T> TableView<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.total_rows == 0
    }
}

/// Inputs of a pagination widget.
#[derive(Debug, Clone)]
pub struct PaginationProps {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub total_rows: usize,
    pub handle: TableHandle,
}

impl PaginationProps {
    fn active(&self) -> Option<(usize, usize)> {
        match (self.page, self.size) {
            (Some(page), Some(size)) if size > 0 => Some((page, size)),
            _ => None,
        }
    }

    /// Number of pages, one when pagination is inactive.
    pub fn page_count(&self) -> usize {
        match self.active() {
            Some((_, size)) => page_count(self.total_rows, size),
            None => 1,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.active().is_some_and(|(page, _)| page > 0)
    }

    pub fn has_next(&self) -> bool {
        self.active()
            .is_some_and(|(page, _)| page.saturating_add(1) < self.page_count())
    }

    /// One-based first and last row numbers shown, `None` when the page is
    /// empty.
    pub fn range(&self) -> Option<(usize, usize)> {
        let window = PageSpec {
            page: self.page,
            size: self.size,
        }
        .window(self.total_rows)
        .unwrap_or(0..self.total_rows);
        if window.is_empty() {
            None
        } else {
            Some((window.start + 1, window.end))
        }
    }

    /// Queues a move to the next page, if there is one.
    pub fn next(&self) -> bool {
        match self.active() {
            Some((page, _)) if self.has_next() => {
                self.handle.on_page_change(page + 1);
                true
            }
            _ => false,
        }
    }

    /// Queues a move to the previous page, if there is one.
    pub fn prev(&self) -> bool {
        match self.active() {
            Some((page, _)) if page > 0 => {
                self.handle.on_page_change(page - 1);
                true
            }
            _ => false,
        }
    }
}

/// Inputs of sortable, filterable column headers.
#[derive(Debug, Clone)]
pub struct HeaderCellProps {
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub filters: FiltersMap,
    pub handle: TableHandle,
}

impl HeaderCellProps {
    /// Sort order shown on the header of `column`.
    pub fn order_of(&self, column: &str) -> Option<SortOrder> {
        match self.sort_by.as_deref() {
            Some(by) if by == column => self.sort_order,
            _ => None,
        }
    }

    /// Queues a header click on `column`.
    ///
    /// Clicking the sorted column advances its order; clicking another
    /// column starts that column at ascending.
    pub fn click(&self, column: &str) {
        self.handle.on_sort_change(self.order_of(column), column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SelectOption;
    use serde_json::{json, Value as Json};

    fn repos() -> Vec<Json> {
        vec![
            json!({ "id": 1, "name": "alpha", "stars": 5, "lang": "Rust" }),
            json!({ "id": 2, "name": "beta", "stars": 50, "lang": "Go" }),
            json!({ "id": 3, "name": "gamma", "stars": 1, "lang": "Rust" }),
        ]
    }

    fn ids(rows: &[&Json]) -> Vec<i64> {
        rows.iter().filter_map(|r| r["id"].as_i64()).collect()
    }

    #[test]
    fn absent_source_derives_nothing() {
        let derived = derive_table::<Json>(None, &TableState::default());
        assert!(derived.rows.is_empty());
        assert_eq!(derived.total_rows, 0);
    }

    #[test]
    fn no_filters_keeps_everything_in_order() {
        let rows = repos();
        let derived = derive_table(Some(&rows), &TableState::default());
        assert_eq!(ids(&derived.rows), vec![1, 2, 3]);
        assert_eq!(derived.total_rows, 3);
    }

    #[test]
    fn search_filter_matches_case_insensitive_substring() {
        let rows = repos();
        let mut state = TableState::default();
        state.filters.insert(
            "nameF".into(),
            FilterSpec::search("name").with_filter(Filter::Search("e".into())),
        );
        let derived = derive_table(Some(&rows), &state);
        assert_eq!(ids(&derived.rows), vec![2]);
        assert_eq!(derived.total_rows, 1);

        state.filters.insert(
            "nameF".into(),
            FilterSpec::search("name").with_filter(Filter::Search("A".into())),
        );
        assert_eq!(derive_table(Some(&rows), &state).total_rows, 3);
    }

    #[test]
    fn filters_combine_with_and() {
        let rows = repos();
        let mut state = TableState::default();
        state.filters.insert(
            "name".into(),
            FilterSpec::search("name").with_filter(Filter::Search("a".into())),
        );
        state.filters.insert(
            "lang".into(),
            FilterSpec::select("lang", Vec::new())
                .with_filter(Filter::Select(vec![SelectOption::from_value("Rust")])),
        );
        let derived = derive_table(Some(&rows), &state);
        assert_eq!(ids(&derived.rows), vec![1, 3]);
    }

    #[test]
    fn sorts_only_with_field_and_order() {
        let rows = repos();
        let state = TableState {
            sort_by: Some("stars".into()),
            ..TableState::default()
        };
        assert_eq!(ids(&derive_table(Some(&rows), &state).rows), vec![1, 2, 3]);

        let state = TableState {
            sort_by: Some("stars".into()),
            sort_order: Some(SortOrder::Asc),
            ..TableState::default()
        };
        assert_eq!(ids(&derive_table(Some(&rows), &state).rows), vec![3, 1, 2]);

        let state = TableState {
            sort_by: Some(String::new()),
            sort_order: Some(SortOrder::Desc),
            ..TableState::default()
        };
        assert_eq!(ids(&derive_table(Some(&rows), &state).rows), vec![1, 2, 3]);
    }

    #[test]
    fn total_is_counted_before_pagination() {
        let rows = repos();
        let state = TableState {
            page: Some(0),
            size: Some(2),
            sort_by: Some("stars".into()),
            sort_order: Some(SortOrder::Asc),
            ..TableState::default()
        };
        let derived = derive_table(Some(&rows), &state);
        assert_eq!(ids(&derived.rows), vec![3, 1]);
        assert_eq!(derived.total_rows, 3);

        let last = TableState {
            page: Some(1),
            ..state
        };
        assert_eq!(ids(&derive_table(Some(&rows), &last).rows), vec![2]);
    }

    #[test]
    fn zero_size_disables_pagination() {
        let rows = repos();
        let state = TableState {
            page: Some(3),
            size: Some(0),
            ..TableState::default()
        };
        assert_eq!(derive_table(Some(&rows), &state).rows.len(), 3);
    }

    #[test]
    fn page_change_keeps_everything_else() {
        let rows = repos();
        let mut table = use_table(TableProps::new().page(0).size(1).sort("stars", SortOrder::Desc));
        table.handle().on_page_change(2);
        let view = table.view(Some(&rows));
        assert_eq!(ids(&view.rows), vec![3]);
        assert_eq!(table.state().size, Some(1));
        assert_eq!(table.state().sort_order, Some(SortOrder::Desc));
    }

    #[test]
    fn size_change_resets_page() {
        let mut table = use_table::<Json>(TableProps::new().page(4).size(10));
        table.handle().on_size_change(20);
        table.flush();
        assert_eq!(table.state().page, Some(0));
        assert_eq!(table.state().size, Some(20));
    }

    #[test]
    fn sort_change_cycles_and_sets_field() {
        let mut table = use_table::<Json>(TableProps::new());
        let handle = table.handle();

        handle.on_sort_change(None, "stars");
        table.flush();
        assert_eq!(table.state().sort_order, Some(SortOrder::Asc));
        assert_eq!(table.state().sort_by.as_deref(), Some("stars"));

        handle.on_sort_change(Some(SortOrder::Asc), "stars");
        table.flush();
        assert_eq!(table.state().sort_order, Some(SortOrder::Desc));

        handle.on_sort_change(Some(SortOrder::Desc), "name");
        table.flush();
        assert_eq!(table.state().sort_order, Some(SortOrder::Asc));
        assert_eq!(table.state().sort_by.as_deref(), Some("name"));
    }

    #[test]
    fn filter_change_replaces_value_and_resets_page() {
        let options = vec![SelectOption::from_value("Rust"), SelectOption::from_value("Go")];
        let mut table = use_table::<Json>(
            TableProps::new()
                .page(3)
                .size(1)
                .filter("lang", FilterSpec::select("lang", options.clone()))
                .filter("name", FilterSpec::search("name")),
        );

        table
            .handle()
            .on_filter_change(Filter::Select(vec![options[1].clone()]), "lang")
            .unwrap();
        table.flush();

        let state = table.state();
        assert_eq!(state.page, Some(0));
        let lang = &state.filters["lang"];
        assert_eq!(lang.filter, Filter::Select(vec![options[1].clone()]));
        assert_eq!(lang.options, options);
        assert_eq!(state.filters["name"].filter, Filter::Search(String::new()));
    }

    #[test]
    fn filter_change_rejects_unknown_key_and_wrong_shape() {
        let table = use_table::<Json>(TableProps::new().filter("name", FilterSpec::search("name")));
        let handle = table.handle();

        assert_eq!(
            handle.on_filter_change(Filter::Search("x".into()), "nope"),
            Err(TableError::UnknownFilter("nope".into()))
        );
        assert_eq!(
            handle.on_filter_change(Filter::Select(Vec::new()), "name"),
            Err(TableError::FilterKindMismatch {
                key: "name".into(),
                expected: FilterKind::Search,
                actual: FilterKind::Select,
            })
        );
    }

    #[test]
    fn custom_filters_accept_any_shape() {
        let rows = repos();
        let mut table = use_table(TableProps::new().filter(
            "langs",
            FilterSpec::search("lang").with_custom(|value, filter| match filter {
                Filter::Select(selected) => selected.iter().any(|o| o.value.equals(value)),
                Filter::Search(text) => value.as_str() == Some(text.as_str()),
            }),
        ));
        table
            .handle()
            .on_filter_change(Filter::Select(vec![SelectOption::from_value("Go")]), "langs")
            .unwrap();
        assert_eq!(ids(&table.view(Some(&rows)).rows), vec![2]);
    }

    #[test]
    fn view_reuses_derivation_until_inputs_change() {
        let rows = repos();
        let mut table = use_table(TableProps::new().page(0).size(2));

        table.view(Some(&rows));
        let first_key = table.memo.as_ref().map(|m| m.key);
        table.view(Some(&rows));
        assert_eq!(table.memo.as_ref().map(|m| m.key), first_key);

        let other = repos();
        table.view(Some(&other));
        assert_ne!(table.memo.as_ref().map(|m| m.key), first_key);

        table.handle().on_page_change(1);
        let view = table.view(Some(&other));
        assert_eq!(ids(&view.rows), vec![3]);

        table.invalidate();
        assert!(table.memo.is_none());
        assert_eq!(table.view(Some(&other)).total_rows, 3);
    }

    #[test]
    fn pagination_props_navigation() {
        let rows = repos();
        let mut table = use_table(TableProps::new().page(0).size(2));
        let view = table.view(Some(&rows));

        assert_eq!(view.pagination.page_count(), 2);
        assert!(!view.pagination.has_prev());
        assert!(view.pagination.has_next());
        assert_eq!(view.pagination.range(), Some((1, 2)));
        assert!(view.pagination.next());

        let view = table.view(Some(&rows));
        assert_eq!(view.pagination.page, Some(1));
        assert_eq!(view.pagination.range(), Some((3, 3)));
        assert!(!view.pagination.next());
        assert!(view.pagination.prev());
    }

    #[test]
    fn pagination_props_at_the_largest_page() {
        let rows = repos();
        let mut table = use_table(TableProps::new().page(0).size(2));
        table.handle().on_page_change(usize::MAX);
        let view = table.view(Some(&rows));

        assert!(view.rows.is_empty());
        assert_eq!(view.pagination.range(), None);
        assert!(!view.pagination.has_next());
        assert!(!view.pagination.next());
        assert!(view.pagination.has_prev());
    }

    #[test]
    fn sorts_mixed_json_types_without_losing_rows() {
        let rows = vec![
            json!({ "id": 1, "v": "s5" }),
            json!({ "id": 2, "v": 1 }),
            json!({ "id": 3 }),
            json!({ "id": 4, "v": 0.5 }),
            json!({ "id": 5, "v": true }),
            json!({ "id": 6, "v": 0 }),
            json!({ "id": 7, "v": "a" }),
        ];
        let mut state = TableState {
            sort_by: Some("v".into()),
            sort_order: Some(SortOrder::Asc),
            ..TableState::default()
        };
        assert_eq!(
            ids(&derive_table(Some(&rows), &state).rows),
            vec![5, 6, 4, 2, 7, 1, 3]
        );

        state.sort_order = Some(SortOrder::Desc);
        assert_eq!(
            ids(&derive_table(Some(&rows), &state).rows),
            vec![3, 1, 7, 2, 4, 6, 5]
        );
    }

    #[test]
    fn header_click_cycles_per_column() {
        let rows = repos();
        let mut table = use_table(TableProps::new());

        let view = table.view(Some(&rows));
        view.header.click("stars");
        let view = table.view(Some(&rows));
        assert_eq!(view.header.order_of("stars"), Some(SortOrder::Asc));
        assert_eq!(view.header.order_of("name"), None);

        view.header.click("stars");
        let view = table.view(Some(&rows));
        assert_eq!(view.header.order_of("stars"), Some(SortOrder::Desc));
        assert_eq!(ids(&view.rows), vec![2, 1, 3]);
    }
}
