//! Repodeck table engine: client-side filtering, sorting and pagination.
//!
//! The engine turns a slice of rows plus a small piece of table state into
//! the rows a page should display. It supports:
//!
//! - Search filters (case-insensitive literal substring) and select filters
//!   (match any selected value), with optional custom predicates
//! - Single-field sorting with an `asc`/`desc` cycle on header clicks
//! - Zero-based pagination that reports the total before slicing
//! - Queued, shallow-merge state updates through [`MergeState`]
//!
//! # Quick Start
//!
//! ```rust
//! use repodeck_table::{derive_table, Filter, FilterSpec, Row, SortOrder, TableState};
//!
//! #[derive(Row)]
//! struct Repo {
//!     name: String,
//!     stars: u64,
//! }
//!
//! let repos = vec![
//!     Repo { name: "alpha".into(), stars: 5 },
//!     Repo { name: "beta".into(), stars: 50 },
//!     Repo { name: "gamma".into(), stars: 1 },
//! ];
//!
//! let mut state = TableState {
//!     page: Some(0),
//!     size: Some(2),
//!     sort_by: Some(Repo::STARS.into()),
//!     sort_order: Some(SortOrder::Asc),
//!     ..TableState::default()
//! };
//! let derived = derive_table(Some(&repos), &state);
//! assert_eq!(derived.total_rows, 3);
//! assert_eq!(derived.rows[0].name, "gamma");
//! assert_eq!(derived.rows[1].name, "alpha");
//!
//! state.filters.insert(
//!     "name".into(),
//!     FilterSpec::search(Repo::NAME).with_filter(Filter::Search("E".into())),
//! );
//! let derived = derive_table(Some(&repos), &state);
//! assert_eq!(derived.total_rows, 1);
//! assert_eq!(derived.rows[0].name, "beta");
//! ```
//!
//! # Derivation Order
//!
//! ```text
//! rows = source
//!      → keep rows matching every non-empty filter
//!      → stable sort, if both sort_by and sort_order are set
//!      → total_rows = count
//!      → slice [page * size, page * size + size), if page and size are set
//! ```
//!
//! The source slice is never modified and derived rows borrow from it.
//!
//! # Stateful Use
//!
//! A page container holds a [`Table`] created by [`use_table`]. Handlers on
//! its [`TableHandle`] queue changes, and [`Table::view`] applies them and
//! re-derives only when the state or the source slice changed.

extern crate self as repodeck_table;

mod error;
mod filter;
mod merge;
mod ordering;
mod page;
mod row;
mod table;
mod value;

pub use error::{Result, TableError};
pub use filter::{
    case_insensitive_regex, CustomFilter, Filter, FilterKind, FilterSpec, FiltersMap,
    SelectOption,
};
pub use merge::{Merge, MergeState, Setter, Update};
pub use ordering::{compare_rows, compare_values, SortOrder};
pub use page::{page_count, PageSpec};
pub use row::{resolve_json, split_path, Row};
pub use table::{
    derive_table, use_table, Derived, HeaderCellProps, PaginationProps, SortSpec, Table,
    TableHandle, TableProps, TableState, TableStatePatch, TableView,
};
pub use value::{AsValue, Number, OwnedValue, Timestamp, Value};

pub use repodeck_macros::{Merge, Row};
