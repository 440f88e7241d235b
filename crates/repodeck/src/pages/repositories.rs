//! The repository search page.
//!
//! The page keeps the search box in a [`MergeState`] and the result list in a
//! [`Table`]. The search text that was actually submitted lives in the URL
//! (`?searchQuery=`); the box shows it until the user starts typing.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use repodeck_table::{
    use_table, Filter, FilterSpec, HeaderCellProps, Merge, MergeState, SelectOption, SortOrder,
    Table, TableHandle, TableProps,
};
use repodeck_url::Params;

use super::{nav_links, NavLink};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::github::RepoSource;
use crate::models::Repository;
use crate::nav::Location;
use crate::routes::{Routes, REPOSITORIES, REPOSITORY, SEARCH_QUERY};

/// Filter key of the name search box.
pub const NAME_FILTER: &str = "name";
/// Filter key of the language selector.
pub const LANGUAGE_FILTER: &str = "language";

/// A sortable column of the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Name used on the command line.
    pub key: &'static str,
    pub header: &'static str,
    /// Field path the column sorts by.
    pub path: &'static str,
}

pub const COLUMNS: [Column; 5] = [
    Column {
        key: "name",
        header: "Repo Name",
        path: Repository::FULL_NAME,
    },
    Column {
        key: "stars",
        header: "Stars",
        path: Repository::STARGAZERS_COUNT,
    },
    Column {
        key: "updated",
        header: "Last Commit",
        path: Repository::PUSHED_AT,
    },
    Column {
        key: "owner",
        header: "Github Link",
        path: Repository::OWNER_NAME,
    },
    Column {
        key: "language",
        header: "Language",
        path: Repository::LANGUAGE,
    },
];

/// Looks up a column by its command-line name.
pub fn column(key: &str) -> Option<&'static Column> {
    COLUMNS.iter().find(|c| c.key.eq_ignore_ascii_case(key))
}

/// Search box state.
#[derive(Merge, Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// What the user typed.
    pub state_input_value: String,
    /// Whether the user typed anything since the page opened.
    pub has_changes: bool,
}

/// Initial table parameters of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    /// Zero-based.
    pub page: usize,
    pub size: usize,
    /// Column key and order.
    pub sort: Option<(&'static str, SortOrder)>,
    pub name: String,
    pub languages: Vec<String>,
}

impl ListOptions {
    pub fn from_config(config: &Config) -> Self {
        ListOptions {
            page: 0,
            size: config.page_size,
            sort: None,
            name: String::new(),
            languages: Vec::new(),
        }
    }
}

/// The search page container.
pub struct RepositoriesPage {
    search: MergeState<SearchState>,
    table: Table<Repository>,
    available_sizes: Vec<usize>,
    loaded_query: Option<String>,
    data: Option<Vec<Repository>>,
}

impl RepositoriesPage {
    pub fn new(options: ListOptions, available_sizes: Vec<usize>) -> Self {
        let name_filter =
            FilterSpec::search(Repository::FULL_NAME).with_filter(Filter::Search(options.name));
        let language_filter = FilterSpec::select(Repository::LANGUAGE, Vec::new()).with_filter(
            Filter::Select(
                options
                    .languages
                    .into_iter()
                    .map(SelectOption::from_value)
                    .collect(),
            ),
        );

        let mut props = TableProps::new()
            .page(options.page)
            .size(options.size)
            .filter(NAME_FILTER, name_filter)
            .filter(LANGUAGE_FILTER, language_filter);
        if let Some((key, order)) = options.sort {
            if let Some(col) = column(key) {
                props = props.sort(col.path, order);
            }
        }

        RepositoriesPage {
            search: MergeState::new(SearchState::default()),
            table: use_table(props),
            available_sizes,
            loaded_query: None,
            data: None,
        }
    }

    /// Fetches results for `search_query` unless they are already loaded.
    ///
    /// A new query goes back to the first page; sort and filters are kept.
    pub fn load<S: RepoSource + ?Sized>(&mut self, source: &S, search_query: &str) -> Result<()> {
        if self.loaded_query.as_deref() == Some(search_query) {
            return Ok(());
        }
        let fresh = self.loaded_query.is_some();
        // A failed query stays recorded; `reload` retries it.
        self.loaded_query = Some(search_query.to_string());
        self.data = None;
        self.table.invalidate();

        let rows = source.search_repositories(search_query)?;
        info!(query = search_query, rows = rows.len(), "loaded search results");
        self.data = Some(rows);
        if fresh {
            self.table.handle().on_page_change(0);
        }
        Ok(())
    }

    /// Forgets the loaded results so the next [`load`](Self::load) fetches.
    pub fn reload(&mut self) {
        self.loaded_query = None;
    }

    pub fn rows(&self) -> Option<&[Repository]> {
        self.data.as_deref()
    }

    /// Text shown in the search box.
    pub fn input_value(&self, search_query: &str) -> String {
        let state = self.search.state();
        if state.has_changes {
            state.state_input_value.clone()
        } else {
            search_query.to_string()
        }
    }

    /// The user typed into the search box.
    pub fn on_search_change(&self, text: impl Into<String>) {
        self.search.setter().set(
            SearchStatePatch::default()
                .state_input_value(text.into())
                .has_changes(true),
        );
    }

    /// The user submitted the search box: the URL to navigate to.
    pub fn on_search_submit(&mut self, routes: &Routes, search_query: &str) -> Result<String> {
        self.search.flush();
        let query = Params::new().with(SEARCH_QUERY, self.input_value(search_query));
        routes.get_url(REPOSITORIES, &Params::new(), &query)
    }

    /// Handlers of the result table.
    pub fn table(&self) -> TableHandle {
        self.table.handle()
    }

    pub fn available_sizes(&self) -> &[usize] {
        &self.available_sizes
    }

    /// Changes the page size to one of the offered sizes.
    pub fn set_size(&self, size: usize) -> Result<()> {
        if !self.available_sizes.contains(&size) {
            return Err(AppError::InvalidInput(format!(
                "page size must be one of {:?}",
                self.available_sizes
            )));
        }
        self.table.handle().on_size_change(size);
        Ok(())
    }

    /// Replaces the name search text.
    pub fn filter_name(&self, text: impl Into<String>) -> Result<()> {
        Ok(self
            .table
            .handle()
            .on_filter_change(Filter::Search(text.into()), NAME_FILTER)?)
    }

    /// Replaces the selected languages. An empty list selects everything.
    pub fn filter_languages<I, L>(&self, languages: I) -> Result<()>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let selected = languages
            .into_iter()
            .map(|l| SelectOption::from_value(l.into()))
            .collect();
        Ok(self
            .table
            .handle()
            .on_filter_change(Filter::Select(selected), LANGUAGE_FILTER)?)
    }

    /// Advances the sort of the column named `key`.
    pub fn sort_by(&mut self, key: &str) -> Result<()> {
        let col = column(key).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "unknown column '{key}', expected one of: {}",
                COLUMNS.iter().map(|c| c.key).collect::<Vec<_>>().join(", ")
            ))
        })?;
        let view = self.table.view(self.data.as_deref());
        view.header.click(col.path);
        Ok(())
    }

    /// Moves one page forward. `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        self.table.view(self.data.as_deref()).pagination.next()
    }

    /// Moves one page back. `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        self.table.view(self.data.as_deref()).pagination.prev()
    }

    /// Jumps to a one-based page number.
    pub fn go_to_page(&mut self, number: usize) -> Result<()> {
        let count = self.table.view(self.data.as_deref()).pagination.page_count();
        if number == 0 || number > count {
            return Err(AppError::InvalidInput(format!(
                "page must be between 1 and {count}"
            )));
        }
        self.table.handle().on_page_change(number - 1);
        Ok(())
    }

    /// The URL of the `index`-th (one-based) row on the current page.
    pub fn row_url(&mut self, routes: &Routes, index: usize) -> Result<String> {
        let view = self.table.view(self.data.as_deref());
        let repo = index
            .checked_sub(1)
            .and_then(|i| view.rows.get(i))
            .ok_or_else(|| {
                AppError::InvalidInput(format!("no row {index} on this page"))
            })?;
        repository_url(routes, repo)
    }

    /// Applies queued updates and builds the render context.
    pub fn context(&mut self, routes: &Routes, location: &Location) -> Result<RepositoriesContext> {
        self.search.flush();
        let search_query = location
            .query()
            .get(SEARCH_QUERY)
            .unwrap_or_default()
            .to_string();
        let input_value = self.input_value(&search_query);
        let languages = language_options(self.data.as_deref().unwrap_or_default());
        let fetched = self.data.as_ref().map(Vec::len);

        let view = self.table.view(self.data.as_deref());
        let offset = view.pagination.range().map_or(0, |(first, _)| first - 1);
        let rows = view
            .rows
            .iter()
            .enumerate()
            .map(|(i, repo)| {
                Ok(RowContext {
                    index: i + 1,
                    number: offset + i + 1,
                    link: repository_url(routes, repo)?,
                    repo: (*repo).clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let pagination = &view.pagination;
        let (range_start, range_end) = pagination.range().unwrap_or((0, 0));
        let header = &view.header;

        Ok(RepositoriesContext {
            nav: nav_links(routes, &location.pathname)?,
            search_query,
            input_value,
            has_changes: self.search.state().has_changes,
            fetched,
            rows,
            total_rows: view.total_rows,
            page: pagination.page.map_or(1, |p| p + 1),
            page_count: pagination.page_count(),
            size: pagination.size,
            range_start,
            range_end,
            has_prev: pagination.has_prev(),
            has_next: pagination.has_next(),
            available_sizes: self.available_sizes.clone(),
            columns: column_contexts(header),
            name_filter: match header.filters.get(NAME_FILTER).map(|f| &f.filter) {
                Some(Filter::Search(text)) => text.clone(),
                _ => String::new(),
            },
            language_filter: match header.filters.get(LANGUAGE_FILTER).map(|f| &f.filter) {
                Some(Filter::Select(selected)) => {
                    selected.iter().map(|o| o.label.clone()).collect()
                }
                _ => Vec::new(),
            },
            languages,
        })
    }
}

/// Link from a result row to its detail page.
pub fn repository_url(routes: &Routes, repo: &Repository) -> Result<String> {
    routes.get_url(
        REPOSITORY,
        &Params::new().with("id", repo.id),
        &Params::new()
            .with("owner", &repo.owner_name)
            .with("repo", &repo.name),
    )
}

/// Distinct languages of `rows`, alphabetically.
pub fn language_options(rows: &[Repository]) -> Vec<String> {
    rows.iter()
        .filter_map(|r| r.language.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn column_contexts(header: &HeaderCellProps) -> Vec<ColumnContext> {
    COLUMNS
        .iter()
        .map(|col| ColumnContext {
            key: col.key,
            header: col.header,
            sort: header.order_of(col.path).map(SortOrder::as_str),
        })
        .collect()
}

/// Everything the search page template shows.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoriesContext {
    pub nav: Vec<NavLink>,
    pub search_query: String,
    pub input_value: String,
    pub has_changes: bool,
    /// Rows received from GitHub before filtering, `None` when nothing is
    /// loaded.
    pub fetched: Option<usize>,
    pub rows: Vec<RowContext>,
    pub total_rows: usize,
    /// One-based.
    pub page: usize,
    pub page_count: usize,
    pub size: Option<usize>,
    pub range_start: usize,
    pub range_end: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub available_sizes: Vec<usize>,
    pub columns: Vec<ColumnContext>,
    pub name_filter: String,
    pub language_filter: Vec<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowContext {
    /// Position on the page, for `open N`.
    pub index: usize,
    /// Position in the whole result.
    pub number: usize,
    pub link: String,
    #[serde(flatten)]
    pub repo: Repository,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnContext {
    pub key: &'static str,
    pub header: &'static str,
    pub sort: Option<&'static str>,
}
