//! The application: a location, the pages, and one redraw per command.

use serde::Serialize;
use tracing::debug;

use crate::browse::{BrowseCommand, HELP};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::github::RepoSource;
use crate::nav::Navigator;
use crate::pages::{
    ListOptions, RepositoriesContext, RepositoriesPage, RepositoryContext, RepositoryPage,
};
use crate::render::{Renderer, REPOSITORIES_TEMPLATE, REPOSITORY_TEMPLATE};
use crate::routes::{Routes, HOME, REPOSITORIES, REPOSITORY, SEARCH_QUERY};

/// A rendered page's data.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Screen {
    Repositories(RepositoriesContext),
    Repository(RepositoryContext),
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Redraw, optionally showing a status line.
    Continue(Option<String>),
    Quit,
}

pub struct App<S> {
    routes: Routes,
    source: S,
    nav: Navigator,
    repositories: RepositoriesPage,
}

impl<S: RepoSource> App<S> {
    pub fn new(config: &Config, source: S, start: &str) -> Result<Self> {
        Self::with_options(config, source, start, ListOptions::from_config(config))
    }

    pub fn with_options(
        config: &Config,
        source: S,
        start: &str,
        options: ListOptions,
    ) -> Result<Self> {
        Ok(App {
            routes: Routes::new(&config.api_base)?,
            source,
            nav: Navigator::new(start),
            repositories: RepositoriesPage::new(options, config.available_sizes.clone()),
        })
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn repositories(&mut self) -> &mut RepositoriesPage {
        &mut self.repositories
    }

    pub fn navigate(&mut self, url: &str) {
        self.nav.navigate(url);
    }

    fn search_query(&self) -> String {
        self.nav
            .location()
            .query()
            .get(SEARCH_QUERY)
            .unwrap_or_default()
            .to_string()
    }

    fn route_name(&self) -> Result<String> {
        let location = self.nav.location().to_string();
        self.routes
            .recognize(&location)
            .map(|m| m.name)
            .ok_or_else(|| AppError::InvalidInput(format!("no page at '{location}'")))
    }

    /// Loads what the current location shows.
    pub fn screen(&mut self) -> Result<Screen> {
        let location = self.nav.location().clone();
        let name = self.route_name()?;
        debug!(%location, route = %name, "draw");
        match name.as_str() {
            HOME | REPOSITORIES => {
                let query = self.search_query();
                self.repositories.load(&self.source, &query)?;
                let context = self.repositories.context(&self.routes, &location)?;
                Ok(Screen::Repositories(context))
            }
            REPOSITORY => {
                let page = RepositoryPage::from_query(&location.query())?;
                let context = page.load(&self.source, &self.routes, &location)?;
                Ok(Screen::Repository(context))
            }
            other => Err(AppError::InvalidInput(format!("no page named '{other}'"))),
        }
    }

    /// Applies one browse command.
    pub fn execute(&mut self, command: BrowseCommand) -> Result<Flow> {
        let status = match command {
            BrowseCommand::Quit => return Ok(Flow::Quit),
            BrowseCommand::Help => Some(HELP.to_string()),
            BrowseCommand::Back => {
                if self.nav.back() {
                    None
                } else {
                    Some("already at the first page".to_string())
                }
            }
            BrowseCommand::Go(url) => {
                self.nav.navigate(&url);
                None
            }
            BrowseCommand::Reload => {
                self.repositories.reload();
                None
            }
            BrowseCommand::Search(text) => {
                let current = self.search_query();
                self.repositories.on_search_change(text);
                let url = self.repositories.on_search_submit(&self.routes, &current)?;
                self.nav.navigate(&url);
                None
            }
            list_command => {
                self.require_list_page()?;
                self.list_command(list_command)?
            }
        };
        Ok(Flow::Continue(status))
    }

    fn require_list_page(&self) -> Result<()> {
        match self.route_name()?.as_str() {
            HOME | REPOSITORIES => Ok(()),
            _ => Err(AppError::InvalidInput(
                "this command works on the search page, use 'back'".into(),
            )),
        }
    }

    fn list_command(&mut self, command: BrowseCommand) -> Result<Option<String>> {
        let page = &mut self.repositories;
        let status: Option<String> = match command {
            BrowseCommand::Next => (!page.next_page()).then(|| "already on the last page".into()),
            BrowseCommand::Prev => (!page.prev_page()).then(|| "already on the first page".into()),
            BrowseCommand::Page(number) => {
                page.go_to_page(number)?;
                None
            }
            BrowseCommand::Size(size) => {
                page.set_size(size)?;
                None
            }
            BrowseCommand::Sort(column) => {
                page.sort_by(&column)?;
                None
            }
            BrowseCommand::Name(text) => {
                page.filter_name(text)?;
                None
            }
            BrowseCommand::Lang(languages) => {
                page.filter_languages(languages)?;
                None
            }
            BrowseCommand::Open(index) => {
                let url = page.row_url(&self.routes, index)?;
                self.nav.navigate(&url);
                None
            }
            other => Some(format!("'{other:?}' is not a list command")),
        };
        Ok(status)
    }
}

/// Renders a screen with its template.
pub fn render_screen(renderer: &Renderer, screen: &Screen) -> Result<String> {
    match screen {
        Screen::Repositories(context) => renderer.render(REPOSITORIES_TEMPLATE, context),
        Screen::Repository(context) => renderer.render(REPOSITORY_TEMPLATE, context),
    }
}
