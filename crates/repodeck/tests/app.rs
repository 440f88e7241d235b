//! End-to-end page flows against a canned repository source.

use std::cell::RefCell;
use std::io::Cursor;

use repodeck::app::{render_screen, App, Flow, Screen};
use repodeck::browse::BrowseCommand;
use repodeck::cli::browse;
use repodeck::config::Config;
use repodeck::error::{AppError, Result};
use repodeck::github::{convert, RepoSource};
use repodeck::models::{LanguageBytes, Owner, Repository, RepositoryFull, RepositoryItem};
use repodeck::render::Renderer;

struct Canned {
    searches: RefCell<Vec<String>>,
}

impl Canned {
    fn new() -> Self {
        Canned {
            searches: RefCell::new(Vec::new()),
        }
    }
}

fn item(id: u64, full_name: &str, stars: u64, language: Option<&str>, pushed: &str) -> RepositoryItem {
    let (owner, name) = full_name.split_once('/').unwrap();
    RepositoryItem {
        id,
        name: name.to_string(),
        full_name: full_name.to_string(),
        stargazers_count: stars,
        pushed_at: Some(pushed.to_string()),
        html_url: format!("https://github.com/{full_name}"),
        description: Some(format!("{name} description")),
        language: language.map(str::to_string),
        owner: Owner {
            login: owner.to_string(),
            html_url: format!("https://github.com/{owner}"),
            avatar_url: String::new(),
        },
    }
}

fn catalog() -> Vec<RepositoryItem> {
    vec![
        item(1, "tokio-rs/tokio", 27_400, Some("Rust"), "2024-05-02T10:00:00Z"),
        item(2, "tokio-rs/axum", 19_100, Some("Rust"), "2024-05-01T09:00:00Z"),
        item(3, "golang/go", 123_000, Some("Go"), "2024-05-03T08:00:00Z"),
        item(4, "nodejs/node", 106_000, Some("JavaScript"), "2024-04-30T12:00:00Z"),
        item(5, "tokio-rs/mini-redis", 4_000, None, "2023-11-11T11:11:00Z"),
    ]
}

impl RepoSource for Canned {
    fn search_repositories(&self, query: &str) -> Result<Vec<Repository>> {
        self.searches.borrow_mut().push(query.to_string());
        let query = query.to_lowercase();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(catalog()
            .into_iter()
            .filter(|i| i.full_name.contains(&query) || query == "*")
            .map(convert::repository)
            .collect())
    }

    fn repository(&self, owner: &str, repo: &str) -> Result<RepositoryFull> {
        let full_name = format!("{owner}/{repo}");
        let found = catalog()
            .into_iter()
            .find(|i| i.full_name == full_name)
            .ok_or(AppError::GitHubApi {
                status: 404,
                message: "Not Found".into(),
            })?;
        let bytes: LanguageBytes = [("Rust".to_string(), 900), ("Shell".to_string(), 100)]
            .into_iter()
            .collect();
        Ok(convert::repository_full(found, &bytes))
    }
}

fn list(screen: Screen) -> repodeck::pages::RepositoriesContext {
    match screen {
        Screen::Repositories(ctx) => ctx,
        Screen::Repository(_) => panic!("expected the list page"),
    }
}

fn names(ctx: &repodeck::pages::RepositoriesContext) -> Vec<String> {
    ctx.rows.iter().map(|r| r.repo.full_name.clone()).collect()
}

fn config(page_size: usize) -> Config {
    Config {
        page_size,
        available_sizes: vec![2, 3, 10],
        ..Config::default()
    }
}

#[test]
fn home_without_query_fetches_nothing() {
    let mut app = App::new(&config(10), Canned::new(), "/").unwrap();
    let ctx = list(app.screen().unwrap());
    assert_eq!(ctx.total_rows, 0);
    assert_eq!(ctx.fetched, Some(0));
    assert!(ctx.nav[0].active);
}

#[test]
fn search_sort_filter_and_page() {
    let mut app = App::new(&config(2), Canned::new(), "/repositories?searchQuery=*").unwrap();
    let ctx = list(app.screen().unwrap());
    assert_eq!(ctx.total_rows, 5);
    assert_eq!(ctx.page_count, 3);
    assert!(!ctx.nav[0].active);

    app.execute(BrowseCommand::Sort("stars".into())).unwrap();
    app.execute(BrowseCommand::Sort("stars".into())).unwrap();
    let ctx = list(app.screen().unwrap());
    assert_eq!(names(&ctx), ["golang/go", "nodejs/node"]);

    app.execute(BrowseCommand::Next).unwrap();
    let ctx = list(app.screen().unwrap());
    assert_eq!(names(&ctx), ["tokio-rs/tokio", "tokio-rs/axum"]);
    assert_eq!((ctx.range_start, ctx.range_end), (3, 4));

    // filtering goes back to the first page
    app.execute(BrowseCommand::Lang(vec!["Rust".into()])).unwrap();
    let ctx = list(app.screen().unwrap());
    assert_eq!(ctx.page, 1);
    assert_eq!(ctx.total_rows, 2);
    assert_eq!(ctx.fetched, Some(5));

    app.execute(BrowseCommand::Lang(Vec::new())).unwrap();
    app.execute(BrowseCommand::Name("TOKIO".into())).unwrap();
    app.execute(BrowseCommand::Size(3)).unwrap();
    let ctx = list(app.screen().unwrap());
    assert_eq!(
        names(&ctx),
        ["tokio-rs/tokio", "tokio-rs/axum", "tokio-rs/mini-redis"]
    );

    assert_eq!(
        app.execute(BrowseCommand::Next).unwrap(),
        Flow::Continue(Some("already on the last page".into()))
    );
    assert!(app.execute(BrowseCommand::Size(7)).is_err());
}

#[test]
fn search_submit_navigates_and_refetches() {
    let source = Canned::new();
    let mut app = App::new(&config(10), &source, "/repositories?searchQuery=tokio").unwrap();
    assert_eq!(list(app.screen().unwrap()).total_rows, 3);

    app.execute(BrowseCommand::Search("go".into())).unwrap();
    assert_eq!(
        app.navigator().location().to_string(),
        "/repositories?searchQuery=go"
    );
    let ctx = list(app.screen().unwrap());
    assert_eq!(names(&ctx), ["golang/go"]);
    assert_eq!(ctx.input_value, "go");

    // redrawing the same search does not fetch again
    app.screen().unwrap();
    assert_eq!(*source.searches.borrow(), ["tokio", "go"]);
}

#[test]
fn open_row_and_come_back() {
    let mut app = App::new(&config(10), Canned::new(), "/repositories?searchQuery=axum").unwrap();
    app.screen().unwrap();
    app.execute(BrowseCommand::Open(1)).unwrap();
    assert_eq!(
        app.navigator().location().to_string(),
        "/repositories/2?owner=tokio-rs&repo=axum"
    );

    let Screen::Repository(detail) = app.screen().unwrap() else {
        panic!("expected the detail page");
    };
    assert_eq!(detail.repository.repository.full_name, "tokio-rs/axum");
    assert_eq!(detail.back_url, "/repositories?searchQuery=axum");
    assert_eq!(detail.repository.languages[0].name, "Rust");
    assert_eq!(detail.repository.languages[0].usage_percent, 90.0);

    assert!(matches!(
        app.execute(BrowseCommand::Next),
        Err(AppError::InvalidInput(_))
    ));
    app.execute(BrowseCommand::Back).unwrap();
    assert_eq!(list(app.screen().unwrap()).total_rows, 1);
}

#[test]
fn detail_page_errors() {
    let mut app = App::new(&config(10), Canned::new(), "/repositories/9?owner=nobody").unwrap();
    assert!(matches!(app.screen(), Err(AppError::InvalidInput(_))));

    app.navigate("/repositories/9?owner=nobody&repo=nothing");
    assert!(matches!(
        app.screen(),
        Err(AppError::GitHubApi { status: 404, .. })
    ));

    app.navigate("/users");
    assert!(app.screen().is_err());
}

#[test]
fn renders_both_pages() {
    let renderer = Renderer::new(false).unwrap();
    let mut app = App::new(&config(10), Canned::new(), "/repositories?searchQuery=tokio").unwrap();

    let text = render_screen(&renderer, &app.screen().unwrap()).unwrap();
    assert!(text.contains("Github Repositories"));
    assert!(text.contains("tokio-rs/tokio"));
    assert!(text.contains("27.4k"));
    assert!(text.contains("02.05.2024 10:00"));
    assert!(text.contains("Rows 1-3 of 3"));
    assert!(!text.contains('\x1b'));

    app.execute(BrowseCommand::Open(1)).unwrap();
    let text = render_screen(&renderer, &app.screen().unwrap()).unwrap();
    assert!(text.contains("Repo Name: tokio"));
    assert!(text.contains("90%"));
    assert!(text.contains("/repositories?searchQuery=tokio"));
}

#[test]
fn json_screens_are_tagged() {
    let mut app = App::new(&config(10), Canned::new(), "/repositories?searchQuery=go").unwrap();
    let json = serde_json::to_value(app.screen().unwrap()).unwrap();
    assert_eq!(json["page"], "repositories");
    assert_eq!(json["rows"][0]["full_name"], "golang/go");
    assert_eq!(json["rows"][0]["link"], "/repositories/3?owner=golang&repo=go");
}

#[test]
fn browse_loop_reads_until_quit() {
    let renderer = Renderer::new(false).unwrap();
    let mut app = App::new(&config(2), Canned::new(), "/repositories?searchQuery=*").unwrap();
    let input = Cursor::new("n\nbogus\npage 9\nq\nn\n");
    let mut out = Vec::new();
    browse(&mut app, &renderer, input, &mut out).unwrap();

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("page 2/3"));
    assert!(out.contains("unknown command 'bogus'"));
    assert!(out.contains("page must be between 1 and 3"));
    // nothing after `q` ran
    assert_eq!(out.matches("> ").count(), 4);
}

#[test]
fn browse_loop_stops_at_end_of_input() {
    let renderer = Renderer::new(false).unwrap();
    let mut app = App::new(&config(2), Canned::new(), "/").unwrap();
    let mut out = Vec::new();
    browse(&mut app, &renderer, Cursor::new(""), &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("Enter a search"));
}
