//! Command-line interface.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::info;

use repodeck_table::SortOrder;
use repodeck_url::Params;

use crate::app::{render_screen, App, Flow, Screen};
use crate::browse::BrowseCommand;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::github::{GitHubClient, RepoSource};
use crate::logging::{init_logging, LogConfig};
use crate::pages::repositories::{column, COLUMNS};
use crate::pages::ListOptions;
use crate::render::{colors_wanted, to_json, Renderer};
use crate::routes::{Routes, REPOSITORIES, REPOSITORY, SEARCH_QUERY};

#[derive(Parser, Debug)]
#[command(name = "repodeck")]
#[command(version)]
#[command(about = "Search GitHub repositories and page through the results")]
#[command(after_long_help = r#"EXAMPLES
    Search and show the ten most starred matches:
        $ repodeck search tokio --sort stars --order desc

    Only Rust repositories whose name contains "async":
        $ repodeck search async --language Rust --name async

    Browse interactively:
        $ repodeck browse serde

    Build an application or API URL:
        $ repodeck url repository id=1 --query owner=serde-rs --query repo=serde
        $ repodeck url repo owner=serde-rs repo=serde --api

ENVIRONMENT VARIABLES
    GITHUB_TOKEN          API token (raises the rate limit)
    REPODECK_API_BASE     API origin (default: https://api.github.com)
    REPODECK_CONFIG       YAML config file
    RUST_LOG              Log filter, overrides -v
"#)]
pub struct Cli {
    /// YAML config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colors
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search repositories and print one page of results
    Search(SearchArgs),
    /// Show one repository with its languages
    Show {
        owner: String,
        repo: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Render the page an application URL points at
    Open {
        url: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Page, sort and filter results interactively
    Browse {
        /// Initial search
        query: Option<String>,
    },
    /// Print the URL of a named route
    Url(UrlArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search text passed to GitHub
    pub query: String,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub page: u64,

    /// Rows per page (default from config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub size: Option<u64>,

    /// Column to sort by: name, stars, updated, owner, language
    #[arg(long, value_parser = parse_column)]
    pub sort: Option<&'static str>,

    /// Sort direction (default asc)
    #[arg(long, value_parser = parse_order, requires = "sort")]
    pub order: Option<SortOrder>,

    /// Keep names containing this text (case-insensitive)
    #[arg(long)]
    pub name: Option<String>,

    /// Keep these languages (repeatable or comma-separated)
    #[arg(long = "language", value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UrlArgs {
    /// Route name (home, repositories, repository; with --api: searchRepos, repo, repoLanguages)
    pub route: String,

    /// Route parameters as KEY=VALUE
    #[arg(value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Query parameters as KEY=VALUE (repeatable)
    #[arg(long = "query", short = 'q', value_parser = parse_key_value)]
    pub query: Vec<(String, String)>,

    /// Use the GitHub API routes
    #[arg(long)]
    pub api: bool,
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

fn parse_column(s: &str) -> std::result::Result<&'static str, String> {
    column(s).map(|c| c.key).ok_or_else(|| {
        let keys: Vec<&str> = COLUMNS.iter().map(|c| c.key).collect();
        format!("unknown column '{s}', expected one of: {}", keys.join(", "))
    })
}

fn parse_order(s: &str) -> std::result::Result<SortOrder, String> {
    s.parse()
}

/// Runs the parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let color = colors_wanted(cli.no_color);
    let log = LogConfig::from_verbosity(cli.verbose).with_ansi(!cli.no_color);
    // A subscriber may already be installed when embedded; keep it.
    let _ = init_logging(&log);

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    info!(api_base = %config.api_base, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Command::Url(args) = &cli.command {
        let routes = Routes::new(&config.api_base)?;
        writeln!(out, "{}", url_command(&routes, args)?)?;
        return Ok(());
    }

    let renderer = Renderer::new(color)?;
    let client = GitHubClient::new(&config, Routes::new(&config.api_base)?)?;

    match cli.command {
        Command::Search(args) => {
            let (start, options) = search_start(&config, &args)?;
            let mut app = App::with_options(&config, client, &start, options)?;
            let screen = app.screen()?;
            print_screen(&mut out, &renderer, &screen, args.json)?;
        }
        Command::Show { owner, repo, json } => {
            let routes = Routes::new(&config.api_base)?;
            let start = show_start(&routes, &owner, &repo)?;
            let mut app = App::new(&config, client, &start)?;
            let screen = app.screen()?;
            print_screen(&mut out, &renderer, &screen, json)?;
        }
        Command::Open { url, json } => {
            let mut app = App::new(&config, client, app_path(&url))?;
            let screen = app.screen()?;
            print_screen(&mut out, &renderer, &screen, json)?;
        }
        Command::Browse { query } => {
            let routes = Routes::new(&config.api_base)?;
            let start = match query {
                Some(q) => routes.get_url(
                    REPOSITORIES,
                    &Params::new(),
                    &Params::new().with(SEARCH_QUERY, q),
                )?,
                None => "/".to_string(),
            };
            let mut app = App::new(&config, client, &start)?;
            let stdin = io::stdin();
            browse(&mut app, &renderer, stdin.lock(), &mut out)?;
        }
        Command::Url(_) => {}
    }
    Ok(())
}

/// Builds the URL requested by `repodeck url`.
pub fn url_command(routes: &Routes, args: &UrlArgs) -> Result<String> {
    let params: Params = args.params.iter().cloned().collect();
    let query: Params = args.query.iter().cloned().collect();
    if args.api {
        routes.get_api_url(&args.route, &params, &query)
    } else {
        routes.get_url(&args.route, &params, &query)
    }
}

/// Start URL and initial table parameters of `repodeck search`.
pub fn search_start(config: &Config, args: &SearchArgs) -> Result<(String, ListOptions)> {
    let routes = Routes::new(&config.api_base)?;
    let start = routes.get_url(
        REPOSITORIES,
        &Params::new(),
        &Params::new().with(SEARCH_QUERY, &args.query),
    )?;
    let options = ListOptions {
        page: usize::try_from(args.page.saturating_sub(1)).unwrap_or(usize::MAX),
        size: args
            .size
            .map_or(config.page_size, |s| usize::try_from(s).unwrap_or(usize::MAX)),
        sort: args
            .sort
            .map(|key| (key, args.order.unwrap_or(SortOrder::Asc))),
        name: args.name.clone().unwrap_or_default(),
        languages: args.languages.clone(),
    };
    Ok((start, options))
}

/// Detail page URL for `repodeck show`. The full name stands in for the id.
pub fn show_start(routes: &Routes, owner: &str, repo: &str) -> Result<String> {
    routes.get_url(
        REPOSITORY,
        &Params::new().with("id", format!("{owner}/{repo}")),
        &Params::new().with("owner", owner).with("repo", repo),
    )
}

/// Drops scheme and host from an absolute URL.
pub fn app_path(url: &str) -> &str {
    match url.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
        None => url,
    }
}

fn print_screen<W: Write>(out: &mut W, renderer: &Renderer, screen: &Screen, json: bool) -> Result<()> {
    let text = if json {
        to_json(screen)?
    } else {
        render_screen(renderer, screen)?
    };
    writeln!(out, "{}", text.trim_end())?;
    Ok(())
}

/// The interactive loop: draw, read a command, apply it, repeat.
///
/// Ends on `quit` or end of input.
pub fn browse<S, R, W>(app: &mut App<S>, renderer: &Renderer, input: R, out: &mut W) -> Result<()>
where
    S: RepoSource,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    let mut status: Option<String> = None;
    loop {
        match app.screen() {
            Ok(screen) => writeln!(out, "{}", render_screen(renderer, &screen)?.trim_end())?,
            Err(err) => writeln!(out, "{}", error_line(renderer, &err))?,
        }
        if let Some(message) = status.take() {
            writeln!(out, "{}", renderer.styled("muted", &message))?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<BrowseCommand>().and_then(|cmd| app.execute(cmd)) {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue(message)) => status = message,
            Err(err) => status = Some(error_line(renderer, &err)),
        }
    }
}

fn error_line(renderer: &Renderer, err: &AppError) -> String {
    let detail = match err {
        AppError::InvalidInput(_) => err.to_string(),
        _ => format!("{} ({err})", err.user_message()),
    };
    renderer.styled("error", &detail)
}
