//! Commands of the interactive `browse` loop.

use std::str::FromStr;

use crate::error::AppError;

/// One line typed at the `browse` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Next page.
    Next,
    /// Previous page.
    Prev,
    /// Jump to a one-based page.
    Page(usize),
    /// Change the page size.
    Size(usize),
    /// Click a column header.
    Sort(String),
    /// Replace the name filter; empty clears it.
    Name(String),
    /// Replace the language selection; empty clears it.
    Lang(Vec<String>),
    /// Type into the search box and submit.
    Search(String),
    /// Open the detail page of a row on the current page (one-based).
    Open(usize),
    /// Go to an application URL.
    Go(String),
    Back,
    Reload,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  n, next            next page
  p, prev            previous page
  page N             go to page N
  size N             rows per page
  sort COLUMN        sort by name, stars, updated, owner or language
  name [TEXT]        filter by name (no text clears)
  lang [L1,L2,...]   filter by language (no list clears)
  search TEXT        search GitHub
  open N             open row N of this page
  go URL             open an application URL
  b, back            previous location
  r, reload          fetch again
  h, help            this help
  q, quit            leave";

impl FromStr for BrowseCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "n" | "next" => BrowseCommand::Next,
            "p" | "prev" => BrowseCommand::Prev,
            "page" => BrowseCommand::Page(number(word, rest)?),
            "size" => BrowseCommand::Size(number(word, rest)?),
            "sort" => BrowseCommand::Sort(required(word, rest)?.to_string()),
            "name" => BrowseCommand::Name(rest.to_string()),
            "lang" | "language" => BrowseCommand::Lang(
                rest.split(',')
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            "search" | "s" => BrowseCommand::Search(rest.to_string()),
            "open" | "o" => BrowseCommand::Open(number(word, rest)?),
            "go" => BrowseCommand::Go(required(word, rest)?.to_string()),
            "b" | "back" => BrowseCommand::Back,
            "r" | "reload" => BrowseCommand::Reload,
            "h" | "help" | "?" => BrowseCommand::Help,
            "q" | "quit" | "exit" => BrowseCommand::Quit,
            "" => return Err(AppError::InvalidInput("empty command".into())),
            other => {
                return Err(AppError::InvalidInput(format!(
                    "unknown command '{other}', type 'help'"
                )))
            }
        };
        Ok(command)
    }
}

fn required<'a>(word: &str, rest: &'a str) -> Result<&'a str, AppError> {
    if rest.is_empty() {
        Err(AppError::InvalidInput(format!("'{word}' needs an argument")))
    } else {
        Ok(rest)
    }
}

fn number(word: &str, rest: &str) -> Result<usize, AppError> {
    required(word, rest)?
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("'{word}' needs a number, got '{rest}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> BrowseCommand {
        line.parse().unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse("n"), BrowseCommand::Next);
        assert_eq!(parse("  PREV "), BrowseCommand::Prev);
        assert_eq!(parse("page 3"), BrowseCommand::Page(3));
        assert_eq!(parse("size 20"), BrowseCommand::Size(20));
        assert_eq!(parse("sort stars"), BrowseCommand::Sort("stars".into()));
        assert_eq!(parse("name react hooks"), BrowseCommand::Name("react hooks".into()));
        assert_eq!(parse("name"), BrowseCommand::Name(String::new()));
        assert_eq!(
            parse("lang Rust, Go ,"),
            BrowseCommand::Lang(vec!["Rust".into(), "Go".into()])
        );
        assert_eq!(parse("lang"), BrowseCommand::Lang(Vec::new()));
        assert_eq!(parse("search tokio"), BrowseCommand::Search("tokio".into()));
        assert_eq!(parse("open 2"), BrowseCommand::Open(2));
        assert_eq!(parse("go /"), BrowseCommand::Go("/".into()));
        assert_eq!(parse("q"), BrowseCommand::Quit);
    }

    #[test]
    fn rejects_bad_input() {
        assert!("".parse::<BrowseCommand>().is_err());
        assert!("page".parse::<BrowseCommand>().is_err());
        assert!("page two".parse::<BrowseCommand>().is_err());
        assert!("sort".parse::<BrowseCommand>().is_err());
        assert!("fly".parse::<BrowseCommand>().is_err());
    }
}
