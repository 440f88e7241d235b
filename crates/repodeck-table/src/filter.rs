//! Declarative filters.
//!
//! A [`FilterSpec`] names a field path, carries the current [`Filter`] value
//! and optionally a custom predicate. The value is a tagged union so a
//! search filter always holds text and a select filter always holds a list
//! of options.
//!
//! Matching rules, applied per row:
//!
//! - an empty value (empty text, nothing selected) matches everything
//! - a custom predicate, when present, decides alone
//! - `Search` matches when the field is a string containing the text,
//!   case-insensitively, with the text taken literally
//! - `Select` matches when the field equals the value of any selected option
//!
//! A missing or non-string field never matches a search filter.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::value::{OwnedValue, Value};

/// Named filters of a table. Keys are fixed when the table is created.
pub type FiltersMap = BTreeMap<String, FilterSpec>;

/// Predicate overriding the built-in matching of a filter.
///
/// Receives the row's field value and the filter's current value.
pub type CustomFilter = Rc<dyn Fn(&Value<'_>, &Filter) -> bool>;

/// The kind of a filter, independent of its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Search,
    Select,
}

impl FilterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::Search => "search",
            FilterKind::Select => "select",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One choice of a select filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: OwnedValue,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<OwnedValue>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option whose label is the value's display form.
    pub fn from_value(value: impl Into<OwnedValue>) -> Self {
        let value = value.into();
        let label = value.to_string();
        SelectOption { value, label }
    }
}

/// Current value of a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Free text, matched as a case-insensitive substring.
    Search(String),
    /// Selected options, matched by value equality (any of).
    Select(Vec<SelectOption>),
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Search(_) => FilterKind::Search,
            Filter::Select(_) => FilterKind::Select,
        }
    }

    /// `true` when nothing is typed or selected.
    pub fn is_empty(&self) -> bool {
        match self {
            Filter::Search(text) => text.is_empty(),
            Filter::Select(selected) => selected.is_empty(),
        }
    }
}

/// Declarative description of one filter.
#[derive(Clone)]
pub struct FilterSpec {
    /// Dotted field path the filter reads from each row.
    pub filter_by: String,
    /// Current value.
    pub filter: Filter,
    /// Candidate options offered for a select filter.
    pub options: Vec<SelectOption>,
    /// Predicate overriding the built-in matching.
    pub custom: Option<CustomFilter>,
}

impl FilterSpec {
    /// A search filter on `filter_by`, initially empty.
    pub fn search(filter_by: impl Into<String>) -> Self {
        FilterSpec {
            filter_by: filter_by.into(),
            filter: Filter::Search(String::new()),
            options: Vec::new(),
            custom: None,
        }
    }

    /// A select filter on `filter_by` offering `options`, nothing selected.
    pub fn select(filter_by: impl Into<String>, options: Vec<SelectOption>) -> Self {
        FilterSpec {
            filter_by: filter_by.into(),
            filter: Filter::Select(Vec::new()),
            options,
            custom: None,
        }
    }

    /// Sets the initial value.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Installs a custom predicate.
    pub fn with_custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value<'_>, &Filter) -> bool + 'static,
    {
        self.custom = Some(Rc::new(predicate));
        self
    }

    pub fn kind(&self) -> FilterKind {
        self.filter.kind()
    }

    /// Prepares this filter for matching many rows.
    pub(crate) fn compile(&self) -> CompiledFilter<'_> {
        let matcher = if self.filter.is_empty() {
            Matcher::Pass
        } else if let Some(custom) = &self.custom {
            Matcher::Custom(custom)
        } else {
            match &self.filter {
                Filter::Search(text) => match case_insensitive_regex(text) {
                    Ok(regex) => Matcher::Search(regex),
                    Err(err) => {
                        warn!(filter_by = %self.filter_by, %err, "search pattern too large, using plain substring match");
                        Matcher::Substring(text.to_lowercase())
                    }
                },
                Filter::Select(selected) => Matcher::Select(selected),
            }
        };

        CompiledFilter {
            filter_by: &self.filter_by,
            filter: &self.filter,
            matcher,
        }
    }
}

impl fmt::Debug for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSpec")
            .field("filter_by", &self.filter_by)
            .field("filter", &self.filter)
            .field("options", &self.options)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Builds a case-insensitive regex matching `text` literally.
pub fn case_insensitive_regex(text: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(text))
        .case_insensitive(true)
        .build()
}

pub(crate) struct CompiledFilter<'s> {
    pub(crate) filter_by: &'s str,
    filter: &'s Filter,
    matcher: Matcher<'s>,
}

enum Matcher<'s> {
    Pass,
    Custom(&'s CustomFilter),
    Search(Regex),
    Substring(String),
    Select(&'s [SelectOption]),
}

impl CompiledFilter<'_> {
    /// `true` when this filter cannot exclude any row.
    pub(crate) fn is_pass(&self) -> bool {
        matches!(self.matcher, Matcher::Pass)
    }

    pub(crate) fn matches(&self, value: &Value<'_>) -> bool {
        match &self.matcher {
            Matcher::Pass => true,
            Matcher::Custom(custom) => custom(value, self.filter),
            Matcher::Search(regex) => value.as_str().is_some_and(|s| regex.is_match(s)),
            Matcher::Substring(needle) => value
                .as_str()
                .is_some_and(|s| s.to_lowercase().contains(needle.as_str())),
            Matcher::Select(selected) => selected.iter().any(|option| option.value.equals(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    fn search(text: &str) -> FilterSpec {
        FilterSpec::search("name").with_filter(Filter::Search(text.to_string()))
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let spec = search("RUST");
        let compiled = spec.compile();
        assert!(compiled.matches(&Value::String("awesome-rust")));
        assert!(compiled.matches(&Value::String("Rustlings")));
        assert!(!compiled.matches(&Value::String("ruby")));
    }

    #[test]
    fn search_treats_special_characters_literally() {
        let spec = search("c++ (v2)");
        let compiled = spec.compile();
        assert!(compiled.matches(&Value::String("Modern C++ (v2) notes")));
        assert!(!compiled.matches(&Value::String("cc v2")));

        let dot = search(".");
        assert!(!dot.compile().matches(&Value::String("no dots here")));
    }

    #[test]
    fn search_on_missing_or_non_string_field_is_no_match() {
        let spec = search("1");
        let compiled = spec.compile();
        assert!(!compiled.matches(&Value::None));
        assert!(!compiled.matches(&Value::Number(Number::I64(1))));
        assert!(!compiled.matches(&Value::Bool(true)));
    }

    #[test]
    fn empty_values_pass_everything() {
        let empty_search = FilterSpec::search("name");
        assert!(empty_search.compile().is_pass());
        assert!(empty_search.compile().matches(&Value::None));

        let empty_select = FilterSpec::select("lang", vec![SelectOption::from_value("Rust")]);
        assert!(empty_select.compile().is_pass());
        assert!(empty_select.compile().matches(&Value::String("Go")));
    }

    #[test]
    fn select_matches_any_selected_value() {
        let spec = FilterSpec::select("lang", Vec::new()).with_filter(Filter::Select(vec![
            SelectOption::from_value("Rust"),
            SelectOption::from_value("Go"),
        ]));
        let compiled = spec.compile();
        assert!(compiled.matches(&Value::String("Rust")));
        assert!(compiled.matches(&Value::String("Go")));
        assert!(!compiled.matches(&Value::String("rust")));
        assert!(!compiled.matches(&Value::None));
    }

    #[test]
    fn custom_predicate_is_authoritative() {
        let spec = FilterSpec::search("stars")
            .with_filter(Filter::Search("100".into()))
            .with_custom(|value, filter| match (value.as_number(), filter) {
                (Some(n), Filter::Search(min)) => {
                    min.parse::<f64>().is_ok_and(|min| n.to_f64() >= min)
                }
                _ => false,
            });
        let compiled = spec.compile();
        assert!(compiled.matches(&Value::Number(Number::U64(150))));
        assert!(!compiled.matches(&Value::Number(Number::U64(50))));
    }

    #[test]
    fn custom_predicate_skipped_for_empty_value() {
        let spec = FilterSpec::search("stars").with_custom(|_, _| false);
        assert!(spec.compile().matches(&Value::Number(Number::U64(1))));
    }

    #[test]
    fn kinds_and_display() {
        assert_eq!(Filter::Search(String::new()).kind(), FilterKind::Search);
        assert_eq!(Filter::Select(Vec::new()).kind(), FilterKind::Select);
        assert_eq!(FilterKind::Select.to_string(), "select");
    }

    #[test]
    fn debug_hides_custom_predicate() {
        let spec = FilterSpec::search("name").with_custom(|_, _| true);
        let rendered = format!("{spec:?}");
        assert!(rendered.contains("<fn>"));
    }
}
