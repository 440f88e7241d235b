//! Derive macros for Repodeck.
//!
//! # Available Macros
//!
//! - [`Row`] - Expose struct fields to the table engine by dotted path
//! - [`Merge`] - Generate a partial "patch" type and shallow-merge logic
//!
//! Both macros emit paths into `::repodeck_table`, so the deriving crate
//! must depend on `repodeck-table` (which re-exports them).

mod merge;
mod row;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `repodeck_table::Row` for a struct with named fields.
///
/// Every field is exposed under its own name and converted with
/// `repodeck_table::AsValue`. Field names are also generated as
/// SCREAMING_SNAKE_CASE constants on the struct, so sort keys and filter
/// paths can be written as `Repo::STARS` instead of string literals.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `nested` | Field is itself a `Row`; `a.b` paths are delegated to it |
/// | `skip` | Field is not reachable by path |
/// | `rename = "x"` | Path segment to use instead of the field name |
///
/// # Example
///
/// ```ignore
/// use repodeck_table::Row;
///
/// #[derive(Row)]
/// struct Owner {
///     login: String,
/// }
///
/// #[derive(Row)]
/// struct Repository {
///     full_name: String,
///     #[row(rename = "stargazers_count")]
///     stars: u64,
///     #[row(nested)]
///     owner: Owner,
///     #[row(skip)]
///     topics: Vec<String>,
/// }
///
/// // Repository::FULL_NAME == "full_name"
/// // Repository::STARGAZERS_COUNT == "stargazers_count"
/// // repo.field("owner.login") -> Value::String(..)
/// ```
#[proc_macro_derive(Row, attributes(row))]
pub fn row_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    row::row_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derives `repodeck_table::Merge` for a struct with named fields.
///
/// Generates a `<Name>Patch` struct with the same visibility and generics,
/// where every field is wrapped in `Option`. The patch implements
/// `Default` (all fields absent) and has one chainable setter per field.
/// Merging a patch overwrites each present field wholesale.
///
/// # Example
///
/// ```ignore
/// use repodeck_table::{Merge, MergeState};
///
/// #[derive(Merge)]
/// struct Search {
///     input: String,
///     page: Option<usize>,
/// }
///
/// let patch = SearchPatch::default().input("rust".into()).page(None);
/// // patch.input == Some("rust"), patch.page == Some(None)
/// ```
#[proc_macro_derive(Merge)]
pub fn merge_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    merge::merge_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
