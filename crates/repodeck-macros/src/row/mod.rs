//! Implementation of the `#[derive(Row)]` macro.
//!
//! Generates path-based field access for the table engine, plus field
//! name constants, from struct definitions.

mod attrs;
mod derive;

pub use derive::row_derive_impl;
