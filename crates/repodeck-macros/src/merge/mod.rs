//! Implementation of the `#[derive(Merge)]` macro.

mod derive;

pub use derive::merge_derive_impl;
