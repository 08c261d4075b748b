//! Procedural macros for the reqsmith HTTP request factory.
//!
//! This crate provides `#[derive(QuerySource)]`, the structural-metadata
//! replacement for reflective field scanning: it generates the walk over a
//! struct's tagged fields at compile time.

mod query_derive;

use proc_macro::TokenStream;

/// Derive the `QuerySource` trait for a struct.
///
/// Every field carrying a `#[query(name = "...")]` tag contributes its value
/// under that name; fields marked `#[query(flatten)]` must themselves
/// implement `QuerySource` and have their pairs spliced in at the field's
/// position. Untagged fields are ignored.
///
/// # Field Attributes
///
/// - `#[query(name = "x")]` - extract the field under key `x`; `Option<T>`
///   fields are skipped when `None`, `Vec<T>` fields yield one pair per
///   element, everything else contributes its `Display` form
/// - `#[query(flatten)]` - recurse into a nested `QuerySource` field
///
/// An empty name and combining `name` with `flatten` are rejected at
/// expansion time.
///
/// # Example
///
/// ```ignore
/// use reqsmith::QuerySource;
///
/// #[derive(QuerySource)]
/// struct Search {
///     #[query(name = "q")]
///     term: String,
///     #[query(name = "page")]
///     page: Option<u32>,
///     #[query(name = "tag")]
///     tags: Vec<String>,
///     #[query(flatten)]
///     window: Paging,
///     session_token: String, // untagged: never harvested
/// }
/// ```
#[proc_macro_derive(QuerySource, attributes(query))]
pub fn derive_query_source(input: TokenStream) -> TokenStream {
    query_derive::expand_query_source(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
