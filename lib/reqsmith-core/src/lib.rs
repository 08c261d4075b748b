//! Core types for the reqsmith HTTP request factory.
//!
//! This crate provides the foundational types used by reqsmith:
//! - [`Factory`] - fluent request factory with operation scopes
//! - [`EditScope`] and [`KeyScope`] - value-writing and key-dropping scopes
//! - [`Store`] and [`Mode`] - ordered multimap storage and its operations
//! - [`Request`] - the immutable assembled request descriptor
//! - [`Body`] and [`ContentType`] - body sources and entity encoding
//! - [`Error`] and [`Result`] - error handling
//! - [`Method`] - HTTP method enum with `http` crate conversions
//! - [`QuerySource`] - trait for harvesting tagged fields into query
//!   parameters

mod assemble;
mod entity;
mod error;
mod factory;
mod method;
pub mod prelude;
mod request;
mod store;

pub use entity::{Body, ContentType, to_json, to_xml};
pub use error::{Error, Result};
pub use factory::{EditScope, Factory, KeyScope};
pub use method::Method;
pub use request::Request;
pub use store::{KeyCase, Mode, Store, canonical_header_name};

/// Trait for types whose tagged fields can be harvested into query
/// parameter pairs.
///
/// This is automatically implemented by the `#[derive(QuerySource)]` macro,
/// which extracts every field carrying a `#[query(name = "...")]` tag and
/// recurses into fields marked `#[query(flatten)]`, concatenating values in
/// traversal order when tags collide.
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
///     #[query(flatten)]
///     window: Paging,
/// }
/// ```
pub trait QuerySource {
    /// The (key, value) pairs of every tagged field, in traversal order.
    fn query_pairs(&self) -> Vec<(String, String)>;
}

impl<T: QuerySource + ?Sized> QuerySource for &T {
    fn query_pairs(&self) -> Vec<(String, String)> {
        (**self).query_pairs()
    }
}
