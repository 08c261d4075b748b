//! Fluent HTTP request factory for Rust.
//!
//! A [`Factory`] accumulates method, base address, headers, query
//! parameters, and a body source through chained calls, then assembles an
//! immutable [`Request`] for a transport to execute. Header and query
//! mutations run under explicit operation scopes (append, replace, delete,
//! remove-by-pattern), and `#[derive(QuerySource)]` harvests tagged struct
//! fields into query parameters.
//!
//! # Example
//!
//! ```
//! use reqsmith::{Factory, Method, QuerySource};
//!
//! #[derive(QuerySource)]
//! struct Search {
//!     #[query(name = "q")]
//!     term: String,
//!     #[query(name = "page")]
//!     page: Option<u32>,
//! }
//!
//! let search = Search {
//!     term: "rust".to_string(),
//!     page: Some(2),
//! };
//!
//! let request = Factory::new(Method::Get, "https://api.example.com/search")
//!     .query_parameters_from(&search)
//!     .set()
//!     .header("Accept", ["application/json"])
//!     .done()
//!     .make()
//!     .expect("valid request");
//!
//! assert_eq!(
//!     request.url().as_str(),
//!     "https://api.example.com/search?page=2&q=rust"
//! );
//! ```

pub mod prelude;

// Re-export core types
pub use reqsmith_core::{
    Body, ContentType, EditScope, Error, Factory, KeyCase, KeyScope, Method, Mode, Request,
    Result, Store, canonical_header_name, to_json, to_xml,
};

// Re-export the trait and its derive under one name, serde-style
pub use reqsmith_core::QuerySource;
pub use reqsmith_macro::QuerySource;
