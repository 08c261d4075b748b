//! Prelude module for convenient imports.
//!
//! ```
//! use reqsmith_core::prelude::*;
//!
//! let factory = Factory::new(Method::Get, "https://api.example.com/");
//! ```

pub use crate::{
    Body, ContentType, EditScope, Error, Factory, KeyScope, Method, Mode, QuerySource, Request,
    Result, Store, to_json, to_xml,
};
