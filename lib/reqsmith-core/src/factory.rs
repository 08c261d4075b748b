//! The fluent request factory.
//!
//! A [`Factory`] accumulates method, base address, headers, query parameters,
//! and a body source through chained calls, then assembles an immutable
//! [`Request`]. Header and query mutations run under an operation scope:
//! [`Factory::add`] and [`Factory::set`] hand out an [`EditScope`] that
//! appends or replaces values, [`Factory::del`] and [`Factory::remove`] hand
//! out a [`KeyScope`] that drops keys literally or by pattern. A scope's
//! behavior applies only to calls made on that scope; calling `header` or
//! `query_parameter` on the factory itself appends.
//!
//! # Example
//!
//! ```
//! use reqsmith_core::{Factory, Method};
//!
//! let request = Factory::new(Method::Get, "https://api.example.com/search")
//!     .add()
//!     .query_parameter("tag", ["rust", "http"])
//!     .done()
//!     .set()
//!     .header("Accept", ["application/json"])
//!     .done()
//!     .make()
//!     .expect("valid request");
//!
//! assert_eq!(
//!     request.url().as_str(),
//!     "https://api.example.com/search?tag=rust&tag=http"
//! );
//! ```

use tracing::warn;
use url::Url;

use crate::assemble::assemble;
use crate::{Body, ContentType, Error, Method, Mode, QuerySource, Request, Result, Store};

/// Fluent builder for outgoing HTTP requests.
///
/// The factory stays usable after assembly: [`Factory::make`] copies the
/// accumulated state into the request, so a factory can be mutated further
/// and re-assembled. The one exception is a reader-backed body, which is
/// single-read and rides only the first request that assembles it.
#[derive(Debug)]
pub struct Factory {
    method: Method,
    base: String,
    headers: Store,
    params: Store,
    body: Option<Body>,
    deferred: Option<Error>,
}

impl Factory {
    /// Creates a factory for the given method and base address.
    ///
    /// The address stays opaque until assembly; a malformed address is
    /// reported by [`Factory::make`], not here.
    #[must_use]
    pub fn new(method: Method, base: impl Into<String>) -> Self {
        Self {
            method,
            base: base.into(),
            headers: Store::case_insensitive(),
            params: Store::case_sensitive(),
            body: None,
            deferred: None,
        }
    }

    /// Creates an independent copy of this factory.
    ///
    /// The child gets its own header and parameter stores; mutating one
    /// factory never affects the other. A bytes-backed body is duplicated;
    /// a reader-backed body is single-read and is not carried into the
    /// child. The child starts with no deferred error. Override the copied
    /// method or address with [`Factory::method`] and [`Factory::base`].
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            method: self.method,
            base: self.base.clone(),
            headers: self.headers.clone(),
            params: self.params.clone(),
            body: self.body.as_ref().and_then(Body::try_clone),
            deferred: None,
        }
    }

    /// Sets the base address, replacing the current one.
    ///
    /// End the address with a trailing slash if it is meant to be extended
    /// with [`Factory::path`].
    #[must_use]
    pub fn base(mut self, address: impl Into<String>) -> Self {
        self.base = address.into();
        self
    }

    /// Resolves `reference` against the current base address and makes the
    /// result the new base.
    ///
    /// Standard reference resolution applies: absolute paths replace the
    /// base path, relative paths resolve against it. When either side fails
    /// to parse the base is left unchanged and the error surfaces at the
    /// next [`Factory::make`].
    #[must_use]
    pub fn path(mut self, reference: &str) -> Self {
        match Url::parse(&self.base).and_then(|base| base.join(reference)) {
            Ok(resolved) => self.base = resolved.into(),
            Err(e) => {
                warn!(reference, error = %e, "path reference did not resolve");
                self.defer(e.into());
            }
        }
        self
    }

    /// Sets the request method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Replaces the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.headers.replace("User-Agent", [agent.into()]);
        self
    }

    /// Replaces the `Content-Type` header.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.headers.replace("Content-Type", [content_type.into()]);
        self
    }

    /// Opens a scope that appends values to existing keys.
    #[must_use]
    pub fn add(self) -> EditScope {
        EditScope {
            factory: self,
            mode: Mode::Append,
        }
    }

    /// Opens a scope that replaces the values of the keys it touches.
    #[must_use]
    pub fn set(self) -> EditScope {
        EditScope {
            factory: self,
            mode: Mode::Replace,
        }
    }

    /// Opens a scope that deletes the keys it names.
    #[must_use]
    pub fn del(self) -> KeyScope {
        KeyScope {
            factory: self,
            mode: Mode::Delete,
        }
    }

    /// Opens a scope that deletes every key matching the patterns it names.
    ///
    /// An invalid pattern leaves the store unchanged and surfaces as a
    /// pattern error at the next [`Factory::make`].
    #[must_use]
    pub fn remove(self) -> KeyScope {
        KeyScope {
            factory: self,
            mode: Mode::RemoveMatching,
        }
    }

    /// Appends header values. Shorthand for `add().header(..).done()`.
    #[must_use]
    pub fn header(
        mut self,
        key: &str,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.headers.add(key, values);
        self
    }

    /// Appends query parameter values. Shorthand for
    /// `add().query_parameter(..).done()`.
    #[must_use]
    pub fn query_parameter(
        mut self,
        key: &str,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.params.add(key, values);
        self
    }

    /// Harvests the source's tagged fields into the query parameters,
    /// appending to existing values.
    #[must_use]
    pub fn query_parameters_from(mut self, source: &impl QuerySource) -> Self {
        for (key, value) in source.query_pairs() {
            self.params.add(&key, [value]);
        }
        self
    }

    /// Appends ready-made key/value pairs to the query parameters without
    /// any tag walking.
    #[must_use]
    pub fn query_parameters_from_pairs(
        mut self,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        for (key, value) in pairs {
            self.params.add(&key, [value]);
        }
        self
    }

    /// Attaches the request body source.
    ///
    /// A bytes-backed body is reattached to every assembled request; a
    /// reader-backed body is single-read and rides only the first one.
    #[must_use]
    pub fn with_entity(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Encodes `entity` as JSON and returns the bytes.
    ///
    /// On success, sets `Content-Type: application/json` unless a content
    /// type is already present. On failure nothing is produced and no
    /// header changes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSource`] for entities that do not serialize
    /// to a structured document and [`Error::JsonEncoding`] on codec
    /// failure.
    pub fn json_entity<T: serde::Serialize>(&mut self, entity: &T) -> Result<bytes::Bytes> {
        let bytes = crate::to_json(entity)?;
        self.default_content_type(ContentType::Json);
        Ok(bytes)
    }

    /// Encodes `entity` as XML and returns the bytes.
    ///
    /// On success, sets `Content-Type: application/xml` unless a content
    /// type is already present. On failure nothing is produced and no
    /// header changes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSource`] for entities that do not serialize
    /// to a structured document and [`Error::XmlEncoding`] on codec
    /// failure.
    pub fn xml_entity<T: serde::Serialize>(&mut self, entity: &T) -> Result<bytes::Bytes> {
        let bytes = crate::to_xml(entity)?;
        self.default_content_type(ContentType::Xml);
        Ok(bytes)
    }

    fn default_content_type(&mut self, content_type: ContentType) {
        if self.headers.first("Content-Type").is_none() {
            self.headers.replace("Content-Type", [content_type.as_str()]);
        }
    }

    /// Current request method.
    #[must_use]
    pub const fn current_method(&self) -> Method {
        self.method
    }

    /// Current base address, as configured.
    #[must_use]
    pub fn base_address(&self) -> &str {
        &self.base
    }

    /// Accumulated headers.
    #[must_use]
    pub const fn headers(&self) -> &Store {
        &self.headers
    }

    /// Accumulated query parameters.
    #[must_use]
    pub const fn query_params(&self) -> &Store {
        &self.params
    }

    fn defer(&mut self, error: Error) {
        if self.deferred.is_none() {
            self.deferred = Some(error);
        }
    }

    /// Assembles the accumulated state into an immutable [`Request`].
    ///
    /// A deferred error from an earlier mutation call is returned (and
    /// consumed) before anything else; otherwise the base address is
    /// parsed, the accumulated query parameters merge into its query
    /// component, and the request is built. Either a fully merged request
    /// or an error is produced, never both.
    pub fn make(&mut self) -> Result<Request> {
        if let Some(error) = self.deferred.take() {
            return Err(error);
        }
        let body = match &self.body {
            None => None,
            Some(body) => match body.try_clone() {
                Some(copy) => Some(copy),
                None => self.body.take(),
            },
        };
        assemble(self.method, &self.base, &self.headers, &self.params, body)
    }

    /// Sets the method to GET and assembles.
    pub fn get(&mut self) -> Result<Request> {
        self.method = Method::Get;
        self.make()
    }

    /// Sets the method to POST and assembles.
    pub fn post(&mut self) -> Result<Request> {
        self.method = Method::Post;
        self.make()
    }

    /// Sets the method to PUT and assembles.
    pub fn put(&mut self) -> Result<Request> {
        self.method = Method::Put;
        self.make()
    }

    /// Sets the method to PATCH and assembles.
    pub fn patch(&mut self) -> Result<Request> {
        self.method = Method::Patch;
        self.make()
    }

    /// Sets the method to DELETE and assembles.
    pub fn delete(&mut self) -> Result<Request> {
        self.method = Method::Delete;
        self.make()
    }

    /// Sets the method to HEAD and assembles.
    pub fn head(&mut self) -> Result<Request> {
        self.method = Method::Head;
        self.make()
    }

    /// Sets the method to TRACE and assembles.
    pub fn trace(&mut self) -> Result<Request> {
        self.method = Method::Trace;
        self.make()
    }

    /// Sets the method to OPTIONS and assembles.
    pub fn options(&mut self) -> Result<Request> {
        self.method = Method::Options;
        self.make()
    }

    /// Sets the method to CONNECT and assembles.
    pub fn connect(&mut self) -> Result<Request> {
        self.method = Method::Connect;
        self.make()
    }
}

/// Value-writing operation scope handed out by [`Factory::add`] and
/// [`Factory::set`].
///
/// Every `header`/`query_parameter` call on the scope applies its mode;
/// [`EditScope::done`] returns the factory. The mode travels with this
/// value and cannot leak into later calls on the factory.
#[derive(Debug)]
pub struct EditScope {
    factory: Factory,
    mode: Mode,
}

impl EditScope {
    /// Applies the scope's mode to the named header.
    #[must_use]
    pub fn header(
        mut self,
        key: &str,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        // Append and Replace cannot fail.
        let _ = self.factory.headers.apply(self.mode, key, values);
        self
    }

    /// Applies the scope's mode to the named query parameter.
    #[must_use]
    pub fn query_parameter(
        mut self,
        key: &str,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        let _ = self.factory.params.apply(self.mode, key, values);
        self
    }

    /// Closes the scope, returning the factory.
    #[must_use]
    pub fn done(self) -> Factory {
        self.factory
    }
}

/// Key-dropping operation scope handed out by [`Factory::del`] and
/// [`Factory::remove`].
///
/// Calls name keys (or key patterns) only; there are no values to give.
#[derive(Debug)]
pub struct KeyScope {
    factory: Factory,
    mode: Mode,
}

impl KeyScope {
    /// Applies the scope's mode to the named header key or pattern.
    #[must_use]
    pub fn header(mut self, key: &str) -> Self {
        if let Err(e) = self.factory.headers.apply(self.mode, key, Vec::new()) {
            self.factory.defer(e);
        }
        self
    }

    /// Applies the scope's mode to the named query parameter key or pattern.
    #[must_use]
    pub fn query_parameter(mut self, key: &str) -> Self {
        if let Err(e) = self.factory.params.apply(self.mode, key, Vec::new()) {
            self.factory.defer(e);
        }
        self
    }

    /// Closes the scope, returning the factory.
    #[must_use]
    pub fn done(self) -> Factory {
        self.factory
    }
}
