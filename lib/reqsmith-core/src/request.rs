//! The immutable outgoing request descriptor.

use url::Url;

use crate::{Body, Method, Store};

/// An assembled HTTP request: method, fully merged URL, headers, and an
/// optional body source.
///
/// Produced by [`Factory::make`](crate::Factory::make) and the terminal
/// verbs; consumed by a transport. The descriptor carries no mutation
/// surface beyond extracting the body.
#[derive(Debug)]
pub struct Request {
    method: Method,
    url: Url,
    headers: Store,
    body: Option<Body>,
}

impl Request {
    pub(crate) fn new(method: Method, url: Url, headers: Store, body: Option<Body>) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL with the merged query string.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers, in insertion order with canonical names.
    #[must_use]
    pub const fn headers(&self) -> &Store {
        &self.headers
    }

    /// First value of the named header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.first(name)
    }

    /// Request body source.
    #[must_use]
    pub const fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Extracts the body source, leaving `None` behind.
    #[must_use]
    pub fn take_body(&mut self) -> Option<Body> {
        self.body.take()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, Store, Option<Body>) {
        (self.method, self.url, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accessors() {
        let url = Url::parse("https://api.example.com/users?page=1").expect("valid URL");
        let mut headers = Store::case_insensitive();
        headers.add("accept", ["application/json"]);

        let mut request = Request::new(Method::Get, url, headers, Some(Body::from("x")));
        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url().path(), "/users");
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert!(request.body().is_some());

        let body = request.take_body().expect("body");
        assert_eq!(body.as_bytes().map(AsRef::as_ref), Some(b"x".as_slice()));
        assert!(request.body().is_none());
    }

    #[test]
    fn request_into_parts() {
        let url = Url::parse("https://api.example.com/").expect("valid URL");
        let request = Request::new(Method::Head, url.clone(), Store::case_insensitive(), None);
        let (method, parts_url, headers, body) = request.into_parts();
        assert_eq!(method, Method::Head);
        assert_eq!(parts_url, url);
        assert!(headers.is_empty());
        assert!(body.is_none());
    }
}
