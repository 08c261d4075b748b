//! Entity encoding and body sources.

use std::fmt::Debug;
use std::io::{Cursor, Read, Result as IoResult};

use bytes::Bytes;

use crate::{Error, Result};

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// XML content type (`application/xml`).
    Xml,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
    /// Plain text content type (`text/plain`).
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

trait ReadDebug: Read + Debug + Send {}
impl<T: Read + Debug + Send> ReadDebug for T {}

/// Single-read byte source for a request body.
///
/// A bytes-backed body can be duplicated cheaply and reattached to any
/// number of assembled requests; a reader-backed body can be consumed only
/// once.
#[derive(Debug)]
pub struct Body(BodyInner);

#[derive(Debug)]
enum BodyInner {
    Bytes(Cursor<Bytes>),
    Reader(Box<dyn ReadDebug>),
}

impl Body {
    /// Creates a reader-backed body. The reader is consumed by the first
    /// request it is attached to.
    #[must_use]
    pub fn from_reader(reader: impl Read + Debug + Send + 'static) -> Self {
        Self(BodyInner::Reader(Box::new(reader)))
    }

    /// The underlying bytes, when the body is bytes-backed.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match &self.0 {
            BodyInner::Bytes(cursor) => Some(cursor.get_ref()),
            BodyInner::Reader(_) => None,
        }
    }

    /// Duplicates a bytes-backed body with a fresh read position.
    ///
    /// Returns `None` for reader-backed bodies, which cannot be duplicated.
    #[must_use]
    pub fn try_clone(&self) -> Option<Self> {
        self.as_bytes().cloned().map(Self::from)
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        match &mut self.0 {
            BodyInner::Bytes(cursor) => cursor.read(buf),
            BodyInner::Reader(reader) => reader.read(buf),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self(BodyInner::Bytes(Cursor::new(bytes)))
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes::from(bytes).into()
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Bytes::from(text.into_bytes()).into()
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Bytes::from_static(text.as_bytes()).into()
    }
}

impl From<&'static [u8]> for Body {
    fn from(bytes: &'static [u8]) -> Self {
        Bytes::from_static(bytes).into()
    }
}

/// Serialize a value to JSON bytes.
///
/// The value must serialize as a structured document; scalars and sequences
/// are rejected with [`Error::InvalidSource`].
///
/// # Errors
///
/// Returns an error if the value is not structured or serialization fails.
///
/// # Example
///
/// ```
/// use reqsmith_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    ensure_structured(value)?;
    serde_json::to_vec(value).map(Bytes::from).map_err(Into::into)
}

/// Serialize a value to XML bytes, rooted at the value's type name.
///
/// The value must serialize as a structured document; scalars and sequences
/// are rejected with [`Error::InvalidSource`].
///
/// # Errors
///
/// Returns an error if the value is not structured or serialization fails.
///
/// # Example
///
/// ```
/// use reqsmith_core::to_xml;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_xml(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), b"<User><name>Alice</name></User>");
/// ```
pub fn to_xml<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    ensure_structured(value)?;
    quick_xml::se::to_string(value)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}

/// Rejects values that do not serialize to a structured document.
fn ensure_structured<T: serde::Serialize>(value: &T) -> Result<()> {
    let value = serde_json::to_value(value)
        .map_err(|e| Error::invalid_source(format!("entity is not serializable: {e}")))?;
    if value.is_object() {
        Ok(())
    } else {
        Err(Error::invalid_source(format!(
            "expected a struct-like entity, got {}",
            value_kind(&value)
        )))
    }
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "sequence",
        serde_json::Value::Object(_) => "object",
    }
}
