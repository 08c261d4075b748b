//! Error types for reqsmith.

use derive_more::{Display, Error, From};

/// Main error type for factory operations.
///
/// Every variant is recoverable: operations return errors to their caller,
/// nothing aborts the process. Failures raised by mutation calls in a fluent
/// chain (an invalid remove pattern, an unresolvable path reference) are
/// captured on the factory and returned by the next assembly.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Malformed base address or path reference.
    #[display("invalid address: {_0}")]
    #[from]
    AddressParse(url::ParseError),

    /// Invalid regular expression given to a remove-matching operation.
    #[display("invalid key pattern: {_0}")]
    #[from]
    Pattern(regex::Error),

    /// Entity that does not serialize to a structured document.
    #[display("unsupported entity: {_0}")]
    #[from(skip)]
    InvalidSource(#[error(not(source))] String),

    /// JSON serialization failure.
    #[display("JSON encoding error: {_0}")]
    #[from]
    JsonEncoding(serde_json::Error),

    /// XML serialization failure.
    #[display("XML encoding error: {_0}")]
    #[from]
    XmlEncoding(quick_xml::DeError),

    /// HTTP method that could not be parsed or converted.
    #[display("unsupported HTTP method: {_0}")]
    #[from(skip)]
    UnsupportedMethod(#[error(not(source))] String),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid-source error.
    #[must_use]
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource(message.into())
    }

    /// Create an unsupported-method error.
    #[must_use]
    pub fn unsupported_method(message: impl Into<String>) -> Self {
        Self::UnsupportedMethod(message.into())
    }

    /// Returns `true` if this is an address parse error.
    #[must_use]
    pub const fn is_address(&self) -> bool {
        matches!(self, Self::AddressParse(_))
    }

    /// Returns `true` if this is a key pattern error.
    #[must_use]
    pub const fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }

    /// Returns `true` if this is a codec failure.
    #[must_use]
    pub const fn is_encoding(&self) -> bool {
        matches!(self, Self::JsonEncoding(_) | Self::XmlEncoding(_))
    }

    /// Returns `true` if this is an invalid-source error.
    #[must_use]
    pub const fn is_invalid_source(&self) -> bool {
        matches!(self, Self::InvalidSource(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::invalid_source("expected a struct-like entity, got number");
        assert_eq!(
            err.to_string(),
            "unsupported entity: expected a struct-like entity, got number"
        );

        let err = Error::unsupported_method("BREW");
        assert_eq!(err.to_string(), "unsupported HTTP method: BREW");

        let err = Error::from("http//no-scheme".parse::<url::Url>().expect_err("bad url"));
        assert!(err.to_string().starts_with("invalid address:"));
    }

    #[test]
    fn error_predicates() {
        let err = Error::from(regex::Regex::new("[").expect_err("bad pattern"));
        assert!(err.is_pattern());
        assert!(!err.is_address());
        assert!(!err.is_encoding());

        let err = Error::invalid_source("array");
        assert!(err.is_invalid_source());
        assert!(!err.is_pattern());
    }

    #[test]
    fn json_error_is_encoding() {
        let json_err =
            serde_json::from_str::<serde_json::Value>("not json").expect_err("should fail");
        let err = Error::from(json_err);
        assert!(err.is_encoding());
    }
}
