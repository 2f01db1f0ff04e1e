//! Headers whose value is a URI reference.
//!
//! `Location`, `Content-Location` and `Referer` share one behavior, captured by the
//! [`LocationHeader`] trait:
//!
//! - parse from a raw `Name: value` line, tolerating a missing space after the colon
//! - validate the field name case-insensitively
//! - hold the value as a [`UriValue`], raw text until someone asks for the parsed form
//! - serialize back to `Name: value`
//!
//! # Lazy validation
//!
//! RFC 1945 requires `Location` to be absolute, but real senders emit relative
//! references all the time. Parsing a line therefore stores the trimmed text as-is.
//! Strict validation only happens when [`LocationHeader::uri`] is called (or when a
//! value is set through [`LocationHeader::set_uri`]), and the parsed form then replaces
//! the raw text.
//!
//! # Concurrency
//!
//! The raw to parsed promotion mutates the header, so [`LocationHeader::uri`] takes
//! `&mut self`. Callers sharing a header across threads must hold it behind a lock;
//! shared readers use [`LocationHeader::uri_string`], which never parses.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use http::{HeaderName, HeaderValue};
use tracing::trace;

use crate::error::HeaderError;
use crate::uri::HttpUri;
use crate::ensure;

/// Maximum size in bytes allowed for a single header line
pub const MAX_LINE_BYTES: usize = 8 * 1024;

/// The value slot of a URI-valued header.
///
/// A value is either still the raw text received on the wire or a parsed [`HttpUri`].
/// The only transition is `Raw -> Parsed`, performed by [`UriValue::coerce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriValue {
    Raw(String),
    Parsed(HttpUri),
}

impl Default for UriValue {
    /// An unset value is the empty raw string, which coerces to the empty URI reference.
    fn default() -> Self {
        Self::Raw(String::new())
    }
}

impl UriValue {
    /// Returns the wire-format text without parsing.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Raw(raw) => raw,
            Self::Parsed(uri) => uri.as_str(),
        }
    }

    #[inline]
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// Returns the parsed form if the value was already coerced.
    pub fn as_uri(&self) -> Option<&HttpUri> {
        match self {
            Self::Raw(_) => None,
            Self::Parsed(uri) => Some(uri),
        }
    }

    /// Promotes a raw value to its parsed form and returns it.
    ///
    /// Idempotent: a value that is already parsed is returned as-is. On failure the raw
    /// text stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::InvalidHeaderValue`] if the raw text is not an HTTP-family
    /// URI reference.
    pub fn coerce(&mut self) -> Result<&HttpUri, HeaderError> {
        match self {
            Self::Parsed(uri) => Ok(uri),
            Self::Raw(raw) => {
                let uri = HttpUri::parse(raw).map_err(|source| HeaderError::invalid_header_value(&*raw, source))?;
                *self = Self::Parsed(uri);
                // now parsed, so this returns from the arm above
                self.coerce()
            }
        }
    }
}

impl fmt::Display for UriValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything [`LocationHeader::set_uri`] accepts.
///
/// `Bytes` covers values handed over from a header collection. They are only usable if
/// they hold UTF-8 text; any other payload is neither a string nor a URI and is
/// rejected with [`HeaderError::InvalidArgumentType`].
#[derive(Debug, Clone)]
pub enum UriSource {
    Text(String),
    Uri(HttpUri),
    Bytes(Bytes),
}

impl From<&str> for UriSource {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for UriSource {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<HttpUri> for UriSource {
    fn from(value: HttpUri) -> Self {
        Self::Uri(value)
    }
}

impl From<&HttpUri> for UriSource {
    fn from(value: &HttpUri) -> Self {
        Self::Uri(value.clone())
    }
}

impl From<Bytes> for UriSource {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<&HeaderValue> for UriSource {
    fn from(value: &HeaderValue) -> Self {
        Self::Bytes(Bytes::copy_from_slice(value.as_bytes()))
    }
}

fn parse_text(text: &str) -> Result<HttpUri, HeaderError> {
    HttpUri::parse(text).map_err(|source| HeaderError::invalid_header_value(text, source))
}

/// The contract shared by every URI-valued header.
///
/// Implementors only provide the field name and access to their [`UriValue`]; every
/// operation is a provided method, so all variants behave identically and can be used
/// interchangeably by a header factory.
pub trait LocationHeader: Sized {
    /// The canonical field name, used for validation and serialization.
    const FIELD_NAME: &'static str;

    /// The same field name as an `http` header name.
    const HEADER_NAME: HeaderName;

    /// Wraps an existing value without validating it.
    fn from_value(value: UriValue) -> Self;

    fn value(&self) -> &UriValue;

    fn value_mut(&mut self) -> &mut UriValue;

    fn field_name(&self) -> &'static str {
        Self::FIELD_NAME
    }

    /// Parses a header from a raw `Name: value` line.
    ///
    /// The line is split at the first `:` only, so values such as `http://h:8080/p`
    /// survive intact. The value is trimmed and stored raw, it is not parsed as a URI.
    ///
    /// # Errors
    ///
    /// - [`HeaderError::TooLargeLine`] if the line exceeds [`MAX_LINE_BYTES`]
    /// - [`HeaderError::MalformedLine`] if the line has no `:`
    /// - [`HeaderError::HeaderMismatch`] if the field name is not [`Self::FIELD_NAME`]
    fn parse_from_line(line: &str) -> Result<Self, HeaderError> {
        ensure!(line.len() <= MAX_LINE_BYTES, HeaderError::too_large_line(line.len(), MAX_LINE_BYTES));

        // IIS omits the space after the colon, trimming the value handles both forms
        let (name, value) = line.split_once(':').ok_or(HeaderError::MalformedLine)?;
        ensure!(name.eq_ignore_ascii_case(Self::FIELD_NAME), HeaderError::header_mismatch(Self::FIELD_NAME, name));

        Ok(Self::from_value(UriValue::Raw(value.trim().to_owned())))
    }

    /// Replaces the value, validating text input as an HTTP-family URI reference.
    ///
    /// Returns the header itself so calls can be chained. On error the previous value
    /// is left untouched.
    ///
    /// # Errors
    ///
    /// - [`HeaderError::InvalidHeaderValue`] if text input is not a URI reference
    /// - [`HeaderError::InvalidArgumentType`] if byte input is not text
    fn set_uri<S: Into<UriSource>>(&mut self, source: S) -> Result<&mut Self, HeaderError> {
        let uri = match source.into() {
            UriSource::Text(text) => parse_text(&text)?,
            UriSource::Uri(uri) => uri,
            UriSource::Bytes(bytes) => {
                let text = std::str::from_utf8(&bytes)
                    .map_err(|e| HeaderError::invalid_argument_type(format!("uri must be a string or an HttpUri, got bytes: {e}")))?;
                parse_text(text)?
            }
        };

        *self.value_mut() = UriValue::Parsed(uri);
        Ok(self)
    }

    /// Returns the value as wire-format text. Never parses.
    fn uri_string(&self) -> &str {
        self.value().as_str()
    }

    /// Returns the value as a parsed URI, parsing and memoizing a raw value first.
    ///
    /// This is the strict validation entry point. An unset header yields the empty
    /// URI reference.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::InvalidHeaderValue`] if the stored raw text is not a URI
    /// reference; the raw text is kept.
    fn uri(&mut self) -> Result<&HttpUri, HeaderError> {
        let value = self.value_mut();
        if !value.is_parsed() {
            trace!(field_name = Self::FIELD_NAME, raw = value.as_str(), "coercing raw uri value");
        }
        value.coerce()
    }

    /// Alias of [`LocationHeader::uri_string`] for header serializers.
    fn field_value(&self) -> &str {
        self.uri_string()
    }

    /// Renders the header as `Name: value`, the inverse of [`LocationHeader::parse_from_line`].
    fn to_line(&self) -> String {
        format!("{}: {}", Self::FIELD_NAME, self.uri_string())
    }
}

macro_rules! location_header {
    ($(#[$meta:meta])* $name:ident, $field_name:literal, $header_name:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name(UriValue);

        impl $name {
            /// Creates the header from a string or a parsed URI.
            ///
            /// # Errors
            ///
            /// Fails like [`LocationHeader::set_uri`].
            pub fn new<S: Into<UriSource>>(uri: S) -> Result<Self, HeaderError> {
                let mut header = Self::default();
                header.set_uri(uri)?;
                Ok(header)
            }
        }

        impl LocationHeader for $name {
            const FIELD_NAME: &'static str = $field_name;
            const HEADER_NAME: HeaderName = $header_name;

            #[inline]
            fn from_value(value: UriValue) -> Self {
                Self(value)
            }

            #[inline]
            fn value(&self) -> &UriValue {
                &self.0
            }

            #[inline]
            fn value_mut(&mut self) -> &mut UriValue {
                &mut self.0
            }
        }

        impl FromStr for $name {
            type Err = HeaderError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_from_line(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}: {}", Self::FIELD_NAME, self.uri_string())
            }
        }
    };
}

location_header! {
    /// `Location` header, defined in
    /// [RFC7231](https://datatracker.ietf.org/doc/html/rfc7231#section-7.1.2)
    ///
    /// Refers to a specific resource in relation to the response.
    ///
    /// ```text
    /// Location = URI-reference
    /// ```
    Location, "Location", http::header::LOCATION
}

location_header! {
    /// `Content-Location` header, defined in
    /// [RFC7231](https://datatracker.ietf.org/doc/html/rfc7231#section-3.1.4.2)
    ///
    /// ```text
    /// Content-Location = absolute-URI / partial-URI
    /// ```
    ContentLocation, "Content-Location", http::header::CONTENT_LOCATION
}

location_header! {
    /// `Referer` header, defined in
    /// [RFC7231](https://datatracker.ietf.org/doc/html/rfc7231#section-5.5.2)
    ///
    /// The field name is misspelled in the RFC and kept that way on the wire.
    ///
    /// ```text
    /// Referer = absolute-URI / partial-URI
    /// ```
    Referer, "Referer", http::header::REFERER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UriError;

    #[test]
    fn parse_location_line() {
        let header = Location::parse_from_line("Location: http://www.example.net/index.html").unwrap();

        assert_eq!(header.value(), &UriValue::Raw("http://www.example.net/index.html".to_string()));
        assert_eq!(header.to_line(), "Location: http://www.example.net/index.html");
    }

    #[test]
    fn parse_keeps_value_raw() {
        let header = Location::parse_from_line("Location: not a uri at all").unwrap();

        assert!(!header.value().is_parsed());
        assert_eq!(header.uri_string(), "not a uri at all");
    }

    #[test]
    fn parse_trims_value() {
        let header = ContentLocation::parse_from_line("content-location: \t/docs/a.html  ").unwrap();
        assert_eq!(header.uri_string(), "/docs/a.html");
    }

    #[test]
    fn parse_rejects_name_with_trailing_space() {
        let error = Location::parse_from_line("Location : /x").unwrap_err();
        assert!(matches!(error, HeaderError::HeaderMismatch { expected: "Location", ref actual } if actual == "Location "));
    }

    #[test]
    fn parse_rejects_line_without_colon() {
        assert!(matches!(Referer::parse_from_line("Referer /x").unwrap_err(), HeaderError::MalformedLine));
    }

    #[test]
    fn parse_rejects_oversized_line() {
        let line = format!("Location: /{}", "a".repeat(MAX_LINE_BYTES));

        let error = Location::parse_from_line(&line).unwrap_err();
        assert!(matches!(error, HeaderError::TooLargeLine { max_size: MAX_LINE_BYTES, .. }));
    }

    #[test]
    fn variants_validate_their_own_name() {
        assert!(Referer::parse_from_line("Referer: /from").is_ok());
        assert!(ContentLocation::parse_from_line("Content-Location: /from").is_ok());
        assert!(matches!(Referer::parse_from_line("Location: /from").unwrap_err(), HeaderError::HeaderMismatch { expected: "Referer", .. }));
        assert!(matches!(
            ContentLocation::parse_from_line("Location: /from").unwrap_err(),
            HeaderError::HeaderMismatch { expected: "Content-Location", .. }
        ));
    }

    #[test]
    fn set_uri_chains() {
        let mut header = Location::default();
        let line = header.set_uri("/first").unwrap().set_uri("/second").unwrap().to_line();

        assert_eq!(line, "Location: /second");
        assert!(header.value().is_parsed());
    }

    #[test]
    fn set_uri_accepts_parsed_uri() {
        let uri = HttpUri::parse("https://example.com/a?b#c").unwrap();
        let mut header = Referer::default();
        header.set_uri(&uri).unwrap();

        assert_eq!(header.value().as_uri(), Some(&uri));
        assert_eq!(header.field_value(), "https://example.com/a?b#c");
    }

    #[test]
    fn set_uri_rejects_foreign_scheme() {
        let error = Location::new("ftp://example.com/file").unwrap_err();

        match error {
            HeaderError::InvalidHeaderValue { value, source } => {
                assert_eq!(value, "ftp://example.com/file");
                assert!(matches!(source, UriError::UnsupportedScheme { .. }));
            }
            e => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn set_uri_bytes() {
        let mut header = Location::default();
        header.set_uri(Bytes::from_static(b"/from/bytes")).unwrap();
        assert_eq!(header.uri_string(), "/from/bytes");

        let error = header.set_uri(Bytes::from_static(b"/\xff\xfe")).unwrap_err();
        assert!(matches!(error, HeaderError::InvalidArgumentType { .. }));
        assert_eq!(header.uri_string(), "/from/bytes");
    }

    #[test]
    fn set_uri_header_value() {
        let value = HeaderValue::from_static("http://example.com/from-map");
        let header = ContentLocation::new(&value).unwrap();
        assert_eq!(header.uri_string(), "http://example.com/from-map");
    }

    #[test]
    fn coerce_promotes_raw_value_once() {
        let mut value = UriValue::Raw("http://example.com/a".to_string());

        let first = value.coerce().unwrap().clone();
        assert_eq!(value, UriValue::Parsed(first.clone()));

        assert_eq!(value.coerce().unwrap(), &first);
        assert_eq!(value.as_str(), "http://example.com/a");
    }

    #[test]
    fn coerce_failure_leaves_raw_value() {
        let mut value = UriValue::Raw("mailto:someone@example.com".to_string());

        let error = value.coerce().unwrap_err();
        assert!(matches!(error, HeaderError::InvalidHeaderValue { source: UriError::UnsupportedScheme { .. }, .. }));
        assert_eq!(value, UriValue::Raw("mailto:someone@example.com".to_string()));
    }

    #[test]
    fn http_uri_without_host_is_accepted() {
        let mut header = Location::default();
        header.set_uri("http:/no-host").unwrap();
        assert_eq!(header.uri_string(), "http:/no-host");

        let mut header = Location::parse_from_line("Location: http:relative").unwrap();
        let uri = header.uri().unwrap();
        assert_eq!(uri.scheme(), Some("http"));
        assert!(!uri.has_host());
    }

    #[test]
    fn uri_memoizes() {
        let mut header = Location::parse_from_line("Location:/x?y=1").unwrap();
        assert!(!header.value().is_parsed());

        assert_eq!(header.uri().unwrap().query(), Some("y=1"));
        assert!(header.value().is_parsed());
        assert_eq!(header.uri_string(), "/x?y=1");
    }

    #[test]
    fn uri_failure_keeps_raw_value() {
        let mut header = Location::parse_from_line("Location: ht!tp://bad uri").unwrap();

        let error = header.uri().unwrap_err();
        assert!(matches!(error, HeaderError::InvalidHeaderValue { ref value, .. } if value == "ht!tp://bad uri"));
        assert_eq!(header.value(), &UriValue::Raw("ht!tp://bad uri".to_string()));
    }

    #[test]
    fn unset_value_is_empty_uri() {
        let mut header = Referer::default();

        assert_eq!(header.uri_string(), "");
        assert_eq!(header.to_line(), "Referer: ");
        assert!(header.uri().unwrap().is_empty());
    }

    #[test]
    fn display_and_from_str() {
        let header: Location = "LOCATION: /x".parse().unwrap();

        assert_eq!(header.to_string(), "Location: /x");
        assert_eq!(header.to_string(), header.to_line());
        assert_eq!(header.field_name(), "Location");
        assert_eq!(Location::HEADER_NAME, http::header::LOCATION);
    }
}
