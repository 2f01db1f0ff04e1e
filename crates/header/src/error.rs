//! Error types for URI-valued header handling.
//!
//! - [`HeaderError`]: everything a header operation can fail with
//! - [`UriError`]: failures of the HTTP-family URI parser, carried as the cause of
//!   [`HeaderError::InvalidHeaderValue`]

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeaderError {
    /// The line's field name belongs to another header.
    #[error("invalid header line for \"{expected}\" header string, found field name \"{actual}\"")]
    HeaderMismatch { expected: &'static str, actual: String },

    #[error("invalid uri passed as string ({value})")]
    InvalidHeaderValue {
        value: String,
        #[source]
        source: UriError,
    },

    #[error("invalid argument type: {reason}")]
    InvalidArgumentType { reason: String },

    #[error("malformed header line, missing ':' separator")]
    MalformedLine,

    #[error("header line size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeLine { current_size: usize, max_size: usize },

    #[error("unsupported uri header: {name}")]
    UnsupportedHeader { name: String },

    #[error("invalid field value: {source}")]
    InvalidFieldValue {
        #[from]
        source: http::header::InvalidHeaderValue,
    },
}

impl HeaderError {
    pub fn header_mismatch<S: ToString>(expected: &'static str, actual: S) -> Self {
        Self::HeaderMismatch { expected, actual: actual.to_string() }
    }

    pub fn invalid_header_value<S: ToString>(value: S, source: UriError) -> Self {
        Self::InvalidHeaderValue { value: value.to_string(), source }
    }

    pub fn invalid_argument_type<S: ToString>(str: S) -> Self {
        Self::InvalidArgumentType { reason: str.to_string() }
    }

    pub fn too_large_line(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeLine { current_size, max_size }
    }

    pub fn unsupported_header<S: ToString>(name: S) -> Self {
        Self::UnsupportedHeader { name: name.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum UriError {
    #[error("invalid uri reference: {source}")]
    Syntax {
        #[from]
        source: fluent_uri::error::ParseError,
    },

    #[error("unsupported scheme \"{scheme}\", expected http or https")]
    UnsupportedScheme { scheme: String },
}

impl UriError {
    pub fn unsupported_scheme<S: ToString>(scheme: S) -> Self {
        Self::UnsupportedScheme { scheme: scheme.to_string() }
    }
}
