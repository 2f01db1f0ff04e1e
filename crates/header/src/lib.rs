//! Typed HTTP headers whose value is a URI reference.
//!
//! This crate models `Location`, `Content-Location` and `Referer`: parsing a raw header
//! line into a typed header, validating its field name, coercing the value into a
//! structured URI on demand, and serializing back to wire format.
//!
//! # Example
//!
//! ```
//! use micro_header::{Location, LocationHeader, UriHeader};
//!
//! // no space after the colon is tolerated, and the port survives the split
//! let mut location = Location::parse_from_line("location:http://example.com:8080/moved").unwrap();
//! assert_eq!(location.uri_string(), "http://example.com:8080/moved");
//!
//! // strict validation happens on first access to the parsed form
//! let uri = location.uri().unwrap();
//! assert_eq!(uri.host(), Some("example.com"));
//!
//! // relative references are fine
//! location.set_uri("/relative/path").unwrap();
//! assert_eq!(location.to_line(), "Location: /relative/path");
//!
//! // a header factory can dispatch on the field name
//! let referer = UriHeader::from_line("Referer: /previous").unwrap();
//! assert_eq!(referer.field_name(), "Referer");
//! ```
//!
//! # Architecture
//!
//! - [`location`]: the [`LocationHeader`] contract, the [`UriValue`] slot and the
//!   concrete header types
//! - [`uri`]: [`HttpUri`], the HTTP-family URI reference parser
//! - [`registry`]: [`UriHeader`], dispatching lines to the right header type
//! - [`codec`]: interop with `http::HeaderMap` and wire buffers
//!
//! # Error Handling
//!
//! - [`HeaderError`]: returned by every fallible header operation
//! - [`UriError`]: why a value is not an HTTP-family URI, kept as the error source
//!
//! Errors are returned to the caller as-is; nothing is logged or retried here.
//!
//! # Limits
//!
//! - Maximum header line size: 8KB ([`MAX_LINE_BYTES`])
//! - Header folding and multi-line values are not supported

pub mod codec;
pub mod location;
pub mod registry;
pub mod uri;

mod error;
pub use error::HeaderError;
pub use error::UriError;

pub use location::ContentLocation;
pub use location::Location;
pub use location::LocationHeader;
pub use location::Referer;
pub use location::UriSource;
pub use location::UriValue;
pub use location::MAX_LINE_BYTES;

pub use registry::UriHeader;

pub use uri::HttpUri;

mod utils;
pub(crate) use utils::ensure;
