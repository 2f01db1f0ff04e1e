//! Dispatch of header lines to the matching URI-valued header.
//!
//! A header factory that only knows a line's text uses [`UriHeader::from_line`] to
//! pick the variant by field name, then works with the result through the same
//! operations every [`LocationHeader`] offers.

use std::fmt;
use std::str::FromStr;

use http::HeaderName;
use tracing::trace;

use crate::error::HeaderError;
use crate::location::{ContentLocation, Location, LocationHeader, Referer, UriSource};
use crate::uri::HttpUri;

/// Field names of every supported URI-valued header.
pub const FIELD_NAMES: [&str; 3] = [Location::FIELD_NAME, ContentLocation::FIELD_NAME, Referer::FIELD_NAME];

/// Returns true if `name` is the field name of a supported URI-valued header.
pub fn is_uri_header(name: &str) -> bool {
    FIELD_NAMES.iter().any(|field_name| name.eq_ignore_ascii_case(field_name))
}

/// Any supported URI-valued header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriHeader {
    Location(Location),
    ContentLocation(ContentLocation),
    Referer(Referer),
}

macro_rules! dispatch {
    ($self:expr, $header:ident => $body:expr) => {
        match $self {
            UriHeader::Location($header) => $body,
            UriHeader::ContentLocation($header) => $body,
            UriHeader::Referer($header) => $body,
        }
    };
}

impl UriHeader {
    /// Parses a `Name: value` line into the variant named by the line.
    ///
    /// # Errors
    ///
    /// - [`HeaderError::MalformedLine`] if the line has no `:`
    /// - [`HeaderError::UnsupportedHeader`] if no variant uses the field name
    /// - any error of [`LocationHeader::parse_from_line`]
    pub fn from_line(line: &str) -> Result<Self, HeaderError> {
        let (name, _) = line.split_once(':').ok_or(HeaderError::MalformedLine)?;
        trace!(field_name = name, "dispatching uri header line");

        if name.eq_ignore_ascii_case(Location::FIELD_NAME) {
            Location::parse_from_line(line).map(Self::Location)
        } else if name.eq_ignore_ascii_case(ContentLocation::FIELD_NAME) {
            ContentLocation::parse_from_line(line).map(Self::ContentLocation)
        } else if name.eq_ignore_ascii_case(Referer::FIELD_NAME) {
            Referer::parse_from_line(line).map(Self::Referer)
        } else {
            Err(HeaderError::unsupported_header(name))
        }
    }

    pub fn field_name(&self) -> &'static str {
        dispatch!(self, header => header.field_name())
    }

    pub fn header_name(&self) -> HeaderName {
        match self {
            Self::Location(_) => Location::HEADER_NAME,
            Self::ContentLocation(_) => ContentLocation::HEADER_NAME,
            Self::Referer(_) => Referer::HEADER_NAME,
        }
    }

    /// See [`LocationHeader::set_uri`].
    ///
    /// # Errors
    ///
    /// Fails like [`LocationHeader::set_uri`], leaving the value untouched.
    pub fn set_uri<S: Into<UriSource>>(&mut self, source: S) -> Result<&mut Self, HeaderError> {
        dispatch!(self, header => { header.set_uri(source)?; });
        Ok(self)
    }

    pub fn uri_string(&self) -> &str {
        dispatch!(self, header => header.uri_string())
    }

    /// See [`LocationHeader::uri`].
    ///
    /// # Errors
    ///
    /// Fails like [`LocationHeader::uri`].
    pub fn uri(&mut self) -> Result<&HttpUri, HeaderError> {
        dispatch!(self, header => header.uri())
    }

    pub fn field_value(&self) -> &str {
        dispatch!(self, header => header.field_value())
    }

    pub fn to_line(&self) -> String {
        dispatch!(self, header => header.to_line())
    }
}

impl From<Location> for UriHeader {
    fn from(header: Location) -> Self {
        Self::Location(header)
    }
}

impl From<ContentLocation> for UriHeader {
    fn from(header: ContentLocation) -> Self {
        Self::ContentLocation(header)
    }
}

impl From<Referer> for UriHeader {
    fn from(header: Referer) -> Self {
        Self::Referer(header)
    }
}

impl FromStr for UriHeader {
    type Err = HeaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_line(s)
    }
}

impl fmt::Display for UriHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, header => fmt::Display::fmt(header, f))
    }
}
