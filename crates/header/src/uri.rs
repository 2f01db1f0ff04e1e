//! HTTP-family URI references.
//!
//! [`HttpUri`] wraps an RFC 3986 [URI reference] parsed by `fluent_uri` and narrows it
//! to what an HTTP header may carry:
//!
//! - relative references (`/a`, `a/b`, `../x`, `?q`, `#f`, the empty string) are accepted,
//!   since browsers and servers send them in `Location` despite RFC 1945
//! - absolute URIs must use the `http` or `https` scheme (case-insensitive)
//!
//! A missing host is not a parse error; callers enforcing RFC 7230 §2.7.1 check
//! [`HttpUri::has_host`].
//!
//! The parsed value keeps the original text, so [`HttpUri::as_str`] and the
//! [`Display`](fmt::Display) output are the exact inverse of [`HttpUri::parse`].
//!
//! [URI reference]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.1

use std::fmt;
use std::str::FromStr;

use fluent_uri::UriRef;

use crate::error::UriError;
use crate::ensure;

const HTTP_SCHEMES: [&str; 2] = ["http", "https"];

/// A parsed URI reference accepted for URI-valued HTTP headers.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HttpUri {
    inner: UriRef<String>,
}

impl HttpUri {
    /// Parses `input` as an HTTP-family URI reference.
    ///
    /// # Errors
    ///
    /// - [`UriError::Syntax`] if `input` does not match the `URI-reference` rule
    /// - [`UriError::UnsupportedScheme`] if a scheme other than `http`/`https` is present
    pub fn parse(input: &str) -> Result<Self, UriError> {
        let inner = UriRef::parse(input)?.to_owned();
        let uri = Self { inner };

        if let Some(scheme) = uri.scheme() {
            ensure!(
                HTTP_SCHEMES.iter().any(|expected| scheme.eq_ignore_ascii_case(expected)),
                UriError::unsupported_scheme(scheme)
            );
        }

        Ok(uri)
    }

    /// Returns the URI reference exactly as it was parsed.
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    pub fn scheme(&self) -> Option<&str> {
        self.inner.scheme().map(|scheme| scheme.as_str())
    }

    pub fn host(&self) -> Option<&str> {
        self.inner.authority().map(|authority| authority.host())
    }

    /// Returns true if the authority names a non-empty host.
    ///
    /// `http:relative` and `http:/no-host` parse fine but fail this check.
    pub fn has_host(&self) -> bool {
        self.host().is_some_and(|host| !host.is_empty())
    }

    pub fn path(&self) -> &str {
        self.inner.path().as_str()
    }

    pub fn query(&self) -> Option<&str> {
        self.inner.query().map(|query| query.as_str())
    }

    pub fn fragment(&self) -> Option<&str> {
        self.inner.fragment().map(|fragment| fragment.as_str())
    }

    /// Returns true if this is an absolute URI, i.e. it carries a scheme.
    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.scheme().is_some()
    }

    /// Returns true if this is a relative reference.
    #[inline]
    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }

    /// Returns true for the empty reference, which stands for "no value".
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl FromStr for HttpUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for HttpUri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for HttpUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for HttpUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HttpUri").field(&self.as_str()).finish()
    }
}
