//! Conversion between URI-valued headers and the `http` crate's header types.
//!
//! - [`decode_header`] reads a header out of a [`HeaderMap`], keeping the value raw
//! - [`encode_header`] inserts a header into a [`HeaderMap`]
//! - [`write_line`] appends `Name: value\r\n` to a buffer when assembling a message

use bytes::{BufMut, BytesMut};
use http::{HeaderMap, HeaderValue};

use crate::error::HeaderError;
use crate::location::{LocationHeader, UriValue};

/// Reads the first `H` value out of `headers`.
///
/// The value is trimmed and stored raw, same as [`LocationHeader::parse_from_line`].
///
/// # Errors
///
/// Returns [`HeaderError::InvalidArgumentType`] if the value is not visible ASCII text.
pub fn decode_header<H: LocationHeader>(headers: &HeaderMap) -> Result<Option<H>, HeaderError> {
    let Some(value) = headers.get(H::HEADER_NAME) else {
        return Ok(None);
    };

    let text = value
        .to_str()
        .map_err(|e| HeaderError::invalid_argument_type(format!("{} value is not a string: {e}", H::FIELD_NAME)))?;

    Ok(Some(H::from_value(UriValue::Raw(text.trim().to_owned()))))
}

/// Inserts `header` into `headers`, replacing any previous value.
///
/// # Errors
///
/// Returns [`HeaderError::InvalidFieldValue`] if a raw value holds bytes a header
/// value can't carry.
pub fn encode_header<H: LocationHeader>(header: &H, headers: &mut HeaderMap) -> Result<(), HeaderError> {
    let value = HeaderValue::from_str(header.field_value())?;
    headers.insert(H::HEADER_NAME, value);
    Ok(())
}

/// Appends `Name: value\r\n` to `dst`.
pub fn write_line<H: LocationHeader>(header: &H, dst: &mut BytesMut) {
    let value = header.field_value();

    dst.reserve(H::FIELD_NAME.len() + value.len() + 4);
    dst.put_slice(H::FIELD_NAME.as_bytes());
    dst.put_slice(b": ");
    dst.put_slice(value.as_bytes());
    dst.put_slice(b"\r\n");
}
