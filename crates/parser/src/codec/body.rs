//! Body length derivation from the Content-Length header.
//!
//! Only fixed-length bodies are supported, see
//! [RFC 9112 Section 6.3](https://www.rfc-editor.org/rfc/rfc9112.html#section-6.3).
//! A request without Content-Length carries no body.

use crate::ensure;
use crate::protocol::{Field, HeaderStore, ParseError};

pub(crate) const CONTENT_LENGTH: &[u8] = b"Content-Length";

/// Returns true when the header block announces a body: the last Content-Length value is
/// present and is not the literal `0`.
pub(crate) fn expects_body(headers: &HeaderStore) -> bool {
    headers.last(CONTENT_LENGTH).is_some_and(|value| &value[..] != b"0")
}

/// Parses a Content-Length value as an unsigned decimal number bounded by `max_body_size`.
///
/// # Errors
///
/// - [`ParseError::InvalidContentLength`] if the value is empty or holds anything but ASCII digits
/// - [`ParseError::OutOfBounds`] if the length exceeds `max_body_size`
pub(crate) fn parse_content_length(value: &[u8], max_body_size: usize) -> Result<usize, ParseError> {
    ensure!(!value.is_empty(), ParseError::invalid_content_length("empty value"));

    let mut length: usize = 0;
    for b in value {
        ensure!(b.is_ascii_digit(), ParseError::invalid_content_length("value is not a decimal number"));
        // saturate, anything that large is out of bounds anyway
        length = length.saturating_mul(10).saturating_add(usize::from(b - b'0'));
    }

    ensure!(length <= max_body_size, ParseError::out_of_bounds(Field::Body, max_body_size));
    Ok(length)
}
