//! Splitting and validation of a single raw header line.
//!
//! The line arrives without its trailing CRLF. Folding, trailing whitespace trimming and
//! any value interpretation are left to the caller.

use crate::ParseConfig;
use crate::ensure;
use crate::protocol::{Field, ParseError};

/// Splits `line` at its first colon into `(key, value)`.
///
/// Spaces and tabs directly after the colon are skipped. Key and value borrow from `line`.
///
/// # Errors
///
/// - [`ParseError::InvalidHeader`] if the colon is missing, the key is empty or no value
///   follows the colon
/// - [`ParseError::OutOfBounds`] if the key or value exceeds its configured size
pub(crate) fn split_header_line<'a>(line: &'a [u8], config: &ParseConfig) -> Result<(&'a [u8], &'a [u8]), ParseError> {
    let colon = line.iter().position(|b| *b == b':').ok_or(ParseError::invalid_header("missing colon"))?;

    ensure!(colon > 0, ParseError::invalid_header("empty key"));
    ensure!(colon <= config.max_header_key_size, ParseError::out_of_bounds(Field::HeaderKey, config.max_header_key_size));

    let value_start = line[colon + 1..]
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t'))
        .map_or(line.len(), |offset| colon + 1 + offset);

    let value_len = line.len() - value_start;
    ensure!(value_len > 0, ParseError::invalid_header("missing value"));
    ensure!(
        value_len <= config.max_header_value_size,
        ParseError::out_of_bounds(Field::HeaderValue, config.max_header_value_size)
    );

    Ok((&line[..colon], &line[value_start..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &[u8]) -> Result<(&[u8], &[u8]), ParseError> {
        split_header_line(line, &ParseConfig::default())
    }

    #[test]
    fn key_and_value() {
        let (key, value) = split(b"Host: 127.0.0.1:8080").unwrap();
        assert_eq!(key, b"Host");
        // only the first colon splits
        assert_eq!(value, b"127.0.0.1:8080");
    }

    #[test]
    fn leading_spaces_and_tabs_are_skipped() {
        let (key, value) = split(b"Accept:\t  */* ").unwrap();
        assert_eq!(key, b"Accept");
        assert_eq!(value, b"*/* ");

        let (_, value) = split(b"KEY:VAL").unwrap();
        assert_eq!(value, b"VAL");
    }

    #[test]
    fn invalid_lines() {
        assert_eq!(split(b"TEST=VAL"), Err(ParseError::invalid_header("missing colon")));
        assert_eq!(split(b": "), Err(ParseError::invalid_header("empty key")));
        assert_eq!(split(b":VAL"), Err(ParseError::invalid_header("empty key")));
        assert_eq!(split(b"KEY:"), Err(ParseError::invalid_header("missing value")));
        assert_eq!(split(b"KEY: \t "), Err(ParseError::invalid_header("missing value")));
    }

    #[test]
    fn key_and_value_limits() {
        let config = ParseConfig::default().with_max_header_key_size(3).with_max_header_value_size(4);

        split_header_line(b"abc: 1234", &config).unwrap();
        assert_eq!(
            split_header_line(b"abcd: 1", &config),
            Err(ParseError::out_of_bounds(Field::HeaderKey, 3))
        );
        assert_eq!(
            split_header_line(b"abc: 12345", &config),
            Err(ParseError::out_of_bounds(Field::HeaderValue, 4))
        );
    }
}
