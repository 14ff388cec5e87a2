use std::fmt;
use std::io;

use thiserror::Error;

use crate::protocol::ParseState;

/// The field whose configured limit was exceeded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Method,
    Path,
    Version,
    /// A raw `key: value` line, before it is split.
    HeaderLine,
    HeaderKey,
    HeaderValue,
    /// Total number of header values across all keys.
    HeaderCount,
    Body,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Method => "method",
            Field::Path => "path",
            Field::Version => "version",
            Field::HeaderLine => "header line",
            Field::HeaderKey => "header key",
            Field::HeaderValue => "header value",
            Field::HeaderCount => "header count",
            Field::Body => "body",
        };
        f.write_str(name)
    }
}

/// The coarse classification every [`ParseError`] falls into.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfMemory,
    OutOfBounds,
    InvalidHeader,
}

/// A fatal error that moved a [`Request`](crate::protocol::Request) into
/// [`ParseState::Error`].
///
/// None of these are recoverable: the message must be abandoned and the request dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("out of memory while allocating parser storage")]
    OutOfMemory,

    #[error("{field} exceed the limit {limit}")]
    OutOfBounds { field: Field, limit: usize },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: &'static str },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: &'static str },
}

impl ParseError {
    pub fn out_of_bounds(field: Field, limit: usize) -> Self {
        Self::OutOfBounds { field, limit }
    }

    pub fn invalid_header(reason: &'static str) -> Self {
        Self::InvalidHeader { reason }
    }

    pub fn invalid_content_length(reason: &'static str) -> Self {
        Self::InvalidContentLength { reason }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::OutOfMemory => ErrorKind::OutOfMemory,
            ParseError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            ParseError::InvalidHeader { .. } | ParseError::InvalidContentLength { .. } => ErrorKind::InvalidHeader,
        }
    }
}

/// Errors reported by the [`HeaderStore`](crate::protocol::HeaderStore).
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("out of memory while storing header")]
    OutOfMemory,

    #[error("header number exceed the limit {max_values}")]
    OutOfBounds { max_values: usize },
}

impl From<HeaderError> for ParseError {
    fn from(e: HeaderError) -> Self {
        match e {
            HeaderError::OutOfMemory => ParseError::OutOfMemory,
            HeaderError::OutOfBounds { max_values } => ParseError::out_of_bounds(Field::HeaderCount, max_values),
        }
    }
}

/// Errors surfaced by [`RequestDecoder`](crate::codec::RequestDecoder).
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("request error: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("stream ended before the request was complete")]
    UnexpectedEof,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl DecodeError {
    /// The parse error behind this failure, if any.
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            DecodeError::Parse { source } => Some(source),
            _ => None,
        }
    }
}

/// Errors converting a parsed [`Request`](crate::protocol::Request) into an `http::Request`.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("request is not finished, current state: {state:?}")]
    Incomplete { state: ParseState },

    #[error("invalid http method: {source}")]
    InvalidMethod {
        #[from]
        source: http::method::InvalidMethod,
    },

    #[error("invalid http uri: {source}")]
    InvalidUri {
        #[from]
        source: http::uri::InvalidUri,
    },

    #[error("invalid http version: {0:?}")]
    InvalidVersion(String),

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },
}

impl ConvertError {
    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }
}
