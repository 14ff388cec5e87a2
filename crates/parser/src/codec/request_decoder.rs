//! [`Decoder`] adapter over the incremental request parser.
//!
//! [`RequestDecoder`] lets the parser sit under a `tokio_util::codec::FramedRead`: every
//! call feeds whatever the read buffer holds into the request in progress and advances
//! the buffer past the consumed bytes. Bytes following a complete request stay in the
//! buffer for the caller, or for the next `decode` call, which starts a new request.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_http_parser::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET / HTTP/1.1\r\n"[..]);
//! assert!(decoder.decode(&mut buffer).unwrap().is_none());
//!
//! buffer.extend_from_slice(b"\r\n");
//! let request = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.method().unwrap(), "GET");
//! ```

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ParseConfig;
use crate::protocol::{DecodeError, Request};

/// A decoder producing one finished [`Request`] per HTTP message.
///
/// # State Machine
///
/// The decoder tracks the message in progress through the `request` field:
/// - `None`: between messages
/// - `Some(Request)`: a message has started and is not finished yet
#[derive(Debug, Default)]
pub struct RequestDecoder {
    config: ParseConfig,
    request: Option<Request>,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` with the default limits.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: ParseConfig) -> Self {
        Self { config, request: None }
    }

    /// Returns true while a message has been started but not completed.
    pub fn is_partial(&self) -> bool {
        self.request.is_some()
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = DecodeError;

    /// Feeds `src` into the request in progress.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: a request finished, bytes after it remain in `src`
    /// - `Ok(None)`: all of `src` was consumed, more data is needed
    /// - `Err(_)`: the request is malformed or exceeded a limit; the partial request is dropped
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() && self.request.is_none() {
            return Ok(None);
        }

        let mut request = match self.request.take() {
            Some(request) => request,
            None => Request::with_config(self.config)?,
        };

        let consumed = request.feed(src);
        src.advance(consumed);
        trace!(consumed, remaining = src.len(), state = ?request.state(), "fed request decoder");

        if let Some(error) = request.error() {
            return Err(error.clone().into());
        }

        if request.is_finished() {
            return Ok(Some(request));
        }

        self.request = Some(request);
        Ok(None)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(request) => Ok(Some(request)),
            None if self.is_partial() => {
                self.request = None;
                Err(DecodeError::UnexpectedEof)
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;
    use indoc::indoc;
    use tokio_util::codec::FramedRead;

    use crate::protocol::{ErrorKind, Field, ParseError};

    use super::*;

    #[test]
    fn needs_more_data() {
        let mut decoder = RequestDecoder::new();
        let mut buffer = BytesMut::from(&b"POST /upload HTTP/1.1\r\nContent-Le"[..]);

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        assert!(buffer.is_empty());
        assert!(decoder.is_partial());

        buffer.extend_from_slice(b"ngth: 3\r\n\r\nab");
        assert!(decoder.decode(&mut buffer).unwrap().is_none());

        buffer.extend_from_slice(b"c");
        let request = decoder.decode(&mut buffer).unwrap().unwrap();

        assert_eq!(request.path().unwrap(), "/upload");
        assert_eq!(request.body().unwrap(), "abc");
        assert!(!decoder.is_partial());
    }

    #[test]
    fn trailing_bytes_stay_in_buffer() {
        let mut decoder = RequestDecoder::new();
        let mut buffer = BytesMut::from(&b"GET /a HTTP/1.1\r\n\r\nGET /b HTTP/1.1\r\n\r\n"[..]);

        let first = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(first.path().unwrap(), "/a");
        assert_eq!(&buffer[..], b"GET /b HTTP/1.1\r\n\r\n");

        let second = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(second.path().unwrap(), "/b");
        assert!(buffer.is_empty());

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
    }

    #[test]
    fn parse_error() {
        let mut decoder = RequestDecoder::new();
        let mut buffer = BytesMut::from(&b"GET / HTTP/1.1\r\nno-colon\r\n\r\n"[..]);

        let error = decoder.decode(&mut buffer).unwrap_err();

        assert_eq!(error.as_parse_error().map(ParseError::kind), Some(ErrorKind::InvalidHeader));
        assert!(!decoder.is_partial());
    }

    #[test]
    fn configured_limits_apply() {
        let mut decoder = RequestDecoder::with_config(ParseConfig::default().with_max_method_size(3));
        let mut buffer = BytesMut::from(&b"POST / HTTP/1.1\r\n\r\n"[..]);

        let error = decoder.decode(&mut buffer).unwrap_err();

        assert_eq!(error.as_parse_error(), Some(&ParseError::out_of_bounds(Field::Method, 3)));
    }

    #[test]
    fn eof_in_the_middle_of_a_request() {
        let mut decoder = RequestDecoder::new();
        let mut buffer = BytesMut::from(&b"GET / HTTP/1.1\r\nHost"[..]);

        assert!(matches!(decoder.decode_eof(&mut buffer), Err(DecodeError::UnexpectedEof)));
        assert!(!decoder.is_partial());

        let mut empty = BytesMut::new();
        assert!(decoder.decode_eof(&mut empty).unwrap().is_none());
    }

    #[tokio::test]
    async fn framed_read() {
        let input = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080

        POST /items HTTP/1.1
        Content-Length: 5

        hello"##}
        .replace('\n', "\r\n");

        let mut frames = FramedRead::new(input.as_bytes(), RequestDecoder::new());

        let first = frames.next().await.unwrap().unwrap();
        assert_eq!(first.method().unwrap(), "GET");
        assert_eq!(first.header("Host").unwrap(), "127.0.0.1:8080");

        let second = frames.next().await.unwrap().unwrap();
        assert_eq!(second.method().unwrap(), "POST");
        assert_eq!(second.body().unwrap(), "hello");

        assert!(frames.next().await.is_none());
    }
}
