//! An incremental, bounded-memory HTTP/1.1 request parser
//!
//! This crate parses HTTP/1.1 request messages (request line, headers and a
//! `Content-Length` body) from byte chunks of any size, delivered over any number of
//! calls. It is meant to sit directly behind non-blocking socket reads: feed whatever
//! arrived, look at the request state, and come back when more bytes are available.
//! Nothing is buffered beyond the field currently being parsed, and every field is
//! bounded by a configured limit.
//!
//! # Example
//!
//! ```
//! use micro_http_parser::protocol::{ParseState, Request};
//!
//! let mut req = Request::new().unwrap();
//!
//! // chunk boundaries may fall anywhere, even inside "\r\n"
//! for chunk in [&b"POST /upload HT"[..], b"TP/1.1\r", b"\nContent-Length: 4\r\n\r\nte", b"st"] {
//!     req.feed(chunk);
//! }
//!
//! assert_eq!(req.state(), ParseState::Finished);
//! assert_eq!(req.method().unwrap(), "POST");
//! assert_eq!(req.path().unwrap(), "/upload");
//! assert_eq!(req.version().unwrap(), "HTTP/1.1");
//! assert_eq!(req.header("Content-Length").unwrap(), "4");
//! assert_eq!(req.body().unwrap(), "test");
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: the [`Request`](protocol::Request) object, its header store, states
//!   and error types
//! - [`codec`]: the resumable state machine behind
//!   [`Request::feed`](protocol::Request::feed) and the `tokio_util`
//!   [`RequestDecoder`](codec::RequestDecoder)
//! - [`ParseConfig`]: per-request size limits
//!
//! # Error Handling
//!
//! A request that violates a limit or carries a malformed header moves to
//! [`ParseState::Error`](protocol::ParseState::Error) and keeps the
//! [`ParseError`](protocol::ParseError) that caused it. Errors are terminal: the request
//! ignores further input and the caller decides how to answer (typically 400 and close).
//!
//! # Limitations
//!
//! - Requests only, HTTP/1.x only
//! - No chunked transfer encoding, bodies need `Content-Length`
//! - No header folding, no URI decoding
//! - Header keys are matched case-sensitively
//! - No I/O: the caller reads the socket and feeds the bytes

pub mod codec;
pub mod protocol;

mod config;
pub use config::ParseConfig;

mod utils;
pub(crate) use utils::ensure;
