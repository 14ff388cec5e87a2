//! Incremental decoding of HTTP/1.1 requests.
//!
//! The heavy lifting is the resumable state machine behind
//! [`Request::feed`](crate::protocol::Request::feed). The pieces it is built from:
//!
//! - `scan`: delimiter scanning into a bounded scratch buffer, resumable across chunks
//! - `header_line`: splitting and validating one `key: value` line
//! - `body`: deriving the body length from `Content-Length`
//! - `request_parser`: the state machine dispatching to the above
//!
//! [`RequestDecoder`] wraps the state machine in a `tokio_util` [`Decoder`](tokio_util::codec::Decoder)
//! for use with `FramedRead`.

mod body;
mod header_line;
mod request_decoder;
mod request_parser;
mod scan;

pub use request_decoder::RequestDecoder;

pub(crate) use scan::ScanState;
