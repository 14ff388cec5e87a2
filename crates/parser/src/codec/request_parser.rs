//! The resumable request state machine.
//!
//! [`Request::feed`] drives a [`Request`] through its [`ParseState`]s one chunk at a time:
//!
//! ```text
//! MethodStart -> Method -> PathStart -> Path -> VersionStart -> Version
//!     -> HeaderStart -> HeaderParse -> (HeaderStart ...) -> [BodyStart -> Body] -> Finished
//! ```
//!
//! Every `*Start` state prepares a bounded scratch buffer and never consumes input; the
//! state after it collects bytes into that buffer until the field's delimiter shows up.
//! When a chunk runs out mid-field the call simply returns, the partial field and any
//! partially matched delimiter stay in the request, and the next call picks up exactly
//! where this one stopped. Any failure moves the request to [`ParseState::Error`] for good.
//!
//! # Example
//!
//! ```
//! use micro_http_parser::protocol::{ParseState, Request};
//!
//! let mut req = Request::new().unwrap();
//! req.feed(b"GET /index HTTP/1.1\r\nHost: loc");
//! assert_eq!(req.state(), ParseState::HeaderParse);
//!
//! req.feed(b"alhost\r\n\r\n");
//! assert_eq!(req.state(), ParseState::Finished);
//! assert_eq!(req.header("Host").unwrap(), "localhost");
//! ```

use bytes::Bytes;
use tracing::{debug, trace};

use crate::codec::body::{CONTENT_LENGTH, expects_body, parse_content_length};
use crate::codec::header_line::split_header_line;
use crate::codec::scan::{Scan, try_copy};
use crate::protocol::{Field, ParseError, ParseState, Request};

const SP: &[u8] = b" ";
const CRLF: &[u8] = b"\r\n";

impl Request {
    /// Parses as much of `chunk` as possible and returns the number of bytes consumed.
    ///
    /// The whole chunk is consumed unless the request reaches a terminal state first. Once
    /// the request is [`ParseState::Finished`] or [`ParseState::Error`], feeding is a no-op
    /// returning `0`. Bytes following the end of the message are left unconsumed.
    pub fn feed(&mut self, chunk: &[u8]) -> usize {
        let mut cursor = 0;

        loop {
            if self.state.is_terminal() || (cursor == chunk.len() && consumes_input(self.state)) {
                break;
            }

            if let Err(e) = self.step(chunk, &mut cursor) {
                self.fail(e);
            }
        }

        cursor
    }

    /// Runs the action of the current state once.
    fn step(&mut self, chunk: &[u8], cursor: &mut usize) -> Result<(), ParseError> {
        match self.state {
            ParseState::MethodStart => self.start_field(self.config.max_method_size, ParseState::Method),
            ParseState::Method => {
                if let Some(method) = self.commit_field(chunk, cursor, SP, Field::Method, ParseState::PathStart)? {
                    trace!(method = ?method, "parsed method");
                    self.method = Some(method);
                }
                Ok(())
            }
            ParseState::PathStart => self.start_field(self.config.max_path_size, ParseState::Path),
            ParseState::Path => {
                if let Some(path) = self.commit_field(chunk, cursor, SP, Field::Path, ParseState::VersionStart)? {
                    trace!(path = ?path, "parsed path");
                    self.path = Some(path);
                }
                Ok(())
            }
            ParseState::VersionStart => self.start_field(self.config.max_version_size, ParseState::Version),
            ParseState::Version => {
                if let Some(version) = self.commit_field(chunk, cursor, CRLF, Field::Version, ParseState::HeaderStart)? {
                    trace!(version = ?version, "parsed version");
                    self.version = Some(version);
                }
                Ok(())
            }
            ParseState::HeaderStart => self.start_field(self.config.header_line_capacity(), ParseState::HeaderParse),
            ParseState::HeaderParse => self.parse_header_line(chunk, cursor),
            ParseState::BodyStart => self.start_body(),
            ParseState::Body => {
                self.load_body(chunk, cursor);
                Ok(())
            }
            ParseState::Finished | ParseState::Error => Ok(()),
        }
    }

    /// Allocates the scratch buffer for the next field and moves to `next`.
    fn start_field(&mut self, capacity: usize, next: ParseState) -> Result<(), ParseError> {
        self.scan.reset(capacity)?;
        self.state = next;
        Ok(())
    }

    /// Scans for `delimiter` and hands the completed field over to the caller.
    ///
    /// Returns `Ok(None)` while the field is still incomplete.
    fn commit_field(
        &mut self,
        chunk: &[u8],
        cursor: &mut usize,
        delimiter: &[u8],
        field: Field,
        next: ParseState,
    ) -> Result<Option<Bytes>, ParseError> {
        match self.scan.scan_until(chunk, cursor, delimiter) {
            Scan::Found => {
                self.state = next;
                Ok(Some(self.scan.take()))
            }
            Scan::Overflow => Err(ParseError::out_of_bounds(field, self.scan.capacity())),
            Scan::Continue => Ok(None),
        }
    }

    fn parse_header_line(&mut self, chunk: &[u8], cursor: &mut usize) -> Result<(), ParseError> {
        let Some(line) = self.commit_field(chunk, cursor, CRLF, Field::HeaderLine, ParseState::HeaderStart)? else {
            return Ok(());
        };

        // an empty line closes the header block
        if line.is_empty() {
            self.state = if expects_body(&self.headers) { ParseState::BodyStart } else { ParseState::Finished };
            trace!(header_count = self.headers.len(), "parsed headers");
            return Ok(());
        }

        let (key, value) = split_header_line(&line, &self.config)?;
        let (key, value) = (try_copy(key)?, try_copy(value)?);
        trace!(key = ?key, value = ?value, "parsed header");
        self.headers.add(key, value)?;
        Ok(())
    }

    fn start_body(&mut self) -> Result<(), ParseError> {
        let length = match self.headers.last(CONTENT_LENGTH) {
            Some(value) => parse_content_length(value, self.config.max_body_size)?,
            None => 0,
        };

        if length == 0 {
            self.state = ParseState::Finished;
            return Ok(());
        }

        trace!(body_size = length, "parsed body size");
        self.start_field(length, ParseState::Body)
    }

    fn load_body(&mut self, chunk: &[u8], cursor: &mut usize) {
        if self.scan.fill(chunk, cursor) {
            let body = self.scan.take();
            trace!(body_size = body.len(), "loaded body");
            self.body = Some(body);
            self.state = ParseState::Finished;
        }
    }

    fn fail(&mut self, error: ParseError) {
        debug!(state = ?self.state, cause = %error, "request parsing failed");
        self.scan.release();
        self.state = ParseState::Error;
        self.error = Some(error);
    }
}

/// States that need input to make progress; all others run even on an exhausted chunk.
fn consumes_input(state: ParseState) -> bool {
    matches!(
        state,
        ParseState::Method | ParseState::Path | ParseState::Version | ParseState::HeaderParse | ParseState::Body
    )
}
