//! The request object populated by the incremental parser.
//!
//! A [`Request`] is created empty, fed input with
//! [`Request::feed`](crate::protocol::Request::feed) until it reaches a terminal
//! [`ParseState`], and then read through its accessors or converted into an
//! `http::Request<Bytes>`.

use bytes::Bytes;
use http::{HeaderName, HeaderValue, Method, Uri, Version};

use crate::ParseConfig;
use crate::codec::ScanState;
use crate::ensure;
use crate::protocol::{ConvertError, ErrorKind, HeaderStore, ParseError, ParseState};

/// One HTTP/1.1 request message, parsed or in the middle of being parsed.
///
/// Method, path and version are set exactly once each, in that order. The body is only
/// present when a non-zero `Content-Length` was announced and all of its bytes arrived.
/// Dropping the request releases everything it holds, whatever its state.
#[derive(Debug)]
pub struct Request {
    pub(crate) method: Option<Bytes>,
    pub(crate) path: Option<Bytes>,
    pub(crate) version: Option<Bytes>,
    pub(crate) headers: HeaderStore,
    pub(crate) body: Option<Bytes>,
    pub(crate) state: ParseState,
    pub(crate) error: Option<ParseError>,
    pub(crate) scan: ScanState,
    pub(crate) config: ParseConfig,
}

impl Request {
    /// Creates an empty request using the default [`ParseConfig`].
    pub fn new() -> Result<Self, ParseError> {
        Self::with_config(ParseConfig::default())
    }

    /// Creates an empty request bounded by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::OutOfMemory`] if the header table could not be allocated.
    pub fn with_config(config: ParseConfig) -> Result<Self, ParseError> {
        Ok(Self {
            method: None,
            path: None,
            version: None,
            headers: HeaderStore::with_max_values(config.max_header_count)?,
            body: None,
            state: ParseState::MethodStart,
            error: None,
            scan: ScanState::default(),
            config,
        })
    }

    pub fn method(&self) -> Option<&Bytes> {
        self.method.as_ref()
    }

    pub fn path(&self) -> Option<&Bytes> {
        self.path.as_ref()
    }

    pub fn version(&self) -> Option<&Bytes> {
        self.version.as_ref()
    }

    pub fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    /// Shortcut for the last value received for `key`.
    pub fn header<K: AsRef<[u8]>>(&self, key: K) -> Option<&Bytes> {
        self.headers.last(key)
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// The error that stopped parsing, set only in [`ParseState::Error`].
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(ParseError::kind)
    }

    pub fn is_finished(&self) -> bool {
        self.state == ParseState::Finished
    }

    pub fn is_error(&self) -> bool {
        self.state == ParseState::Error
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }
}

/// Converts a finished request into an `http::Request`.
///
/// Header names are validated by `http`, which also folds them to lowercase, so keys that
/// differ only in case end up under the same name.
impl TryFrom<Request> for http::Request<Bytes> {
    type Error = ConvertError;

    fn try_from(req: Request) -> Result<Self, Self::Error> {
        ensure!(req.is_finished(), ConvertError::Incomplete { state: req.state });

        let Request { method, path, version, headers, body, .. } = req;

        let method = Method::from_bytes(&method.unwrap_or_default())?;
        let uri = Uri::from_maybe_shared(path.unwrap_or_default())?;
        let version = match version.as_deref() {
            Some(b"HTTP/1.1") => Version::HTTP_11,
            Some(b"HTTP/1.0") => Version::HTTP_10,
            other => {
                return Err(ConvertError::InvalidVersion(String::from_utf8_lossy(other.unwrap_or_default()).into_owned()));
            }
        };

        let mut request = http::Request::new(body.unwrap_or_default());
        *request.method_mut() = method;
        *request.uri_mut() = uri;
        *request.version_mut() = version;

        let header_map = request.headers_mut();
        header_map.reserve(headers.len());
        for (key, values) in headers.iter() {
            let name = HeaderName::from_bytes(key).map_err(ConvertError::invalid_header)?;
            for value in values {
                let value = HeaderValue::from_maybe_shared(value.clone()).map_err(ConvertError::invalid_header)?;
                header_map.append(name.clone(), value);
            }
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &[u8]) -> Request {
        let mut req = Request::new().unwrap();
        req.feed(input);
        req
    }

    #[test]
    fn empty_request() {
        let req = Request::new().unwrap();

        assert_eq!(req.state(), ParseState::MethodStart);
        assert!(req.method().is_none());
        assert!(req.path().is_none());
        assert!(req.version().is_none());
        assert!(req.body().is_none());
        assert!(req.error().is_none());
        assert!(req.headers().is_empty());
        assert_eq!(req.headers().max_values(), 30);
    }

    #[test]
    fn into_http_request() {
        let req = parse(b"POST /items?id=3 HTTP/1.1\r\nHost: localhost\r\nAccept: text/html\r\nAccept: */*\r\nContent-Length: 4\r\n\r\ntest");

        let request = http::Request::<Bytes>::try_from(req).unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.uri().path(), "/items");
        assert_eq!(request.uri().query(), Some("id=3"));
        assert_eq!(request.version(), Version::HTTP_11);
        assert_eq!(request.headers().get(http::header::HOST), Some(&HeaderValue::from_static("localhost")));

        let accept: Vec<_> = request.headers().get_all(http::header::ACCEPT).iter().collect();
        assert_eq!(accept, vec![&HeaderValue::from_static("text/html"), &HeaderValue::from_static("*/*")]);

        assert_eq!(&request.body()[..], b"test");
    }

    #[test]
    fn into_http_request_without_body() {
        let req = parse(b"GET / HTTP/1.0\r\n\r\n");

        let request = http::Request::<Bytes>::try_from(req).unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.version(), Version::HTTP_10);
        assert!(request.headers().is_empty());
        assert!(request.body().is_empty());
    }

    #[test]
    fn unfinished_request_is_rejected() {
        let req = parse(b"GET / HTTP/1.1\r\nHost: local");

        let result = http::Request::<Bytes>::try_from(req);

        assert!(matches!(result, Err(ConvertError::Incomplete { state: ParseState::HeaderParse })));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let req = parse(b"GET / HTTP/2\r\n\r\n");

        let result = http::Request::<Bytes>::try_from(req);

        assert!(matches!(result, Err(ConvertError::InvalidVersion(version)) if version == "HTTP/2"));
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let req = parse(b"GET / HTTP/1.1\r\nBad Name: x\r\n\r\n");

        let result = http::Request::<Bytes>::try_from(req);

        assert!(matches!(result, Err(ConvertError::InvalidHeader { .. })));
    }
}
