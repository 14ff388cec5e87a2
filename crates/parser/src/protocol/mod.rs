//! Types describing a request and the outcome of parsing it.
//!
//! - [`Request`]: the request being parsed, with its fields and current [`ParseState`]
//! - [`HeaderStore`]: the multi-valued, case-sensitive header map the parser fills
//! - [`ParseError`] and [`ErrorKind`]: why a request ended in [`ParseState::Error`]
//! - [`DecodeError`]: errors of the `tokio_util` decoder adapter
//! - [`ConvertError`]: errors converting into `http::Request`

mod error;
pub use error::ConvertError;
pub use error::DecodeError;
pub use error::ErrorKind;
pub use error::Field;
pub use error::HeaderError;
pub use error::ParseError;

mod headers;
pub use headers::HeaderStore;

mod request;
pub use request::Request;

mod state;
pub use state::ParseState;
