/// Where a [`Request`](crate::protocol::Request) is in the parse of its message.
///
/// The `*Start` states allocate the scratch buffer for the field that follows them and
/// never consume input. [`ParseState::Finished`] and [`ParseState::Error`] are terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum ParseState {
    #[default]
    MethodStart,
    Method,
    PathStart,
    Path,
    VersionStart,
    Version,
    HeaderStart,
    HeaderParse,
    BodyStart,
    Body,
    Finished,
    Error,
}

impl ParseState {
    /// Returns true once no further input will be accepted.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, ParseState::Finished | ParseState::Error)
    }
}
