//! Size limits applied while parsing.
//!
//! Every field the parser accumulates is bounded by one of these limits, so the memory a
//! single [`Request`](crate::protocol::Request) can hold is fixed before the first byte
//! arrives.

/// Per-request parsing limits, all in bytes except `max_header_count`.
///
/// ```
/// use micro_http_parser::ParseConfig;
///
/// let config = ParseConfig::default().with_max_path_size(256).with_max_body_size(64 * 1024);
/// assert_eq!(config.max_path_size, 256);
/// assert_eq!(config.header_line_capacity(), 255 + 1 + 512);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    pub max_method_size: usize,
    pub max_path_size: usize,
    pub max_version_size: usize,
    pub max_header_key_size: usize,
    pub max_header_value_size: usize,
    /// Maximum number of header values across all keys.
    pub max_header_count: usize,
    pub max_body_size: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_method_size: 8,
            max_path_size: 30,
            max_version_size: 8,
            max_header_key_size: 255,
            max_header_value_size: 512,
            max_header_count: 30,
            max_body_size: 2048,
        }
    }
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_method_size(mut self, size: usize) -> Self {
        self.max_method_size = size;
        self
    }

    #[must_use]
    pub fn with_max_path_size(mut self, size: usize) -> Self {
        self.max_path_size = size;
        self
    }

    #[must_use]
    pub fn with_max_version_size(mut self, size: usize) -> Self {
        self.max_version_size = size;
        self
    }

    #[must_use]
    pub fn with_max_header_key_size(mut self, size: usize) -> Self {
        self.max_header_key_size = size;
        self
    }

    #[must_use]
    pub fn with_max_header_value_size(mut self, size: usize) -> Self {
        self.max_header_value_size = size;
        self
    }

    #[must_use]
    pub fn with_max_header_count(mut self, count: usize) -> Self {
        self.max_header_count = count;
        self
    }

    #[must_use]
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Capacity of the buffer one raw header line is collected into: key, colon and value.
    pub fn header_line_capacity(&self) -> usize {
        self.max_header_key_size.saturating_add(1).saturating_add(self.max_header_value_size)
    }
}
