//! Knobs that bound how much work a single decode may do.

/// Default ceiling on the number of bytes a decode may consume, 64 MiB.
pub const DEFAULT_SIZE_LIMIT: usize = 64 << 20;

/// Default maximum depth of nested messages.
pub const DEFAULT_RECURSION_LIMIT: u32 = 100;

/// Configuration for a decode.
///
/// ```
/// use pbcodec::DecodeOptions;
///
/// let options = DecodeOptions::default()
///     .with_size_limit(1024)
///     .with_discard_unknown_fields(true);
/// assert_eq!(options.size_limit, 1024);
/// assert_eq!(options.recursion_limit, 100);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum absolute number of bytes the reader will consume, or a nested
    /// length may claim.
    pub size_limit: usize,
    /// Maximum depth of nested messages.
    pub recursion_limit: u32,
    /// Skip unknown fields instead of retaining them.
    pub discard_unknown_fields: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            size_limit: DEFAULT_SIZE_LIMIT,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            discard_unknown_fields: false,
        }
    }
}

impl DecodeOptions {
    #[must_use]
    pub const fn with_size_limit(mut self, size_limit: usize) -> Self {
        self.size_limit = size_limit;
        self
    }

    #[must_use]
    pub const fn with_recursion_limit(mut self, recursion_limit: u32) -> Self {
        self.recursion_limit = recursion_limit;
        self
    }

    #[must_use]
    pub const fn with_discard_unknown_fields(mut self, discard: bool) -> Self {
        self.discard_unknown_fields = discard;
        self
    }
}
