//! Decoder limits and adapter policy.

/// Default maximum nesting of composites while decoding.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Default ceiling on elements/pairs of a single composite while decoding.
pub const DEFAULT_MAX_ELEMENTS: usize = 1 << 20;

/// Tunables shared by the decoder and the native-value adapter.
///
/// ```
/// use amfr::Options;
///
/// let opts = Options::new().max_depth(Some(16)).promote_long_strings(true);
/// assert_eq!(opts.depth_limit(), Some(16));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    max_depth: Option<usize>,
    max_elements: Option<usize>,
    promote_long_strings: bool,
}

impl Options {
    pub fn new() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_elements: Some(DEFAULT_MAX_ELEMENTS),
            promote_long_strings: false,
        }
    }

    /// Options with no decode limits at all. Only use on trusted input.
    pub fn unlimited() -> Self {
        Self {
            max_depth: None,
            max_elements: None,
            promote_long_strings: false,
        }
    }

    /// Sets the maximum composite nesting depth (`None` disables the check).
    pub fn max_depth(mut self, limit: Option<usize>) -> Self {
        self.max_depth = limit;
        self
    }

    /// Sets the per-composite element ceiling (`None` disables the check).
    pub fn max_elements(mut self, limit: Option<usize>) -> Self {
        self.max_elements = limit;
        self
    }

    /// When set, the adapter turns text over 65535 UTF-8 bytes into
    /// `LongString` instead of leaving the encoder to reject it.
    pub fn promote_long_strings(mut self, promote: bool) -> Self {
        self.promote_long_strings = promote;
        self
    }

    pub fn depth_limit(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn element_limit(&self) -> Option<usize> {
        self.max_elements
    }

    pub fn promotes_long_strings(&self) -> bool {
        self.promote_long_strings
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
