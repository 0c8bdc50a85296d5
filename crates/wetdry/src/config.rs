//! Alignment configuration.

/// Samples the reference detector's window leaves without a valid decision at
/// the end of its output.
pub const DEFAULT_TRAILING_TRIM: usize = 2;

/// Configuration for aligning detector output with a gauge reference.
#[derive(Debug, Clone)]
pub struct AlignConfig {
    trailing_trim: usize,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            trailing_trim: DEFAULT_TRAILING_TRIM,
        }
    }
}

impl AlignConfig {
    /// Set how many trailing samples to drop from the link time axis,
    /// classification and confidence before alignment.
    pub fn with_trailing_trim(mut self, trim: usize) -> Self {
        self.trailing_trim = trim;
        self
    }

    /// Returns the trailing trim.
    pub fn trailing_trim(&self) -> usize {
        self.trailing_trim
    }
}
