//! crates/batchlog/src/config.rs
//! Verbosity gate configuration: level, silence and number precision.

/// Precision applied to floating-point output when none is configured.
///
/// Matches the default of a C++ output stream, which the benchmark format and
/// the console output of earlier releases were written against.
pub const DEFAULT_NUMBER_PRECISION: usize = 6;

/// Process-wide output configuration consulted by every
/// [`LogHandle`](crate::LogHandle) when it is constructed.
///
/// No validation is performed on any field: a verbose level that makes every
/// handle invisible is a legal configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Highest level that is still printed.
    pub verbose_level: u32,
    /// Suppresses every gated handle when set.
    pub silent: bool,
    /// Significant digits used when a float is appended to the console.
    pub number_precision: usize,
}

impl LogConfig {
    /// Creates a configuration from the three values supplied by the
    /// command line.
    #[must_use]
    pub const fn new(verbose_level: u32, silent: bool, number_precision: usize) -> Self {
        Self {
            verbose_level,
            silent,
            number_precision,
        }
    }

    /// Evaluates the visibility gate for a handle bound to `level..=max_level`.
    ///
    /// ```
    /// use batchlog::LogConfig;
    ///
    /// let config = LogConfig::new(1, false, 6);
    /// assert!(config.level_visible(0, u32::MAX));
    /// assert!(config.level_visible(1, u32::MAX));
    /// assert!(!config.level_visible(2, u32::MAX));
    /// assert!(!config.level_visible(0, 0));
    /// ```
    #[must_use]
    pub const fn level_visible(&self, level: u32, max_level: u32) -> bool {
        !self.silent && self.verbose_level >= level && self.verbose_level <= max_level
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(0, false, DEFAULT_NUMBER_PRECISION)
    }
}
