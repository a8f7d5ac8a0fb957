//! crates/batchlog/src/handle.rs
//! Per-statement log handles gated by a visibility snapshot.

use std::fmt;

use crate::context::LogContext;
use crate::value::{Directive, LogValue};

/// A single logging statement bound to a verbosity range.
///
/// Visibility is computed once, when the handle is created, from the
/// context's [`LogConfig`](crate::LogConfig). Changing the configuration
/// afterwards does not affect an existing handle; only [`hide`](Self::hide)
/// does. Cloning a handle copies that snapshot.
///
/// ```
/// use batchlog::{LogConfig, LogContext};
///
/// let context = LogContext::with_writer(LogConfig::new(1, false, 6), std::io::sink());
/// assert!(context.log(0).is_visible());
/// assert!(context.log(1).is_visible());
/// assert!(!context.log(2).is_visible());
/// assert!(!context.log_range(0, 0).is_visible());
/// ```
#[derive(Clone)]
pub struct LogHandle {
    context: LogContext,
    level: u32,
    max_level: u32,
    visible: bool,
}

impl LogHandle {
    pub(crate) fn new(context: LogContext, level: u32, max_level: u32) -> Self {
        let visible = context.config().level_visible(level, max_level);
        Self {
            context,
            level,
            max_level,
            visible,
        }
    }

    /// Appends a value, directive or [`HideIf`](crate::HideIf) token.
    ///
    /// Values and directives are dropped while the handle is invisible.
    /// Write errors on the console are ignored.
    pub fn put<T>(&mut self, value: T) -> &mut Self
    where
        T: LogValue,
    {
        if let Some(flag) = value.hide_request() {
            return self.hide(flag);
        }
        if self.visible {
            let _ = self.context.render(&value);
        }
        self
    }

    /// Shorthand for appending [`Directive::Newline`].
    pub fn newline(&mut self) -> &mut Self {
        self.put(Directive::Newline)
    }

    /// Hides the handle when `flag` is true; otherwise restores the
    /// visibility the current gate allows.
    ///
    /// Never makes a handle visible that the level and silence gate would
    /// reject.
    pub fn hide(&mut self, flag: bool) -> &mut Self {
        self.visible = !flag && self.level_visible();
        self
    }

    /// Re-evaluates the gate against the context's current configuration.
    #[must_use]
    pub fn level_visible(&self) -> bool {
        self.context
            .config()
            .level_visible(self.level, self.max_level)
    }

    /// Reports whether appends are currently forwarded.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Lowest verbose level at which the handle prints.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Highest verbose level at which the handle prints.
    #[must_use]
    pub const fn max_level(&self) -> u32 {
        self.max_level
    }
}

impl fmt::Write for LogHandle {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put(s);
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.put(args);
        Ok(())
    }
}

impl fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHandle")
            .field("level", &self.level)
            .field("max_level", &self.max_level)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::{HideIf, LogConfig, LogContext};
    use std::fmt::Write as _;
    use test_support::SharedBuffer;

    fn context(verbose_level: u32) -> (LogContext, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let context = LogContext::with_writer(
            LogConfig::new(verbose_level, false, 6),
            buffer.clone(),
        );
        (context, buffer)
    }

    #[test]
    fn visible_handle_forwards_chained_values() {
        let (context, buffer) = context(1);
        context.log(1).put("codelength ").put(4.5).put(" bits").newline();
        assert_eq!(buffer.contents(), "codelength 4.5 bits\n");
    }

    #[test]
    fn invisible_handle_drops_values_and_directives() {
        let (context, buffer) = context(0);
        context
            .log(1)
            .put("hidden")
            .put(crate::Directive::Precision(2))
            .newline();
        context.log(0).put(1.23456);
        assert_eq!(buffer.contents(), "1.23456");
    }

    #[test]
    fn snapshot_survives_config_changes() {
        let (context, buffer) = context(0);
        let mut handle = context.log(0);
        context.set_silent(true);
        handle.put("still printed");
        assert!(!context.log(0).is_visible());
        assert_eq!(buffer.contents(), "still printed");
    }

    #[test]
    fn hide_rereads_the_gate() {
        let (context, _buffer) = context(0);
        let mut handle = context.log(0);
        context.set_silent(true);
        handle.hide(false);
        assert!(!handle.is_visible());
    }

    #[test]
    fn hide_if_suppresses_the_rest_of_the_statement() {
        let (context, buffer) = context(0);
        context
            .log(0)
            .put("modules: 3")
            .put(HideIf(true))
            .put(" (details)")
            .newline();
        context
            .log(0)
            .put("modules: 4")
            .put(HideIf(false))
            .put(" (details)")
            .newline();
        assert_eq!(buffer.contents(), "modules: 3modules: 4 (details)\n");
    }

    #[test]
    fn clone_copies_visibility_not_the_gate() {
        let (context, _buffer) = context(0);
        let mut original = context.log(0);
        original.hide(true);
        let copy = original.clone();
        assert!(!copy.is_visible());
        assert_eq!(copy.level(), 0);
        assert_eq!(copy.max_level(), u32::MAX);
    }

    #[test]
    fn fmt_write_is_gated() {
        let (context, buffer) = context(0);
        write!(context.log(0), "{}+{}", 1, 2).expect("write succeeds");
        write!(context.log(3), "never").expect("write succeeds");
        assert_eq!(buffer.contents(), "1+2");
    }
}
