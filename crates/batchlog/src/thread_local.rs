//! crates/batchlog/src/thread_local.rs
//! Per-thread default context used by the free functions and macros.
//!
//! Programs that do not want to thread a [`LogContext`] through every call
//! can rely on the default one here. It prints to standard output and is
//! created on first use; [`install`] swaps in a configured context.

use std::cell::RefCell;
use std::path::PathBuf;

use crate::context::LogContext;
use crate::handle::LogHandle;

thread_local! {
    static CONTEXT: RefCell<LogContext> = RefCell::new(LogContext::default());
}

/// Replaces the current thread's context, returning the previous one.
pub fn install(context: LogContext) -> LogContext {
    CONTEXT.with(|current| current.replace(context))
}

/// Returns a handle to the current thread's context.
pub fn current() -> LogContext {
    CONTEXT.with(|current| current.borrow().clone())
}

/// Initialize verbosity, silence and number precision for the current thread.
pub fn init(verbose_level: u32, silent: bool, number_precision: usize) {
    current().init(verbose_level, silent, number_precision);
}

/// Creates a handle at `level` on the current thread's context.
pub fn log(level: u32) -> LogHandle {
    current().log(level)
}

/// Creates a handle bounded to `level..=max_level`.
pub fn log_range(level: u32, max_level: u32) -> LogHandle {
    current().log_range(level, max_level)
}

/// Changes the verbose level.
pub fn set_verbose_level(level: u32) {
    current().set_verbose_level(level);
}

/// Current verbose level.
pub fn verbose_level() -> u32 {
    current().verbose_level()
}

/// Silences or unsilences output.
pub fn set_silent(silent: bool) {
    current().set_silent(silent);
}

/// Reports whether output is silenced.
pub fn is_silent() -> bool {
    current().is_silent()
}

/// Opens one nesting level.
pub fn push_indent_level() {
    current().push_indent_level();
}

/// Closes one nesting level; reports a diagnostic at depth zero.
pub fn pop_indent_level() {
    current().pop_indent_level();
}

/// Current nesting depth.
pub fn indent_level() -> usize {
    current().indent_level()
}

/// Indentation text for the current depth.
pub fn indent() -> String {
    current().indent().to_owned()
}

/// Chooses the benchmark file; only effective before the first record.
pub fn set_benchmark_filename(path: impl Into<PathBuf>) {
    current().set_benchmark_filename(path);
}

/// Appends one benchmark record.
pub fn benchmark(
    tag: &str,
    codelength: f64,
    num_top_modules: u32,
    num_non_trivial_top_modules: u32,
    num_levels: u32,
    write_only_tag: bool,
) {
    current().benchmark(
        tag,
        codelength,
        num_top_modules,
        num_non_trivial_top_modules,
        num_levels,
        write_only_tag,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogConfig;
    use test_support::SharedBuffer;

    fn capture() -> SharedBuffer {
        let buffer = SharedBuffer::new();
        install(LogContext::with_writer(LogConfig::default(), buffer.clone()));
        buffer
    }

    #[test]
    fn test_init_and_check() {
        let _buffer = capture();
        init(1, false, 6);

        assert!(log(0).is_visible());
        assert!(log(1).is_visible());
        assert!(!log(2).is_visible());
        assert!(!log_range(0, 0).is_visible());
    }

    #[test]
    fn reinit_overwrites_config() {
        let _buffer = capture();
        init(5, false, 6);
        assert_eq!(verbose_level(), 5);

        init(0, true, 6);
        assert_eq!(verbose_level(), 0);
        assert!(is_silent());
        assert!(!log(0).is_visible());
    }

    #[test]
    fn setters_affect_new_handles_only() {
        let buffer = capture();
        init(0, false, 6);
        let mut early = log(0);
        set_silent(true);
        early.put("early");
        log(0).put("late");
        set_silent(false);
        set_verbose_level(2);
        log(2).put(" two");
        assert_eq!(buffer.contents(), "early two");
    }

    #[test]
    fn indentation_is_per_thread() {
        let _buffer = capture();
        push_indent_level();
        push_indent_level();
        assert_eq!(indent(), "    ");
        let other = std::thread::spawn(indent_level).join().expect("thread joins");
        assert_eq!(other, 0);
        pop_indent_level();
        pop_indent_level();
        assert_eq!(indent_level(), 0);
    }

    #[test]
    fn install_returns_previous_context() {
        let first = SharedBuffer::new();
        install(LogContext::with_writer(LogConfig::new(3, false, 6), first));
        let previous = install(LogContext::with_writer(LogConfig::default(), SharedBuffer::new()));
        assert_eq!(previous.verbose_level(), 3);
        assert_eq!(verbose_level(), 0);
    }
}
