//! crates/batchlog/src/context.rs
//! The owned logging context shared by handles, guards and macros.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::benchmark::BenchmarkRecorder;
use crate::config::LogConfig;
use crate::handle::LogHandle;
use crate::indent::{IndentGuard, IndentTracker, MAX_INDENT_LEVEL, Pop};
use crate::sink::OutputSink;
use crate::value::{Directive, LogValue};

/// Gate configuration, console sink, indentation and benchmark file of one
/// program run.
///
/// A context is created once at startup and handed to every call site that
/// logs. Cloning is cheap and yields another handle to the same state. The
/// context is deliberately `!Send`: it assumes all logging happens on one
/// thread.
///
/// ```
/// use batchlog::{LogConfig, LogContext};
///
/// let context = LogContext::with_writer(LogConfig::default(), std::io::sink());
/// context.init(1, false, 4);
/// context.log(1).put("pi ~ ").put(std::f64::consts::PI).newline();
///
/// context.push_indent_level();
/// assert_eq!(&*context.indent(), "  ");
/// context.pop_indent_level();
/// ```
#[derive(Clone)]
pub struct LogContext {
    inner: Rc<Inner>,
}

struct Inner {
    config: Cell<LogConfig>,
    sink: RefCell<OutputSink>,
    indent: RefCell<IndentTracker>,
    max_indent_level: Cell<usize>,
    benchmark: RefCell<BenchmarkRecorder>,
    diagnostics: RefCell<Box<dyn Write>>,
    started: Instant,
}

impl LogContext {
    /// Creates a context printing to standard output, with diagnostics on
    /// standard error.
    ///
    /// `config` is stored as-is; call [`init`](Self::init) to also push the
    /// number precision into the sink.
    #[must_use]
    pub fn new(config: LogConfig) -> Self {
        Self::from_parts(config, OutputSink::stdout(), Box::new(io::stderr()))
    }

    /// Creates a context printing to `writer`, with diagnostics on standard
    /// error.
    #[must_use]
    pub fn with_writer<W>(config: LogConfig, writer: W) -> Self
    where
        W: Write + 'static,
    {
        Self::from_parts(config, OutputSink::new(writer), Box::new(io::stderr()))
    }

    fn from_parts(config: LogConfig, sink: OutputSink, diagnostics: Box<dyn Write>) -> Self {
        let started = Instant::now();
        Self {
            inner: Rc::new(Inner {
                config: Cell::new(config),
                sink: RefCell::new(sink),
                indent: RefCell::new(IndentTracker::new()),
                max_indent_level: Cell::new(MAX_INDENT_LEVEL),
                benchmark: RefCell::new(BenchmarkRecorder::new(started)),
                diagnostics: RefCell::new(diagnostics),
                started,
            }),
        }
    }

    // ------------------------------------------------------------------
    // Verbosity gate
    // ------------------------------------------------------------------

    /// Establishes the verbose level, silence and number precision.
    ///
    /// The precision is applied to the shared sink through a level-0 handle,
    /// so it only takes effect when such a handle is visible, i.e. when
    /// `silent` is false.
    pub fn init(&self, verbose_level: u32, silent: bool, number_precision: usize) {
        self.inner
            .config
            .set(LogConfig::new(verbose_level, silent, number_precision));
        self.log(0).put(Directive::Precision(number_precision));
    }

    /// Current gate configuration.
    #[must_use]
    pub fn config(&self) -> LogConfig {
        self.inner.config.get()
    }

    /// Changes the verbose level for handles created from now on.
    pub fn set_verbose_level(&self, level: u32) {
        let mut config = self.config();
        config.verbose_level = level;
        self.inner.config.set(config);
    }

    /// Current verbose level.
    #[must_use]
    pub fn verbose_level(&self) -> u32 {
        self.config().verbose_level
    }

    /// Silences (or unsilences) handles created from now on.
    pub fn set_silent(&self, silent: bool) {
        let mut config = self.config();
        config.silent = silent;
        self.inner.config.set(config);
    }

    /// Reports whether output is silenced.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.config().silent
    }

    // ------------------------------------------------------------------
    // Handles and the console sink
    // ------------------------------------------------------------------

    /// Creates a handle printing at `level` and every more verbose level.
    #[must_use]
    pub fn log(&self, level: u32) -> LogHandle {
        self.log_range(level, u32::MAX)
    }

    /// Creates a handle printing only while `level <= verbose_level <= max_level`.
    #[must_use]
    pub fn log_range(&self, level: u32, max_level: u32) -> LogHandle {
        LogHandle::new(self.clone(), level, max_level)
    }

    pub(crate) fn render(&self, value: &dyn LogValue) -> io::Result<()> {
        value.render(&mut self.inner.sink.borrow_mut())
    }

    /// Writes straight to the console, bypassing the gate.
    ///
    /// Used by the always-on output macros.
    pub fn emit(&self, args: fmt::Arguments<'_>) {
        let _ = self.inner.sink.borrow_mut().write_fmt(args);
    }

    /// Writes the current indentation followed by `args`, unless the depth
    /// exceeds [`max_indent_level`](Self::max_indent_level).
    ///
    /// Returns whether anything was written.
    pub fn emit_indented(&self, args: fmt::Arguments<'_>) -> bool {
        if self.indent_level() > self.max_indent_level() {
            return false;
        }
        self.refresh_indent();
        let indent = self.inner.indent.borrow();
        let mut sink = self.inner.sink.borrow_mut();
        let _ = sink.write_display(&indent.cached());
        let _ = sink.write_fmt(args);
        true
    }

    /// Flushes the console sink.
    pub fn flush(&self) {
        let _ = self.inner.sink.borrow_mut().flush();
    }

    /// Redirects console output, returning the previous writer.
    #[must_use = "the returned writer may hold buffered output"]
    pub fn replace_writer<W>(&self, writer: W) -> Box<dyn Write>
    where
        W: Write + 'static,
    {
        self.inner.sink.borrow_mut().replace_writer(writer)
    }

    /// Redirects the diagnostics side channel, returning the previous writer.
    #[must_use = "the returned writer may hold buffered diagnostics"]
    pub fn replace_diagnostics<W>(&self, writer: W) -> Box<dyn Write>
    where
        W: Write + 'static,
    {
        std::mem::replace(&mut *self.inner.diagnostics.borrow_mut(), Box::new(writer))
    }

    fn diagnostic(&self, message: &str) {
        tracing::warn!("{message}");
        let mut diagnostics = self.inner.diagnostics.borrow_mut();
        let _ = writeln!(diagnostics, "Warning: {message}");
        let _ = diagnostics.flush();
    }

    // ------------------------------------------------------------------
    // Indentation
    // ------------------------------------------------------------------

    /// Opens one nesting level.
    pub fn push_indent_level(&self) {
        self.inner.indent.borrow_mut().push();
    }

    /// Closes one nesting level.
    ///
    /// At depth zero this reports a diagnostic on the side channel and leaves
    /// the depth at zero.
    pub fn pop_indent_level(&self) {
        let popped = self.inner.indent.borrow_mut().pop();
        if popped == Pop::Underflow {
            self.diagnostic("popping indent level when already zero");
        }
    }

    /// Current nesting depth.
    #[must_use]
    pub fn indent_level(&self) -> usize {
        self.inner.indent.borrow().depth()
    }

    /// Indentation for the current depth.
    ///
    /// The returned guard shares the tracker with other reads, so several
    /// indents can be alive at once; drop them all before pushing or popping.
    #[must_use]
    pub fn indent(&self) -> Ref<'_, str> {
        self.refresh_indent();
        Ref::map(self.inner.indent.borrow(), |tracker| tracker.cached())
    }

    // A tracker is never stale while a `Ref` from `indent` is alive, since
    // push and pop need the mutable borrow too.
    fn refresh_indent(&self) {
        let stale = self.inner.indent.borrow().is_stale();
        if stale {
            self.inner.indent.borrow_mut().indent();
        }
    }

    /// Opens a nesting level that closes when the guard drops.
    pub fn indented(&self) -> IndentGuard {
        IndentGuard::new(self.clone())
    }

    /// Deepest level at which indented instrumentation still prints.
    #[must_use]
    pub fn max_indent_level(&self) -> usize {
        self.inner.max_indent_level.get()
    }

    /// Changes the display cap. Depth tracking is unaffected.
    pub fn set_max_indent_level(&self, level: usize) {
        self.inner.max_indent_level.set(level);
    }

    // ------------------------------------------------------------------
    // Benchmark records
    // ------------------------------------------------------------------

    /// Chooses the benchmark file. Ignored after the first record.
    pub fn set_benchmark_filename(&self, path: impl Into<PathBuf>) {
        self.inner.benchmark.borrow_mut().set_path(path);
    }

    /// Appends one benchmark record, or only `tag` when `write_only_tag` is
    /// set. A no-op for the rest of the run if the file could not be opened.
    pub fn benchmark(
        &self,
        tag: &str,
        codelength: f64,
        num_top_modules: u32,
        num_non_trivial_top_modules: u32,
        num_levels: u32,
        write_only_tag: bool,
    ) {
        self.inner.benchmark.borrow_mut().record(
            tag,
            codelength,
            num_top_modules,
            num_non_trivial_top_modules,
            num_levels,
            write_only_tag,
        );
    }

    /// Flushes the benchmark file, if open.
    pub fn flush_benchmark(&self) {
        self.inner.benchmark.borrow_mut().flush();
    }

    /// Time since the context was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.inner.started.elapsed()
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContext")
            .field("config", &self.config())
            .field("indent_level", &self.indent_level())
            .field("benchmark", &*self.inner.benchmark.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::SharedBuffer;

    fn captured(config: LogConfig) -> (LogContext, SharedBuffer, SharedBuffer) {
        let output = SharedBuffer::new();
        let diagnostics = SharedBuffer::new();
        let context = LogContext::with_writer(config, output.clone());
        let _stderr = context.replace_diagnostics(diagnostics.clone());
        (context, output, diagnostics)
    }

    #[test]
    fn init_applies_precision_to_the_sink() {
        let (context, output, _) = captured(LogConfig::default());
        context.init(0, false, 3);
        context.log(0).put(3.14159);
        assert_eq!(output.contents(), "3.14");
        assert_eq!(context.config(), LogConfig::new(0, false, 3));
    }

    #[test]
    fn silent_init_leaves_sink_precision_alone() {
        let (context, output, _) = captured(LogConfig::default());
        context.init(0, true, 2);
        context.set_silent(false);
        context.log(0).put(3.14159);
        assert_eq!(output.contents(), "3.14159");
    }

    #[test]
    fn accessors_round_trip() {
        let context = LogContext::with_writer(LogConfig::default(), io::sink());
        context.set_verbose_level(4);
        context.set_silent(true);
        assert_eq!(context.verbose_level(), 4);
        assert!(context.is_silent());
    }

    #[test]
    fn underflow_goes_to_the_side_channel() {
        let (context, output, diagnostics) = captured(LogConfig::default());
        context.pop_indent_level();
        assert_eq!(context.indent_level(), 0);
        assert!(output.is_empty());
        assert_eq!(
            diagnostics.contents(),
            "Warning: popping indent level when already zero\n"
        );
    }

    #[test]
    fn guard_pops_on_drop() {
        let context = LogContext::with_writer(LogConfig::default(), io::sink());
        {
            let _outer = context.indented();
            let _inner = context.indented();
            assert_eq!(context.indent_level(), 2);
            assert_eq!(context.indent().len(), 4);
        }
        assert_eq!(context.indent_level(), 0);
        assert_eq!(&*context.indent(), "");
    }

    #[test]
    fn emit_indented_respects_the_cap() {
        let (context, output, _) = captured(LogConfig::default());
        context.set_max_indent_level(1);
        context.push_indent_level();
        assert!(context.emit_indented(format_args!("one\n")));
        context.push_indent_level();
        assert!(!context.emit_indented(format_args!("two\n")));
        assert_eq!(context.indent_level(), 2);
        assert_eq!(output.contents(), "  one\n");
    }

    #[test]
    fn indent_can_be_read_twice_in_one_statement() {
        let (context, output, _) = captured(LogConfig::default());
        context.push_indent_level();
        context
            .log(0)
            .put(&*context.indent())
            .put("x")
            .put(&*context.indent());
        assert_eq!(output.contents(), "  x  ");
    }

    #[test]
    fn emit_indented_accepts_a_live_indent() {
        let (context, output, _) = captured(LogConfig::default());
        context.push_indent_level();
        assert!(context.emit_indented(format_args!("[{}]\n", &*context.indent())));
        assert_eq!(output.contents(), "  [  ]\n");
    }

    #[test]
    fn emit_ignores_silence() {
        let (context, output, _) = captured(LogConfig::new(0, true, 6));
        context.emit(format_args!("always"));
        assert_eq!(output.contents(), "always");
    }

    #[test]
    fn clones_share_state() {
        let context = LogContext::with_writer(LogConfig::default(), io::sink());
        let other = context.clone();
        other.set_verbose_level(7);
        other.push_indent_level();
        assert_eq!(context.verbose_level(), 7);
        assert_eq!(context.indent_level(), 1);
    }
}
