//! crates/batchlog/src/sink.rs
//! The shared console writer behind every [`LogHandle`](crate::LogHandle).

use std::fmt;
use std::io::{self, Write};
use std::mem;

use crate::config::DEFAULT_NUMBER_PRECISION;
use crate::number::Significant;

/// Console writer shared by all handles of one [`LogContext`](crate::LogContext).
///
/// The sink owns the number precision: a [`Directive::Precision`] appended
/// through any handle changes how every later float is rendered, regardless
/// of which handle appends it.
///
/// [`Directive::Precision`]: crate::Directive::Precision
pub struct OutputSink {
    writer: Box<dyn Write>,
    precision: usize,
}

impl OutputSink {
    /// Creates a sink around `writer` with the default precision.
    #[must_use]
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + 'static,
    {
        Self {
            writer: Box::new(writer),
            precision: DEFAULT_NUMBER_PRECISION,
        }
    }

    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Significant digits used for floats.
    #[must_use]
    pub const fn precision(&self) -> usize {
        self.precision
    }

    /// Changes the significant digits used for subsequent floats.
    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision;
    }

    /// Writes a float using the sink's precision.
    pub fn write_float(&mut self, value: f64) -> io::Result<()> {
        write!(self.writer, "{}", Significant::new(value, self.precision))
    }

    /// Writes any displayable value verbatim.
    pub fn write_display(&mut self, value: &dyn fmt::Display) -> io::Result<()> {
        write!(self.writer, "{value}")
    }

    /// Writes preformatted arguments.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.writer.write_fmt(args)
    }

    /// Ends the current line and flushes, like `std::endl`.
    pub fn newline(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Swaps in a new writer and returns the previous one.
    ///
    /// The precision is kept, so a caller can redirect console output (for
    /// example into a capture buffer) without reapplying `init`.
    #[must_use = "the returned writer may hold buffered output"]
    pub fn replace_writer<W>(&mut self, writer: W) -> Box<dyn Write>
    where
        W: Write + 'static,
    {
        mem::replace(&mut self.writer, Box::new(writer))
    }
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputSink")
            .field("precision", &self.precision)
            .finish_non_exhaustive()
    }
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::stdout()
    }
}
