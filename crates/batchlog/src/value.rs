//! crates/batchlog/src/value.rs
//! Values and directives that can be appended to a [`LogHandle`](crate::LogHandle).

use std::fmt;
use std::io;

use crate::number::Significant;
use crate::sink::OutputSink;

/// Something that can be appended to a [`LogHandle`](crate::LogHandle).
///
/// Plain values render through the shared [`OutputSink`]; [`Directive`]s change
/// the sink's state; [`HideIf`] changes the handle itself. Every kind is gated
/// by the handle's visibility except [`HideIf`], which is how a statement
/// regains control of its own visibility.
pub trait LogValue {
    /// Renders the value into the sink.
    fn render(&self, sink: &mut OutputSink) -> io::Result<()>;

    /// Returns the hide flag carried by a [`HideIf`] token.
    ///
    /// Values that are not visibility overrides return `None`, which is the
    /// default.
    fn hide_request(&self) -> Option<bool> {
        None
    }
}

impl<T> LogValue for &T
where
    T: LogValue + ?Sized,
{
    fn render(&self, sink: &mut OutputSink) -> io::Result<()> {
        (**self).render(sink)
    }

    fn hide_request(&self) -> Option<bool> {
        (**self).hide_request()
    }
}

macro_rules! display_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LogValue for $ty {
                fn render(&self, sink: &mut OutputSink) -> io::Result<()> {
                    sink.write_display(&self)
                }
            }
        )*
    };
}

display_values!(
    str, String, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    Significant,
);

impl LogValue for f64 {
    fn render(&self, sink: &mut OutputSink) -> io::Result<()> {
        sink.write_float(*self)
    }
}

impl LogValue for f32 {
    fn render(&self, sink: &mut OutputSink) -> io::Result<()> {
        sink.write_float(f64::from(*self))
    }
}

impl LogValue for fmt::Arguments<'_> {
    fn render(&self, sink: &mut OutputSink) -> io::Result<()> {
        sink.write_fmt(*self)
    }
}

/// Appends any [`Display`](fmt::Display) type that has no [`LogValue`] impl
/// of its own.
///
/// ```
/// use batchlog::{Displayed, LogConfig, LogContext};
/// use std::path::Path;
///
/// let context = LogContext::with_writer(LogConfig::default(), std::io::sink());
/// context.log(0).put(Displayed(Path::new("net.txt").display()));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Displayed<T>(pub T);

impl<T> LogValue for Displayed<T>
where
    T: fmt::Display,
{
    fn render(&self, sink: &mut OutputSink) -> io::Result<()> {
        sink.write_display(&self.0)
    }
}

/// Sink-level formatting directives.
///
/// Directives are gated like any other value: a directive appended to an
/// invisible handle has no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Ends the line and flushes the sink.
    Newline,
    /// Sets the significant digits for every later float on the sink.
    Precision(usize),
    /// Flushes the sink without writing anything.
    Flush,
}

impl LogValue for Directive {
    fn render(&self, sink: &mut OutputSink) -> io::Result<()> {
        match *self {
            Self::Newline => sink.newline(),
            Self::Precision(precision) => {
                sink.set_precision(precision);
                Ok(())
            }
            Self::Flush => sink.flush(),
        }
    }
}

/// Visibility override applied in the middle of an append chain.
///
/// Appending `HideIf(flag)` calls [`LogHandle::hide`](crate::LogHandle::hide)
/// with `flag`: everything appended before it is unaffected, everything after
/// it is suppressed when `flag` is true.
///
/// ```
/// use batchlog::{HideIf, LogConfig, LogContext};
///
/// let context = LogContext::with_writer(LogConfig::default(), std::io::sink());
/// let trivial = true;
/// let mut handle = context.log(0);
/// handle.put("modules: 3").put(HideIf(trivial)).put(" (trivial)");
/// assert!(!handle.is_visible());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HideIf(pub bool);

impl LogValue for HideIf {
    fn render(&self, _sink: &mut OutputSink) -> io::Result<()> {
        Ok(())
    }

    fn hide_request(&self) -> Option<bool> {
        Some(self.0)
    }
}
