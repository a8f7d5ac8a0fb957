#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `batchlog` is the console and instrumentation layer of a batch scientific
//! tool. It provides leveled, indentation-aware console output, a
//! tab-separated benchmark record file for performance studies, and debug
//! instrumentation that is selected with Cargo features and disappears from
//! the build when switched off.
//!
//! # Design
//!
//! All state lives in a [`LogContext`]: the [`LogConfig`] gate (verbose
//! level, silence, number precision), the shared console [`OutputSink`], the
//! [`IndentTracker`] and the [`BenchmarkRecorder`]. A context is created once
//! and cloned into every call site that needs it; each thread also has a
//! default context reached through the free functions ([`init`], [`log`],
//! [`push_indent_level`], [`benchmark`], ...) and the instrumentation macros.
//!
//! A [`LogHandle`] represents one logging statement. It snapshots the gate
//! when it is created and forwards every appended [`LogValue`] only while
//! visible, so a statement is either printed as a whole or not at all unless
//! it hides itself part-way with [`HideIf`].
//!
//! # Invariants
//!
//! - A handle is visible iff `!silent && level <= verbose_level <= max_level`
//!   at construction; only [`LogHandle::hide`] changes it afterwards, and only
//!   ever towards what the gate allows.
//! - The indent depth never goes below zero and is not capped; only emission
//!   through the instrumentation macros is capped by
//!   [`LogContext::max_indent_level`].
//! - The benchmark file is opened at most once per context.
//!
//! # Errors
//!
//! Nothing here fails from the caller's point of view. Console write errors
//! are ignored, an indentation underflow is reported on the diagnostics side
//! channel (standard error by default), and a benchmark file that cannot be
//! opened silently disables benchmark records. The crate's own anomalies are
//! additionally emitted as `tracing` events.
//!
//! # Examples
//!
//! ```
//! use batchlog::{HideIf, LogConfig, LogContext};
//!
//! let context = LogContext::with_writer(LogConfig::default(), std::io::sink());
//! context.init(1, false, 6);
//!
//! let num_modules = 1;
//! context
//!     .log(0)
//!     .put("found ")
//!     .put(num_modules)
//!     .put(" module")
//!     .put(HideIf(num_modules == 1))
//!     .put("s")
//!     .newline();
//!
//! let _scope = context.indented();
//! context.log(2).put("only with -vv").newline();
//! ```

mod benchmark;
mod config;
mod context;
mod handle;
mod indent;
pub mod instrument;
mod number;
mod sink;
mod thread_local;
#[cfg(feature = "tracing-bridge")]
mod tracing_bridge;
mod value;

pub use benchmark::{BENCHMARK_PRECISION, BenchmarkError, BenchmarkRecord, BenchmarkRecorder};
pub use config::{DEFAULT_NUMBER_PRECISION, LogConfig};
pub use context::LogContext;
pub use handle::LogHandle;
pub use indent::{INDENT_WIDTH, IndentGuard, IndentTracker, MAX_INDENT_LEVEL, Pop};
pub use instrument::{FunctionPrefix, InstrumentationSwitches};
pub use number::Significant;
pub use sink::OutputSink;
pub use thread_local::{
    benchmark, current, indent, indent_level, init, install, is_silent, log, log_range,
    pop_indent_level, push_indent_level, set_benchmark_filename, set_silent, set_verbose_level,
    verbose_level,
};
#[cfg(feature = "tracing-bridge")]
pub use tracing_bridge::{VerbosityLayer, init_tracing, init_tracing_with_filter};
pub use value::{Directive, Displayed, HideIf, LogValue};
