//! crates/batchlog/src/instrument/mod.rs
//! Build-time instrumentation switches.
//!
//! Each switch is a Cargo feature of this crate. A macro whose switch is off
//! expands to `()`, so its arguments are never evaluated and nothing of it
//! reaches the binary. The helpers the enabled macros call are compiled only
//! under the same features.
//!
//! | Feature | Macro |
//! | --- | --- |
//! | `debug-trace` | [`debug_out!`](crate::debug_out), [`debug_exec!`](crate::debug_exec) |
//! | *not* `debug-trace` | [`release_out!`](crate::release_out), [`indented_release_out!`](crate::indented_release_out) |
//! | `function-name` / `pretty-function-name` | `@name: ` prefix on `debug_out!` |
//! | `logger-time` | `HH:MM:SS ` prefix on `debug_out!` |
//! | `info-out` | [`info_out!`](crate::info_out) |
//! | `scope-trace` | [`trace_scope!`](crate::trace_scope) |
//! | `assert-enabled` | [`check!`](crate::check) |
//!
//! [`all_out!`](crate::all_out) is always available.

mod macros;

/// How `debug_out!` names the enclosing function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionPrefix {
    /// No function prefix.
    None,
    /// Last path segment, e.g. `@partition: `.
    Short,
    /// Full path, e.g. `@infomap::core::partition: `.
    Pretty,
}

/// Instrumentation selected when this crate was compiled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstrumentationSwitches {
    /// `debug_out!` is compiled in.
    pub debug_trace: bool,
    /// Function prefix used by `debug_out!`.
    pub function_prefix: FunctionPrefix,
    /// `debug_out!` lines carry the time of day.
    pub time_prefix: bool,
    /// `info_out!` is compiled in.
    pub info_out: bool,
    /// `trace_scope!` is compiled in.
    pub scope_trace: bool,
    /// `check!` assertions are compiled in.
    pub assertions: bool,
}

impl InstrumentationSwitches {
    /// The switches of the current build.
    pub const ACTIVE: Self = Self {
        debug_trace: cfg!(feature = "debug-trace"),
        function_prefix: if cfg!(feature = "pretty-function-name") {
            FunctionPrefix::Pretty
        } else if cfg!(feature = "function-name") {
            FunctionPrefix::Short
        } else {
            FunctionPrefix::None
        },
        time_prefix: cfg!(feature = "logger-time"),
        info_out: cfg!(feature = "info-out"),
        scope_trace: cfg!(feature = "scope-trace"),
        assertions: cfg!(feature = "assert-enabled"),
    };

    /// Reports whether the `release_out!` family is compiled in.
    #[must_use]
    pub const fn release_out(&self) -> bool {
        !self.debug_trace
    }
}

/// Drops `::{{closure}}` segments from a path produced by
/// [`function_name!`](crate::function_name).
#[must_use]
pub fn pretty_function_name(path: &str) -> &str {
    let mut path = path;
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path
}

/// Last segment of a function path, with closure segments removed.
///
/// ```
/// use batchlog::instrument::short_function_name;
///
/// assert_eq!(short_function_name("infomap::core::partition"), "partition");
/// assert_eq!(short_function_name("app::run::{{closure}}"), "run");
/// assert_eq!(short_function_name("main"), "main");
/// ```
#[must_use]
pub fn short_function_name(path: &str) -> &str {
    let path = pretty_function_name(path);
    path.rsplit_once("::").map_or(path, |(_, last)| last)
}

#[cfg(feature = "debug-trace")]
fn function_prefix(function: &str) -> String {
    match InstrumentationSwitches::ACTIVE.function_prefix {
        FunctionPrefix::None => String::new(),
        FunctionPrefix::Short => format!("@{}: ", short_function_name(function)),
        FunctionPrefix::Pretty => format!("@{}: ", pretty_function_name(function)),
    }
}

#[cfg(feature = "logger-time")]
fn time_prefix() -> String {
    use time::OffsetDateTime;
    use time::macros::format_description;

    let time_of_day =
        format_description!("[hour padding:zero]:[minute padding:zero]:[second padding:zero]");

    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(time_of_day)
        .map(|stamp| stamp + " ")
        .unwrap_or_default()
}

#[cfg(all(feature = "debug-trace", not(feature = "logger-time")))]
fn time_prefix() -> String {
    String::new()
}

/// Backs `debug_out!`: indentation, optional time and function prefixes,
/// then the message, unless the depth exceeds the display cap.
#[cfg(feature = "debug-trace")]
#[doc(hidden)]
pub fn __debug_line(function: &str, args: std::fmt::Arguments<'_>) {
    let context = crate::current();
    let time = time_prefix();
    let function = function_prefix(function);
    context.emit_indented(format_args!("{time}{function}{args}"));
}

/// Backs `trace_scope!`.
#[cfg(feature = "scope-trace")]
#[doc(hidden)]
pub fn __scope_entry(file: &str, function: &str) {
    crate::current().emit(format_args!("{file}: {}\n", pretty_function_name(function)));
}
