//! crates/batchlog/src/instrument/macros.rs
//! Instrumentation macros writing through the current thread's context.
//!
//! Disabled variants expand to `()`: the format arguments are not evaluated.

/// Full path of the enclosing function, as a `&'static str`.
///
/// # Example
/// ```
/// fn partition() -> &'static str {
///     batchlog::function_name!()
/// }
/// assert!(partition().ends_with("partition"));
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __batchlog_probe() {}
        fn __batchlog_type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let name = __batchlog_type_name_of(__batchlog_probe);
        name.strip_suffix("::__batchlog_probe").unwrap_or(name)
    }};
}

/// Indented debug trace, capped at the context's maximum indent level.
///
/// Compiled in with the `debug-trace` feature; prefixed with the time and
/// function name when `logger-time` and `function-name` /
/// `pretty-function-name` are enabled.
///
/// # Example
/// ```ignore
/// debug_out!("moved node {} to module {}\n", node, module);
/// ```
#[cfg(feature = "debug-trace")]
#[macro_export]
macro_rules! debug_out {
    ($($arg:tt)*) => {
        $crate::instrument::__debug_line($crate::function_name!(), ::core::format_args!($($arg)*))
    };
}

/// Indented debug trace. Compiled out: enable the `debug-trace` feature.
#[cfg(not(feature = "debug-trace"))]
#[macro_export]
macro_rules! debug_out {
    ($($arg:tt)*) => {
        ()
    };
}

/// Runs the enclosed statements only in `debug-trace` builds.
///
/// # Example
/// ```ignore
/// debug_exec! {
///     let flow = network.total_flow();
///     debug_out!("total flow {}\n", flow);
/// }
/// ```
#[cfg(feature = "debug-trace")]
#[macro_export]
macro_rules! debug_exec {
    ($($body:tt)*) => {{
        $($body)*
    }};
}

/// Runs the enclosed statements only in `debug-trace` builds. Compiled out.
#[cfg(not(feature = "debug-trace"))]
#[macro_export]
macro_rules! debug_exec {
    ($($body:tt)*) => {
        ()
    };
}

/// Unindented output for builds without `debug-trace`.
///
/// # Example
/// ```ignore
/// release_out!("trial {} ", trial);
/// ```
#[cfg(not(feature = "debug-trace"))]
#[macro_export]
macro_rules! release_out {
    ($($arg:tt)*) => {
        $crate::current().emit(::core::format_args!($($arg)*))
    };
}

/// Unindented output for builds without `debug-trace`. Compiled out.
#[cfg(feature = "debug-trace")]
#[macro_export]
macro_rules! release_out {
    ($($arg:tt)*) => {
        ()
    };
}

/// Indented output for builds without `debug-trace`, capped at the
/// context's maximum indent level.
///
/// # Example
/// ```ignore
/// indented_release_out!("level {} done\n", level);
/// ```
#[cfg(not(feature = "debug-trace"))]
#[macro_export]
macro_rules! indented_release_out {
    ($($arg:tt)*) => {{
        let _ = $crate::current().emit_indented(::core::format_args!($($arg)*));
    }};
}

/// Indented output for builds without `debug-trace`. Compiled out.
#[cfg(feature = "debug-trace")]
#[macro_export]
macro_rules! indented_release_out {
    ($($arg:tt)*) => {
        ()
    };
}

/// Always-on console output, independent of verbosity, silence and
/// indentation. Meant for top-level messages to the user.
///
/// # Example
/// ```
/// batchlog::all_out!("found {} modules\n", 3);
/// ```
#[macro_export]
macro_rules! all_out {
    ($($arg:tt)*) => {
        $crate::current().emit(::core::format_args!($($arg)*))
    };
}

/// Informational console output, compiled in with the `info-out` feature
/// (on by default).
///
/// # Example
/// ```ignore
/// info_out!("parsed {} links\n", links);
/// ```
#[cfg(feature = "info-out")]
#[macro_export]
macro_rules! info_out {
    ($($arg:tt)*) => {
        $crate::current().emit(::core::format_args!($($arg)*))
    };
}

/// Informational console output. Compiled out: enable `info-out`.
#[cfg(not(feature = "info-out"))]
#[macro_export]
macro_rules! info_out {
    ($($arg:tt)*) => {
        ()
    };
}

/// Prints `file: function` when the enclosing scope is entered.
///
/// # Example
/// ```ignore
/// fn coarse_tune() {
///     trace_scope!();
/// }
/// ```
#[cfg(feature = "scope-trace")]
#[macro_export]
macro_rules! trace_scope {
    () => {
        $crate::instrument::__scope_entry(::core::file!(), $crate::function_name!())
    };
}

/// Prints `file: function` on scope entry. Compiled out: enable
/// `scope-trace`.
#[cfg(not(feature = "scope-trace"))]
#[macro_export]
macro_rules! trace_scope {
    () => {
        ()
    };
}

/// Asserts a condition in builds with the `assert-enabled` feature.
///
/// Takes the same arguments as [`assert!`]. Without the feature the
/// condition is not evaluated.
///
/// # Example
/// ```ignore
/// check!(flow >= 0.0, "negative flow {}", flow);
/// ```
#[cfg(feature = "assert-enabled")]
#[macro_export]
macro_rules! check {
    ($($arg:tt)+) => {
        ::core::assert!($($arg)+)
    };
}

/// Asserts a condition. Compiled out: enable `assert-enabled`.
#[cfg(not(feature = "assert-enabled"))]
#[macro_export]
macro_rules! check {
    ($($arg:tt)+) => {
        ()
    };
}
