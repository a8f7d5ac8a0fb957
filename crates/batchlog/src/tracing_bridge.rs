//! crates/batchlog/src/tracing_bridge.rs
//! Bridge between the tracing crate and the verbosity gate.
//!
//! [`VerbosityLayer`] lets library code use the standard tracing macros while
//! the program's console output stays governed by `--verbose`/`--silent`:
//! each event is turned into a [`LogHandle`](crate::LogHandle) on the
//! emitting thread's context, at the verbose level its tracing level maps to.
//!
//! # Usage
//!
//! ```rust,ignore
//! batchlog::init(1, false, 6);
//! batchlog::init_tracing()?;
//!
//! tracing::info!("read 120 nodes");      // printed at verbose level 0
//! tracing::debug!("built flow network"); // printed at verbose level 1
//! tracing::trace!("teleport rate 0.15"); // needs verbose level 2
//! ```

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

/// Target prefix of this crate's own diagnostics, which never reach the
/// console through the bridge.
const OWN_TARGET: &str = "batchlog";

/// A tracing layer that prints events through the current thread's
/// [`LogContext`](crate::LogContext).
#[derive(Clone, Debug, Default)]
pub struct VerbosityLayer {
    target_prefix: Option<&'static str>,
}

impl VerbosityLayer {
    /// Forwards events from every target.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            target_prefix: None,
        }
    }

    /// Forwards only events whose target starts with `prefix`.
    #[must_use]
    pub const fn with_target_prefix(prefix: &'static str) -> Self {
        Self {
            target_prefix: Some(prefix),
        }
    }

    /// Map a tracing level to a verbose level.
    const fn level_to_verbose_level(level: &Level) -> u32 {
        match *level {
            Level::ERROR | Level::WARN | Level::INFO => 0,
            Level::DEBUG => 1,
            Level::TRACE => 2,
        }
    }

    fn accepts_target(&self, target: &str) -> bool {
        if target.starts_with(OWN_TARGET) {
            return false;
        }
        self.target_prefix
            .is_none_or(|prefix| target.starts_with(prefix))
    }
}

impl<S> Layer<S> for VerbosityLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !self.accepts_target(metadata.target()) {
            return;
        }

        let mut handle = crate::log(Self::level_to_verbose_level(metadata.level()));
        if !handle.is_visible() {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            handle.put(message).newline();
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global subscriber that prints tracing events through the
/// verbosity gate.
pub fn init_tracing() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(VerbosityLayer::new())
        .try_init()
}

/// Installs the bridge behind an additional filter layer, for example a
/// `LevelFilter` or a `filter::Targets` list.
pub fn init_tracing_with_filter<F>(filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(VerbosityLayer::new())
        .try_init()
}
