//! crates/batchlog/src/indent.rs
//! Nesting depth and the indentation text derived from it.

/// Spaces added per nesting level.
pub const INDENT_WIDTH: usize = 2;

/// Deepest nesting level at which instrumentation still prints by default.
///
/// The tracker itself never enforces this cap; it is read by the
/// instrumentation macros, so tracking stays unbounded while emission is
/// capped.
pub const MAX_INDENT_LEVEL: usize = 10;

/// Tracks how many logical scopes are currently open.
///
/// The indentation string is memoised and regenerated only when the depth has
/// changed since it was last read.
#[derive(Clone, Debug)]
pub struct IndentTracker {
    depth: usize,
    width: usize,
    cached: String,
}

/// Result of a [`IndentTracker::pop`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pop {
    /// The depth was decremented.
    Popped,
    /// The depth was already zero and is left unchanged.
    Underflow,
}

impl IndentTracker {
    /// Creates a tracker at depth zero using [`INDENT_WIDTH`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            depth: 0,
            width: INDENT_WIDTH,
            cached: String::new(),
        }
    }

    /// Opens one more nesting level. There is no upper bound.
    pub fn push(&mut self) {
        self.depth += 1;
    }

    /// Closes one nesting level, clamping at zero.
    pub fn pop(&mut self) -> Pop {
        match self.depth.checked_sub(1) {
            Some(depth) => {
                self.depth = depth;
                Pop::Popped
            }
            None => Pop::Underflow,
        }
    }

    /// Current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Spaces per level.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns `depth * width` spaces.
    pub fn indent(&mut self) -> &str {
        if self.is_stale() {
            self.cached = " ".repeat(self.depth * self.width);
        }
        &self.cached
    }

    /// Reports whether the memoised text no longer matches the depth.
    pub(crate) fn is_stale(&self) -> bool {
        self.cached.len() != self.depth * self.width
    }

    /// Last text produced by [`indent`](Self::indent).
    pub(crate) fn cached(&self) -> &str {
        &self.cached
    }
}

impl Default for IndentTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard that keeps one indentation level open while it is alive.
///
/// Created by [`LogContext::indented`](crate::LogContext::indented). Dropping
/// the guard pops the level it pushed.
#[must_use = "dropping the guard immediately closes the indentation level"]
pub struct IndentGuard {
    context: crate::LogContext,
}

impl IndentGuard {
    pub(crate) fn new(context: crate::LogContext) -> Self {
        context.push_indent_level();
        Self { context }
    }
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        self.context.pop_indent_level();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_tracks_depth() {
        let mut tracker = IndentTracker::new();
        assert_eq!(tracker.indent(), "");
        tracker.push();
        tracker.push();
        assert_eq!(tracker.indent(), "    ");
        assert_eq!(tracker.depth(), 2);
        assert_eq!(tracker.pop(), Pop::Popped);
        assert_eq!(tracker.indent().len(), INDENT_WIDTH);
    }

    #[test]
    fn pop_at_zero_clamps() {
        let mut tracker = IndentTracker::new();
        assert_eq!(tracker.pop(), Pop::Underflow);
        assert_eq!(tracker.depth(), 0);
        assert_eq!(tracker.indent(), "");
    }

    #[test]
    fn staleness_follows_depth_changes() {
        let mut tracker = IndentTracker::new();
        assert!(!tracker.is_stale());
        tracker.push();
        assert!(tracker.is_stale());
        tracker.indent();
        assert!(!tracker.is_stale());
        tracker.pop();
        assert!(tracker.is_stale());
    }

    #[test]
    fn depth_is_not_capped() {
        let mut tracker = IndentTracker::default();
        for _ in 0..MAX_INDENT_LEVEL + 5 {
            tracker.push();
        }
        assert_eq!(tracker.depth(), MAX_INDENT_LEVEL + 5);
        assert_eq!(tracker.indent().len(), (MAX_INDENT_LEVEL + 5) * tracker.width());
    }
}
