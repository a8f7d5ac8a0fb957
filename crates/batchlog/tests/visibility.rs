//! Integration tests for handle visibility.
//!
//! These tests verify that a handle's visibility follows the verbose level,
//! the silence flag and its own level range, that the result is a snapshot
//! taken at construction, and that hiding can only narrow it.

use batchlog::{HideIf, LogConfig, LogContext};
use proptest::prelude::*;
use test_support::SharedBuffer;

fn context(verbose_level: u32, silent: bool) -> (LogContext, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let context = LogContext::with_writer(LogConfig::default(), buffer.clone());
    context.init(verbose_level, silent, 6);
    (context, buffer)
}

// ============================================================================
// Level Gate Properties
// ============================================================================

proptest! {
    #[test]
    fn open_handle_visible_iff_level_at_most_verbose(verbose in 0u32..64, level in 0u32..64) {
        let (context, _buffer) = context(verbose, false);
        prop_assert_eq!(context.log(level).is_visible(), level <= verbose);
    }

    #[test]
    fn silence_hides_every_handle(
        verbose in any::<u32>(),
        level in any::<u32>(),
        max_level in any::<u32>(),
    ) {
        let (context, _buffer) = context(verbose, true);
        prop_assert!(!context.log_range(level, max_level).is_visible());
        prop_assert!(!context.log(level).is_visible());
    }

    #[test]
    fn bounded_handle_requires_verbose_in_range(
        verbose in 0u32..32,
        level in 0u32..32,
        max_level in 0u32..32,
    ) {
        let (context, _buffer) = context(verbose, false);
        let expected = level <= verbose && verbose <= max_level;
        prop_assert_eq!(context.log_range(level, max_level).is_visible(), expected);
    }

    #[test]
    fn hide_round_trip_restores_gate(verbose in 0u32..16, level in 0u32..16) {
        let (context, _buffer) = context(verbose, false);
        let mut handle = context.log(level);
        let gate = handle.level_visible();
        handle.hide(true);
        prop_assert!(!handle.is_visible());
        handle.hide(false);
        prop_assert_eq!(handle.is_visible(), gate);
    }
}

// ============================================================================
// Snapshot Semantics
// ============================================================================

/// Verifies the end-to-end scenario: level 0 visible, level 2 hidden, then
/// silence applies to handles built afterwards.
#[test]
fn silence_applies_on_next_construction() {
    let (context, _buffer) = context(1, false);
    assert!(context.log(0).is_visible());
    assert!(!context.log(2).is_visible());

    let before = context.log(0);
    context.set_silent(true);
    assert!(before.is_visible());
    assert!(!context.log(0).is_visible());
}

/// Verifies raising the verbose level does not revive an existing handle.
#[test]
fn raising_level_does_not_revive_existing_handle() {
    let (context, buffer) = context(0, false);
    let mut handle = context.log(2);
    context.set_verbose_level(5);
    handle.put("hidden");
    assert!(buffer.is_empty());

    handle.hide(false);
    handle.put("shown");
    assert_eq!(buffer.contents(), "shown");
}

/// Verifies hide(false) cannot widen visibility beyond the gate.
#[test]
fn hide_false_on_gated_handle_stays_hidden() {
    let (context, buffer) = context(0, false);
    let mut handle = context.log(3);
    handle.hide(true);
    handle.hide(false);
    handle.put("never");
    assert!(!handle.is_visible());
    assert!(buffer.is_empty());
}

/// Verifies an inverted range is a legal, permanently invisible handle.
#[test]
fn inverted_range_is_permanently_invisible() {
    let (context, buffer) = context(4, false);
    let mut handle = context.log_range(5, 3);
    handle.hide(false).put("x");
    assert!(buffer.is_empty());
}

// ============================================================================
// Chained Output
// ============================================================================

/// Verifies a prefix survives a mid-chain hide while the tail is dropped.
#[test]
fn hide_if_mid_chain_keeps_prefix() {
    let (context, buffer) = context(0, false);
    let codelength = 4.25;
    let improved = false;
    context
        .log(0)
        .put("codelength ")
        .put(codelength)
        .put(HideIf(!improved))
        .put(" (improved)")
        .newline();
    assert_eq!(buffer.contents(), "codelength 4.25");
}

/// Verifies precision set at init applies to every handle on the sink.
#[test]
fn init_precision_is_sink_wide() {
    let (context, buffer) = context(0, false);
    context.init(0, false, 3);
    context.log(0).put(1.0 / 3.0).put(' ');
    context.log_range(0, 0).put(2.0 / 3.0);
    assert_eq!(buffer.contents(), "0.333 0.667");
}
