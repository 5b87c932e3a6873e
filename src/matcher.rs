//! Byte Matcher
//!
//! Exact comparison of a compiled tag byte sequence against a window of
//! input. The window may end mid-sequence; in that case the outcome is
//! `Insufficient` rather than a definitive mismatch, which is what lets
//! the tree builder carry a partial tag across chunk boundaries.

use crate::watch::compile::CompiledTagPair;

/// Outcome of testing one sequence at one window position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The full sequence is present at the offset.
    Match,
    /// The bytes at the offset definitively differ from the sequence.
    Mismatch,
    /// The window ended while the available bytes still matched; the
    /// comparison must be retried once more input arrives.
    Insufficient,
}

/// Compare `seq` against `window` starting at `offset`.
///
/// O(len(seq)), no allocation. `Insufficient` is only reported when every
/// available byte matched, i.e. the window tail is a proper prefix of the
/// sequence.
#[inline]
pub fn match_at(window: &[u8], offset: usize, seq: &[u8]) -> MatchOutcome {
    debug_assert!(!seq.is_empty());

    let available = window.len().saturating_sub(offset);
    let check = available.min(seq.len());

    if window[offset..offset + check] != seq[..check] {
        return MatchOutcome::Mismatch;
    }

    if check < seq.len() {
        MatchOutcome::Insufficient
    } else {
        MatchOutcome::Match
    }
}

/// Test the pair's open-tag sequence at `offset`.
#[inline]
pub fn matches_open(window: &[u8], offset: usize, pair: &CompiledTagPair) -> MatchOutcome {
    match_at(window, offset, pair.open())
}

/// Test the pair's close-tag sequence at `offset`.
#[inline]
pub fn matches_close(window: &[u8], offset: usize, pair: &CompiledTagPair) -> MatchOutcome {
    match_at(window, offset, pair.close())
}
