//! Applies a compiled pattern to one entry's text.
//!
//! Matching is purely functional: every call scans with its own local
//! cursor and returns a complete range list, so there is no shared matcher
//! state between calls.

use els_query_parser::CompiledPattern;
use smallvec::SmallVec;

/// Half-open byte range `[start, end)` of one match within a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

/// Stack-allocated for the common case of a handful of hits per run.
pub type MatchRanges = SmallVec<[MatchRange; 8]>;

#[inline]
pub fn is_match(text: &str, pattern: &CompiledPattern) -> bool {
    pattern.regex().is_match(text)
}

/// Find all non-overlapping matches left to right.
///
/// The scan resumes after the previous match's end. A zero-length hit
/// (wildcard patterns can match the empty string) advances the cursor by
/// one character and is not recorded, which guarantees termination and
/// keeps ranges non-overlapping.
pub fn find_ranges(text: &str, pattern: &CompiledPattern) -> MatchRanges {
    let mut ranges = MatchRanges::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(found) = pattern.regex().find_at(text, pos) else {
            break;
        };

        if found.start() == found.end() {
            pos = advance_one_char(text, found.end());
            continue;
        }

        ranges.push(MatchRange {
            start: found.start(),
            end: found.end(),
        });
        pos = found.end();
    }

    ranges
}

/// Next UTF-8 boundary after `pos`; past-the-end when `pos` is already at
/// the end of the string, which terminates the scan loop.
#[inline]
fn advance_one_char(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len() + 1)
}
