//! Reversible structural rewrite of an entry's text runs.
//!
//! Highlighting replaces each match range inside a plain text run with a
//! `Highlight` run wrapping exactly the matched text; the surrounding text
//! is preserved verbatim. Clearing merges everything back into plain text
//! runs (structural normalization), so highlight/clear can be applied any
//! number of times. Opaque runs are never touched and never crossed.

use crate::matcher::{self, MatchRanges};
use crate::types::{EntryContent, TextRun};
use els_query_parser::CompiledPattern;

/// Wrap every match inside the content's text runs in a highlight marker.
///
/// Text runs with zero matches are left structurally untouched. Returns
/// the number of markers inserted, in scan order - the same order the
/// navigator indexes them by ordinal.
pub fn highlight_content(content: &mut EntryContent, pattern: &CompiledPattern) -> usize {
    let mut markers = 0;
    let mut rebuilt: Vec<TextRun> = Vec::with_capacity(content.runs.len());

    for run in content.runs.drain(..) {
        match run {
            TextRun::Text(text) => {
                let ranges = matcher::find_ranges(&text, pattern);
                if ranges.is_empty() {
                    rebuilt.push(TextRun::Text(text));
                } else {
                    markers += ranges.len();
                    split_text_run(&mut rebuilt, &text, &ranges);
                }
            }
            other => rebuilt.push(other),
        }
    }

    content.runs = rebuilt;
    markers
}

fn split_text_run(out: &mut Vec<TextRun>, text: &str, ranges: &MatchRanges) {
    let mut cursor = 0;

    for range in ranges {
        if range.start > cursor {
            out.push(TextRun::Text(text[cursor..range.start].to_owned()));
        }
        out.push(TextRun::Highlight {
            text: text[range.start..range.end].to_owned(),
            active: false,
        });
        cursor = range.end;
    }

    if cursor < text.len() {
        out.push(TextRun::Text(text[cursor..].to_owned()));
    }
}

/// Restore plain text structure: every maximal sequence of text and
/// highlight runs collapses into a single text run equal to their
/// concatenation. Idempotent; a never-highlighted content is unchanged.
pub fn clear_highlights(content: &mut EntryContent) {
    let mut rebuilt: Vec<TextRun> = Vec::with_capacity(content.runs.len());
    let mut pending = String::new();

    for run in content.runs.drain(..) {
        match run {
            TextRun::Text(text) => pending.push_str(&text),
            TextRun::Highlight { text, .. } => pending.push_str(&text),
            TextRun::Opaque(opaque) => {
                if !pending.is_empty() {
                    rebuilt.push(TextRun::Text(std::mem::take(&mut pending)));
                }
                rebuilt.push(TextRun::Opaque(opaque));
            }
        }
    }

    if !pending.is_empty() {
        rebuilt.push(TextRun::Text(pending));
    }

    content.runs = rebuilt;
}

/// Toggle the active visual flag on the marker with the given ordinal.
/// Returns false when no such marker exists.
pub fn set_marker_active(content: &mut EntryContent, ordinal: usize, active: bool) -> bool {
    let mut seen = 0;
    for run in &mut content.runs {
        if let TextRun::Highlight {
            active: active_flag,
            ..
        } = run
        {
            if seen == ordinal {
                *active_flag = active;
                return true;
            }
            seen += 1;
        }
    }
    false
}
