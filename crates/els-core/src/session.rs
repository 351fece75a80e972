//! Search session controller.
//!
//! Owns the query (raw text + flags), the registry of known entries, the
//! compiled pattern of the current pass and the match navigator, and
//! orchestrates the full pipeline on every accepted change: clear
//! highlights, reset visibility, recompile, re-match, re-render, rebuild
//! the navigator.
//!
//! Input debouncing is explicit last-writer-wins: `queue_input` hands the
//! caller a generation, the host's timer calls `flush` with it, and a flush
//! whose generation went stale (newer input, a toggle, escape) is abandoned
//! silently. Only one pass ever mutates session state at a time.

use crate::error::Error;
use crate::highlight;
use crate::matcher;
use crate::navigator::MatchNavigator;
use crate::types::{
    Entry, EntryContent, EntryId, MatchRef, Query, ResultReadout, SearchFlag, SearchFlags,
};
use crate::visibility;
use ahash::AHashMap;
use els_query_parser::{CompiledPattern, PatternFlags, compile};
use tracing::{debug, info, instrument, warn};

pub type Generation = u64;

#[derive(Debug, Clone)]
struct PendingInput {
    raw: String,
    generation: Generation,
}

#[derive(Debug, Default)]
pub struct SearchSession {
    query: Query,
    /// Entries in arrival order; `index_of` maps identity to position.
    entries: Vec<Entry>,
    index_of: AHashMap<EntryId, usize>,
    navigator: MatchNavigator,
    /// Pattern of the current pass; `None` means no search is active.
    pattern: Option<CompiledPattern>,
    generation: Generation,
    pending: Option<PendingInput>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn flags(&self) -> SearchFlags {
        self.query.flags
    }

    /// Whether a compiled pattern is currently applied to the entry list.
    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.index_of.get(&id).map(|&i| &self.entries[i])
    }

    pub fn navigator(&self) -> &MatchNavigator {
        &self.navigator
    }

    // --- entry arrival feed -------------------------------------------------

    /// Register newly-arrived entries. Registration is idempotent: entries
    /// already known by identity are ignored. While a search is active the
    /// per-entry pipeline runs against the *current* compiled pattern only
    /// and new markers are appended to the navigator in arrival order -
    /// previously rendered highlights and the cursor are untouched.
    #[instrument(skip_all)]
    pub fn register_entries(&mut self, batch: impl IntoIterator<Item = (EntryId, EntryContent)>) {
        let mut appended: Vec<MatchRef> = Vec::new();
        let mut registered = 0usize;
        let filter_mode = self.query.flags.filter_mode;

        for (id, content) in batch {
            if self.index_of.contains_key(&id) {
                continue;
            }

            let mut entry = Entry::new(id, content);
            if let Some(pattern) = &self.pattern {
                run_entry_pipeline(&mut entry, pattern, filter_mode, &mut appended);
            }

            self.index_of.insert(id, self.entries.len());
            self.entries.push(entry);
            registered += 1;
        }

        if !appended.is_empty() {
            self.navigator.append(appended);
        }
        debug!(registered, total = self.entries.len(), "entries registered");
    }

    /// The host reports that the page removed an entry. Its markers leave
    /// the navigator; other entries' state is untouched.
    pub fn remove_entry(&mut self, id: EntryId) {
        let Some(index) = self.index_of.remove(&id) else {
            return;
        };
        self.entries.remove(index);
        for (i, entry) in self.entries.iter().enumerate().skip(index) {
            self.index_of.insert(entry.id, i);
        }
        self.navigator.remove_entry(id);
        debug!(%id, "entry removed from registry");
    }

    /// Simulates the host tearing the entry's node out mid-pass. Later
    /// highlight/cleanup operations on it degrade to a logged skip.
    pub fn detach_content(&mut self, id: EntryId) {
        if let Some(&index) = self.index_of.get(&id) {
            self.entries[index].content = None;
        }
    }

    // --- debounced input ----------------------------------------------------

    /// Record a keystroke's raw value and return the generation the host's
    /// debounce timer must pass back to `flush`.
    pub fn queue_input(&mut self, raw: impl Into<String>) -> Generation {
        self.generation += 1;
        let generation = self.generation;
        self.pending = Some(PendingInput {
            raw: raw.into(),
            generation,
        });
        generation
    }

    /// Fire the debounced pass. A stale generation means newer input (or a
    /// toggle, or escape) superseded this pass - it is abandoned silently.
    pub fn flush(&mut self, generation: Generation) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "stale debounce flush abandoned"
            );
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };
        self.query.raw = pending.raw;
        self.perform_search();
    }

    /// Pull any pending keystroke text into the query and invalidate its
    /// scheduled flush, so a synchronous pass cannot interleave with it.
    fn adopt_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.generation += 1;
            self.query.raw = pending.raw;
        }
    }

    // --- pipeline -----------------------------------------------------------

    /// Run the full pipeline against every known entry with the current
    /// query. An empty query short-circuits to `reset_search` - it is
    /// never compiled.
    #[instrument(skip(self), fields(query = %self.query.raw, entries = self.entries.len()))]
    pub fn perform_search(&mut self) {
        if self.query.raw.is_empty() {
            debug!("empty query, resetting search");
            self.reset_search();
            return;
        }

        self.clear_pass_state();

        let Some(pattern) = self.compile_query() else {
            // Both compiler paths failed; behave like an empty query.
            self.navigator.rebuild(Vec::new());
            self.pattern = None;
            return;
        };

        let filter_mode = self.query.flags.filter_mode;
        let mut markers: Vec<MatchRef> = Vec::new();
        for entry in &mut self.entries {
            run_entry_pipeline(entry, &pattern, filter_mode, &mut markers);
        }

        info!(
            matches = markers.len(),
            filter_mode, "search pass complete"
        );
        self.navigator.rebuild(markers);
        self.pattern = Some(pattern);

        if !filter_mode && !self.navigator.is_empty() {
            // Highlight mode lands on the first match right away
            self.advance(true);
        }
    }

    /// Empty-query fast path: clear highlights, show everything, empty the
    /// navigator. Known entries stay registered.
    pub fn reset_search(&mut self) {
        self.clear_pass_state();
        self.navigator.rebuild(Vec::new());
        self.pattern = None;
    }

    /// Flip one of the four flags and re-run the pipeline synchronously,
    /// without debounce. Any pending debounced pass is cancelled, adopting
    /// its raw text first.
    pub fn set_flag(&mut self, flag: SearchFlag, value: bool) {
        self.adopt_pending();
        match flag {
            SearchFlag::FilterMode => self.query.flags.filter_mode = value,
            SearchFlag::CaseSensitive => self.query.flags.case_sensitive = value,
            SearchFlag::UseRegex => self.query.flags.use_regex = value,
            SearchFlag::NormalizeChars => self.query.flags.normalize_chars = value,
        }
        self.perform_search();
    }

    // --- keyboard contract --------------------------------------------------

    /// Enter semantics: in filter mode with a non-empty query, switch to
    /// highlight mode and re-search; in highlight mode, navigate (backward
    /// with the modifier held). Returns the marker to scroll to, centered.
    pub fn commit(&mut self, backwards: bool) -> Option<MatchRef> {
        if self.query.flags.filter_mode {
            self.adopt_pending();
            if self.query.raw.is_empty() {
                return None;
            }
            self.query.flags.filter_mode = false;
            self.perform_search();
            return self.navigator.current();
        }

        if backwards { self.prev() } else { self.next() }
    }

    /// Escape semantics: clear the query and reset. Any scheduled
    /// debounced pass becomes stale.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.generation += 1;
        self.query.raw.clear();
        self.reset_search();
    }

    // --- navigation ---------------------------------------------------------

    /// Move to the next match cyclically. Returns the marker the host
    /// should scroll into view, centered. Safe no-op with zero matches.
    pub fn next(&mut self) -> Option<MatchRef> {
        self.advance(true)
    }

    /// Move to the previous match cyclically.
    pub fn prev(&mut self) -> Option<MatchRef> {
        self.advance(false)
    }

    fn advance(&mut self, forward: bool) -> Option<MatchRef> {
        let previous = self.navigator.current();
        let target = if forward {
            self.navigator.next()?
        } else {
            self.navigator.prev()?
        };

        // At most one marker carries the active flag at any time
        if let Some(previous) = previous {
            self.set_marker_active(previous, false);
        }
        self.set_marker_active(target, true);
        Some(target)
    }

    fn set_marker_active(&mut self, marker: MatchRef, active: bool) {
        let Some(&index) = self.index_of.get(&marker.entry) else {
            return;
        };
        let Some(content) = self.entries[index].content.as_mut() else {
            warn!(id = %marker.entry, "marker parent disappeared, skipping active toggle");
            return;
        };
        if !highlight::set_marker_active(content, marker.ordinal, active) {
            warn!(id = %marker.entry, ordinal = marker.ordinal, "marker ordinal out of range");
        }
    }

    // --- host callbacks and readout ------------------------------------------

    /// The collapse animation for `id` finished.
    pub fn finish_hide(&mut self, id: EntryId) {
        if let Some(&index) = self.index_of.get(&id) {
            visibility::finish_hide(&mut self.entries[index]);
        }
    }

    /// The show transition for `id` finished.
    pub fn finish_show(&mut self, id: EntryId) {
        if let Some(&index) = self.index_of.get(&id) {
            visibility::finish_show(&mut self.entries[index]);
        }
    }

    /// What the result counter should display right now.
    pub fn result_readout(&self) -> ResultReadout {
        if self.pattern.is_none() {
            return ResultReadout::Inactive;
        }

        if self.query.flags.filter_mode {
            let visible = self
                .entries
                .iter()
                .filter(|e| e.matched && e.visibility.is_shown())
                .count();
            return ResultReadout::Filtered(visible);
        }

        match (self.navigator.position(), self.navigator.len()) {
            (Some((current, total)), _) => ResultReadout::Position { current, total },
            (None, 0) => ResultReadout::NoMatches,
            (None, total) => ResultReadout::Position { current: 0, total },
        }
    }

    // --- internals ----------------------------------------------------------

    /// Undo the previous pass on every entry: strip highlight markers and
    /// restore visibility. A detached entry is logged and skipped without
    /// corrupting the others.
    fn clear_pass_state(&mut self) {
        for entry in &mut self.entries {
            match entry.content.as_mut() {
                Some(content) => highlight::clear_highlights(content),
                None => warn!(id = %entry.id, "content disappeared, skipping highlight cleanup"),
            }
            visibility::reset(entry);
        }
    }

    /// Compile the current query. A native-syntax failure falls back to
    /// the plain compiler path instead of failing the search.
    fn compile_query(&self) -> Option<CompiledPattern> {
        let flags = self.query.flags.pattern_flags();
        match compile(&self.query.raw, flags) {
            Ok(pattern) => Some(pattern),
            Err(error) if flags.use_regex => {
                warn!(%error, "native expression rejected, retrying through plain syntax");
                let fallback = PatternFlags {
                    use_regex: false,
                    ..flags
                };
                compile(&self.query.raw, fallback).ok()
            }
            Err(error) => {
                warn!(%error, "query failed to compile");
                None
            }
        }
    }
}

/// Match one entry against the pattern, render its highlights and apply
/// the mode's visibility rule. Failures degrade per entry: no extractable
/// text means "treat as unmatched", a missing marker parent means "skip".
fn run_entry_pipeline(
    entry: &mut Entry,
    pattern: &CompiledPattern,
    filter_mode: bool,
    markers: &mut Vec<MatchRef>,
) {
    match apply_entry(entry, pattern, filter_mode) {
        Ok(count) => {
            markers.extend((0..count).map(|ordinal| MatchRef {
                entry: entry.id,
                ordinal,
            }));
        }
        Err(Error::MissingContent(id)) => {
            debug!(%id, "no extractable text, treated as non-matching");
            entry.matched = false;
            apply_mode(entry, filter_mode);
        }
        Err(error) => warn!(%error, "skipping entry during search pass"),
    }
}

fn apply_entry(
    entry: &mut Entry,
    pattern: &CompiledPattern,
    filter_mode: bool,
) -> crate::error::Result<usize> {
    let text = match entry.content.as_ref() {
        None => return Err(Error::MissingMarkerParent(entry.id)),
        Some(content) => content.text(),
    };
    if text.is_empty() {
        return Err(Error::MissingContent(entry.id));
    }

    entry.matched = matcher::is_match(&text, pattern);

    let mut markers = 0;
    if entry.matched
        && let Some(content) = entry.content.as_mut()
    {
        markers = highlight::highlight_content(content, pattern);
    }

    apply_mode(entry, filter_mode);
    Ok(markers)
}

#[inline]
fn apply_mode(entry: &mut Entry, filter_mode: bool) {
    if filter_mode {
        visibility::apply_filter_mode(entry);
    } else {
        visibility::apply_highlight_mode(entry);
    }
}
