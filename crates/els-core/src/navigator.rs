//! Global ordered list of highlight markers and the cyclic cursor over it.
//!
//! Markers are indexed in scan order: existing entries first, then arrival
//! order for entries that showed up while the search was active.

use crate::types::{EntryId, MatchRef};

#[derive(Debug, Clone, Default)]
pub struct MatchNavigator {
    matches: Vec<MatchRef>,
    /// `None` until navigation happens (the host renders this as "-1").
    current: Option<usize>,
}

impl MatchNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the index wholesale after a full re-search. Resets the
    /// cursor to "no navigation yet".
    pub fn rebuild(&mut self, matches: Vec<MatchRef>) {
        self.matches = matches;
        self.current = None;
    }

    /// Extend the index with markers from newly-arrived entries without
    /// disturbing the cursor.
    pub fn append(&mut self, matches: impl IntoIterator<Item = MatchRef>) {
        self.matches.extend(matches);
    }

    /// Drop every marker belonging to a removed entry. The cursor keeps
    /// pointing at the same marker when it survives, otherwise resets.
    pub fn remove_entry(&mut self, entry: EntryId) {
        let current_ref = self.current.map(|i| self.matches[i]);
        self.matches.retain(|m| m.entry != entry);
        self.current = current_ref
            .filter(|r| r.entry != entry)
            .and_then(|r| self.matches.iter().position(|m| *m == r));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches(&self) -> &[MatchRef] {
        &self.matches
    }

    pub fn current(&self) -> Option<MatchRef> {
        self.current.map(|i| self.matches[i])
    }

    /// 1-based cursor position and total, for the "m/n" readout.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current.map(|i| (i + 1, self.matches.len()))
    }

    /// Advance the cursor cyclically. Safe no-op on an empty index.
    pub fn next(&mut self) -> Option<MatchRef> {
        if self.matches.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(i) => (i + 1) % self.matches.len(),
            None => 0,
        };
        self.current = Some(next);
        Some(self.matches[next])
    }

    /// Retreat the cursor cyclically. Safe no-op on an empty index.
    pub fn prev(&mut self) -> Option<MatchRef> {
        if self.matches.is_empty() {
            return None;
        }
        let prev = match self.current {
            Some(0) | None => self.matches.len() - 1,
            Some(i) => i - 1,
        };
        self.current = Some(prev);
        Some(self.matches[prev])
    }
}
