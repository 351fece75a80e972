//! Per-entry show/hide state machine.
//!
//! Hiding is an animated collapse the search pipeline never waits for: the
//! entry parks in `Hiding` and the host reports completion through
//! `finish_hide`. Showing a previously-hidden entry goes through `Showing`
//! (instantaneous show plus a forced layout recompute on the host side, so
//! the show transition starts from a consistent state) and completes via
//! `finish_show`.

use crate::types::{Entry, Visibility};

/// Filter mode: matched entries stay visible, unmatched ones collapse.
pub fn apply_filter_mode(entry: &mut Entry) {
    if entry.matched {
        show(entry);
    } else {
        hide(entry);
    }
}

/// Highlight mode: every entry is forced visible, matched or not.
pub fn apply_highlight_mode(entry: &mut Entry) {
    show(entry);
}

pub fn show(entry: &mut Entry) {
    match entry.visibility {
        Visibility::Hidden | Visibility::Hiding => entry.visibility = Visibility::Showing,
        Visibility::Visible | Visibility::Showing => {}
    }
}

fn hide(entry: &mut Entry) {
    match entry.visibility {
        Visibility::Visible | Visibility::Showing => entry.visibility = Visibility::Hiding,
        Visibility::Hiding | Visibility::Hidden => {}
    }
}

/// Animation-completion callback for the collapse transition.
pub fn finish_hide(entry: &mut Entry) {
    if entry.visibility == Visibility::Hiding {
        entry.visibility = Visibility::Hidden;
    }
}

/// Animation-completion callback for the show transition.
pub fn finish_show(entry: &mut Entry) {
    if entry.visibility == Visibility::Showing {
        entry.visibility = Visibility::Visible;
    }
}

/// Back to the neutral state before a new pass or mode switch: visible and
/// unmatched. No stale hidden entries may survive a mode switch.
pub fn reset(entry: &mut Entry) {
    entry.visibility = Visibility::Visible;
    entry.matched = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryContent, EntryId};

    fn entry() -> Entry {
        Entry::new(EntryId(1), EntryContent::from_text("text"))
    }

    #[test]
    fn test_unmatched_entry_collapses_through_hiding() {
        let mut e = entry();
        e.matched = false;

        apply_filter_mode(&mut e);
        assert_eq!(e.visibility, Visibility::Hiding);

        finish_hide(&mut e);
        assert_eq!(e.visibility, Visibility::Hidden);
    }

    #[test]
    fn test_hidden_entry_that_newly_matches_shows_again() {
        let mut e = entry();
        e.visibility = Visibility::Hidden;
        e.matched = true;

        apply_filter_mode(&mut e);
        assert_eq!(e.visibility, Visibility::Showing);

        finish_show(&mut e);
        assert_eq!(e.visibility, Visibility::Visible);
    }

    #[test]
    fn test_hide_during_pending_show_restarts_collapse() {
        let mut e = entry();
        e.visibility = Visibility::Showing;
        e.matched = false;

        apply_filter_mode(&mut e);
        assert_eq!(e.visibility, Visibility::Hiding);
    }

    #[test]
    fn test_highlight_mode_forces_everything_visible() {
        for start in [
            Visibility::Visible,
            Visibility::Hiding,
            Visibility::Hidden,
            Visibility::Showing,
        ] {
            let mut e = entry();
            e.visibility = start;
            apply_highlight_mode(&mut e);
            assert!(e.visibility.is_shown(), "from {start:?}");
        }
    }

    #[test]
    fn test_stale_finish_callbacks_are_noops() {
        let mut e = entry();
        e.visibility = Visibility::Visible;
        finish_hide(&mut e);
        assert_eq!(e.visibility, Visibility::Visible);

        e.visibility = Visibility::Hidden;
        finish_show(&mut e);
        assert_eq!(e.visibility, Visibility::Hidden);
    }

    #[test]
    fn test_reset_clears_visibility_and_matched() {
        let mut e = entry();
        e.visibility = Visibility::Hidden;
        e.matched = true;

        reset(&mut e);
        assert_eq!(e.visibility, Visibility::Visible);
        assert!(!e.matched);
    }
}
