//! els-core - incremental search, filter and highlight engine
//!
//! Applies a compiled query to a live, growing list of text entries. Two
//! mutually exclusive presentation modes: filter (non-matching entries
//! collapse away) and highlight (everything stays visible, matches are
//! wrapped in navigable markers). Entries that arrive while a search is
//! active are matched against the current pattern only, without touching
//! what is already rendered.
//!
//! The session is a single-threaded state machine: the host feeds it
//! arrivals, debounced input and animation-completion callbacks, and reads
//! entry visibility, highlight runs and the result counter back out of it.

pub mod error;
pub mod highlight;
pub mod matcher;
pub mod navigator;
pub mod session;
pub mod types;
pub mod visibility;

pub use error::{Error, Result};
pub use matcher::{MatchRange, MatchRanges};
pub use navigator::MatchNavigator;
pub use session::{Generation, SearchSession};
pub use types::{
    Entry, EntryContent, EntryId, MatchRef, Query, ResultReadout, SearchFlag, SearchFlags,
    TextRun, Visibility,
};

// Re-export the query compiler so hosts depend on one crate
pub use els_query_parser::{CompileError, CompiledPattern, PatternFlags, compile};
