use std::fmt;

use els_query_parser::PatternFlags;

/// Stable identity of one entry, assigned by the host's arrival feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One segment of an entry's content.
///
/// `Opaque` models inline non-text structure (formatting, embedded media).
/// It is never searched and never rewritten; it only acts as a boundary
/// between text runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextRun {
    Text(String),
    Highlight { text: String, active: bool },
    Opaque(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryContent {
    pub runs: Vec<TextRun>,
}

impl EntryContent {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::Text(text.into())],
        }
    }

    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }

    /// The searchable text of this entry: all text and highlight runs
    /// concatenated, opaque runs contribute nothing.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            match run {
                TextRun::Text(text) | TextRun::Highlight { text, .. } => out.push_str(text),
                TextRun::Opaque(_) => {}
            }
        }
        out
    }

    pub fn marker_count(&self) -> usize {
        self.runs
            .iter()
            .filter(|run| matches!(run, TextRun::Highlight { .. }))
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Animated collapse in progress; completes via `finish_hide`.
    Hiding,
    Hidden,
    /// Instantaneous show plus forced reflow; completes via `finish_show`.
    Showing,
}

impl Visibility {
    /// Whether the entry currently occupies space on the page.
    #[inline]
    pub fn is_shown(self) -> bool {
        matches!(self, Visibility::Visible | Visibility::Showing)
    }
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub id: EntryId,
    /// `None` means the host removed the underlying node mid-pass.
    pub content: Option<EntryContent>,
    pub visibility: Visibility,
    pub matched: bool,
}

impl Entry {
    pub fn new(id: EntryId, content: EntryContent) -> Self {
        Self {
            id,
            content: Some(content),
            visibility: Visibility::default(),
            matched: false,
        }
    }
}

/// The four user-facing toggles. `filter_mode` selects presentation
/// (hide non-matches vs. show all and mark); the other three feed the
/// pattern compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFlags {
    pub filter_mode: bool,
    pub case_sensitive: bool,
    pub use_regex: bool,
    pub normalize_chars: bool,
}

impl Default for SearchFlags {
    fn default() -> Self {
        Self {
            filter_mode: true,
            case_sensitive: false,
            use_regex: false,
            normalize_chars: false,
        }
    }
}

impl SearchFlags {
    #[inline]
    pub fn pattern_flags(&self) -> PatternFlags {
        PatternFlags {
            case_sensitive: self.case_sensitive,
            use_regex: self.use_regex,
            normalize_chars: self.normalize_chars,
        }
    }
}

/// Selector for `SearchSession::set_flag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFlag {
    FilterMode,
    CaseSensitive,
    UseRegex,
    NormalizeChars,
}

#[derive(Debug, Clone, Default)]
pub struct Query {
    pub raw: String,
    pub flags: SearchFlags,
}

/// One addressable highlight marker: the entry it lives in and its index
/// among that entry's markers, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRef {
    pub entry: EntryId,
    pub ordinal: usize,
}

/// What the host should render in the result counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultReadout {
    /// No search active.
    Inactive,
    /// Filter mode: number of currently-visible matching entries.
    Filtered(usize),
    /// Highlight mode: 1-based cursor position out of the total match
    /// count. `current` is 0 while no navigation has happened yet.
    Position { current: usize, total: usize },
    /// Highlight mode with zero matches.
    NoMatches,
}
