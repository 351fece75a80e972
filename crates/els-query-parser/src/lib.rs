//! Query compiler for the els search engine
//!
//! Turns a small user-facing query language into a compiled matcher:
//! - `*` matches any run of characters, `?` exactly one
//! - `"…"` quoted spans are matched literally, wildcards included
//! - `|` is alternation between branches
//! - with `normalize_chars`, ASCII/Turkish look-alike letters are folded
//!   (`dunya` finds `dünya` and the other way around)
//! - with `use_regex`, the raw string is handed to the engine's native
//!   syntax instead; a syntax error there is recoverable - callers retry
//!   through the non-regex path
//!
//! Compilation is deterministic: the same query and flags always produce
//! byte-identical pattern source.
//!
//! # Examples
//!
//! ```
//! use els_query_parser::{compile, PatternFlags};
//!
//! let pattern = compile("mer*ba", PatternFlags::default()).unwrap();
//! assert!(pattern.regex().is_match("merhaba dünya"));
//!
//! let folded = compile(
//!     "dunya",
//!     PatternFlags {
//!         normalize_chars: true,
//!         ..PatternFlags::default()
//!     },
//! )
//! .unwrap();
//! assert!(folded.regex().is_match("merhaba dünya"));
//!
//! let phrase = compile("\"a*b\"", PatternFlags::default()).unwrap();
//! assert!(phrase.regex().is_match("literal a*b here"));
//! assert!(!phrase.regex().is_match("axxxb"));
//! ```

mod compiler;
pub mod equivalence;

pub use compiler::{CompileError, CompiledPattern, PatternFlags, compile};
