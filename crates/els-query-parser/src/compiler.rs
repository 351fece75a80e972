use crate::equivalence;
use regex::{Regex, RegexBuilder};

/// Flags that change how a raw query string is compiled.
///
/// `filter_mode` (hide non-matches vs. mark all) lives with the session, not
/// here - it changes presentation, never match semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternFlags {
    pub case_sensitive: bool,
    pub use_regex: bool,
    pub normalize_chars: bool,
}

/// A compiled matcher plus the flags it was built with.
///
/// Rebuilt from scratch on every query change; compiling the same query and
/// flags twice yields byte-identical pattern source (see `source`).
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    source: String,
    flags: PatternFlags,
}

impl CompiledPattern {
    #[inline]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// The expression source handed to the regex engine, kept for
    /// determinism assertions and debugging.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn flags(&self) -> PatternFlags {
        self.flags
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum CompileError {
    /// The raw string was handed to the native regex syntax
    /// (`use_regex = true`) and did not compile. Callers recover by
    /// retrying through the non-regex path.
    #[error("query is not a valid expression: {0}")]
    InvalidExpression(#[source] regex::Error),
}

/// Compile a non-empty raw query into a matcher.
///
/// With `use_regex` the raw string is compiled as-is with the engine's
/// native syntax. Otherwise the query language is expanded first:
/// `*` matches any run of characters, `?` exactly one character, `"…"`
/// spans are literal, `|` is alternation, and with `normalize_chars` every
/// letter with an equivalence-table entry matches both of its forms.
///
/// Empty queries mean "no search active" and must be short-circuited by the
/// caller - they are never compiled.
pub fn compile(raw: &str, flags: PatternFlags) -> Result<CompiledPattern, CompileError> {
    debug_assert!(!raw.is_empty(), "empty queries are never compiled");

    if flags.use_regex {
        // Native syntax untouched, only the case flag applies.
        return build(raw.to_owned(), flags, false);
    }

    build(expand(raw, flags), flags, true)
}

fn build(
    source: String,
    flags: PatternFlags,
    dot_matches_new_line: bool,
) -> Result<CompiledPattern, CompileError> {
    let regex = RegexBuilder::new(&source)
        .case_insensitive(!flags.case_sensitive)
        .dot_matches_new_line(dot_matches_new_line)
        .build()
        .map_err(CompileError::InvalidExpression)?;

    Ok(CompiledPattern {
        regex,
        source,
        flags,
    })
}

/// Expand the query language into regex source.
///
/// Single left-to-right pass tracking whether the cursor is inside a quoted
/// span. Inside quotes every character is literal - no wildcard expansion
/// and no folding. An unterminated quote is literal text up to end of
/// string, not an error.
fn expand(raw: &str, flags: PatternFlags) -> String {
    let mut out = String::with_capacity(raw.len() * 2);
    let mut in_quotes = false;

    for c in raw.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if in_quotes {
            push_literal(&mut out, c);
            continue;
        }

        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '|' => out.push('|'),
            _ => {
                if !flags.normalize_chars || !push_folded(&mut out, c, flags.case_sensitive) {
                    push_literal(&mut out, c);
                }
            }
        }
    }

    out
}

/// Emit the folding character class for `c`, ordered
/// `[original, equivalent, original-upper, equivalent-upper]` so the
/// compiled source is stable. Returns false when `c` has no table entry.
fn push_folded(out: &mut String, c: char, case_sensitive: bool) -> bool {
    if case_sensitive {
        let Some(eq) = equivalence::equivalent(c) else {
            return false;
        };
        out.push('[');
        out.push(c);
        out.push(eq);
        out.push(']');
        return true;
    }

    let original = equivalence::turkish_lower(c);
    let Some(eq) = equivalence::equivalent(original) else {
        return false;
    };

    out.push('[');
    out.push(original);
    out.push(eq);
    out.push(equivalence::turkish_upper(original));
    out.push(equivalence::turkish_upper(eq));
    out.push(']');
    true
}

#[inline]
fn push_literal(out: &mut String, c: char) {
    if is_meta_character(c) {
        out.push('\\');
    }
    out.push(c);
}

/// Characters with special meaning in the regex syntax. `*`, `?` and `|`
/// are included: they carry custom meaning outside quotes and must still be
/// escaped when they appear inside a quoted span.
#[inline]
fn is_meta_character(c: char) -> bool {
    matches!(
        c,
        '\\' | '.'
            | '+'
            | '*'
            | '?'
            | '('
            | ')'
            | '|'
            | '['
            | ']'
            | '{'
            | '}'
            | '^'
            | '$'
            | '#'
            | '&'
            | '-'
            | '~'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> PatternFlags {
        PatternFlags::default()
    }

    #[test]
    fn test_literal_query_matches_substring_only() {
        let pattern = compile("foo.bar", flags()).unwrap();
        assert!(pattern.regex().is_match("say foo.bar here"));
        // The dot must be literal, not "any char"
        assert!(!pattern.regex().is_match("fooXbar"));
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let pattern = compile("hello", flags()).unwrap();
        assert!(pattern.regex().is_match("say HELLO"));
    }

    #[test]
    fn test_case_sensitive_flag() {
        let pattern = compile(
            "hello",
            PatternFlags {
                case_sensitive: true,
                ..flags()
            },
        )
        .unwrap();
        assert!(!pattern.regex().is_match("say HELLO"));
        assert!(pattern.regex().is_match("say hello"));
    }

    #[test]
    fn test_star_wildcard() {
        let pattern = compile("a*b", flags()).unwrap();
        assert_eq!(pattern.source(), "a.*b");
        assert!(pattern.regex().is_match("axyzb"));
        assert!(pattern.regex().is_match("ab"));
        // "any character" crosses line breaks
        assert!(pattern.regex().is_match("a\nb"));
    }

    #[test]
    fn test_question_wildcard_is_exactly_one_char() {
        let pattern = compile("a?b", flags()).unwrap();
        assert_eq!(pattern.source(), "a.b");
        assert!(pattern.regex().is_match("axb"));
        assert!(!pattern.regex().is_match("ab"));
        assert!(!pattern.regex().is_match("axxb"));
    }

    #[test]
    fn test_quoted_span_is_literal() {
        let pattern = compile("\"a*b\"", flags()).unwrap();
        assert_eq!(pattern.source(), "a\\*b");
        assert!(pattern.regex().is_match("a*b"));
        assert!(!pattern.regex().is_match("axyzb"));
    }

    #[test]
    fn test_unterminated_quote_is_literal_to_end() {
        let pattern = compile("\"a*b", flags()).unwrap();
        assert_eq!(pattern.source(), "a\\*b");
        assert!(pattern.regex().is_match("a*b"));
    }

    #[test]
    fn test_alternation_passes_through() {
        let pattern = compile("foo|bar", flags()).unwrap();
        assert_eq!(pattern.source(), "foo|bar");
        assert!(pattern.regex().is_match("it is foo"));
        assert!(pattern.regex().is_match("it is bar"));
        assert!(!pattern.regex().is_match("it is baz"));
    }

    #[test]
    fn test_folding_class_order_is_stable() {
        let normalize = PatternFlags {
            normalize_chars: true,
            ..flags()
        };
        let pattern = compile("dünya", normalize).unwrap();
        assert_eq!(pattern.source(), "d[üuÜU]nya");

        let again = compile("dünya", normalize).unwrap();
        assert_eq!(pattern.source(), again.source());
    }

    #[test]
    fn test_folding_is_symmetric() {
        let normalize = PatternFlags {
            normalize_chars: true,
            ..flags()
        };
        let ascii = compile("dunya", normalize).unwrap();
        let turkish = compile("dünya", normalize).unwrap();

        for text in ["merhaba dünya", "merhaba dunya", "DÜNYA turu"] {
            assert!(ascii.regex().is_match(text), "ascii query vs {text:?}");
            assert!(turkish.regex().is_match(text), "turkish query vs {text:?}");
        }
    }

    #[test]
    fn test_case_sensitive_folding_keeps_case() {
        let pattern = compile(
            "ış",
            PatternFlags {
                case_sensitive: true,
                normalize_chars: true,
                ..flags()
            },
        )
        .unwrap();
        assert_eq!(pattern.source(), "[ıi][şs]");
        assert!(pattern.regex().is_match("is"));
        assert!(!pattern.regex().is_match("IS"));
    }

    #[test]
    fn test_no_folding_inside_quotes() {
        let normalize = PatternFlags {
            normalize_chars: true,
            ..flags()
        };
        let pattern = compile("\"dünya\"", normalize).unwrap();
        assert_eq!(pattern.source(), "dünya");
        assert!(!pattern.regex().is_match("dunya"));
    }

    #[test]
    fn test_native_regex_path() {
        let pattern = compile(
            r"\d+",
            PatternFlags {
                use_regex: true,
                ..flags()
            },
        )
        .unwrap();
        assert!(pattern.regex().is_match("entry 42"));
        assert!(!pattern.regex().is_match("no digits"));
    }

    #[test]
    fn test_invalid_native_regex_is_recoverable() {
        let result = compile(
            "[unclosed",
            PatternFlags {
                use_regex: true,
                ..flags()
            },
        );
        assert!(matches!(result, Err(CompileError::InvalidExpression(_))));

        // The same raw string compiles fine through the non-regex path,
        // which is exactly the fallback callers perform.
        let fallback = compile("[unclosed", flags()).unwrap();
        assert!(fallback.regex().is_match("a [unclosed bracket"));
    }
}
