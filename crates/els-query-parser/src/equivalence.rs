//! Static table of letter look-alikes used for character folding.
//!
//! The searched content is written in Turkish, where users routinely type
//! the plain ASCII letter instead of its diacritic form (and vice versa).
//! The table is symmetric: looking up either member of a pair yields the
//! other one.

/// Lowercase equivalence pairs, ASCII form first.
const PAIRS: &[(char, char)] = &[
    ('c', 'ç'),
    ('g', 'ğ'),
    ('i', 'ı'),
    ('o', 'ö'),
    ('s', 'ş'),
    ('u', 'ü'),
];

/// Look up the folded counterpart of `c`, in either direction.
///
/// Uppercase input is folded through the lowercase table and the result is
/// uppercased again, so `Ü` maps to `U` just like `ü` maps to `u`.
pub fn equivalent(c: char) -> Option<char> {
    if let Some(eq) = lower_equivalent(c) {
        return Some(eq);
    }
    let lower = turkish_lower(c);
    if lower != c {
        return lower_equivalent(lower).map(turkish_upper);
    }
    None
}

#[inline]
fn lower_equivalent(c: char) -> Option<char> {
    PAIRS.iter().find_map(|&(a, b)| {
        if c == a {
            Some(b)
        } else if c == b {
            Some(a)
        } else {
            None
        }
    })
}

/// Uppercase a single char with Turkish dotted/dotless `i` handling.
///
/// `char::to_uppercase` maps `i` to `I`, which is wrong for Turkish text:
/// the uppercase of `i` is `İ` and the uppercase of `ı` is `I`.
pub fn turkish_upper(c: char) -> char {
    match c {
        'i' => 'İ',
        'ı' => 'I',
        _ => c.to_uppercase().next().unwrap_or(c),
    }
}

/// Lowercase a single char with Turkish dotted/dotless `i` handling.
pub fn turkish_lower(c: char) -> char {
    match c {
        'İ' => 'i',
        'I' => 'ı',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}
